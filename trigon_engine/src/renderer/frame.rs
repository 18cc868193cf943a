/// Per-frame command sequencing

use crate::renderer::{ClearFlags, GraphicsDevice, Mesh, ShaderProgram, Viewport};

/// Records the fixed per-frame sequence: clear, bind program, bind mesh, draw
///
/// Presenting the frame is the window surface's job (`swap_buffers`).
pub struct FrameRenderer<D: GraphicsDevice> {
    device: D,
    clear_color: [f32; 4],
    viewport: Option<Viewport>,
    frames_rendered: u64,
}

impl<D: GraphicsDevice> FrameRenderer<D> {
    pub fn new(device: &D, clear_color: [f32; 4]) -> Self {
        Self {
            device: device.clone(),
            clear_color,
            viewport: None,
            frames_rendered: 0,
        }
    }

    /// Issue one frame: exactly one indexed draw of the whole mesh
    pub fn render(&mut self, program: &ShaderProgram<D>, mesh: &Mesh<D>) {
        self.device.clear(ClearFlags::COLOR, self.clear_color);
        self.device.use_program(Some(program.raw()));
        self.device.bind_mesh(Some(mesh.raw()));
        self.device.draw_indexed(mesh.index_count());
        self.frames_rendered += 1;
    }

    /// Follow a framebuffer resize; zero-sized framebuffers are ignored
    ///
    /// Returns the resulting viewport, `None` when the size was ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<Viewport> {
        let viewport = Viewport::from_framebuffer_size(width, height)?;
        if self.viewport != Some(viewport) {
            self.device.set_viewport(viewport);
            self.viewport = Some(viewport);
            crate::engine_debug!("trigon::Frame", "Viewport set to {}x{}", width, height);
        }
        Some(viewport)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
