/// OpenGlGraphicsDevice - glow implementation of the GraphicsDevice trait

use std::rc::Rc;
use glow::HasContext;
use trigon_engine::trigon::{GraphicsDevice, Result};
use trigon_engine::trigon::render::{
    ClearFlags, MeshData, ShaderStage, Viewport,
    POSITION_ATTRIBUTE, POSITION_COMPONENTS, VERTEX_STRIDE,
};
use trigon_engine::{engine_debug, engine_err, engine_info};

/// OpenGL device
///
/// Wraps a loaded `glow::Context`. Clones share the same context. All calls
/// must happen on the thread where the context is current, which is why the
/// context sits behind an `Rc` (the device is neither `Send` nor `Sync`).
#[derive(Clone)]
pub struct OpenGlGraphicsDevice {
    gl: Rc<glow::Context>,
}

/// Vertex array plus its vertex and element buffers
#[derive(Debug)]
pub struct OpenGlMesh {
    vertex_array: glow::VertexArray,
    vertex_buffer: glow::Buffer,
    element_buffer: glow::Buffer,
    index_count: u32,
}

impl OpenGlMesh {
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// Map an engine shader stage to the GL shader type enum
pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
        ShaderStage::Compute => glow::COMPUTE_SHADER,
    }
}

/// Map engine clear flags to a GL clear mask
pub(crate) fn clear_flags_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

impl OpenGlGraphicsDevice {
    /// Wrap a loaded context
    ///
    /// # Safety
    ///
    /// `gl` must belong to a context that is current on the calling thread
    /// and stays current for as long as this device (or a clone) is used.
    pub unsafe fn from_context(gl: glow::Context) -> Self {
        let device = Self { gl: Rc::new(gl) };
        let version = device.gl.get_parameter_string(glow::VERSION);
        let renderer = device.gl.get_parameter_string(glow::RENDERER);
        engine_info!("trigon::opengl", "OpenGL {} on {}", version, renderer);
        device
    }

    /// Underlying glow context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl GraphicsDevice for OpenGlGraphicsDevice {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Mesh = OpenGlMesh;

    // ===== SHADERS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader> {
        unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) }
            .map_err(|e| engine_err!("trigon::opengl", "Failed to create {} shader object: {}", stage, e))
    }

    fn shader_source(&self, shader: glow::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&self, shader: glow::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<glow::Program> {
        unsafe { self.gl.create_program() }
            .map_err(|e| engine_err!("trigon::opengl", "Failed to create program object: {}", e))
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&self, program: glow::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    // ===== MESHES =====

    fn create_mesh(&self, data: &MeshData) -> Result<OpenGlMesh> {
        unsafe {
            let vertex_array = self.gl.create_vertex_array()
                .map_err(|e| engine_err!("trigon::opengl", "Failed to create vertex array: {}", e))?;

            let vertex_buffer = match self.gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    self.gl.delete_vertex_array(vertex_array);
                    return Err(engine_err!("trigon::opengl", "Failed to create vertex buffer: {}", e));
                }
            };

            let element_buffer = match self.gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(e) => {
                    self.gl.delete_buffer(vertex_buffer);
                    self.gl.delete_vertex_array(vertex_array);
                    return Err(engine_err!("trigon::opengl", "Failed to create element buffer: {}", e));
                }
            };

            self.gl.bind_vertex_array(Some(vertex_array));

            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data.vertex_bytes(), glow::STATIC_DRAW);

            // Element buffer binding is recorded in the vertex array state
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(element_buffer));
            self.gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, data.index_bytes(), glow::STATIC_DRAW);

            self.gl.vertex_attrib_pointer_f32(
                POSITION_ATTRIBUTE,
                POSITION_COMPONENTS,
                glow::FLOAT,
                false,
                VERTEX_STRIDE,
                0,
            );
            self.gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);

            // Unbind the vertex array first so it keeps its element buffer
            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            engine_debug!("trigon::opengl", "Created vertex array {:?} ({} bytes of vertices, {} bytes of indices)",
                vertex_array, data.vertex_bytes().len(), data.index_bytes().len());

            Ok(OpenGlMesh {
                vertex_array,
                vertex_buffer,
                element_buffer,
                index_count: data.index_count(),
            })
        }
    }

    fn delete_mesh(&self, mesh: &OpenGlMesh) {
        unsafe {
            self.gl.delete_vertex_array(mesh.vertex_array);
            self.gl.delete_buffer(mesh.vertex_buffer);
            self.gl.delete_buffer(mesh.element_buffer);
        }
    }

    // ===== FRAME =====

    fn set_viewport(&self, viewport: Viewport) {
        unsafe { self.gl.viewport(viewport.x, viewport.y, viewport.width, viewport.height) }
    }

    fn clear(&self, flags: ClearFlags, color: [f32; 4]) {
        unsafe {
            self.gl.clear_color(color[0], color[1], color[2], color[3]);
            self.gl.clear(clear_flags_to_gl(flags));
        }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn bind_mesh(&self, mesh: Option<&OpenGlMesh>) {
        unsafe { self.gl.bind_vertex_array(mesh.map(|m| m.vertex_array)) }
    }

    fn draw_indexed(&self, index_count: u32) {
        let count = i32::try_from(index_count).unwrap_or(i32::MAX);
        unsafe { self.gl.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0) }
    }
}

#[cfg(test)]
#[path = "opengl_format_tests.rs"]
mod tests;
