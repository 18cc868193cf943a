/// GraphicsDevice trait - the driver capability surface
///
/// Every GPU operation goes through an explicit device value instead of the
/// driver's ambient "currently bound" state, so binding order shows up in
/// call signatures. Implemented by the OpenGL backend and by the test mock.

use std::fmt;
use bitflags::bitflags;
use crate::error::Result;
use crate::renderer::{MeshData, ShaderStage};

bitflags! {
    /// Framebuffer planes cleared by [`GraphicsDevice::clear`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Viewport rectangle in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Full-framebuffer viewport, or `None` for a zero-sized (minimized) surface
    pub fn from_framebuffer_size(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x: 0,
            y: 0,
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        })
    }
}

/// Driver capability surface
///
/// Handles are plain driver names; ownership and release are handled by the
/// RAII wrappers (`CompiledShader`, `ShaderProgram`, `Mesh`), which keep a
/// clone of the device. Clones must therefore be cheap and refer to the same
/// context.
pub trait GraphicsDevice: Clone {
    /// Driver shader object name
    type Shader: Copy + PartialEq + fmt::Debug;
    /// Driver program object name
    type Program: Copy + PartialEq + fmt::Debug;
    /// Uploaded mesh objects (vertex array + buffers)
    type Mesh: fmt::Debug;

    // ===== SHADERS =====

    /// Allocate an empty shader object for `stage`
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader>;

    /// Replace the shader's source with `source` (one contiguous string)
    fn shader_source(&self, shader: Self::Shader, source: &str);

    fn compile_shader(&self, shader: Self::Shader);

    /// Compile status flag of the last compile
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;

    /// Full driver info log of the shader (untruncated)
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    fn delete_shader(&self, shader: Self::Shader);

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<Self::Program>;

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);

    fn link_program(&self, program: Self::Program);

    /// Link status flag of the last link
    fn program_link_status(&self, program: Self::Program) -> bool;

    /// Full driver info log of the program (untruncated)
    fn program_info_log(&self, program: Self::Program) -> String;

    fn delete_program(&self, program: Self::Program);

    // ===== MESHES =====

    /// Upload vertex positions and indices into GPU buffers
    fn create_mesh(&self, data: &MeshData) -> Result<Self::Mesh>;

    fn delete_mesh(&self, mesh: &Self::Mesh);

    // ===== FRAME =====

    fn set_viewport(&self, viewport: Viewport);

    fn clear(&self, flags: ClearFlags, color: [f32; 4]);

    fn use_program(&self, program: Option<Self::Program>);

    fn bind_mesh(&self, mesh: Option<&Self::Mesh>);

    /// Draw `index_count` indices of the bound mesh as triangles
    fn draw_indexed(&self, index_count: u32);
}
