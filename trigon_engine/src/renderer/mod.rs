/// Renderer module - driver capability surface, shader building and frame sequencing

// Module declarations
pub mod config;
pub mod diagnostic;
pub mod graphics_device;
pub mod shader;
pub mod program;
pub mod mesh;
pub mod frame;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use config::*;
pub use diagnostic::*;
pub use shader::*;
pub use program::*;
pub use mesh::*;
pub use frame::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
