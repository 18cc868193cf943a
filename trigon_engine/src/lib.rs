/*!
# Trigon Engine

Core types for the Trigon "hello triangle" renderer.

This crate is platform-agnostic: it owns the shader program builder, mesh
data, frame sequencing, errors and logging. GPU work goes through the
[`GraphicsDevice`](crate::renderer::GraphicsDevice) trait, implemented by
the OpenGL backend crate (and by a mock device in tests).

## Architecture

- **GraphicsDevice**: driver capability surface (shader/program objects, meshes, frame calls)
- **compile_shader / link_program**: the shader program builder
- **ShaderProgram**: a program that is guaranteed to be linked
- **Mesh / MeshData**: triangle geometry on the CPU and on the GPU
- **FrameRenderer**: clear, bind, draw
- **Engine**: process-wide log sink
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;

// Main trigon namespace module
pub mod trigon {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine log sink
    pub use crate::engine::Engine;

    // Driver capability trait
    pub use crate::renderer::GraphicsDevice;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
