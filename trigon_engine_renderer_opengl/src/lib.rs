/*!
# Trigon Engine - OpenGL Renderer Backend

OpenGL implementation of the Trigon rendering engine.

This crate provides a `GraphicsDevice` backed by glow, and a window type that
creates a core-profile context and surface through glutin and winit.

Driver debug output (KHR_debug) is forwarded to the engine logger when the
`gl-debug-output` feature is enabled and `Config::enable_debug_output` is set.
*/

mod opengl_graphics_device;
mod opengl_window;

#[cfg(feature = "gl-debug-output")]
mod opengl_debug;

pub use opengl_graphics_device::{OpenGlGraphicsDevice, OpenGlMesh};
pub use opengl_window::OpenGlWindow;

pub use glow;
