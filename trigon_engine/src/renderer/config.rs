/// Window and context configuration

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Window title
    pub window_title: String,
    /// Initial window width in logical pixels
    pub window_width: u32,
    /// Initial window height in logical pixels
    pub window_height: u32,
    /// Requested core-profile GL version (major, minor)
    pub gl_version: (u8, u8),
    /// Wait for vertical blank on present
    pub vsync: bool,
    /// Color the framebuffer is cleared to every frame (RGBA)
    pub clear_color: [f32; 4],
    /// Forward driver debug messages to the engine logger
    pub enable_debug_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Hello, World!".to_string(),
            window_width: 800,
            window_height: 600,
            gl_version: (3, 3),
            vsync: true,
            clear_color: [0.1, 0.1, 0.12, 1.0],
            enable_debug_output: cfg!(debug_assertions),
        }
    }
}
