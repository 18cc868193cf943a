/// OpenGlWindow - window, GL context and surface creation via glutin

use std::num::NonZeroU32;
use glutin::config::{Config as GlConfig, ConfigTemplateBuilder, GlConfig as _};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;
use trigon_engine::trigon::{Error, Result};
use trigon_engine::trigon::render::Config;
use trigon_engine::{engine_debug, engine_error, engine_info, engine_warn};

use crate::opengl_graphics_device::OpenGlGraphicsDevice;

/// A window with a current OpenGL context and its graphics device
///
/// Field order is drop order: the surface and context go before the window.
pub struct OpenGlWindow {
    device: OpenGlGraphicsDevice,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

/// Prefer the config with the fewest samples (no MSAA needed for a triangle)
fn pick_config(configs: Box<dyn Iterator<Item = GlConfig> + '_>) -> GlConfig {
    configs
        .reduce(|best, candidate| {
            if candidate.num_samples() < best.num_samples() {
                candidate
            } else {
                best
            }
        })
        .expect("glutin only calls the config picker with at least one config")
}

fn window_error(what: &str, e: impl std::fmt::Display) -> Error {
    engine_error!("trigon::opengl", "Couldn't create a window: {}: {}", what, e);
    Error::WindowInitError(format!("{}: {}", what, e))
}

fn context_error(what: &str, e: impl std::fmt::Display) -> Error {
    engine_error!("trigon::opengl", "Couldn't initialize OpenGL: {}: {}", what, e);
    Error::ContextInitError(format!("{}: {}", what, e))
}

impl OpenGlWindow {
    /// Create the window, a core-profile context and a window surface, make
    /// the context current and load GL function pointers
    ///
    /// # Errors
    ///
    /// - `Error::WindowInitError` if the window or display can't be created
    /// - `Error::ContextInitError` if the context or surface can't be created
    ///   or made current
    pub fn new(event_loop: &ActiveEventLoop, config: &Config) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| window_error("display creation failed", e))?;
        let window = window.ok_or_else(|| window_error("display builder", "no window was created"))?;

        let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let gl_display = gl_config.display();

        let (major, minor) = config.gl_version;
        let debug = cfg!(feature = "gl-debug-output") && config.enable_debug_output;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .with_debug(debug)
            .build(raw_window_handle);

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| context_error(&format!("OpenGL {}.{} core context", major, minor), e))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| context_error("surface attributes", e))?;
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| context_error("window surface", e))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| context_error("make current", e))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            engine_warn!("trigon::opengl", "Couldn't set swap interval: {}", e);
        }

        #[allow(unused_mut)]
        let mut gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| gl_display.get_proc_address(symbol))
        };

        #[cfg(feature = "gl-debug-output")]
        if debug {
            unsafe { crate::opengl_debug::install(&mut gl) };
        }

        // The context was made current on this thread above and stays current
        let device = unsafe { OpenGlGraphicsDevice::from_context(gl) };

        engine_info!("trigon::opengl", "Window '{}' created ({}x{}, vsync {})",
            config.window_title, config.window_width, config.window_height,
            if config.vsync { "on" } else { "off" });

        Ok(Self {
            device,
            gl_surface,
            gl_context,
            window,
        })
    }

    pub fn device(&self) -> &OpenGlGraphicsDevice {
        &self.device
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Framebuffer size in physical pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Resize the surface after a framebuffer resize
    ///
    /// Zero-sized (minimized) framebuffers are ignored.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.gl_surface.resize(&self.gl_context, w, h);
            engine_debug!("trigon::opengl", "Surface resized to {}x{}", width, height);
        }
    }

    /// Present the back buffer
    pub fn swap_buffers(&self) -> Result<()> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| trigon_engine::engine_err!("trigon::opengl", "Failed to swap buffers: {}", e))
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
