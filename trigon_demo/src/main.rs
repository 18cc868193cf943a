//! Hello triangle
//!
//! Opens an 800x600 window, builds the triangle shader program and draws one
//! green triangle every frame until the window is closed or Escape is pressed.
//!
//! Shaders are read from `shaders/` next to this crate's manifest. Pass
//! `--embedded-shaders` to use the copies compiled into the binary instead.

use std::path::PathBuf;
use std::process::ExitCode;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;
use trigon_engine::trigon::{Engine, Error, Result};
use trigon_engine::trigon::log::LogSeverity;
use trigon_engine::trigon::render::{
    Config, FrameRenderer, Mesh, MeshData, ShaderProgram, ShaderProgramBuilder, ShaderSource, ShaderStage,
};
use trigon_engine::{engine_debug, engine_error, engine_info};
use trigon_engine_renderer_opengl::{OpenGlGraphicsDevice, OpenGlWindow};

const EMBEDDED_VERTEX_SHADER: &str = include_str!("../shaders/triangle.vert");
const EMBEDDED_FRAGMENT_SHADER: &str = include_str!("../shaders/triangle.frag");

/// Where the triangle shaders come from
#[derive(Debug, Clone)]
enum ShaderOrigin {
    Embedded,
    Files { vertex: PathBuf, fragment: PathBuf },
}

impl Default for ShaderOrigin {
    fn default() -> Self {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders");
        ShaderOrigin::Files {
            vertex: dir.join("triangle.vert"),
            fragment: dir.join("triangle.frag"),
        }
    }
}

impl ShaderOrigin {
    fn load(&self) -> Result<(ShaderSource, ShaderSource)> {
        match self {
            ShaderOrigin::Embedded => Ok((
                ShaderSource::new(ShaderStage::Vertex, EMBEDDED_VERTEX_SHADER),
                ShaderSource::new(ShaderStage::Fragment, EMBEDDED_FRAGMENT_SHADER),
            )),
            ShaderOrigin::Files { vertex, fragment } => Ok((
                ShaderSource::from_file(ShaderStage::Vertex, vertex)?,
                ShaderSource::from_file(ShaderStage::Fragment, fragment)?,
            )),
        }
    }
}

/// Everything that lives as long as the window
///
/// Field order is drop order: GL objects are released while the context
/// owned by `window` is still alive.
struct Scene {
    program: ShaderProgram<OpenGlGraphicsDevice>,
    mesh: Mesh<OpenGlGraphicsDevice>,
    frames: FrameRenderer<OpenGlGraphicsDevice>,
    window: OpenGlWindow,
}

impl Scene {
    fn new(event_loop: &ActiveEventLoop, config: &Config, shaders: &ShaderOrigin) -> Result<Self> {
        let window = OpenGlWindow::new(event_loop, config)?;
        let device = window.device();

        let (vertex, fragment) = shaders.load()?;
        let program = ShaderProgramBuilder::new(device)
            .source(&vertex)
            .source(&fragment)
            .build()?;

        let mesh = Mesh::upload(device, &MeshData::triangle())?;

        let mut frames = FrameRenderer::new(device, config.clear_color);
        let (width, height) = window.framebuffer_size();
        frames.resize(width, height);

        Ok(Self {
            program,
            mesh,
            frames,
            window,
        })
    }
}

struct App {
    config: Config,
    shaders: ShaderOrigin,
    scene: Option<Scene>,
    failed: bool,
}

impl App {
    fn new(config: Config, shaders: ShaderOrigin) -> Self {
        Self {
            config,
            shaders,
            scene: None,
            failed: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: &Error) {
        engine_error!("trigon::demo", "{}", error);
        self.failed = true;
        self.scene = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }

        match Scene::new(event_loop, &self.config, &self.shaders) {
            Ok(scene) => {
                scene.window.request_redraw();
                self.scene = Some(scene);
            }
            Err(e) => self.fail(event_loop, &e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(scene) = &mut self.scene else { return };

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                },
                ..
            } => {
                engine_info!("trigon::demo", "Closing after {} frames", scene.frames.frames_rendered());
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                scene.window.resize(size.width, size.height);
                if let Some(viewport) = scene.frames.resize(size.width, size.height) {
                    engine_debug!("trigon::demo", "Viewport {}x{}", viewport.width, viewport.height);
                }
            }

            WindowEvent::RedrawRequested => {
                scene.frames.render(&scene.program, &scene.mesh);
                if let Err(e) = scene.window.swap_buffers() {
                    self.fail(event_loop, &e);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = &self.scene {
            scene.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release GL objects before the event loop tears the window down
        self.scene = None;
    }
}

fn main() -> ExitCode {
    Engine::set_min_severity(if cfg!(debug_assertions) {
        LogSeverity::Debug
    } else {
        LogSeverity::Info
    });

    engine_info!("trigon::demo", "Running application");

    let shaders = if std::env::args().any(|arg| arg == "--embedded-shaders") {
        ShaderOrigin::Embedded
    } else {
        ShaderOrigin::default()
    };
    engine_debug!("trigon::demo", "Shader origin: {:?}", shaders);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            engine_error!("trigon::demo", "{}", Error::WindowInitError(e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(Config::default(), shaders);
    if let Err(e) = event_loop.run_app(&mut app) {
        engine_error!("trigon::demo", "Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
