/// OpenGL debug output - forwards KHR_debug messages to the engine logger
///
/// Only compiled with the `gl-debug-output` feature.

use glow::HasContext;
use trigon_engine::trigon::Engine;
use trigon_engine::trigon::log::LogSeverity;
use trigon_engine::{engine_info, engine_warn};

/// Map a GL debug severity to an engine log severity
pub(crate) fn severity_from_gl(severity: u32) -> LogSeverity {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
        glow::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
        glow::DEBUG_SEVERITY_LOW => LogSeverity::Info,
        _ => LogSeverity::Debug,
    }
}

pub(crate) fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "api",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "window-system",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "shader-compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "third-party",
        glow::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    }
}

pub(crate) fn type_name(message_type: u32) -> &'static str {
    match message_type {
        glow::DEBUG_TYPE_ERROR => "error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined-behavior",
        glow::DEBUG_TYPE_PORTABILITY => "portability",
        glow::DEBUG_TYPE_PERFORMANCE => "performance",
        glow::DEBUG_TYPE_MARKER => "marker",
        _ => "other",
    }
}

/// Install the debug message callback on a current context
///
/// Returns `false` when the context has no debug output support.
///
/// # Safety
///
/// `gl` must be current on the calling thread.
pub(crate) unsafe fn install(gl: &mut glow::Context) -> bool {
    if !gl.supports_debug() {
        engine_warn!("trigon::opengl", "Debug output requested but not supported by this context");
        return false;
    }

    gl.enable(glow::DEBUG_OUTPUT);
    gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
    gl.debug_message_callback(|source, message_type, id, severity, message| {
        Engine::log(
            severity_from_gl(severity),
            "trigon::opengl::debug",
            format!("[{} {} #{}] {}", source_name(source), type_name(message_type), id, message),
        );
    });

    engine_info!("trigon::opengl", "Debug output enabled");
    true
}
