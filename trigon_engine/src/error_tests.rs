//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};
use crate::renderer::{Diagnostic, ShaderStage};
use std::path::PathBuf;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_file_open_error_display() {
    let err = Error::FileOpenError {
        path: PathBuf::from("shaders/missing.vert"),
        message: "No such file or directory".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("shaders/missing.vert"));
    assert!(display.contains("No such file or directory"));
}

#[test]
fn test_shader_compile_error_display() {
    let err = Error::ShaderCompileError {
        stage: ShaderStage::Fragment,
        message: Diagnostic::from_driver_log("0:3(1): error: syntax error"),
    };
    let display = format!("{}", err);
    assert!(display.starts_with("Fragment shader compilation failed"));
    assert!(display.contains("syntax error"));
}

#[test]
fn test_program_link_error_display() {
    let err = Error::ProgramLinkError {
        message: Diagnostic::from_driver_log("missing fragment stage"),
    };
    let display = format!("{}", err);
    assert!(display.contains("Program linking failed"));
    assert!(display.contains("missing fragment stage"));
}

#[test]
fn test_window_and_context_init_error_display() {
    let err = Error::WindowInitError("no display".to_string());
    assert_eq!(format!("{}", err), "Window initialization failed: no display");

    let err = Error::ContextInitError("GL 3.3 unavailable".to_string());
    assert_eq!(format!("{}", err), "Context initialization failed: GL 3.3 unavailable");
}

#[test]
fn test_backend_and_invalid_resource_display() {
    let err = Error::BackendError("glCreateShader returned 0".to_string());
    assert!(format!("{}", err).contains("Backend error"));

    let err = Error::InvalidResource("index 7 out of range".to_string());
    assert!(format!("{}", err).contains("index 7 out of range"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("test".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let err = Error::ShaderCompileError {
        stage: ShaderStage::Vertex,
        message: Diagnostic::from_driver_log("oops"),
    };
    let debug = format!("{:?}", err);
    assert!(debug.contains("ShaderCompileError"));
    assert!(debug.contains("Vertex"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::ProgramLinkError {
        message: Diagnostic::from_driver_log("link failed"),
    };
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// ERROR PROPAGATION TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::InvalidResource("bad".to_string()))
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
