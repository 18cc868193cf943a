//! Error types for the Trigon engine
//!
//! This module defines the error types used throughout the engine,
//! including shader building, initialization, and resource management.

use std::fmt;
use std::path::PathBuf;
use crate::renderer::{Diagnostic, ShaderStage};

/// Result type for Trigon engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trigon engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Shader source file missing or unreadable
    FileOpenError {
        path: PathBuf,
        message: String,
    },

    /// A shader stage failed to compile
    ShaderCompileError {
        stage: ShaderStage,
        message: Diagnostic,
    },

    /// The program failed to link
    ProgramLinkError {
        message: Diagnostic,
    },

    /// Window or display creation failed
    WindowInitError(String),

    /// GL context or surface creation failed
    ContextInitError(String),

    /// Backend-specific error (driver object allocation, etc.)
    BackendError(String),

    /// Invalid resource (mesh data, etc.)
    InvalidResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOpenError { path, message } => {
                write!(f, "Failed to open '{}': {}", path.display(), message)
            }
            Error::ShaderCompileError { stage, message } => {
                write!(f, "{} shader compilation failed: {}", stage, message)
            }
            Error::ProgramLinkError { message } => write!(f, "Program linking failed: {}", message),
            Error::WindowInitError(msg) => write!(f, "Window initialization failed: {}", msg),
            Error::ContextInitError(msg) => write!(f, "Context initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
