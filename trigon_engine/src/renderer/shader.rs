/// Shader sources and the stage compiler

use std::fmt;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::renderer::{Diagnostic, GraphicsDevice};

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Geometry shader
    Geometry,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    /// Guess the stage from a conventional file extension (`vert`, `frag`, ...)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "vert" | "vs" => Some(ShaderStage::Vertex),
            "frag" | "fs" => Some(ShaderStage::Fragment),
            "geom" | "gs" => Some(ShaderStage::Geometry),
            "comp" | "cs" => Some(ShaderStage::Compute),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Fragment => "Fragment",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::Compute => "Compute",
        };
        f.write_str(name)
    }
}

// ===== SHADER SOURCE =====

/// Immutable shader text for one stage
///
/// Where the text came from (embedded constant or file) does not matter to
/// the compiler; the origin is only kept for log messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
    origin: Option<PathBuf>,
}

impl ShaderSource {
    /// Wrap embedded source text
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
            origin: None,
        }
    }

    /// Read the whole file at `path` as shader text
    ///
    /// # Errors
    ///
    /// `Error::FileOpenError` if the file is missing, unreadable or not UTF-8.
    pub fn from_file(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            crate::engine_error!("trigon::Shader", "Couldn't open shader file '{}': {}", path.display(), e);
            Error::FileOpenError {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        crate::engine_debug!("trigon::Shader", "Loaded {} shader source from '{}' ({} bytes)",
            stage, path.display(), text.len());

        Ok(Self {
            stage,
            text,
            origin: Some(path.to_path_buf()),
        })
    }

    /// Like [`from_file`](Self::from_file), with the stage taken from the file extension
    pub fn from_file_by_extension(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stage = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ShaderStage::from_extension)
            .ok_or_else(|| Error::InvalidResource(format!(
                "Can't infer shader stage from file name '{}'", path.display()
            )))?;
        Self::from_file(stage, path)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File the source was read from, `None` for embedded sources
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    fn label(&self) -> String {
        match &self.origin {
            Some(path) => path.display().to_string(),
            None => "<embedded>".to_string(),
        }
    }
}

// ===== COMPILED SHADER =====

/// Successfully compiled shader object
///
/// Owns the driver object: it is released exactly once, when the value is
/// dropped. Linking consumes it, so a compiled shader can be attached to at
/// most one program.
pub struct CompiledShader<D: GraphicsDevice> {
    device: D,
    raw: D::Shader,
    stage: ShaderStage,
}

impl<D: GraphicsDevice> CompiledShader<D> {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Driver name of the shader object
    pub fn raw(&self) -> D::Shader {
        self.raw
    }
}

impl<D: GraphicsDevice> fmt::Debug for CompiledShader<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledShader")
            .field("raw", &self.raw)
            .field("stage", &self.stage)
            .finish()
    }
}

impl<D: GraphicsDevice> Drop for CompiledShader<D> {
    fn drop(&mut self) {
        self.device.delete_shader(self.raw);
    }
}

/// Compile one shader stage
///
/// Creates a shader object for the source's stage, submits the text as a
/// single unit, compiles it and checks the compile status.
///
/// # Errors
///
/// - `Error::BackendError` if the driver can't allocate a shader object
/// - `Error::ShaderCompileError` with the driver log (capped at
///   [`INFO_LOG_CAPACITY`](crate::renderer::INFO_LOG_CAPACITY) characters).
///   The failed shader object is released before returning.
pub fn compile_shader<D: GraphicsDevice>(device: &D, source: &ShaderSource) -> Result<CompiledShader<D>> {
    let stage = source.stage();
    let raw = device.create_shader(stage)?;

    // From here on the guard releases the object on every exit path
    let shader = CompiledShader {
        device: device.clone(),
        raw,
        stage,
    };

    device.shader_source(raw, source.text());
    device.compile_shader(raw);

    if !device.shader_compile_status(raw) {
        let message = Diagnostic::from_driver_log(device.shader_info_log(raw));
        crate::engine_error!("trigon::Shader", "{} shader '{}' failed to compile: {}",
            stage, source.label(), message);
        return Err(Error::ShaderCompileError { stage, message });
    }

    crate::engine_debug!("trigon::Shader", "{} shader '{}' compiled", stage, source.label());
    Ok(shader)
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
