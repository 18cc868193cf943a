/// Program linker and the vertex + fragment program builder

use std::fmt;
use crate::error::{Error, Result};
use crate::renderer::{compile_shader, CompiledShader, Diagnostic, GraphicsDevice, ShaderSource, ShaderStage};

/// Stages a program needs before it can be drawn with
const REQUIRED_STAGES: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

// ===== SHADER PROGRAM =====

/// Linked program, ready to bind for drawing
///
/// Only `link_program` creates values of this type and only after the driver
/// reported a successful link, so holding one means the program is usable.
/// The driver object is released on drop.
pub struct ShaderProgram<D: GraphicsDevice> {
    device: D,
    raw: D::Program,
    stages: Vec<ShaderStage>,
}

impl<D: GraphicsDevice> ShaderProgram<D> {
    /// Driver name of the program object
    pub fn raw(&self) -> D::Program {
        self.raw
    }

    /// Stages linked into this program, in attachment order
    pub fn stages(&self) -> &[ShaderStage] {
        &self.stages
    }
}

impl<D: GraphicsDevice> fmt::Debug for ShaderProgram<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("raw", &self.raw)
            .field("stages", &self.stages)
            .finish()
    }
}

impl<D: GraphicsDevice> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.device.delete_program(self.raw);
    }
}

/// Describe what is wrong with a stage set, or `None` if it forms a minimal pipeline
fn stage_coverage_problem(stages: &[ShaderStage]) -> Option<String> {
    let mut problems = Vec::new();
    for required in REQUIRED_STAGES {
        match stages.iter().filter(|&&s| s == required).count() {
            0 => problems.push(format!("missing {} stage", required.to_string().to_lowercase())),
            1 => {}
            n => problems.push(format!("{} {} stages attached, expected one", n, required.to_string().to_lowercase())),
        }
    }
    for stage in stages {
        if !REQUIRED_STAGES.contains(stage) {
            problems.push(format!("unsupported {} stage in a draw program", stage.to_string().to_lowercase()));
        }
    }
    if problems.is_empty() {
        None
    } else {
        Some(format!("error: {}", problems.join("; ")))
    }
}

/// Link compiled shaders into a program
///
/// Attaches every shader to a new program object, links it and checks the
/// link status. The shaders are consumed: whatever the outcome, their driver
/// objects are released once the link attempt is over.
///
/// # Errors
///
/// - `Error::ProgramLinkError` if the stage set is not exactly one vertex and
///   one fragment stage, or the driver reports a failed link (driver log
///   capped at [`INFO_LOG_CAPACITY`](crate::renderer::INFO_LOG_CAPACITY)
///   characters). The program object is released before returning.
/// - `Error::BackendError` if the driver can't allocate a program object
pub fn link_program<D, I>(device: &D, shaders: I) -> Result<ShaderProgram<D>>
where
    D: GraphicsDevice,
    I: IntoIterator<Item = CompiledShader<D>>,
{
    let shaders: Vec<CompiledShader<D>> = shaders.into_iter().collect();
    let stages: Vec<ShaderStage> = shaders.iter().map(|s| s.stage()).collect();

    if let Some(problem) = stage_coverage_problem(&stages) {
        let message = Diagnostic::from_driver_log(problem);
        crate::engine_error!("trigon::Program", "Program failed to link: {}", message);
        return Err(Error::ProgramLinkError { message });
    }

    let raw = device.create_program()?;
    let program = ShaderProgram {
        device: device.clone(),
        raw,
        stages,
    };

    for shader in &shaders {
        device.attach_shader(raw, shader.raw());
    }
    device.link_program(raw);

    if !device.program_link_status(raw) {
        let message = Diagnostic::from_driver_log(device.program_info_log(raw));
        crate::engine_error!("trigon::Program", "Program failed to link: {}", message);
        return Err(Error::ProgramLinkError { message });
    }

    crate::engine_debug!("trigon::Program", "Program {:?} linked ({} stages)", raw, shaders.len());
    Ok(program)
}

// ===== BUILDER =====

/// Compile a set of stage sources and link them into one program
///
/// # Example
///
/// ```ignore
/// let program = ShaderProgramBuilder::new(&device)
///     .source(&vertex_source)
///     .source(&fragment_source)
///     .build()?;
/// ```
pub struct ShaderProgramBuilder<'a, D: GraphicsDevice> {
    device: &'a D,
    sources: Vec<&'a ShaderSource>,
}

impl<'a, D: GraphicsDevice> ShaderProgramBuilder<'a, D> {
    pub fn new(device: &'a D) -> Self {
        Self {
            device,
            sources: Vec::new(),
        }
    }

    /// Add one stage source (the stage comes from the source itself)
    pub fn source(mut self, source: &'a ShaderSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Compile every stage in order, then link
    ///
    /// Stops at the first failing stage; shaders compiled before it are
    /// released.
    pub fn build(self) -> Result<ShaderProgram<D>> {
        let shaders = self
            .sources
            .iter()
            .map(|source| compile_shader(self.device, source))
            .collect::<Result<Vec<_>>>()?;
        link_program(self.device, shaders)
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
