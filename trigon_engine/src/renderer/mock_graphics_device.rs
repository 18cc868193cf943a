/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Emulates the parts of a GL driver the shader builder depends on: object
/// allocation, a crude "compiler" that rejects unbalanced delimiters, a
/// missing `main` or an unterminated assignment, and a linker that requires
/// compiled shaders. Every call is recorded as a string so tests can assert
/// exact sequencing.

use std::sync::{Arc, Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::renderer::{ClearFlags, GraphicsDevice, MeshData, ShaderStage, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockShaderHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockProgramHandle(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMeshHandle {
    pub id: u32,
    pub index_count: u32,
}

#[derive(Debug)]
struct MockShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Default)]
struct MockProgramObject {
    attached: Vec<u32>,
    linked: bool,
    log: String,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: u32,
    shaders: FxHashMap<u32, MockShaderObject>,
    programs: FxHashMap<u32, MockProgramObject>,
    meshes: FxHashMap<u32, u32>,
    commands: Vec<String>,
    compile_log_override: Option<String>,
    link_failure_log: Option<String>,
    refuse_allocation: bool,
}

impl MockState {
    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Cheaply clonable mock device; clones share the same driver state
#[derive(Debug, Clone, Default)]
pub struct MockGraphicsDevice {
    state: Arc<Mutex<MockState>>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    // ===== TEST CONTROLS =====

    /// Make every failing compile report `log` instead of the built-in message
    pub fn set_compile_log_override(&self, log: impl Into<String>) {
        self.state().compile_log_override = Some(log.into());
    }

    /// Make every link fail with `log`
    pub fn fail_links_with(&self, log: impl Into<String>) {
        self.state().link_failure_log = Some(log.into());
    }

    /// Make object creation fail (driver returned name 0)
    pub fn refuse_allocation(&self, refuse: bool) {
        self.state().refuse_allocation = refuse;
    }

    // ===== INSPECTION =====

    pub fn commands(&self) -> Vec<String> {
        self.state().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state().commands.clear();
    }

    pub fn live_shader_count(&self) -> usize {
        self.state().shaders.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.state().programs.len()
    }

    pub fn live_mesh_count(&self) -> usize {
        self.state().meshes.len()
    }

    /// Source submitted to a live shader object
    pub fn shader_source_of(&self, shader: MockShaderHandle) -> Option<String> {
        self.state().shaders.get(&shader.0).map(|s| s.source.clone())
    }

    /// Shader names attached to a live program object
    pub fn attached_shaders(&self, program: MockProgramHandle) -> Vec<u32> {
        self.state()
            .programs
            .get(&program.0)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }

    pub fn count_commands(&self, prefix: &str) -> usize {
        self.state().commands.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

/// Reasons the mock compiler rejects a source, formatted like a driver log
fn mock_compile(source: &str) -> std::result::Result<(), String> {
    let mut depth_brace = 0i32;
    let mut depth_paren = 0i32;
    for c in source.chars() {
        match c {
            '{' => depth_brace += 1,
            '}' => depth_brace -= 1,
            '(' => depth_paren += 1,
            ')' => depth_paren -= 1,
            _ => {}
        }
        if depth_brace < 0 || depth_paren < 0 {
            return Err(format!("0:1(1): error: syntax error, unexpected '{}'\n", c));
        }
    }
    if depth_brace != 0 || depth_paren != 0 {
        return Err("0:1(1): error: syntax error, unexpected end of file\n".to_string());
    }
    if !source.contains("void main") {
        return Err("0:0(0): error: function `main' has no definition\n".to_string());
    }

    // An assignment must be terminated before its block closes
    let bytes = source.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        let is_assignment = b == b'='
            && bytes.get(i + 1) != Some(&b'=')
            && !matches!(bytes.get(i.wrapping_sub(1)), Some(b'=' | b'!' | b'<' | b'>'));
        if !is_assignment {
            continue;
        }
        let rest = &source[i..];
        let semicolon = rest.find(';');
        let close = rest.find('}');
        if let (Some(close), semi) = (close, semicolon) {
            if semi.map_or(true, |s| s > close) {
                return Err("0:1(1): error: syntax error, unexpected '}', expecting ',' or ';'\n".to_string());
            }
        }
    }
    Ok(())
}

impl GraphicsDevice for MockGraphicsDevice {
    type Shader = MockShaderHandle;
    type Program = MockProgramHandle;
    type Mesh = MockMeshHandle;

    fn create_shader(&self, stage: ShaderStage) -> Result<MockShaderHandle> {
        let mut state = self.state();
        state.commands.push(format!("create_shader({:?})", stage));
        if state.refuse_allocation {
            crate::engine_bail!("trigon::mock", "create_shader returned 0");
        }
        let id = state.allocate();
        state.shaders.insert(id, MockShaderObject {
            stage,
            source: String::new(),
            compiled: false,
            log: String::new(),
        });
        Ok(MockShaderHandle(id))
    }

    fn shader_source(&self, shader: MockShaderHandle, source: &str) {
        let mut state = self.state();
        state.commands.push(format!("shader_source({})", shader.0));
        let object = state.shaders.get_mut(&shader.0).expect("shader_source on unknown shader");
        object.source = source.to_string();
    }

    fn compile_shader(&self, shader: MockShaderHandle) {
        let mut state = self.state();
        state.commands.push(format!("compile_shader({})", shader.0));
        let log_override = state.compile_log_override.clone();
        let object = state.shaders.get_mut(&shader.0).expect("compile_shader on unknown shader");
        match mock_compile(&object.source) {
            Ok(()) => {
                object.compiled = true;
                object.log.clear();
            }
            Err(log) => {
                object.compiled = false;
                object.log = log_override.unwrap_or(log);
            }
        }
    }

    fn shader_compile_status(&self, shader: MockShaderHandle) -> bool {
        self.state().shaders.get(&shader.0).map_or(false, |s| s.compiled)
    }

    fn shader_info_log(&self, shader: MockShaderHandle) -> String {
        self.state().shaders.get(&shader.0).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: MockShaderHandle) {
        let mut state = self.state();
        state.commands.push(format!("delete_shader({})", shader.0));
        assert!(state.shaders.remove(&shader.0).is_some(), "shader {} released twice", shader.0);
    }

    fn create_program(&self) -> Result<MockProgramHandle> {
        let mut state = self.state();
        state.commands.push("create_program".to_string());
        if state.refuse_allocation {
            crate::engine_bail!("trigon::mock", "create_program returned 0");
        }
        let id = state.allocate();
        state.programs.insert(id, MockProgramObject::default());
        Ok(MockProgramHandle(id))
    }

    fn attach_shader(&self, program: MockProgramHandle, shader: MockShaderHandle) {
        let mut state = self.state();
        state.commands.push(format!("attach_shader({}, {})", program.0, shader.0));
        assert!(state.shaders.contains_key(&shader.0), "attaching released shader {}", shader.0);
        let object = state.programs.get_mut(&program.0).expect("attach_shader on unknown program");
        object.attached.push(shader.0);
    }

    fn link_program(&self, program: MockProgramHandle) {
        let mut state = self.state();
        state.commands.push(format!("link_program({})", program.0));
        let forced = state.link_failure_log.clone();
        let attached = state.programs.get(&program.0).map(|p| p.attached.clone()).unwrap_or_default();
        let all_compiled = attached.iter().all(|id| state.shaders.get(id).map_or(false, |s| s.compiled));
        let has_vertex = attached
            .iter()
            .any(|id| state.shaders.get(id).map_or(false, |s| s.stage == ShaderStage::Vertex));

        let failure = if let Some(log) = forced {
            Some(log)
        } else if !all_compiled {
            Some("error: linking with uncompiled shader\n".to_string())
        } else if !has_vertex {
            Some("error: no vertex shader attached\n".to_string())
        } else {
            None
        };

        let object = state.programs.get_mut(&program.0).expect("link_program on unknown program");
        object.linked = failure.is_none();
        object.log = failure.unwrap_or_default();
    }

    fn program_link_status(&self, program: MockProgramHandle) -> bool {
        self.state().programs.get(&program.0).map_or(false, |p| p.linked)
    }

    fn program_info_log(&self, program: MockProgramHandle) -> String {
        self.state().programs.get(&program.0).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn delete_program(&self, program: MockProgramHandle) {
        let mut state = self.state();
        state.commands.push(format!("delete_program({})", program.0));
        assert!(state.programs.remove(&program.0).is_some(), "program {} released twice", program.0);
    }

    fn create_mesh(&self, data: &MeshData) -> Result<MockMeshHandle> {
        let mut state = self.state();
        state.commands.push(format!("create_mesh({}, {})", data.vertex_count(), data.index_count()));
        if state.refuse_allocation {
            crate::engine_bail!("trigon::mock", "create_vertex_array returned 0");
        }
        let id = state.allocate();
        state.meshes.insert(id, data.index_count());
        Ok(MockMeshHandle { id, index_count: data.index_count() })
    }

    fn delete_mesh(&self, mesh: &MockMeshHandle) {
        let mut state = self.state();
        state.commands.push(format!("delete_mesh({})", mesh.id));
        assert!(state.meshes.remove(&mesh.id).is_some(), "mesh {} released twice", mesh.id);
    }

    fn set_viewport(&self, viewport: Viewport) {
        self.state().commands.push(format!(
            "set_viewport({}, {}, {}, {})", viewport.x, viewport.y, viewport.width, viewport.height
        ));
    }

    fn clear(&self, flags: ClearFlags, color: [f32; 4]) {
        self.state().commands.push(format!("clear({:?}, {:?})", flags, color));
    }

    fn use_program(&self, program: Option<MockProgramHandle>) {
        let mut state = self.state();
        if let Some(p) = program {
            let linked = state.programs.get(&p.0).map_or(false, |o| o.linked);
            assert!(linked, "binding program {} that is not linked", p.0);
        }
        state.commands.push(format!("use_program({:?})", program.map(|p| p.0)));
    }

    fn bind_mesh(&self, mesh: Option<&MockMeshHandle>) {
        self.state().commands.push(format!("bind_mesh({:?})", mesh.map(|m| m.id)));
    }

    fn draw_indexed(&self, index_count: u32) {
        self.state().commands.push(format!("draw_indexed({})", index_count));
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
