//! Unit tests for OpenGL enum conversion functions
//!
//! Tests pure conversion functions without requiring a GL context.

use super::*;

// ============================================================================
// SHADER STAGE CONVERSION TESTS
// ============================================================================

#[test]
fn test_shader_stage_to_gl() {
    assert_eq!(shader_stage_to_gl(ShaderStage::Vertex), glow::VERTEX_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Geometry), glow::GEOMETRY_SHADER);
    assert_eq!(shader_stage_to_gl(ShaderStage::Compute), glow::COMPUTE_SHADER);
}

// ============================================================================
// CLEAR MASK CONVERSION TESTS
// ============================================================================

#[test]
fn test_clear_color_only() {
    assert_eq!(clear_flags_to_gl(ClearFlags::COLOR), glow::COLOR_BUFFER_BIT);
}

#[test]
fn test_clear_all_planes() {
    assert_eq!(
        clear_flags_to_gl(ClearFlags::all()),
        glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT
    );
}

#[test]
fn test_clear_nothing() {
    assert_eq!(clear_flags_to_gl(ClearFlags::empty()), 0);
}

// ============================================================================
// VERTEX LAYOUT TESTS
// ============================================================================

#[test]
fn test_vertex_layout_matches_glam_vec3() {
    assert_eq!(POSITION_ATTRIBUTE, 0);
    assert_eq!(VERTEX_STRIDE as usize, std::mem::size_of::<trigon_engine::glam::Vec3>());
    assert_eq!(POSITION_COMPONENTS, 3);
}
