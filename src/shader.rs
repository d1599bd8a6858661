//! WGSL source for the presentation pass.
//!
//! The simulation itself runs on the CPU; the GPU only maps the current
//! field to color. A fullscreen triangle samples the two-channel state
//! texture with direct texel loads (no sampler) and maps the substrate
//! channel through a smooth threshold, so pattern regions (where A has
//! been consumed) render as ink on a dark background.

/// Fullscreen render shader. Binding 0 is the `Rg32Float` state texture
/// (r = A, g = B), binding 1 the threshold uniforms.
pub const RENDER_SHADER: &str = r#"struct RenderUniforms {
    threshold: f32,
    delta: f32,
    _pad0: f32,
    _pad1: f32,
};

@group(0) @binding(0)
var state: texture_2d<f32>;

@group(0) @binding(1)
var<uniform> uniforms: RenderUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    // One triangle covering the whole surface. uv y = 0 lands at the
    // bottom of the screen, matching the grid's y-up convention.
    let uv = vec2<f32>(
        f32((vertex_index << 1u) & 2u),
        f32(vertex_index & 2u),
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dims = vec2<f32>(textureDimensions(state));
    let clamped = clamp(in.uv, vec2<f32>(0.0), vec2<f32>(0.9999));
    let texel = vec2<i32>(clamped * dims);
    let cell = textureLoad(state, texel, 0);

    // Pattern regions have depleted substrate; threshold channel A.
    let ink = 1.0 - smoothstep(
        uniforms.threshold - uniforms.delta,
        uniforms.threshold + uniforms.delta,
        cell.r,
    );

    let background = vec3<f32>(0.02, 0.02, 0.05);
    let foreground = vec3<f32>(0.58, 0.92, 0.80);
    return vec4<f32>(mix(background, foreground, ink), 1.0);
}
"#;
