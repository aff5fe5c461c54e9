/// WGSL shader for the slide planes.
///
/// The vertex stage scales and places the unit plane, then bends it away
/// from the camera toward the viewport edges. The fragment stage crops the
/// image to cover the plane without stretching.
pub const PLANE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

struct Plane {
    position: vec2<f32>,
    scale: vec2<f32>,
    plane_size: vec2<f32>,
    image_size: vec2<f32>,
    viewport_size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> plane: Plane;
@group(1) @binding(1)
var t_map: texture_2d<f32>;
@group(1) @binding(2)
var s_map: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var world = vec3<f32>(vertex.position.xy * plane.scale + plane.position, 0.0);

    let edge = world.x / max(plane.viewport_size.x * 0.5, 0.0001);
    world.z = -edge * edge * 1.5;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let plane_ratio = plane.plane_size.x / max(plane.plane_size.y, 0.0001);
    let image_ratio = plane.image_size.x / max(plane.image_size.y, 0.0001);
    let ratio = vec2<f32>(
        min(plane_ratio / max(image_ratio, 0.0001), 1.0),
        min(image_ratio / max(plane_ratio, 0.0001), 1.0),
    );
    let uv = vec2<f32>(
        in.uv.x * ratio.x + (1.0 - ratio.x) * 0.5,
        in.uv.y * ratio.y + (1.0 - ratio.y) * 0.5,
    );
    return textureSample(t_map, s_map, uv);
}
"#;
