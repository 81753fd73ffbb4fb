/// WGSL program for the displayed object: lit, textured, with texture
/// coordinates multiplied by `params.x`.
pub const MIPMAP_SHADER: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    // x: texture coordinate multiplier
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var base_color: texture_2d<f32>;
@group(1) @binding(1)
var base_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv * uniforms.params.x;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(base_color, base_sampler, in.uv);

    let n = normalize(in.world_normal);
    let l = normalize(uniforms.light_pos.xyz - in.world_pos);
    let v = normalize(uniforms.camera_pos.xyz - in.world_pos);
    let h = normalize(l + v);

    // Two-sided so the plane is lit from below too.
    let diffuse = abs(dot(n, l));
    let specular = pow(max(abs(dot(n, h)), 0.0), 32.0) * 0.2;
    let ambient = 0.3;

    let light = uniforms.light_color.rgb;
    let color = albedo.rgb * (ambient + diffuse * 0.7) * light + specular * light;
    return vec4<f32>(color, albedo.a);
}
"#;
