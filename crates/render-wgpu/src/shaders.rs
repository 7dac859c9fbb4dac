/// WGSL shader for textured metal/rough meshes.
///
/// Group 0 holds per-frame data (camera, lights). Group 1 holds per-mesh data
/// (transform, material factors, maps). Light kind lives in `position.w`:
/// 0 ambient, 1 directional (xyz = direction to light), 2 point.
pub const MESH_SHADER: &str = r#"
const PI: f32 = 3.14159265359;
const MAX_LIGHTS: u32 = 8u;

struct Light {
    position: vec4<f32>,
    color: vec4<f32>,
};

struct Frame {
    view_proj: mat4x4<f32>,
    camera_position: vec4<f32>,
    light_count: vec4<u32>,
    lights: array<Light, 8>,
};

struct Material {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    // x roughness, y metalness, z displacement scale, w displacement bias
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(1) @binding(0)
var<uniform> material: Material;
@group(1) @binding(1)
var albedo_map: texture_2d<f32>;
@group(1) @binding(2)
var roughness_map: texture_2d<f32>;
@group(1) @binding(3)
var normal_map: texture_2d<f32>;
@group(1) @binding(4)
var height_map: texture_2d<f32>;
@group(1) @binding(5)
var map_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) tangent: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) world_tangent: vec4<f32>,
    @location(3) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let height = textureSampleLevel(height_map, map_sampler, in.uv, 0.0).r;
    let displaced = in.position + in.normal * (height * material.params.z + material.params.w);
    let world = material.model * vec4<f32>(displaced, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.view_proj * world;
    out.world_position = world.xyz;
    out.world_normal = normalize((material.normal_matrix * vec4<f32>(in.normal, 0.0)).xyz);
    let tangent = normalize((material.model * vec4<f32>(in.tangent.xyz, 0.0)).xyz);
    out.world_tangent = vec4<f32>(tangent, in.tangent.w);
    out.uv = in.uv;
    return out;
}

fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let d = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    return a2 / (PI * d * d);
}

fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = r * r / 8.0;
    let gv = n_dot_v / (n_dot_v * (1.0 - k) + k);
    let gl = n_dot_l / (n_dot_l * (1.0 - k) + k);
    return gv * gl;
}

fn fresnel_schlick(cos_theta: f32, f0: vec3<f32>) -> vec3<f32> {
    return f0 + (vec3<f32>(1.0) - f0) * pow(1.0 - cos_theta, 5.0);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(albedo_map, map_sampler, in.uv).rgb * material.color.rgb;
    let rough_sample = textureSample(roughness_map, map_sampler, in.uv).g;
    let normal_sample = textureSample(normal_map, map_sampler, in.uv).xyz;

    let roughness = clamp(rough_sample * material.params.x, 0.04, 1.0);
    let metalness = clamp(material.params.y, 0.0, 1.0);

    let n_geom = normalize(in.world_normal);
    let t = normalize(in.world_tangent.xyz - n_geom * dot(n_geom, in.world_tangent.xyz));
    let b = cross(n_geom, t) * in.world_tangent.w;
    let n = normalize(mat3x3<f32>(t, b, n_geom) * (normal_sample * 2.0 - vec3<f32>(1.0)));

    let v = normalize(frame.camera_position.xyz - in.world_position);
    let n_dot_v = max(dot(n, v), 1e-4);
    let f0 = mix(vec3<f32>(0.04), albedo, metalness);

    var color = vec3<f32>(0.0);
    let count = min(frame.light_count.x, MAX_LIGHTS);
    for (var i = 0u; i < count; i = i + 1u) {
        let light = frame.lights[i];
        let radiance_base = light.color.rgb * light.color.a;
        let kind = u32(light.position.w + 0.5);
        if (kind == 0u) {
            color += radiance_base * albedo * (1.0 - metalness);
            continue;
        }

        var l: vec3<f32>;
        var radiance: vec3<f32>;
        if (kind == 1u) {
            l = normalize(light.position.xyz);
            radiance = radiance_base;
        } else {
            let to_light = light.position.xyz - in.world_position;
            let d2 = max(dot(to_light, to_light), 1e-4);
            l = to_light * inverseSqrt(d2);
            radiance = radiance_base / d2;
        }

        let h = normalize(v + l);
        let n_dot_l = max(dot(n, l), 0.0);
        let n_dot_h = max(dot(n, h), 0.0);
        let f = fresnel_schlick(max(dot(h, v), 0.0), f0);
        let specular = distribution_ggx(n_dot_h, roughness)
            * geometry_smith(n_dot_v, n_dot_l, roughness)
            * f / (4.0 * n_dot_v * max(n_dot_l, 1e-4));
        let k_d = (vec3<f32>(1.0) - f) * (1.0 - metalness);
        color += (k_d * albedo / PI + specular) * radiance * n_dot_l * PI;
    }

    return vec4<f32>(color, 1.0);
}
"#;
