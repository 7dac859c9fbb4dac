use crate::camera::PerspectiveCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use cubeview_assets::{TextureData, TextureRole};
use cubeview_scene::{LightKind, Mesh, MeshId, Scene};
use glam::Mat4;
use std::collections::BTreeMap;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Lights beyond this count are ignored by the shader.
pub const MAX_LIGHTS: usize = 8;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
    tangent: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct GpuLight {
    position: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    light_count: [u32; 4],
    lights: [GpuLight; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MaterialUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

fn frame_uniforms(camera: &PerspectiveCamera, scene: &Scene) -> FrameUniforms {
    let mut lights = [GpuLight::zeroed(); MAX_LIGHTS];
    let mut count = 0;
    for (slot, light) in lights.iter_mut().zip(scene.lights()) {
        let (xyz, kind) = match light.kind {
            LightKind::Ambient => (light.position, 0.0),
            LightKind::Directional => (light.direction_to_light(), 1.0),
            LightKind::Point => (light.position, 2.0),
        };
        let [r, g, b] = light.color.to_linear();
        *slot = GpuLight {
            position: xyz.extend(kind).to_array(),
            color: [r, g, b, light.intensity],
        };
        count += 1;
    }

    FrameUniforms {
        view_proj: camera.view_projection().to_cols_array_2d(),
        camera_position: camera.position.extend(1.0).to_array(),
        light_count: [count, 0, 0, 0],
        lights,
    }
}

/// Inverse-transpose of the model matrix; identity for degenerate scales.
fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() > f32::EPSILON {
        model.inverse().transpose()
    } else {
        Mat4::IDENTITY
    }
}

fn material_uniforms(mesh: &Mesh) -> MaterialUniforms {
    let model = mesh.transform.matrix();
    let m = &mesh.material;
    let [r, g, b] = m.color.to_linear();
    MaterialUniforms {
        model: model.to_cols_array_2d(),
        normal_matrix: normal_matrix(model).to_cols_array_2d(),
        color: [r, g, b, 1.0],
        params: [
            m.roughness,
            m.metalness,
            m.displacement_scale,
            m.displacement_bias,
        ],
    }
}

fn vertices(mesh: &Mesh) -> Vec<Vertex> {
    mesh.geometry
        .vertices
        .iter()
        .map(|v| Vertex {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
            tangent: v.tangent,
        })
        .collect()
}

/// GPU resources for one scene mesh.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material_buffer: wgpu::Buffer,
    material_bind_group: wgpu::BindGroup,
}

/// wgpu renderer for a [`Scene`].
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    material_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    meshes: BTreeMap<MeshId, GpuMesh>,
    depth_texture: wgpu::TextureView,
}

impl SceneRenderer {
    /// Build pipelines for `surface_format` and a depth buffer of the given size.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let texture_entry = |binding: u32, visibility: wgpu::ShaderStages| {
            wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }
        };
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                texture_entry(1, wgpu::ShaderStages::FRAGMENT),
                texture_entry(2, wgpu::ShaderStages::FRAGMENT),
                texture_entry(3, wgpu::ShaderStages::FRAGMENT),
                texture_entry(4, wgpu::ShaderStages::VERTEX),
                wgpu::BindGroupLayoutEntry {
                    binding: 5,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("map_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &material_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                        3 => Float32x4
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            material_layout,
            sampler,
            meshes: BTreeMap::new(),
            depth_texture,
        }
    }

    /// Recreate the depth buffer for a new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Create GPU resources for meshes seen for the first time and refresh
    /// every mesh's transform and material factors.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        for (id, mesh) in scene.meshes() {
            if !self.meshes.contains_key(&id) {
                let gpu_mesh = self.upload_mesh(device, queue, mesh);
                tracing::info!(
                    "uploaded mesh {:?}: {} vertices, {} indices",
                    mesh.name,
                    mesh.geometry.vertices.len(),
                    gpu_mesh.index_count
                );
                self.meshes.insert(id, gpu_mesh);
            }
            if let Some(gpu_mesh) = self.meshes.get(&id) {
                queue.write_buffer(
                    &gpu_mesh.material_buffer,
                    0,
                    bytemuck::bytes_of(&material_uniforms(mesh)),
                );
            }
        }
    }

    /// Render one frame: clear, then draw every prepared mesh.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &PerspectiveCamera,
        scene: &Scene,
    ) {
        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&frame_uniforms(camera, scene)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b] = scene.background.to_linear();
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for gpu_mesh in self.meshes.values() {
                pass.set_bind_group(1, &gpu_mesh.material_bind_group, &[]);
                pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn upload_mesh(&self, device: &wgpu::Device, queue: &wgpu::Queue, mesh: &Mesh) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices(mesh)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material_uniforms"),
            contents: bytemuck::bytes_of(&material_uniforms(mesh)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let m = &mesh.material;
        let views = [
            (TextureRole::Color, &m.map),
            (TextureRole::Roughness, &m.roughness_map),
            (TextureRole::Normal, &m.normal_map),
            (TextureRole::Height, &m.displacement_map),
        ]
        .map(|(role, slot)| {
            let data = slot.clone().unwrap_or_else(|| {
                Arc::new(TextureData::solid(
                    format!("{role}_default"),
                    role.neutral_pixel(),
                ))
            });
            upload_texture(device, queue, &data, role.is_srgb())
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bind_group"),
            layout: &self.material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&views[0]),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&views[1]),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&views[2]),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(&views[3]),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.geometry.indices.len() as u32,
            material_buffer,
            material_bind_group,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &TextureData,
    srgb: bool,
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: data.width,
        height: data.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(data.label.as_str()),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        },
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(data.bytes_per_row()),
            rows_per_image: Some(data.height),
        },
        size,
    );
    texture
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_assets::TextureSet;
    use cubeview_common::Color;
    use cubeview_scene::{Light, build_textured_cube_scene};
    use glam::Vec3;

    #[test]
    fn uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 32);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 64 + 16 + 16 + 32 * MAX_LIGHTS);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 64 + 64 + 16 + 16);
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
    }

    #[test]
    fn frame_uniforms_encode_lights() {
        let cube = build_textured_cube_scene(&TextureSet::neutral());
        let camera = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
        let u = frame_uniforms(&camera, &cube.scene);

        assert_eq!(u.light_count[0], 3);
        assert_eq!(u.camera_position, [0.0, 0.0, 5.0, 1.0]);
        // Directional: normalized direction, kind 1.
        let dir = Vec3::new(1.0, 2.0, 3.0).normalize();
        let p = u.lights[0].position;
        assert!((Vec3::new(p[0], p[1], p[2]) - dir).length() < 1e-6);
        assert_eq!(p[3], 1.0);
        assert_eq!(u.lights[0].color, [1.0, 1.0, 1.0, 1.5]);
        // Ambient: kind 0.
        assert_eq!(u.lights[1].position[3], 0.0);
        assert_eq!(u.lights[1].color[3], 0.5);
        assert_eq!(u.lights[3], GpuLight::zeroed());
    }

    #[test]
    fn frame_uniforms_cap_light_count() {
        let mut scene = Scene::new();
        for i in 0..12 {
            scene.add_light(Light::point(Color::WHITE, 1.0).at(Vec3::splat(i as f32)));
        }
        let u = frame_uniforms(&PerspectiveCamera::default(), &scene);
        assert_eq!(u.light_count[0] as usize, MAX_LIGHTS);
        assert_eq!(u.lights[7].position, [7.0, 7.0, 7.0, 2.0]);
    }

    #[test]
    fn material_uniforms_follow_mesh_edits() {
        let mut cube = build_textured_cube_scene(&TextureSet::neutral());
        let mesh = cube.scene.mesh_mut(cube.cube).unwrap();
        mesh.transform.scale.x = 3.0;
        mesh.material.roughness = 0.25;
        mesh.material.metalness = 0.5;
        mesh.material.color = Color::from_hex(0x000000);

        let u = material_uniforms(mesh);
        assert_eq!(u.model[0][0], 3.0);
        assert_eq!(u.params, [0.25, 0.5, 0.01, 0.0]);
        assert_eq!(u.color, [0.0, 0.0, 0.0, 1.0]);
        assert!((u.normal_matrix[0][0] - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_scale_keeps_normal_matrix_finite() {
        let m = Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(normal_matrix(m), Mat4::IDENTITY);
    }
}
