//! Forward mesh renderer with a single shadow-mapped sun.
//!
//! Two passes per frame: a depth-only pass from the sun's point of view
//! into a fixed-size shadow map, then the main pass sampling that map with
//! a comparison sampler. Meshes are flat-shaded from screen-space
//! derivatives, so vertices carry only position and color. Everything is
//! drawn without back-face culling; the shader flips normals toward the
//! viewer so thin-walled assets light correctly from both sides.

use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::gpu::RenderContext;
use crate::lighting::LightingState;
use crate::scene::{Model, SceneGraph};

/// Shadow map resolution (square).
const SHADOW_MAP_SIZE: u32 = 2048;

/// Depth format shared by the main depth buffer and the shadow map.
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ── GPU data layouts ─────────────────────────────────────────────────────

/// Per-frame uniforms shared by both passes. Layout matches the `Globals`
/// struct in the shaders.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    sun_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 3],
    ambient: f32,
    sun_dir: [f32; 3],
    _pad: f32,
}

/// Per-model uniform: the turntable transform.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    transform: [[f32; 4]; 4],
}

/// 28-byte mesh vertex: position + base color.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 4],
}

fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 12,
                shader_location: 1,
            },
        ],
    }
}

/// Uploaded geometry for one mesh of the attached model.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    casts_shadow: bool,
}

// ── Renderer ─────────────────────────────────────────────────────────────

/// Owns the pipelines, uniform buffers, shadow map, and uploaded meshes.
pub struct ModelRenderer {
    globals_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    main_bind_group: wgpu::BindGroup,
    shadow_bind_group: wgpu::BindGroup,
    model_bind_group: wgpu::BindGroup,
    main_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    shadow_view: wgpu::TextureView,
    meshes: Vec<GpuMesh>,
}

impl ModelRenderer {
    /// Create pipelines and targets sized to the current context.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: size_of::<Globals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Buffer"),
            size: size_of::<ModelUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shadow_view = create_depth_texture(
            device,
            SHADOW_MAP_SIZE,
            SHADOW_MAP_SIZE,
            "Shadow Map",
            true,
        );
        let depth_view = create_depth_texture(
            device,
            context.config.width,
            context.config.height,
            "Depth Buffer",
            false,
        );

        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        // Main pass: globals + shadow map + comparison sampler.
        let main_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Main Globals Layout"),
                entries: &[
                    uniform_layout_entry(
                        0,
                        wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ),
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Depth,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Comparison,
                        ),
                        count: None,
                    },
                ],
            });
        // Shadow pass sees only the globals buffer.
        let shadow_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Shadow Globals Layout"),
                entries: &[uniform_layout_entry(0, wgpu::ShaderStages::VERTEX)],
            });
        let model_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Layout"),
                entries: &[uniform_layout_entry(0, wgpu::ShaderStages::VERTEX)],
            });

        let main_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Main Globals Bind Group"),
                layout: &main_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: globals_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &shadow_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(
                            &shadow_sampler,
                        ),
                    },
                ],
            });
        let shadow_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Shadow Globals Bind Group"),
                layout: &shadow_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                }],
            });
        let model_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Model Bind Group"),
                layout: &model_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model_buffer.as_entire_binding(),
                }],
            });

        let main_pipeline = create_main_pipeline(
            context,
            &main_layout,
            &model_layout,
        );
        let shadow_pipeline =
            create_shadow_pipeline(device, &shadow_layout, &model_layout);

        Self {
            globals_buffer,
            model_buffer,
            main_bind_group,
            shadow_bind_group,
            model_bind_group,
            main_pipeline,
            shadow_pipeline,
            depth_view,
            shadow_view,
            meshes: Vec::new(),
        }
    }

    /// Upload the model's meshes, replacing any previously uploaded
    /// geometry.
    pub fn upload_model(&mut self, context: &RenderContext, model: &Model) {
        self.meshes = model
            .meshes
            .iter()
            .map(|mesh| {
                let vertices: Vec<Vertex> = mesh
                    .positions
                    .iter()
                    .map(|&position| Vertex {
                        position,
                        color: mesh.base_color,
                    })
                    .collect();
                let vertex_buffer = context.device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Mesh Vertex Buffer"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                );
                let index_buffer = context.device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Mesh Index Buffer"),
                        contents: bytemuck::cast_slice(&mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    },
                );
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.indices.len() as u32,
                    casts_shadow: mesh.casts_shadow,
                }
            })
            .collect();
        log::debug!("uploaded {} meshes", self.meshes.len());
    }

    /// Recreate the depth buffer to match the surface size. The shadow map
    /// is resolution-independent and stays fixed.
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth_view = create_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
            "Depth Buffer",
            false,
        );
    }

    /// Render one frame: shadow pass, then the main pass.
    ///
    /// # Errors
    ///
    /// Returns the surface error when the next swapchain texture cannot be
    /// acquired.
    pub fn render(
        &mut self,
        context: &RenderContext,
        scene: &SceneGraph,
        camera: &Camera,
        lighting: LightingState,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_uniforms(context, scene, camera, lighting);

        let mut encoder = context.create_encoder();
        self.shadow_pass(&mut encoder);
        self.main_pass(&mut encoder, &frame_view, lighting);
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn write_uniforms(
        &self,
        context: &RenderContext,
        scene: &SceneGraph,
        camera: &Camera,
        lighting: LightingState,
    ) {
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(camera);
        let sun = scene.sun();
        let globals = Globals {
            view_proj: camera_uniform.view_proj,
            sun_view_proj: sun.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.to_array(),
            ambient: lighting.ambient_intensity,
            sun_dir: sun.direction().to_array(),
            _pad: 0.0,
        };
        context.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&globals),
        );

        let transform = scene
            .model()
            .map_or(glam::Mat4::IDENTITY, Model::transform);
        let model = ModelUniform {
            transform: transform.to_cols_array_2d(),
        };
        context.queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::bytes_of(&model),
        );
    }

    fn shadow_pass(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });
        pass.set_pipeline(&self.shadow_pipeline);
        pass.set_bind_group(0, &self.shadow_bind_group, &[]);
        pass.set_bind_group(1, &self.model_bind_group, &[]);
        for mesh in self.meshes.iter().filter(|m| m.casts_shadow) {
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(
                mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn main_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
        lighting: LightingState,
    ) {
        let [r, g, b] = lighting.background;
        let clear = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: frame_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });
        pass.set_pipeline(&self.main_pipeline);
        pass.set_bind_group(0, &self.main_bind_group, &[]);
        pass.set_bind_group(1, &self.model_bind_group, &[]);
        for mesh in &self.meshes {
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(
                mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

// ── Construction helpers ─────────────────────────────────────────────────

fn uniform_layout_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    label: &str,
    sampled: bool,
) -> wgpu::TextureView {
    let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;
    if sampled {
        usage |= wgpu::TextureUsages::TEXTURE_BINDING;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn create_main_pipeline(
    context: &RenderContext,
    globals_layout: &wgpu::BindGroupLayout,
    model_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let device = &context.device;
    let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));
    let layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Main Pipeline Layout"),
            bind_group_layouts: &[globals_layout, model_layout],
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Main Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_buffer_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: context.format(),
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            // Double-sided geometry: the shader orients normals instead.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_shadow_pipeline(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    model_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shadow.wgsl"));
    let layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Pipeline Layout"),
            bind_group_layouts: &[globals_layout, model_layout],
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Shadow Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_buffer_layout()],
            compilation_options: Default::default(),
        },
        // Depth-only pass.
        fragment: None,
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth_stencil_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
