use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::display_context::DisplayContext;
use crate::core::gpu_context::{select_alpha_mode, select_surface_format, GpuContext};
use crate::geometry::{Geometry, Vertex};
use crate::primitive::PrimitiveKind;
use crate::scene::{FrameGraph, Scene};
use crate::types::{ObjectUniform, ParticleUniform};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertex and index buffers of one primitive kind
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Uniform slot of one scene object, allocated once at startup
struct GpuObject {
    kind: PrimitiveKind,
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct GpuParticles {
    instance_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
}

/// Rasterizes a [`FrameGraph`] into a window surface.
///
/// Topology is fixed at construction: one uniform slot per scene object and
/// one vertex buffer set per primitive kind. Each frame only rewrites uniforms.
pub struct SceneRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    display: DisplayContext,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
    camera_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    meshes: HashMap<PrimitiveKind, GpuMesh>,
    objects: Vec<GpuObject>,
    particles: Option<GpuParticles>,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, scene: &Scene, antialias: bool) -> Result<Self> {
        let display = DisplayContext::from(window.inner_size());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create window surface")?;
        let gpu = GpuContext::for_surface(&instance, &surface).await?;
        let device = gpu.device();

        let transparent = scene.is_transparent();
        let config = Self::create_surface_config(&surface, &gpu, display, transparent)?;
        if !display.is_empty() {
            surface.configure(device, &config);
        }

        let sample_count = gpu.sample_count(config.format, antialias);
        let msaa_view = Self::create_msaa_view(device, &config, sample_count);
        let depth_view = Self::create_depth_view(device, &config, sample_count);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[scene.camera().to_uniform(display.width, display.height, 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Lights never change after mount
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[scene.lights().to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
            label: Some("frame_bind_group_layout"),
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
            label: Some("object_bind_group_layout"),
        });

        let mesh_pipeline = Self::create_mesh_pipeline(device, &frame_layout, &object_layout, config.format, sample_count);
        let particle_pipeline =
            Self::create_particle_pipeline(device, &frame_layout, &object_layout, config.format, sample_count);

        let meshes = PrimitiveKind::ALL
            .into_iter()
            .filter(|kind| scene.objects_of(*kind).next().is_some())
            .map(|kind| (kind, Self::upload_mesh(device, &kind.geometry())))
            .collect::<HashMap<_, _>>();

        let graph = scene.frame_graph();
        let objects = graph
            .meshes
            .iter()
            .map(|instance| {
                let uniform = ObjectUniform::new(instance.model, &instance.material);
                let (buffer, bind_group) = uniform_slot(device, &object_layout, bytemuck::bytes_of(&uniform), "Object");
                GpuObject {
                    kind: instance.kind,
                    buffer,
                    bind_group,
                }
            })
            .collect::<Vec<_>>();

        let particles = graph
            .particles
            .filter(|field| !field.positions.is_empty())
            .map(|field| {
                let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Particle Positions"),
                    contents: bytemuck::cast_slice(field.positions),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let uniform = ParticleUniform::new(field.model, &field.material);
                let (uniform_buffer, bind_group) =
                    uniform_slot(device, &object_layout, bytemuck::bytes_of(&uniform), "Particle");
                GpuParticles {
                    instance_buffer,
                    uniform_buffer,
                    bind_group,
                    count: (field.positions.len() / 3) as u32,
                }
            });

        let clear_color = if transparent {
            wgpu::Color::TRANSPARENT
        } else {
            wgpu::Color::BLACK
        };

        log::info!(
            "renderer initialized: {} | {:?} {:?} | {}x MSAA | {} meshes, {} particles",
            gpu.adapter_summary(),
            config.format,
            config.alpha_mode,
            sample_count,
            objects.len(),
            particles.as_ref().map_or(0, |p| p.count),
        );

        Ok(Self {
            gpu,
            surface,
            config,
            display,
            sample_count,
            msaa_view,
            depth_view,
            clear_color,
            camera_buffer,
            frame_bind_group,
            mesh_pipeline,
            particle_pipeline,
            meshes,
            objects,
            particles,
        })
    }

    pub fn display(&self) -> DisplayContext {
        self.display
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        let display = DisplayContext::from(new_size);
        self.display = display;
        if display.is_empty() {
            return;
        }

        log::debug!("resize to {}x{}", display.width, display.height);
        self.config.width = display.width;
        self.config.height = display.height;
        self.reconfigure();
    }

    /// Reapply the surface configuration, e.g. after the surface was lost
    pub fn reconfigure(&mut self) {
        if self.display.is_empty() {
            return;
        }
        let device = self.gpu.device();
        self.surface.configure(device, &self.config);
        self.msaa_view = Self::create_msaa_view(device, &self.config, self.sample_count);
        self.depth_view = Self::create_depth_view(device, &self.config, self.sample_count);
    }

    pub fn render(&mut self, graph: &FrameGraph<'_>) -> std::result::Result<(), wgpu::SurfaceError> {
        if self.display.is_empty() {
            return Ok(());
        }

        let queue = self.gpu.queue();
        let camera_uniform = graph
            .camera
            .to_uniform(self.display.width, self.display.height, graph.elapsed);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));

        for (slot, instance) in self.objects.iter().zip(&graph.meshes) {
            let uniform = ObjectUniform::new(instance.model, &instance.material);
            queue.write_buffer(&slot.buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        if let (Some(gpu_particles), Some(field)) = (&self.particles, &graph.particles) {
            let uniform = ParticleUniform::new(field.model, &field.material);
            queue.write_buffer(&gpu_particles.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            // Multisampled target resolves into the swapchain image
            let (target, resolve_target) = match &self.msaa_view {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for object in &self.objects {
                let Some(mesh) = self.meshes.get(&object.kind) else {
                    continue;
                };
                pass.set_bind_group(1, &object.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            // Blended points after opaque meshes
            if let Some(particles) = &self.particles {
                pass.set_pipeline(&self.particle_pipeline);
                pass.set_bind_group(0, &self.frame_bind_group, &[]);
                pass.set_bind_group(1, &particles.bind_group, &[]);
                pass.set_vertex_buffer(0, particles.instance_buffer.slice(..));
                pass.draw(0..6, 0..particles.count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        gpu: &GpuContext,
        display: DisplayContext,
        transparent: bool,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let caps = surface.get_capabilities(gpu.adapter());
        let format = select_surface_format(&caps.formats).context("surface reports no texture formats")?;
        let present_mode = caps
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: display.width.max(1),
            height: display.height.max(1),
            present_mode,
            alpha_mode: select_alpha_mode(&caps.alpha_modes, transparent),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Texture"),
            size: extent(config),
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: extent(config),
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn upload_mesh(device: &wgpu::Device, geometry: &Geometry) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertices"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Indices"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }

    fn create_mesh_pipeline(
        device: &wgpu::Device,
        frame_layout: &wgpu::BindGroupLayout,
        object_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[frame_layout, object_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(depth_state(true)),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_particle_pipeline(
        device: &wgpu::Device,
        frame_layout: &wgpu::BindGroupLayout,
        particle_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particles.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[frame_layout, particle_layout],
            push_constant_ranges: &[],
        });

        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(depth_state(false)),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
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

fn uniform_slot(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    contents: &[u8],
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(label),
    });
    (buffer, bind_group)
}

fn depth_state(write: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn extent(config: &wgpu::SurfaceConfiguration) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: config.width.max(1),
        height: config.height.max(1),
        depth_or_array_layers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE_SHADER: &str = include_str!("shaders/scene.wgsl");

    #[test]
    fn point_lights_decay_with_inverse_square() {
        assert!(SCENE_SHADER.contains("let falloff = 1.0 / max(d2, 0.01);"));
        assert!(SCENE_SHADER.contains("light.color * light.intensity * falloff"));
    }

    #[test]
    fn diffuse_is_lambert_normalized() {
        assert!(SCENE_SHADER.contains("(1.0 - metalness) * albedo / PI;"));
    }

    #[test]
    fn ambient_is_scaled_by_dielectric_share() {
        assert!(SCENE_SHADER.contains("lights.ambient.rgb * albedo * (1.0 - metalness)"));
    }

    #[test]
    fn depth_targets_use_float_depth() {
        let state = depth_state(false);
        assert_eq!(state.format, DEPTH_FORMAT);
        assert!(!state.depth_write_enabled);
    }
}
