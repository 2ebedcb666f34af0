mod helpers;
mod types;

use crate::constants::CAKE_CLEAR_COLOR;
use card_core::cake::{Instance, MeshKind};
use card_core::{Camera, Lighting};
use fnv::FnvHashMap;
use types::{CakeUniforms, InstanceRaw};
use web_sys as web;
use wgpu::util::DeviceExt;

struct MeshBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// WebGPU renderer for the cake canvas: one instanced draw per run of parts
/// sharing a mesh, opaque runs first.
pub struct CakeRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    opaque_pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: FnvHashMap<MeshKind, MeshBuffer>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth: (wgpu::Texture, wgpu::TextureView),
    camera: Camera,
    lighting: Lighting,
}

const INITIAL_INSTANCES: usize = 64;

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("cake_instances"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl CakeRenderer {
    pub async fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The cake floats over the page, so keep the canvas transparent when possible.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cake_shader"),
            source: wgpu::ShaderSource::Wgsl(card_core::CAKE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cake_bgl"),
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
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cake_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let buffers = [types::vertex_layout(), types::instance_layout()];
        let opaque_pipeline =
            helpers::make_cake_pipeline(&device, &pl, &shader, &buffers, format, false);
        let blend_pipeline =
            helpers::make_cake_pipeline(&device, &pl, &shader, &buffers, format, true);

        let camera = Camera::cake(width as f32 / height as f32);
        let lighting = Lighting::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cake_uniforms"),
            contents: bytemuck::bytes_of(&CakeUniforms::new(&camera, &lighting)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cake_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let mut meshes = FnvHashMap::default();
        for kind in MeshKind::ALL {
            let verts = kind.build();
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("cake_mesh"),
                contents: bytemuck::cast_slice(&verts),
                usage: wgpu::BufferUsages::VERTEX,
            });
            meshes.insert(
                kind,
                MeshBuffer {
                    buffer,
                    vertex_count: verts.len() as u32,
                },
            );
        }

        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCES);
        let depth = helpers::create_depth_texture(&device, width, height);
        log::info!("[cake] WebGPU ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            blend_pipeline,
            uniform_buffer,
            bind_group,
            meshes,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            depth,
            camera,
            lighting,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth = helpers::create_depth_texture(&self.device, width, height);
            self.camera.aspect = width as f32 / height as f32;
            log::debug!("[cake] resized to {}x{}", width, height);
        }
    }

    pub fn render(&mut self, instances: &[Instance]) -> Result<(), wgpu::SurfaceError> {
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        let raw: Vec<InstanceRaw> = instances.iter().map(InstanceRaw::from).collect();
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&CakeUniforms::new(&self.camera, &self.lighting)),
        );

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("cake_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cake_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CAKE_CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.1,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            // Consecutive instances with the same mesh and blending share a draw.
            let mut start = 0;
            while start < instances.len() {
                let key = (instances[start].mesh, instances[start].is_translucent());
                let mut end = start + 1;
                while end < instances.len()
                    && (instances[end].mesh, instances[end].is_translucent()) == key
                {
                    end += 1;
                }
                if let Some(mesh) = self.meshes.get(&key.0) {
                    rpass.set_pipeline(if key.1 {
                        &self.blend_pipeline
                    } else {
                        &self.opaque_pipeline
                    });
                    rpass.set_vertex_buffer(0, mesh.buffer.slice(..));
                    rpass.draw(0..mesh.vertex_count, start as u32..end as u32);
                }
                start = end;
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
