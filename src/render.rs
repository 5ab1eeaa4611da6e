use crate::constants::*;
use crate::geometry::{self, MeshVertex, PinInstance, StarVertex};
use crate::texture::{DecodedImage, TextureCache};
use glam::Mat4;
use globe_core::constants::{AMBIENT_LIGHT_INTENSITY, MESH_COLOR, SPHERE_SEGMENTS};
use globe_core::{BackgroundColor, Camera, SceneGraph};
use std::collections::HashMap;
use web_sys as web;
use wgpu::util::DeviceExt;

static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const PIN_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4, 7 => Float32x4
];
const STAR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    sphere_model: [[f32; 4]; 4],
    light: [f32; 4],
    sphere_color: [f32; 4],
    star_color: [f32; 4],
}

struct SphereMesh {
    radius: f32,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    // 1x1 white, bound wherever an image is missing or failed
    fallback_texture: wgpu::BindGroup,
    textures: HashMap<String, wgpu::BindGroup>,

    sphere_pipeline: wgpu::RenderPipeline,
    sphere: Option<SphereMesh>,

    pin_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    pin_buffer: wgpu::Buffer,
    pin_capacity: usize,

    star_pipeline: wgpu::RenderPipeline,
    star_buffer: Option<wgpu::Buffer>,
    star_count: u32,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
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
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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
        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("surface_texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white = DecodedImage {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        };
        let fallback_texture = create_texture_bind_group(
            &device,
            &queue,
            &texture_bgl,
            &sampler,
            &white,
            "fallback_texture",
        );

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe_pl"),
            bind_group_layouts: &[&bgl, &texture_bgl],
            push_constant_ranges: &[],
        });

        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        };
        let pin_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PinInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &PIN_ATTRS,
        };
        let star_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StarVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &STAR_ATTRS,
        };

        let sphere_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            PipelineSpec {
                label: "sphere_pipeline",
                vs: "vs_sphere",
                fs: "fs_sphere",
                buffers: &[mesh_layout.clone()],
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                depth_bias: wgpu::DepthBiasState::default(),
            },
            format,
        );
        // Pins rest on the surface at the closest zoom; pull them forward.
        let pin_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            PipelineSpec {
                label: "pin_pipeline",
                vs: "vs_pin",
                fs: "fs_pin",
                buffers: &[mesh_layout, pin_layout],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                depth_bias: wgpu::DepthBiasState {
                    constant: -4,
                    slope_scale: -1.0,
                    clamp: 0.0,
                },
            },
            format,
        );
        let star_pipeline = make_pipeline(
            &device,
            &layout,
            &shader,
            PipelineSpec {
                label: "star_pipeline",
                vs: "vs_star",
                fs: "fs_star",
                buffers: &[star_layout],
                topology: wgpu::PrimitiveTopology::PointList,
                cull_mode: None,
                depth_bias: wgpu::DepthBiasState::default(),
            },
            format,
        );

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pin_quad"),
            contents: bytemuck::cast_slice(&geometry::QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let pin_buffer = create_pin_buffer(&device, INITIAL_PIN_CAPACITY);

        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            texture_bgl,
            sampler,
            fallback_texture,
            textures: HashMap::new(),
            sphere_pipeline,
            sphere: None,
            pin_pipeline,
            quad_buffer,
            pin_buffer,
            pin_capacity: INITIAL_PIN_CAPACITY,
            star_pipeline,
            star_buffer: None,
            star_count: 0,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Upload whatever changed in `scene` or finished loading in
    /// `textures`, then draw one frame.
    pub fn render(
        &mut self,
        camera: &Camera,
        scene: &SceneGraph,
        textures: &mut TextureCache,
    ) -> Result<(), wgpu::SurfaceError> {
        for (url, image) in textures.take_ready() {
            self.upload_texture(url, &image);
        }
        self.sync_sphere(scene);
        self.sync_stars(scene);
        let pin_count = self.sync_pins(scene);

        let sphere_rgb = BackgroundColor(MESH_COLOR).to_rgb_f32();
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            sphere_model: Mat4::from_quat(scene.sphere_orientation).to_cols_array_2d(),
            light: scene.light.position.extend(scene.light.intensity).to_array(),
            sphere_color: [
                sphere_rgb[0],
                sphere_rgb[1],
                sphere_rgb[2],
                AMBIENT_LIGHT_INTENSITY,
            ],
            star_color: [STAR_COLOR[0], STAR_COLOR[1], STAR_COLOR[2], 1.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let bg = scene
            .sphere
            .as_ref()
            .map(|s| s.background)
            .unwrap_or_else(|| BackgroundColor::default().to_rgb_f32());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("globe_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_bind_group(1, &self.fallback_texture, &[]);

            if let Some(stars) = &self.star_buffer {
                rpass.set_pipeline(&self.star_pipeline);
                rpass.set_vertex_buffer(0, stars.slice(..));
                rpass.draw(0..self.star_count, 0..1);
            }
            if let Some(sphere) = &self.sphere {
                let surface = scene
                    .sphere
                    .as_ref()
                    .and_then(|s| self.textures.get(&s.texture))
                    .unwrap_or(&self.fallback_texture);
                rpass.set_pipeline(&self.sphere_pipeline);
                rpass.set_bind_group(1, surface, &[]);
                rpass.set_vertex_buffer(0, sphere.vertices.slice(..));
                rpass.set_index_buffer(sphere.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..sphere.index_count, 0, 0..1);
            }
            if pin_count > 0 {
                rpass.set_pipeline(&self.pin_pipeline);
                rpass.set_vertex_buffer(0, self.quad_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.pin_buffer.slice(..));
                // One draw per pin so each binds its own image.
                for (i, node) in scene.pins.iter().take(pin_count as usize).enumerate() {
                    let image = self
                        .textures
                        .get(&node.visual.url)
                        .unwrap_or(&self.fallback_texture);
                    rpass.set_bind_group(1, image, &[]);
                    let i = i as u32;
                    rpass.draw(0..geometry::QUAD_VERTICES.len() as u32, i..i + 1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn sync_sphere(&mut self, scene: &SceneGraph) {
        let Some(visual) = &scene.sphere else {
            return;
        };
        if self.sphere.as_ref().map(|s| s.radius) == Some(visual.radius) {
            return;
        }
        let (vertices, indices) = geometry::build_sphere(visual.radius, SPHERE_SEGMENTS, SPHERE_RINGS);
        self.sphere = Some(SphereMesh {
            radius: visual.radius,
            vertices: self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sphere_vertices"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
            indices: self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sphere_indices"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
            index_count: indices.len() as u32,
        });
    }

    fn sync_stars(&mut self, scene: &SceneGraph) {
        if scene.stars.len() as u32 == self.star_count {
            return;
        }
        let vertices = geometry::star_vertices(&scene.stars);
        self.star_count = vertices.len() as u32;
        self.star_buffer = (!vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("stars"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
    }

    fn upload_texture(&mut self, url: String, image: &DecodedImage) {
        let bind_group = create_texture_bind_group(
            &self.device,
            &self.queue,
            &self.texture_bgl,
            &self.sampler,
            image,
            &url,
        );
        self.textures.insert(url, bind_group);
    }

    fn sync_pins(&mut self, scene: &SceneGraph) -> u32 {
        let textures = &self.textures;
        let instances = geometry::pin_instances(scene.sphere_orientation, &scene.pins, |node| {
            if textures.contains_key(&node.visual.url) {
                [1.0; 3]
            } else {
                PIN_BASE_COLOR
            }
        });
        if instances.is_empty() {
            return 0;
        }
        if instances.len() > self.pin_capacity {
            self.pin_capacity = instances.len().next_power_of_two();
            self.pin_buffer = create_pin_buffer(&self.device, self.pin_capacity);
        }
        self.queue
            .write_buffer(&self.pin_buffer, 0, bytemuck::cast_slice(&instances));
        instances.len() as u32
    }
}

struct PipelineSpec<'s> {
    label: &'s str,
    vs: &'s str,
    fs: &'s str,
    buffers: &'s [wgpu::VertexBufferLayout<'s>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth_bias: wgpu::DepthBiasState,
}

fn make_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    spec: PipelineSpec<'_>,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(spec.vs),
            buffers: spec.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: spec.topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: spec.cull_mode,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: spec.depth_bias,
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(spec.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_pin_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("pin_instances"),
        size: (capacity.max(1) * std::mem::size_of::<PinInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    image: &DecodedImage,
    label: &str,
) -> wgpu::BindGroup {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
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
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
