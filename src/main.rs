// Lathe viewer: type a 2D profile, watch it revolve into a solid
// Mesh building and interaction live in engine/, this file owns the GPU

mod engine;

use winit::{
    event::{Event as WinitEvent, WindowEvent, ElementState, KeyEvent},
    event_loop::{EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};
use glam::Mat4;
use wgpu::util::DeviceExt;

use engine::input::map_window_event;
use engine::mesh::MeshVertex;
use engine::overlay::ControlPanel;
use engine::texture::TexturePixels;
use engine::ViewportState;

/// Material colour of the revolved surface.
const BASE_COLOR: [f32; 3] = [1.0, 0.8, 0.0];
/// Ambient light floor so back faces never go fully black.
const AMBIENT: f32 = 0.2;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ============================================================================
// UNIFORM DATA (camera + light + material)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    /// xyz: unit vector toward the light, w: intensity.
    light_dir: [f32; 4],
    /// rgb: material colour, a: ambient floor.
    base_color: [f32; 4],
    /// xy: uv repeat counts, zw unused.
    tex_repeat: [f32; 4],
}

impl Uniforms {
    fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            light_dir: [0.0, 1.0, 0.0, 1.0],
            base_color: [BASE_COLOR[0], BASE_COLOR[1], BASE_COLOR[2], AMBIENT],
            tex_repeat: [1.0, 1.0, 0.0, 0.0],
        }
    }
}

// ============================================================================
// GPU-SIDE MESH
// ============================================================================

/// Buffers for the one mesh on screen. Replacing the struct drops the old
/// buffers, which is the whole disposal story.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture_bind_group: wgpu::BindGroup,
    gpu_mesh: Option<GpuMesh>,

    viewport: ViewportState,
    panel: ControlPanel,
    cursor: (f32, f32),
}

impl State {
    async fn new(window: std::sync::Arc<winit::window::Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        log::info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader_lathe.wgsl").into()),
        });

        let uniforms = Uniforms::new();

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("texture_bind_group_layout"),
        });

        // Tiling sampler, shared by every texture the user drops in.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Lathe Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // 1x1 white fallback so the untextured material runs the same
        // pipeline as a textured one.
        let white = create_rgba_texture(&device, &queue, 1, 1, &[255, 255, 255, 255]);
        let texture_bind_group =
            create_texture_bind_group(&device, &texture_layout, &white, &sampler);

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout, &texture_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let depth_view = create_depth_view(&device, &config);
        let panel = ControlPanel::new(&window, &device, surface_format);

        Self {
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            depth_view,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            sampler,
            texture_bind_group,
            gpu_mesh: None,
            viewport: ViewportState::new(),
            panel,
            cursor: (0.0, 0.0),
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    /// Rebuild the mesh from the panel's profile text if the user typed.
    /// A bad profile leaves the current mesh on screen and surfaces the
    /// error in the panel instead.
    fn apply_profile_edits(&mut self) {
        if !self.panel.take_dirty() {
            return;
        }
        match self.viewport.rebuild_profile(&self.panel.profile_text) {
            Ok(_released) => {
                self.panel.status = None;
                self.upload_mesh();
            }
            Err(err) => {
                log::warn!("profile rejected: {err}");
                self.panel.status = Some(err.to_string());
            }
        }
    }

    /// Push the viewport's current mesh into fresh GPU buffers.
    fn upload_mesh(&mut self) {
        let Some(mesh) = self.viewport.mesh() else {
            return;
        };

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lathe Vertex Buffer"),
                contents: mesh.vertex_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lathe Index Buffer"),
                contents: mesh.index_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            });

        self.gpu_mesh = Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count() as u32,
        });
    }

    /// Install a decoded image as the surface texture. Without a mesh there
    /// is nothing to fit it to, so the drop is ignored.
    fn apply_texture(&mut self, name: &str, pixels: &TexturePixels) {
        if self.viewport.mesh().is_none() {
            log::warn!("texture {name} dropped before any shape exists, ignoring");
            return;
        }

        self.viewport.fit_texture(pixels.width, pixels.height);

        let texture = create_rgba_texture(
            &self.device,
            &self.queue,
            pixels.width,
            pixels.height,
            &pixels.rgba,
        );
        self.texture_bind_group =
            create_texture_bind_group(&self.device, &self.texture_layout, &texture, &self.sampler);
        self.panel.texture_name = Some(name.to_string());

        log::info!(
            "applied texture {name}: {}x{} px, repeat ({:.1}, {:.1})",
            pixels.width,
            pixels.height,
            self.viewport.texture_repeat.x,
            self.viewport.texture_repeat.y
        );
    }

    fn render(&mut self, window: &winit::window::Window) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Camera, light and texture repeat all live in the viewport; pack
        // them into the uniform buffer BEFORE the render pass.
        let aspect = self.size.width as f32 / self.size.height as f32;
        let center = self.viewport.camera.center;
        let light_dir = self.viewport.light.direction(center);
        let uniforms = Uniforms {
            view_proj: self.viewport.camera.view_projection(aspect).to_cols_array_2d(),
            light_dir: [
                light_dir.x,
                light_dir.y,
                light_dir.z,
                self.viewport.light.intensity,
            ],
            base_color: [BASE_COLOR[0], BASE_COLOR[1], BASE_COLOR[2], AMBIENT],
            tex_repeat: [
                self.viewport.texture_repeat.x,
                self.viewport.texture_repeat.y,
                0.0,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.1,
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
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(gpu_mesh) = &self.gpu_mesh {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
                render_pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..gpu_mesh.index_count, 0, 0..1);
            }
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.panel.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            &screen_descriptor,
            &self.viewport,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_rgba_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Surface Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    texture
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
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
        label: Some("texture_bind_group"),
    })
}

// ============================================================================
// BACKGROUND TEXTURE DECODE
// ============================================================================

/// Events posted back to the event loop from worker threads.
enum AppEvent {
    TextureDecoded { name: String, pixels: TexturePixels },
}

/// Read and decode a dropped image off the event loop, then post the pixels
/// back. Failures are logged and the drop is forgotten.
fn spawn_texture_load(path: std::path::PathBuf, proxy: EventLoopProxy<AppEvent>) {
    std::thread::spawn(move || {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::error!("reading {}: {err}", path.display());
                return;
            }
        };
        match TexturePixels::decode(&bytes) {
            Ok(pixels) => {
                let _ = proxy.send_event(AppEvent::TextureDecoded { name, pixels });
            }
            Err(err) => log::error!("decoding {}: {err}", path.display()),
        }
    });
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    env_logger::init();

    let event_loop = EventLoop::<AppEvent>::with_user_event().build().unwrap();
    let proxy = event_loop.create_proxy();

    let window_attributes = Window::default_attributes()
        .with_title("Turnery - profile lathe viewer")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

    let window = std::sync::Arc::new(event_loop.create_window(window_attributes).unwrap());

    let mut state = pollster::block_on(State::new(window.clone()));

    event_loop.run(move |event, control_flow| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                // The panel sees every event first and may consume it, e.g.
                // keystrokes while the profile editor has focus.
                let response = state.panel.handle_window_event(&window, event);

                if let WindowEvent::CursorMoved { position, .. } = event {
                    state.cursor = (position.x as f32, position.y as f32);
                }
                if !response.consumed {
                    if let Some(viewer_event) = map_window_event(event, state.cursor) {
                        state.viewport.handle_input(viewer_event);
                    }
                }

                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => control_flow.exit(),
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::DroppedFile(path) => {
                        spawn_texture_load(path.clone(), proxy.clone());
                    }
                    WindowEvent::RedrawRequested => {
                        match state.render(&window) {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => control_flow.exit(),
                            Err(e) => log::warn!("{e:?}"),
                        }
                        state.apply_profile_edits();
                    }
                    _ => {}
                }
            }
            WinitEvent::UserEvent(AppEvent::TextureDecoded { name, pixels }) => {
                state.apply_texture(&name, &pixels);
            }
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })
    .unwrap();
}
