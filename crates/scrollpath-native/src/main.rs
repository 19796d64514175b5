use std::time::Instant;

use glam::{Mat4, Vec2};
use scrollpath_core::{
    command_for_key, pointer_ndc, wheel_delta_px, Camera, CameraPathContext, KeyframeStore,
    LineVertex, SceneKey, CLEAR_COLOR, DOM_DELTA_LINE, DOM_DELTA_PIXEL, INITIAL_FOV_DEG,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, ModifiersState, NamedKey},
    window::WindowBuilder,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("line_vb"),
        size: (std::mem::size_of::<LineVertex>() * capacity.max(1)) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(scrollpath_core::LINES_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let vertex_capacity = 4096;
        let vertex_buffer = create_vertex_buffer(&device, vertex_capacity);
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // position (vec3) + color (vec4), one vertex per line end
        let vertex_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
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
        }];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        log::info!("[gpu] surface {}x{} format={:?}", config.width, config.height, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            vertex_buffer,
            vertex_capacity,
            bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn render(&mut self, view_proj: Mat4, lines: &[LineVertex]) -> Result<(), wgpu::SurfaceError> {
        if lines.len() > self.vertex_capacity {
            self.vertex_capacity = lines.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: view_proj.to_cols_array_2d(),
            }),
        );
        if !lines.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(lines));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: CLEAR_COLOR[0],
                            g: CLEAR_COLOR[1],
                            b: CLEAR_COLOR[2],
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !lines.is_empty() {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                rpass.draw(0..lines.len() as u32, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Key name in the form the editor key map expects (`KeyboardEvent.key`).
fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::Delete) => Some("Delete"),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft"),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight"),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp"),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown"),
        Key::Named(NamedKey::PageUp) => Some("PageUp"),
        Key::Named(NamedKey::PageDown) => Some("PageDown"),
        _ => None,
    }
}

struct App {
    ctx: CameraPathContext,
    modifiers: ModifiersState,
    cursor: Vec2,
    last_report: Instant,
    lines_key: Option<SceneKey>,
    lines: Vec<LineVertex>,
}

impl App {
    fn on_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        if self.modifiers.control_key() || self.modifiers.alt_key() || self.modifiers.super_key() {
            return;
        }
        let Some(command) = key_name(&event.logical_key).and_then(command_for_key) else {
            return;
        };
        if let Err(e) = self.ctx.apply_command(command) {
            log::warn!("[input] {:?} rejected: {}", command, e);
        }
    }

    fn on_wheel(&mut self, delta: MouseScrollDelta) {
        // winit reports scroll-up as positive; the path expects DOM sign.
        let px = match delta {
            MouseScrollDelta::LineDelta(_, y) => wheel_delta_px(-(y as f64), DOM_DELTA_LINE),
            MouseScrollDelta::PixelDelta(p) => wheel_delta_px(-p.y, DOM_DELTA_PIXEL),
        };
        self.ctx.on_wheel(px);
    }

    fn on_cursor(&mut self, px: Vec2, size: winit::dpi::PhysicalSize<u32>) {
        self.cursor = px;
        let ndc = pointer_ndc(px.x, px.y, size.width as f32, size.height as f32);
        self.ctx.on_pointer_move(px, ndc);
    }

    fn on_button(&mut self, state: ElementState, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => self.ctx.on_pointer_down(self.cursor),
            ElementState::Released => self.ctx.on_pointer_up(),
        }
    }

    fn frame(&mut self, aspect: f32) -> Mat4 {
        self.ctx.camera.set_aspect(aspect);
        self.ctx.frame();
        self.ctx.camera.take_projection_dirty();

        // No DOM here; the debug menu goes to the log once a second.
        if self.ctx.debug() && self.last_report.elapsed().as_secs_f32() >= 1.0 {
            self.last_report = Instant::now();
            for line in self.ctx.report().lines() {
                log::info!("[path] {}", line);
            }
        }

        let key = self.ctx.scene_key();
        if self.lines_key != Some(key) {
            self.lines = self.ctx.scene_lines();
            self.lines_key = Some(key);
        }
        self.ctx.camera.view_proj()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("scrollpath (native)")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let store = KeyframeStore::new();
    log::info!("[keyframes] loaded {} keyframes", store.len());
    let mut app = App {
        ctx: CameraPathContext::new(store, Camera::perspective(INITIAL_FOV_DEG, state.aspect())),
        modifiers: ModifiersState::empty(),
        cursor: Vec2::ZERO,
        last_report: Instant::now(),
        lines_key: None,
        lines: Vec::new(),
    };

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::ModifiersChanged(m) => app.modifiers = m.state(),
            WindowEvent::KeyboardInput { event, .. } => app.on_key(&event),
            WindowEvent::MouseWheel { delta, .. } => app.on_wheel(delta),
            WindowEvent::CursorMoved { position, .. } => app.on_cursor(
                Vec2::new(position.x as f32, position.y as f32),
                state.window.inner_size(),
            ),
            WindowEvent::MouseInput { state: s, button, .. } => app.on_button(s, button),
            _ => {}
        },
        Event::AboutToWait => {
            let view_proj = app.frame(state.aspect());
            match state.render(view_proj, &app.lines) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
