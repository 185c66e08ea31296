use std::borrow::Cow;
use std::time::{Duration, Instant};

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::naga::ShaderStage;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::config::RendererConfig;
use crate::error::{RendererError, ShaderStageKind};
use crate::shader::{FRAGMENT_SHADER_GLSL, VERTEX_SHADER_GLSL};
use crate::uniforms::LightningUniforms;

/// Two triangles covering the whole surface, matching the `aPosition`
/// attribute of the vertex stage.
const QUAD_VERTICES: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [1.0, 1.0],
];

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

/// Owns every GPU resource needed to present a frame.
///
/// Created exactly once per renderer instance; there is no reinitialization
/// path. A failed or lost context means tearing the instance down and
/// building a new one.
pub(crate) struct GpuState {
    /// `wgpu` instance that produced the surface; kept alive for the surface lifetime.
    _instance: wgpu::Instance,
    /// Limits advertised by the adapter; used to validate resize requests.
    limits: wgpu::Limits,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    /// Tuning values pushed into the uniform block every frame.
    tuning: RendererConfig,
    frame_count: u32,
    /// Throttles the once-per-second heartbeat log.
    last_log_time: Instant,
}

impl GpuState {
    /// Acquires a drawing context on `target`, compiles both shader stages,
    /// links the pipeline, and uploads the quad and the seeded uniform block.
    ///
    /// Any failure along that chain returns before the instance exists, so a
    /// failed creation leaves nothing behind that needs explicit cleanup.
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        tuning: &RendererConfig,
    ) -> Result<Self, RendererError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let instance = wgpu::Instance::default();
        let window_handle = target.window_handle().map_err(|err| unavailable(&err))?;
        let display_handle = target.display_handle().map_err(|err| unavailable(&err))?;
        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .map_err(|err| unavailable(&err))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|err| unavailable(&err))?;

        let limits = adapter.limits();
        let size = PhysicalSize::new(initial_size.width.max(1), initial_size.height.max(1));
        let max_dimension = limits.max_texture_dimension_2d;
        if size.width > max_dimension || size.height > max_dimension {
            return Err(RendererError::ContextUnavailable {
                reason: format!(
                    "requested surface {}x{} exceeds GPU max texture dimension {max_dimension}",
                    size.width, size.height
                ),
            });
        }

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let device_descriptor = wgpu::DeviceDescriptor {
            label: Some("boltwall device"),
            required_features: wgpu::Features::empty(),
            required_limits: limits.clone(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        };
        let (device, queue) = pollster::block_on(adapter.request_device(&device_descriptor))
            .map_err(|err| unavailable(&err))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        let vertex_module = compile_stage(&device, VERTEX_SHADER_GLSL, ShaderStageKind::Vertex)?;
        let fragment_module =
            compile_stage(&device, FRAGMENT_SHADER_GLSL, ShaderStageKind::Fragment)?;

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lightning uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lightning pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        // Linking the two compiled stages is where interface mismatches
        // surface, so pipeline creation runs under its own validation scope.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lightning pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &QUAD_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RendererError::ProgramLink {
                log: err.to_string(),
            });
        }

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lightning quad"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniforms = LightningUniforms::compose(size, 0.0, tuning);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lightning uniforms"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lightning uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        tracing::info!(
            width = size.width,
            height = size.height,
            format = ?surface_format,
            "initialised lightning surface"
        );

        Ok(Self {
            _instance: instance,
            limits,
            surface,
            device,
            queue,
            config,
            size,
            pipeline,
            quad_buffer,
            uniform_buffer,
            uniform_bind_group,
            tuning: *tuning,
            frame_count: 0,
            last_log_time: Instant::now(),
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Reconfigures the swapchain to match the new backing extent. Idempotent;
    /// extents the adapter cannot represent keep the previous size.
    ///
    /// An extent equal to the current one still reconfigures the surface:
    /// recovery from a lost or outdated surface re-submits the current size
    /// and depends on the configure call happening.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        let max_dimension = self.limits.max_texture_dimension_2d;
        if new_size.width > max_dimension || new_size.height > max_dimension {
            tracing::warn!(
                width = new_size.width,
                height = new_size.height,
                max_dimension,
                "resize exceeds GPU max texture dimension; keeping previous size"
            );
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        tracing::debug!(
            width = new_size.width,
            height = new_size.height,
            "resized lightning surface"
        );
    }

    /// Uploads the uniform block for `elapsed` seconds and submits one draw
    /// of the full-surface quad.
    pub(crate) fn render_frame(&mut self, elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        let uniforms = LightningUniforms::compose(self.size, elapsed, &self.tuning);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lightning encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lightning pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        self.frame_count = self.frame_count.saturating_add(1);
        tracing::trace!(
            time = uniforms.time,
            width = self.size.width,
            height = self.size.height,
            "presented frame"
        );

        let now = Instant::now();
        if now.duration_since(self.last_log_time) >= Duration::from_secs(1) {
            tracing::debug!(
                time = uniforms.time,
                frame = self.frame_count,
                width = self.size.width,
                height = self.size.height,
                "lightning heartbeat"
            );
            self.last_log_time = now;
        }

        Ok(())
    }
}

fn unavailable(err: &dyn std::fmt::Display) -> RendererError {
    RendererError::ContextUnavailable {
        reason: err.to_string(),
    }
}

/// Compiles one GLSL stage under a validation error scope so a rejected
/// source surfaces as a [`RendererError::ShaderCompile`] diagnostic instead
/// of an uncaptured device error.
fn compile_stage(
    device: &wgpu::Device,
    source: &'static str,
    stage: ShaderStageKind,
) -> Result<wgpu::ShaderModule, RendererError> {
    let naga_stage = match stage {
        ShaderStageKind::Vertex => ShaderStage::Vertex,
        ShaderStageKind::Fragment => ShaderStage::Fragment,
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStageKind::Vertex => "lightning vertex",
            ShaderStageKind::Fragment => "lightning fragment",
        }),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage: naga_stage,
            defines: &[],
        },
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(RendererError::ShaderCompile {
            stage,
            log: err.to_string(),
        });
    }

    Ok(module)
}
