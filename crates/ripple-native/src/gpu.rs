use crate::content::ContentImage;
use crate::processor::{DrawPlan, GpuRippleProcessor};
use ripple_core::EffectSupport;
use std::rc::Rc;
use wgpu::util::DeviceExt;

pub(crate) static RIPPLE_WGSL: &str = include_str!("../shaders/ripple.wgsl");

const CONTENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub(crate) struct GpuState<'w> {
    pub(crate) window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: Rc<wgpu::Device>,
    queue: Rc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    shader: wgpu::ShaderModule,
    content_bgl: wgpu::BindGroupLayout,
    content_bind_group: wgpu::BindGroup,
    content_pipeline: wgpu::RenderPipeline,
    support: EffectSupport,
    clear_color: wgpu::Color,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    pub(crate) async fn new(
        window: &'w winit::window::Window,
        content: &ContentImage,
        force_passthrough: bool,
    ) -> anyhow::Result<Self> {
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
        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);
        let support = probe_effect_support(&adapter, force_passthrough);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;
        let device = Rc::new(device);
        let queue = Rc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
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
            label: Some("ripple_shader"),
            source: wgpu::ShaderSource::Wgsl(RIPPLE_WGSL.into()),
        });

        let content_tex = device.create_texture_with_data(
            &queue,
            &wgpu::TextureDescriptor {
                label: Some("content_tex"),
                size: wgpu::Extent3d {
                    width: content.width,
                    height: content.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: CONTENT_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &content.rgba,
        );
        let content_view = content_tex.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("content_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let content_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("content_bgl"), // tex+sampler
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        let content_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("content_bg"),
            layout: &content_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&content_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        let pl_content = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_content"),
            bind_group_layouts: &[&content_bgl],
            push_constant_ranges: &[],
        });
        let content_pipeline =
            make_fullscreen_pipeline(&device, &pl_content, &shader, "fs_content", format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            shader,
            content_bgl,
            content_bind_group,
            content_pipeline,
            support,
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.04,
                a: 1.0,
            },
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    pub(crate) fn support(&self) -> &EffectSupport {
        &self.support
    }

    /// Build the ripple processor against this device and surface format.
    pub(crate) fn ripple_processor(&self) -> GpuRippleProcessor {
        GpuRippleProcessor::new(
            self.device.clone(),
            self.queue.clone(),
            &self.shader,
            &self.content_bgl,
            self.config.format,
        )
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub(crate) fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub(crate) fn render(&mut self, plan: &DrawPlan) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("surface_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            match plan {
                DrawPlan::Content => {
                    rpass.set_pipeline(&self.content_pipeline);
                    rpass.set_bind_group(0, &self.content_bind_group, &[]);
                }
                DrawPlan::Rippled(pass) => {
                    rpass.set_pipeline(&pass.pipeline);
                    rpass.set_bind_group(0, &self.content_bind_group, &[]);
                    rpass.set_bind_group(1, pass.uniforms.as_ref(), &[]);
                }
            }
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Decide once whether the ripple pass can run on this adapter.
fn probe_effect_support(adapter: &wgpu::Adapter, force_passthrough: bool) -> EffectSupport {
    if force_passthrough {
        return EffectSupport::unavailable("disabled with --passthrough");
    }
    let downlevel = adapter.get_downlevel_capabilities();
    if matches!(downlevel.shader_model, wgpu::ShaderModel::Sm2) {
        return EffectSupport::unavailable("adapter shader model too old");
    }
    let features = adapter.get_texture_format_features(CONTENT_FORMAT);
    if !features
        .flags
        .contains(wgpu::TextureFormatFeatureFlags::FILTERABLE)
    {
        return EffectSupport::unavailable("content format is not filterable");
    }
    EffectSupport::Available
}

pub(crate) fn make_fullscreen_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    frag_entry: &str,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(frag_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
