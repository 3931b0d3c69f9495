use ripple_core::{EffectProcessor, RenderInvocation};
use std::rc::Rc;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct RippleUniforms {
    pub(crate) center: [f32; 2],
    pub(crate) size: [f32; 2],
    pub(crate) time: f32,
    pub(crate) speed: f32,
    pub(crate) aberration: f32,
    pub(crate) ring_thickness: f32,
    pub(crate) intensity: f32,
    pub(crate) _pad: [f32; 3],
}

impl From<&RenderInvocation> for RippleUniforms {
    fn from(inv: &RenderInvocation) -> Self {
        Self {
            center: inv.center.to_array(),
            size: inv.viewport.to_array(),
            time: inv.elapsed,
            speed: inv.speed,
            aberration: inv.aberration,
            ring_thickness: inv.ring_thickness,
            intensity: inv.intensity,
            _pad: [0.0; 3],
        }
    }
}

/// Ripple draw for one frame: shared pipeline plus the session's uniforms.
pub(crate) struct RipplePass {
    pub(crate) pipeline: Rc<wgpu::RenderPipeline>,
    pub(crate) uniforms: Rc<wgpu::BindGroup>,
}

/// What the surface pass draws. The content texture is bound at group 0 either way.
pub(crate) enum DrawPlan {
    Content,
    Rippled(RipplePass),
}

/// Uniform buffer and bind group owned by one ripple session.
pub(crate) struct SessionBindings {
    buffer: wgpu::Buffer,
    bind_group: Rc<wgpu::BindGroup>,
}

/// WGSL ripple pass fed from the controller's per-frame invocation.
pub(crate) struct GpuRippleProcessor {
    device: Rc<wgpu::Device>,
    queue: Rc<wgpu::Queue>,
    pipeline: Rc<wgpu::RenderPipeline>,
    uniforms_bgl: wgpu::BindGroupLayout,
}

impl GpuRippleProcessor {
    pub(crate) fn new(
        device: Rc<wgpu::Device>,
        queue: Rc<wgpu::Queue>,
        shader: &wgpu::ShaderModule,
        content_bgl: &wgpu::BindGroupLayout,
        swap_format: wgpu::TextureFormat,
    ) -> Self {
        let uniforms_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ripple_uniforms_bgl"),
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
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_ripple"),
            bind_group_layouts: &[content_bgl, &uniforms_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = crate::gpu::make_fullscreen_pipeline(
            &device,
            &layout,
            shader,
            "fs_ripple",
            swap_format,
        );
        Self {
            device,
            queue,
            pipeline: Rc::new(pipeline),
            uniforms_bgl,
        }
    }
}

impl EffectProcessor for GpuRippleProcessor {
    type Image = DrawPlan;
    type SessionState = SessionBindings;

    fn begin_session(&mut self, invocation: &RenderInvocation) -> SessionBindings {
        let label = format!("ripple_uniforms_{}", invocation.session.0);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&label),
            size: std::mem::size_of::<RippleUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout: &self.uniforms_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        SessionBindings {
            buffer,
            bind_group: Rc::new(bind_group),
        }
    }

    fn apply(
        &mut self,
        _image: DrawPlan,
        invocation: &RenderInvocation,
        session: &mut SessionBindings,
    ) -> DrawPlan {
        let uniforms = RippleUniforms::from(invocation);
        self.queue
            .write_buffer(&session.buffer, 0, bytemuck::bytes_of(&uniforms));
        DrawPlan::Rippled(RipplePass {
            pipeline: self.pipeline.clone(),
            uniforms: session.bind_group.clone(),
        })
    }
}
