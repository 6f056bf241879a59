//! Per-view uniform buffers
//!
//! Each view slot (mono or left eye, right eye) owns its own uniform buffer
//! and bind group so every view of a frame can be encoded in one pass.

use wgpu::util::DeviceExt;

use super::types::FrameUniforms;

/// Maximum number of views rendered in one frame
pub const MAX_VIEWS: usize = 2;

pub struct ViewBindings {
    layout: wgpu::BindGroupLayout,
    slots: Vec<(wgpu::Buffer, wgpu::BindGroup)>,
}

impl ViewBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let slots = (0..MAX_VIEWS)
            .map(|slot| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Frame Uniform Buffer {}", slot)),
                    contents: bytemuck::bytes_of(&FrameUniforms::default()),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Frame Bind Group {}", slot)),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                (buffer, bind_group)
            })
            .collect();

        Self { layout, slots }
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Upload uniforms for a view slot; slots past `MAX_VIEWS` are ignored
    pub fn write(&self, queue: &wgpu::Queue, slot: usize, uniforms: &FrameUniforms) {
        if let Some((buffer, _)) = self.slots.get(slot) {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(uniforms));
        }
    }

    pub fn bind_group(&self, slot: usize) -> Option<&wgpu::BindGroup> {
        self.slots.get(slot).map(|(_, bind_group)| bind_group)
    }
}
