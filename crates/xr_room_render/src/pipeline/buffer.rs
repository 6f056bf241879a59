//! Vertex buffers that grow to fit their contents

use bytemuck::Pod;

/// A GPU buffer reallocated only when the data outgrows it
pub struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    capacity: wgpu::BufferAddress,
    len: u32,
}

impl GrowableBuffer {
    pub fn new(label: &'static str, usage: wgpu::BufferUsages) -> Self {
        Self {
            label,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            buffer: None,
            capacity: 0,
            len: 0,
        }
    }

    /// Replace the contents, reallocating if needed
    pub fn write<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        self.len = data.len() as u32;
        if data.is_empty() {
            return;
        }

        let bytes: &[u8] = bytemuck::cast_slice(data);
        let size = bytes.len() as wgpu::BufferAddress;

        if self.buffer.is_none() || size > self.capacity {
            let capacity = size.next_power_of_two();
            log::debug!("Allocating {} buffer: {} bytes", self.label, capacity);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: capacity,
                usage: self.usage,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        if let Some(buffer) = &self.buffer {
            queue.write_buffer(buffer, 0, bytes);
        }
    }

    /// Number of elements written by the last `write`
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffer, or None when nothing has been written
    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        if self.len == 0 {
            None
        } else {
            self.buffer.as_ref()
        }
    }

    #[inline]
    pub fn capacity(&self) -> wgpu::BufferAddress {
        self.capacity
    }
}
