//! Owned GPU buffers with usage hints.

/// How a buffer's contents are produced and consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsageHint {
    /// Written and read by the device (feedback targets).
    DynamicCopy,
    /// Small per-frame uniform block.
    Uniform,
}

impl BufferUsageHint {
    pub fn usages(self) -> wgpu::BufferUsages {
        use wgpu::BufferUsages as U;
        match self {
            BufferUsageHint::DynamicCopy => U::VERTEX | U::STORAGE | U::COPY_DST | U::COPY_SRC,
            BufferUsageHint::Uniform => U::UNIFORM | U::COPY_DST,
        }
    }
}

/// Round `size` up to wgpu's copy alignment.
pub fn aligned_size(size: u64) -> u64 {
    size.max(wgpu::COPY_BUFFER_ALIGNMENT)
        .next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT)
}

/// A wgpu buffer that remembers its size and usage. Released on drop.
#[derive(Debug)]
pub struct GpuBuffer {
    buffer: wgpu::Buffer,
    label: String,
    size: u64,
    hint: BufferUsageHint,
}

impl GpuBuffer {
    /// Allocate `size` bytes, filled from `data` or zeroed when `data` is
    /// `None`. Extra bytes of `data` beyond `size` are ignored.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        size: u64,
        data: Option<&[u8]>,
        hint: BufferUsageHint,
    ) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: aligned_size(size),
            usage: hint.usages(),
            mapped_at_creation: data.is_some(),
        });
        if let Some(data) = data {
            let n = data.len().min(size as usize);
            buffer.slice(..).get_mapped_range_mut()[..n].copy_from_slice(&data[..n]);
            buffer.unmap();
        }
        tracing::debug!(label, size, ?hint, "Buffer created");

        Self {
            buffer,
            label: label.to_string(),
            size,
            hint,
        }
    }

    /// Replace the contents. Reallocates when `size` differs from the
    /// current size and writes in place otherwise. Returns whether the
    /// buffer was reallocated.
    pub fn update(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: u64,
        data: Option<&[u8]>,
    ) -> bool {
        if size != self.size {
            *self = Self::new(device, &self.label, size, data, self.hint);
            return true;
        }

        match data {
            Some(data) => {
                let n = data.len().min(size as usize) as u64;
                // write_buffer needs a 4-byte multiple.
                let n = n - n % wgpu::COPY_BUFFER_ALIGNMENT;
                queue.write_buffer(&self.buffer, 0, &data[..n as usize]);
            }
            None => {
                let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("buffer clear encoder"),
                });
                encoder.clear_buffer(&self.buffer, 0, None);
                queue.submit(std::iter::once(encoder.finish()));
            }
        }
        false
    }

    pub fn raw(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_copy_is_vertex_and_storage() {
        let usages = BufferUsageHint::DynamicCopy.usages();
        assert!(usages.contains(wgpu::BufferUsages::VERTEX));
        assert!(usages.contains(wgpu::BufferUsages::STORAGE));
        assert!(usages.contains(wgpu::BufferUsages::COPY_DST));
        assert!(usages.contains(wgpu::BufferUsages::COPY_SRC));
    }

    #[test]
    fn uniform_hint_is_not_a_vertex_buffer() {
        let usages = BufferUsageHint::Uniform.usages();
        assert!(usages.contains(wgpu::BufferUsages::UNIFORM));
        assert!(!usages.contains(wgpu::BufferUsages::VERTEX));
    }

    #[test]
    fn sizes_align_to_four_bytes() {
        assert_eq!(aligned_size(28), 28);
        assert_eq!(aligned_size(30), 32);
        assert_eq!(aligned_size(0), 4);
    }
}
