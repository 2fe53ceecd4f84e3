//! Leaf draw dispatch

use super::buffer::GpuLeafBuffers;

/// Issues the draw for one visible leaf
pub trait LeafRenderer<B> {
    /// Draw `index_count` indices (three per triangle) from the leaf's buffers
    fn draw_leaf(&mut self, buffers: &B, index_count: u32);
}

impl LeafRenderer<GpuLeafBuffers> for wgpu::RenderPass<'_> {
    fn draw_leaf(&mut self, buffers: &GpuLeafBuffers, index_count: u32) {
        self.set_vertex_buffer(0, buffers.vertex.slice(..));
        self.set_index_buffer(buffers.index.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..index_count, 0, 0..1);
    }
}

/// Counts draws without touching a device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawCounter {
    pub draw_calls: u32,
    pub indices: u64,
}

impl DrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Triangles submitted since the last reset
    pub fn triangles(&self) -> u64 {
        self.indices / 3
    }
}

impl<B> LeafRenderer<B> for DrawCounter {
    fn draw_leaf(&mut self, _buffers: &B, index_count: u32) {
        self.draw_calls += 1;
        self.indices += index_count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_accumulates_and_resets() {
        let mut counter = DrawCounter::new();
        counter.draw_leaf(&(), 30);
        counter.draw_leaf(&(), 6);
        assert_eq!(counter.draw_calls, 2);
        assert_eq!(counter.triangles(), 12);

        counter.reset();
        assert_eq!(counter, DrawCounter::default());
    }
}
