use softgpu_common::{AttributeType, BufferId, GpuError, GpuResult, IndexType, MAX_ATTRIBUTES};

/// Descriptor for pulling one attribute out of a buffer.
///
/// Vertex `i` reads `kind.byte_size()` bytes at `offset + stride * i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadHead {
    pub kind: AttributeType,
    pub stride: u64,
    pub offset: u64,
    pub buffer: BufferId,
    pub enabled: bool,
}

impl ReadHead {
    /// Byte position of `vertex_id`'s attribute, `None` on overflow.
    pub fn byte_offset(&self, vertex_id: u32) -> Option<u64> {
        self.stride
            .checked_mul(u64::from(vertex_id))?
            .checked_add(self.offset)
    }
}

/// Optional index buffer. When disabled the vertex id is the loop counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indexing {
    pub index_type: IndexType,
    pub buffer: BufferId,
    pub enabled: bool,
}

/// Vertex input assembly configuration.
///
/// References buffers by handle; it owns none of them. A fresh puller has
/// every head disabled and indexing disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexPuller {
    heads: [ReadHead; MAX_ATTRIBUTES],
    indexing: Indexing,
}

impl VertexPuller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace head `head`'s descriptor. The enabled flag is left alone.
    pub fn set_head(
        &mut self,
        head: u32,
        kind: AttributeType,
        stride: u64,
        offset: u64,
        buffer: BufferId,
    ) -> GpuResult<()> {
        let h = self.head_mut(head)?;
        h.kind = kind;
        h.stride = stride;
        h.offset = offset;
        h.buffer = buffer;
        Ok(())
    }

    pub fn enable_head(&mut self, head: u32) -> GpuResult<()> {
        self.head_mut(head)?.enabled = true;
        Ok(())
    }

    pub fn disable_head(&mut self, head: u32) -> GpuResult<()> {
        self.head_mut(head)?.enabled = false;
        Ok(())
    }

    /// Configure and enable indexed fetching.
    pub fn set_indexing(&mut self, index_type: IndexType, buffer: BufferId) {
        self.indexing = Indexing {
            index_type,
            buffer,
            enabled: true,
        };
    }

    pub fn disable_indexing(&mut self) {
        self.indexing.enabled = false;
    }

    pub fn head(&self, head: u32) -> Option<&ReadHead> {
        self.heads.get(head as usize)
    }

    pub fn heads(&self) -> &[ReadHead; MAX_ATTRIBUTES] {
        &self.heads
    }

    /// Enabled heads with their attribute slot.
    pub fn enabled_heads(&self) -> impl Iterator<Item = (usize, &ReadHead)> {
        self.heads.iter().enumerate().filter(|(_, h)| h.enabled)
    }

    pub fn indexing(&self) -> &Indexing {
        &self.indexing
    }

    fn head_mut(&mut self, head: u32) -> GpuResult<&mut ReadHead> {
        self.heads
            .get_mut(head as usize)
            .ok_or(GpuError::AttributeOutOfRange(head))
    }
}
