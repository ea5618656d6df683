use softgpu_common::{GpuError, GpuResult};

/// Untyped byte region. The engine never interprets its contents except
/// through read heads and index configs at draw time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Allocate `size` bytes, zero-filled.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy `data` into the buffer starting at byte `offset`.
    pub fn write(&mut self, offset: u64, data: &[u8]) -> GpuResult<()> {
        let range = self.range(offset, data.len() as u64)?;
        self.data[range].copy_from_slice(data);
        Ok(())
    }

    /// Copy `out.len()` bytes starting at byte `offset` into `out`.
    pub fn read(&self, offset: u64, out: &mut [u8]) -> GpuResult<()> {
        out.copy_from_slice(self.bytes(offset, out.len() as u64)?);
        Ok(())
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: u64, len: u64) -> GpuResult<&[u8]> {
        let range = self.range(offset, len)?;
        Ok(&self.data[range])
    }

    fn range(&self, offset: u64, len: u64) -> GpuResult<std::ops::Range<usize>> {
        let size = self.data.len() as u64;
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= size)
            .ok_or(GpuError::BufferOutOfBounds { offset, len, size })?;
        // Both fit in usize because they are bounded by the allocation size.
        Ok(offset as usize..end as usize)
    }
}
