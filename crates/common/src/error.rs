use crate::types::{Handle, MAX_ATTRIBUTES, MAX_UNIFORMS, ObjectId, ObjectKind};

/// Errors from object-table and pipeline operations.
///
/// Every mutating entry point validates its inputs and reports one of these
/// instead of touching memory it does not own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GpuError {
    #[error("invalid {kind} handle {id}")]
    InvalidHandle { kind: ObjectKind, id: ObjectId },
    #[error("buffer access out of bounds: offset {offset} + len {len} exceeds size {size}")]
    BufferOutOfBounds { offset: u64, len: u64, size: u64 },
    #[error("attribute slot {0} out of range (max {max})", max = MAX_ATTRIBUTES)]
    AttributeOutOfRange(u32),
    #[error("uniform slot {0} out of range (max {max})", max = MAX_UNIFORMS)]
    UniformOutOfRange(u32),
    #[error("no vertex puller bound")]
    NoVertexPullerBound,
    #[error("no program in use")]
    NoProgramBound,
    #[error("program {0} has no shaders attached")]
    ShadersNotAttached(ObjectId),
}

impl GpuError {
    /// `InvalidHandle` for a typed handle.
    pub fn invalid<H: Handle>(handle: H) -> Self {
        Self::InvalidHandle {
            kind: H::KIND,
            id: handle.raw(),
        }
    }
}

pub type GpuResult<T> = Result<T, GpuError>;
