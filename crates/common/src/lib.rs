//! Shared vocabulary of the software GPU: handles, element types, vertex and
//! fragment records, uniforms, shader callables and errors.
//!
//! # Invariants
//! - `EMPTY_ID` is never a valid object.
//! - Records are plain values; shaders receive them by reference and cannot
//!   reach any other engine state.

pub mod error;
pub mod shader;
pub mod types;
pub mod uniform;
pub mod vertex;

pub use error::{GpuError, GpuResult};
pub use shader::{FragmentShader, VertexShader};
pub use types::{
    AttributeType, BufferId, CLEAR_DEPTH, EMPTY_ID, Handle, IndexType, MAX_ATTRIBUTES,
    MAX_UNIFORMS, ObjectId, ObjectKind, ProgramId, VertexPullerId,
};
pub use uniform::{Uniform, Uniforms};
pub use vertex::{Attribute, InFragment, InVertex, OutFragment, OutVertex};

pub fn crate_info() -> &'static str {
    "softgpu-common v0.1.0"
}
