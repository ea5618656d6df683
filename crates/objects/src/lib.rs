//! Object tables of the software GPU: byte buffers, vertex pullers and
//! shader programs, each addressed by a reusable integer handle.
//!
//! # Invariants
//! - Handles are unique among live objects and recycled LIFO after deletion.
//! - The sentinel empty handle never resolves to an object.
//! - Pullers reference buffers by handle and own none of them.

pub mod buffer;
pub mod program;
pub mod puller;
pub mod table;

pub use buffer::Buffer;
pub use program::{Program, Varying};
pub use puller::{Indexing, ReadHead, VertexPuller};
pub use table::ObjectTable;

pub fn crate_info() -> &'static str {
    "softgpu-objects v0.1.0"
}
