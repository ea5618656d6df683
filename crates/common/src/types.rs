use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw integer backing every object handle.
pub type ObjectId = u32;

/// Sentinel raw id meaning "no object". Never handed out by any table.
pub const EMPTY_ID: ObjectId = ObjectId::MAX;

/// Number of attribute slots per vertex (and read heads per vertex puller).
pub const MAX_ATTRIBUTES: usize = 16;

/// Number of uniform slots per program.
pub const MAX_UNIFORMS: usize = 64;

/// Depth written by `clear`. Strictly greater than any post-divide depth in
/// `[-1, 1]`, so the first in-range fragment at a pixel always passes.
pub const CLEAR_DEPTH: f32 = 1.1;

/// The object table a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Buffer,
    VertexPuller,
    Program,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Buffer => "buffer",
            Self::VertexPuller => "vertex puller",
            Self::Program => "program",
        };
        f.write_str(name)
    }
}

/// Typed handle into one object table.
pub trait Handle: Copy + Eq + fmt::Debug {
    /// Table this handle indexes.
    const KIND: ObjectKind;

    fn from_raw(raw: ObjectId) -> Self;

    fn raw(self) -> ObjectId;
}

macro_rules! object_handle {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub ObjectId);

        impl $name {
            /// The "no object" handle.
            pub const EMPTY: Self = Self(EMPTY_ID);

            pub fn is_empty(self) -> bool {
                self.0 == EMPTY_ID
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::EMPTY
            }
        }

        impl Handle for $name {
            const KIND: ObjectKind = ObjectKind::$kind;

            fn from_raw(raw: ObjectId) -> Self {
                Self(raw)
            }

            fn raw(self) -> ObjectId {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_empty() {
                    write!(f, "{}#empty", ObjectKind::$kind)
                } else {
                    write!(f, "{}#{}", ObjectKind::$kind, self.0)
                }
            }
        }
    };
}

object_handle!(
    /// Handle of a byte buffer.
    BufferId => Buffer
);
object_handle!(
    /// Handle of a vertex puller (vertex input assembly configuration).
    VertexPullerId => VertexPuller
);
object_handle!(
    /// Handle of a shader program.
    ProgramId => Program
);

/// Element type of a vertex attribute: how many `f32` components it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeType {
    #[default]
    Empty,
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl AttributeType {
    /// Number of `f32` components.
    pub const fn components(self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
        }
    }

    /// Size in bytes of one attribute of this type in a vertex buffer.
    pub const fn byte_size(self) -> usize {
        self.components() * std::mem::size_of::<f32>()
    }
}

/// Width of one element of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IndexType {
    U8,
    U16,
    #[default]
    U32,
}

impl IndexType {
    pub const fn byte_size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}
