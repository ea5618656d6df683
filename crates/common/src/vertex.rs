use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use crate::types::MAX_ATTRIBUTES;

/// One attribute slot: up to four floats.
///
/// The slot does not know its own type. A read head or a program's
/// forwarding list decides how many components are meaningful; unused
/// components are left as they are.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Attribute(pub [f32; 4]);

impl Attribute {
    pub const ZERO: Self = Self([0.0; 4]);

    pub fn as_f32(&self) -> f32 {
        self.0[0]
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.0[0], self.0[1])
    }

    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    pub fn as_vec4(&self) -> Vec4 {
        Vec4::from_array(self.0)
    }

    /// `self + (other - self) * t` on every component.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut out = Self::ZERO;
        for (c, (a, b)) in out.0.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *c = a + (b - a) * t;
        }
        out
    }
}

impl From<f32> for Attribute {
    fn from(v: f32) -> Self {
        Self([v, 0.0, 0.0, 0.0])
    }
}

impl From<Vec2> for Attribute {
    fn from(v: Vec2) -> Self {
        Self([v.x, v.y, 0.0, 0.0])
    }
}

impl From<Vec3> for Attribute {
    fn from(v: Vec3) -> Self {
        Self([v.x, v.y, v.z, 0.0])
    }
}

impl From<Vec4> for Attribute {
    fn from(v: Vec4) -> Self {
        Self(v.to_array())
    }
}

/// Vertex as fetched by the vertex puller, input of the vertex shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InVertex {
    pub attributes: [Attribute; MAX_ATTRIBUTES],
    /// Index value read from the index buffer, or the loop counter when
    /// indexing is disabled.
    pub vertex_id: u32,
}

impl Default for InVertex {
    fn default() -> Self {
        Self {
            attributes: [Attribute::ZERO; MAX_ATTRIBUTES],
            vertex_id: 0,
        }
    }
}

/// Vertex shader output: clip-space position plus attributes to forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutVertex {
    pub position: Vec4,
    pub attributes: [Attribute; MAX_ATTRIBUTES],
}

impl Default for OutVertex {
    fn default() -> Self {
        Self {
            position: Vec4::ZERO,
            attributes: [Attribute::ZERO; MAX_ATTRIBUTES],
        }
    }
}

impl OutVertex {
    /// Linear blend towards `other`, applied identically to the position and
    /// every attribute component.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut out = Self {
            position: self.position + (other.position - self.position) * t,
            ..Self::default()
        };
        for (slot, (a, b)) in out
            .attributes
            .iter_mut()
            .zip(self.attributes.iter().zip(other.attributes.iter()))
        {
            *slot = a.lerp(b, t);
        }
        out
    }
}

/// Rasterized fragment, input of the fragment shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InFragment {
    /// `(x + 0.5, y + 0.5, depth, 1/w)` with 1/w interpolated perspective-correctly.
    pub coord: Vec4,
    /// Forwarded attributes; slots the program does not forward stay zero.
    pub attributes: [Attribute; MAX_ATTRIBUTES],
}

impl Default for InFragment {
    fn default() -> Self {
        Self {
            coord: Vec4::ZERO,
            attributes: [Attribute::ZERO; MAX_ATTRIBUTES],
        }
    }
}

/// Fragment shader output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutFragment {
    pub color: Vec4,
}
