//! Near-plane clipping in homogeneous clip space.
//!
//! A vertex is beyond the near plane when `w + z < 0`, tested as `-w > z`.
//! Triangles are re-tessellated against that plane before the perspective
//! divide so no surviving vertex has a non-positive `w + z`.

use glam::Vec4;
use softgpu_common::OutVertex;

pub type Triangle = [OutVertex; 3];

/// What clipping did to one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// No vertex beyond the plane; passed through untouched.
    Inside,
    /// One vertex beyond; the remaining quad became two triangles.
    Split,
    /// Two vertices beyond; both moved onto the plane.
    Trimmed,
    /// All three beyond; dropped.
    Culled,
}

pub fn beyond_near_plane(position: Vec4) -> bool {
    -position.w > position.z
}

/// Parameter along `inside -> other` where the edge crosses `w + z = 0`.
fn crossing(inside: &OutVertex, other: &OutVertex) -> f32 {
    let (k, x) = (inside.position, other.position);
    (-k.w - k.z) / (x.w - k.w + x.z - k.z)
}

/// The two vertex indices other than `k`, ascending.
fn others(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Clip `tri` against the near plane and append the surviving triangles to `out`.
///
/// Vertex slots keep their positions in the output so the winding of each
/// emitted triangle follows from the input order.
pub fn clip_near(tri: Triangle, out: &mut Vec<Triangle>) -> ClipOutcome {
    let beyond = tri.map(|v| beyond_near_plane(v.position));
    match beyond.iter().filter(|&&b| b).count() {
        0 => {
            out.push(tri);
            ClipOutcome::Inside
        }
        1 => {
            let k = beyond.iter().position(|&b| b).unwrap_or(0);
            let (a, b) = others(k);
            let on_a = tri[k].lerp(&tri[a], crossing(&tri[k], &tri[a]));
            let on_b = tri[k].lerp(&tri[b], crossing(&tri[k], &tri[b]));

            let mut first = tri;
            first[k] = tri[a];
            first[a] = on_a;
            first[b] = on_b;

            let mut second = tri;
            second[k] = on_b;

            out.push(first);
            out.push(second);
            ClipOutcome::Split
        }
        2 => {
            let k = beyond.iter().position(|&b| !b).unwrap_or(0);
            let (a, b) = others(k);
            let mut trimmed = tri;
            trimmed[a] = tri[k].lerp(&tri[a], crossing(&tri[k], &tri[a]));
            trimmed[b] = tri[k].lerp(&tri[b], crossing(&tri[k], &tri[b]));
            out.push(trimmed);
            ClipOutcome::Trimmed
        }
        _ => ClipOutcome::Culled,
    }
}
