//! Viewport transform and perspective-correct triangle rasterization.

use glam::{Vec2, Vec4};
use softgpu_common::{FragmentShader, InFragment, OutFragment, Uniforms};
use softgpu_objects::Varying;

use crate::clip::Triangle;
use crate::framebuffer::Framebuffer;

/// Fragment counters for one or more rasterized triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FragmentCounts {
    /// Fragments handed to the fragment shader.
    pub shaded: u64,
    /// Fragments that passed the depth test.
    pub written: u64,
}

/// Perspective divide and mapping to pixel space.
///
/// `x` and `y` are scaled by the integer half-extents, so `[-1, 1]` maps to
/// `[0, 2 * (width / 2)]` and likewise for `height`. An odd-sized target
/// leaves its last column or row uncovered. `z` becomes `z / w`, and `w` is
/// kept for perspective correction.
pub fn to_screen(tri: &mut Triangle, width: u32, height: u32) {
    let half = Vec2::new((width / 2) as f32, (height / 2) as f32);
    for v in tri.iter_mut() {
        let p = v.position;
        v.position = Vec4::new(
            (p.x / p.w + 1.0) * half.x,
            (p.y / p.w + 1.0) * half.y,
            p.z / p.w,
            p.w,
        );
    }
}

/// Signed area term of `p` against the directed edge `a -> b`.
pub fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Integer sample range along one axis: starts at the rounded minimum,
/// stays below `max` and inside `[0, limit)`.
fn span(min: f32, max: f32, limit: u32) -> impl Iterator<Item = u32> {
    let start = (min.round() as i64).clamp(0, i64::from(limit)) as u32;
    (start..limit).take_while(move |&i| (i as f32) < max)
}

/// Rasterize one screen-space triangle into `fb`.
///
/// Pixel centres covered by the triangle in either winding are shaded; edge
/// terms of zero count as covered. Degenerate triangles produce nothing.
pub fn rasterize_triangle(
    tri: &Triangle,
    varyings: &[Varying],
    fragment_shader: &FragmentShader,
    uniforms: &Uniforms,
    fb: &mut Framebuffer,
) -> FragmentCounts {
    let mut counts = FragmentCounts::default();
    let [q0, q1, q2] = tri.map(|v| v.position);
    let [s0, s1, s2] = [q0, q1, q2].map(|q| Vec2::new(q.x, q.y));

    let signed_area = edge(s0, s1, s2);
    let mirrored = signed_area < 0.0;
    let area = signed_area.abs();
    // Also rejects NaN.
    let drawable = area > 0.0;
    if !drawable {
        return counts;
    }

    let min = s0.min(s1).min(s2);
    let max = s0.max(s1).max(s2);
    let columns: Vec<u32> = span(min.x, max.x, fb.width()).collect();

    for y in span(min.y, max.y, fb.height()) {
        for &x in &columns {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let (e0, e1, e2) = if mirrored {
                (edge(s2, s1, p), edge(s0, s2, p), edge(s1, s0, p))
            } else {
                (edge(s1, s2, p), edge(s2, s0, p), edge(s0, s1, p))
            };
            let covered = e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0;
            if !covered {
                continue;
            }

            let (l0, l1, l2) = (e0 / area, e1 / area, e2 / area);
            let divisor = l0 / q0.w + l1 / q1.w + l2 / q2.w;
            let (b0, b1, b2) = (l0 / q0.w, l1 / q1.w, l2 / q2.w);
            let depth = (q0.z * b0 + q1.z * b1 + q2.z * b2) / divisor;

            let mut fragment = InFragment {
                coord: Vec4::new(p.x, p.y, depth, divisor),
                ..InFragment::default()
            };
            for varying in varyings {
                let [a0, a1, a2] = tri.map(|v| v.attributes[varying.slot].0);
                let dst = &mut fragment.attributes[varying.slot].0;
                for (c, d) in dst.iter_mut().enumerate().take(varying.kind.components()) {
                    *d = (b0 * a0[c] + b1 * a1[c] + b2 * a2[c]) / divisor;
                }
            }

            let mut out = OutFragment::default();
            fragment_shader(&mut out, &fragment, uniforms);
            counts.shaded += 1;
            if fb.write_fragment(x, y, depth, out.color) {
                counts.written += 1;
            }
        }
    }
    counts
}
