//! The `draw_triangles` pipeline: fetch, vertex shading, primitive assembly,
//! near-plane clipping, viewport transform, rasterization and fragment
//! output.

use std::time::{Duration, Instant};

use softgpu_common::{BufferId, FragmentShader, GpuResult, OutVertex, VertexShader};
use softgpu_objects::{Buffer, ObjectTable, Program, VertexPuller};

use crate::clip::{ClipOutcome, Triangle, clip_near};
use crate::fetch::fetch_vertex;
use crate::framebuffer::Framebuffer;
use crate::raster::{rasterize_triangle, to_screen};

/// Everything a draw reads, resolved from the bound handles.
#[derive(Clone, Copy)]
pub struct DrawBindings<'a> {
    pub buffers: &'a ObjectTable<BufferId, Buffer>,
    pub puller: &'a VertexPuller,
    pub program: &'a Program,
    pub vertex_shader: &'a VertexShader,
    pub fragment_shader: &'a FragmentShader,
}

/// Counters for one `draw_triangles` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub vertices_shaded: u32,
    /// Complete triangles formed from consecutive vertex triples.
    pub triangles_assembled: u32,
    /// Triangles left after near-plane clipping.
    pub triangles_rasterized: u32,
    pub fragments_shaded: u64,
    pub fragments_written: u64,
    pub draw_time: Duration,
}

/// Run `count` vertices through the pipeline into `framebuffer`.
///
/// All vertices are fetched and shaded before any fragment is written, so a
/// fetch error leaves the framebuffer untouched. Trailing vertices that do
/// not complete a triangle are shaded and then discarded.
pub fn draw_triangles(
    bindings: DrawBindings<'_>,
    framebuffer: &mut Framebuffer,
    count: u32,
) -> GpuResult<DrawStats> {
    let _span = tracing::info_span!("draw_triangles", count).entered();
    let start = Instant::now();
    let uniforms = bindings.program.uniforms();

    let mut shaded = Vec::new();
    for j in 0..count {
        let input = fetch_vertex(bindings.puller, bindings.buffers, j)?;
        let mut out = OutVertex::default();
        (bindings.vertex_shader)(&mut out, &input, uniforms);
        shaded.push(out);
    }

    let assembled = shaded.chunks_exact(3);
    if !assembled.remainder().is_empty() {
        tracing::debug!(
            dropped = assembled.remainder().len(),
            "trailing vertices do not form a triangle"
        );
    }

    let mut triangles: Vec<Triangle> = Vec::with_capacity(assembled.len());
    let mut stats = DrawStats {
        vertices_shaded: count,
        triangles_assembled: assembled.len() as u32,
        ..DrawStats::default()
    };
    for chunk in assembled {
        let outcome = clip_near([chunk[0], chunk[1], chunk[2]], &mut triangles);
        if outcome != ClipOutcome::Inside {
            tracing::trace!(?outcome, "near-plane clip");
        }
    }
    stats.triangles_rasterized = triangles.len() as u32;

    let (width, height) = (framebuffer.width(), framebuffer.height());
    for tri in &mut triangles {
        to_screen(tri, width, height);
        let counts = rasterize_triangle(
            tri,
            bindings.program.varyings(),
            bindings.fragment_shader,
            uniforms,
            framebuffer,
        );
        stats.fragments_shaded += counts.shaded;
        stats.fragments_written += counts.written;
    }
    stats.draw_time = start.elapsed();

    tracing::debug!(
        triangles = stats.triangles_rasterized,
        fragments = stats.fragments_shaded,
        written = stats.fragments_written,
        "draw complete"
    );
    Ok(stats)
}
