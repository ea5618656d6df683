use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use softgpu_render::{COLOR_CHANNELS, Framebuffer};

/// Darkest to brightest.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Write the colour plane as a binary PPM (P6), alpha dropped.
///
/// PPM stores the top row first; the framebuffer's row 0 is the bottom one,
/// so rows are emitted in reverse.
pub fn write_ppm<W: Write>(fb: &Framebuffer, mut out: W) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", fb.width(), fb.height())?;
    let row_len = fb.width() as usize * COLOR_CHANNELS;
    if row_len == 0 {
        return out.flush();
    }
    for row in fb.color().chunks_exact(row_len).rev() {
        for px in row.chunks_exact(COLOR_CHANNELS) {
            out.write_all(&px[..3])?;
        }
    }
    out.flush()
}

pub fn save_ppm(fb: &Framebuffer, path: &Path) -> anyhow::Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_ppm(fb, io::BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "image written");
    Ok(())
}

/// Downsampled text rendering of the colour plane, `columns` characters wide.
///
/// Terminal cells are about twice as tall as wide, so each character covers
/// twice as many rows as columns. Brightness is the mean luma of the block.
pub fn ascii_preview(fb: &Framebuffer, columns: u32) -> String {
    let (width, height) = (fb.width(), fb.height());
    if width == 0 || height == 0 || columns == 0 {
        return String::new();
    }
    let columns = columns.min(width);
    let cell_w = width.div_ceil(columns);
    let cell_h = (cell_w * 2).min(height);

    let mut text = String::new();
    let mut top = height;
    while top > 0 {
        let bottom = top.saturating_sub(cell_h);
        for left in (0..width).step_by(cell_w as usize) {
            let right = (left + cell_w).min(width);
            let mut sum = 0.0;
            let mut n = 0;
            for y in bottom..top {
                for x in left..right {
                    if let Some([r, g, b, _]) = fb.pixel(x, y) {
                        sum += 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
                        n += 1;
                    }
                }
            }
            let luma = sum / (n.max(1) as f32 * 255.0);
            let level = (luma * (RAMP.len() - 1) as f32).round() as usize;
            text.push(char::from(RAMP[level.min(RAMP.len() - 1)]));
        }
        text.push('\n');
        top = bottom;
    }
    text
}
