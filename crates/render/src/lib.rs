//! Software rasterizer: the `Gpu` front end, the framebuffer and the
//! `draw_triangles` pipeline.
//!
//! # Invariants
//! - A draw either fails before touching the framebuffer or runs to the end.
//! - A fragment reaches the framebuffer only if its depth is strictly less
//!   than the stored depth.
//! - No vertex handed to the rasterizer lies beyond the near plane.
//! - Pixel (0, 0) is the bottom-left corner; colour planes are RGBA8.

pub mod clip;
pub mod fetch;
pub mod framebuffer;
pub mod gpu;
pub mod pipeline;
pub mod raster;

pub use clip::{ClipOutcome, Triangle};
pub use framebuffer::{COLOR_CHANNELS, Framebuffer, channel_to_u8, color_to_rgba8};
pub use gpu::Gpu;
pub use pipeline::DrawStats;

pub fn crate_info() -> &'static str {
    "softgpu-render v0.1.0"
}
