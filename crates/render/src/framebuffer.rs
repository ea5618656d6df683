use glam::Vec4;
use softgpu_common::CLEAR_DEPTH;

/// Bytes per colour pixel (RGBA8).
pub const COLOR_CHANNELS: usize = 4;

/// Map a colour channel to 8 bits: clamp to `[0, 1]`, scale, round.
pub fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn color_to_rgba8(color: Vec4) -> [u8; 4] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
        channel_to_u8(color.w),
    ]
}

/// Colour + depth render target.
///
/// Both planes are row-major with pixel (0, 0) at the bottom-left; colour is
/// RGBA8, depth one `f32` per pixel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<u8>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![0; pixels * COLOR_CHANNELS],
            depth: vec![0.0; pixels],
        }
    }

    /// Reallocate for new dimensions. A no-op when they are unchanged;
    /// otherwise previous contents are dropped.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color(&self) -> &[u8] {
        &self.color
    }

    pub fn color_mut(&mut self) -> &mut [u8] {
        &mut self.color
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut [f32] {
        &mut self.depth
    }

    /// Fill every pixel with `color` and reset depth to `CLEAR_DEPTH`.
    pub fn clear(&mut self, color: Vec4) {
        let rgba = color_to_rgba8(color);
        for px in self.color.chunks_exact_mut(COLOR_CHANNELS) {
            px.copy_from_slice(&rgba);
        }
        self.depth.fill(CLEAR_DEPTH);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)? * COLOR_CHANNELS;
        let px = self.color.get(i..i + COLOR_CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.depth.get(self.index(x, y)?).copied()
    }

    /// Depth-tested write: stores `depth` and `color` only if `depth` is
    /// strictly less than the stored depth. Returns whether it was written.
    pub fn write_fragment(&mut self, x: u32, y: u32, depth: f32, color: Vec4) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        let passes = depth < self.depth[i];
        if !passes {
            return false;
        }
        self.depth[i] = depth;
        let c = i * COLOR_CHANNELS;
        self.color[c..c + COLOR_CHANNELS].copy_from_slice(&color_to_rgba8(color));
        true
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_mapping_clamps_and_rounds() {
        assert_eq!(channel_to_u8(0.0), 0);
        assert_eq!(channel_to_u8(1.0), 255);
        assert_eq!(channel_to_u8(0.5), 128);
        assert_eq!(channel_to_u8(0.2), 51);
        assert_eq!(channel_to_u8(7.0), 255);
        assert_eq!(channel_to_u8(-3.0), 0);
    }

    #[test]
    fn new_framebuffer_sizes_planes() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.width(), 4);
        assert_eq!(fb.height(), 3);
        assert_eq!(fb.color().len(), 48);
        assert_eq!(fb.depth().len(), 12);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(5, 2);
        fb.clear(Vec4::new(0.5, 2.0, 0.0, 1.0));
        for px in fb.color().chunks_exact(4) {
            assert_eq!(px, &[128, 255, 0, 255]);
        }
        assert!(fb.depth().iter().all(|&d| d == CLEAR_DEPTH));
    }

    #[test]
    fn resize_same_size_keeps_contents() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Vec4::ONE);
        fb.resize(2, 2);
        assert_eq!(fb.pixel(1, 1), Some([255; 4]));
    }

    #[test]
    fn resize_new_size_reallocates() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Vec4::ONE);
        fb.resize(3, 1);
        assert_eq!(fb.color().len(), 12);
        assert_eq!(fb.depth().len(), 3);
        assert_eq!(fb.pixel(2, 0), Some([0; 4]));
        assert_eq!(fb.pixel(0, 1), None);
    }

    #[test]
    fn depth_test_is_strict() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(Vec4::ZERO);

        assert!(fb.write_fragment(0, 0, 0.5, Vec4::ONE));
        assert_eq!(fb.depth_at(0, 0), Some(0.5));
        // Equal depth does not pass.
        assert!(!fb.write_fragment(0, 0, 0.5, Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(fb.pixel(0, 0), Some([255; 4]));
        // Nearer passes and replaces the colour outright.
        assert!(fb.write_fragment(0, 0, -0.2, Vec4::new(0.0, 0.0, 1.0, 0.0)));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 255, 0]));
    }

    #[test]
    fn nan_depth_never_passes() {
        let mut fb = Framebuffer::new(1, 1);
        fb.clear(Vec4::ZERO);
        assert!(!fb.write_fragment(0, 0, f32::NAN, Vec4::ONE));
        assert!(!fb.write_fragment(3, 0, 0.0, Vec4::ONE));
    }
}
