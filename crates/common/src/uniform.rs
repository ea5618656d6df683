use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::{GpuError, GpuResult};
use crate::types::MAX_UNIFORMS;

/// Value held by one uniform slot. The variant is whatever the last setter wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Uniform {
    #[default]
    Unset,
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Fixed-size uniform table owned by a program and handed to both shaders.
///
/// The typed getters never fail: a slot that is out of range, unset, or
/// holding another type reads as zero (matrices read as identity).
#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    slots: [Uniform; MAX_UNIFORMS],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            slots: [Uniform::Unset; MAX_UNIFORMS],
        }
    }
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite slot `id`.
    pub fn set(&mut self, id: u32, value: Uniform) -> GpuResult<()> {
        let slot = self
            .slots
            .get_mut(id as usize)
            .ok_or(GpuError::UniformOutOfRange(id))?;
        *slot = value;
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&Uniform> {
        self.slots.get(id as usize)
    }

    pub fn float(&self, id: u32) -> f32 {
        match self.get(id) {
            Some(Uniform::Float(v)) => *v,
            _ => 0.0,
        }
    }

    pub fn vec2(&self, id: u32) -> Vec2 {
        match self.get(id) {
            Some(Uniform::Vec2(v)) => *v,
            _ => Vec2::ZERO,
        }
    }

    pub fn vec3(&self, id: u32) -> Vec3 {
        match self.get(id) {
            Some(Uniform::Vec3(v)) => *v,
            _ => Vec3::ZERO,
        }
    }

    pub fn vec4(&self, id: u32) -> Vec4 {
        match self.get(id) {
            Some(Uniform::Vec4(v)) => *v,
            _ => Vec4::ZERO,
        }
    }

    pub fn mat4(&self, id: u32) -> Mat4 {
        match self.get(id) {
            Some(Uniform::Mat4(m)) => *m,
            _ => Mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut u = Uniforms::new();
        u.set(4, Uniform::Vec3(Vec3::ONE)).unwrap();
        assert_eq!(u.vec3(4), Vec3::ONE);

        u.set(4, Uniform::Float(2.5)).unwrap();
        assert_eq!(u.float(4), 2.5);
        // The old vec3 is gone, not reinterpreted.
        assert_eq!(u.vec3(4), Vec3::ZERO);
    }

    #[test]
    fn mismatched_reads_fall_back() {
        let u = Uniforms::new();
        assert_eq!(u.get(0), Some(&Uniform::Unset));
        assert_eq!(u.mat4(0), Mat4::IDENTITY);
        assert_eq!(u.vec4(0), Vec4::ZERO);
        assert_eq!(u.float(MAX_UNIFORMS as u32), 0.0);
    }

    #[test]
    fn out_of_range_set_is_rejected() {
        let mut u = Uniforms::new();
        let id = MAX_UNIFORMS as u32;
        assert_eq!(
            u.set(id, Uniform::Float(1.0)),
            Err(GpuError::UniformOutOfRange(id))
        );
        assert!(u.get(id).is_none());
    }
}
