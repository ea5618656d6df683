use std::fmt;

use softgpu_common::{
    AttributeType, FragmentShader, GpuError, GpuResult, MAX_ATTRIBUTES, Uniform, Uniforms,
    VertexShader,
};

/// One entry of a program's forwarding list: attribute slot `slot` of the
/// vertex shader output is interpolated as `kind` and handed to the
/// fragment shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Varying {
    pub slot: usize,
    pub kind: AttributeType,
}

/// Shader program: the two programmable stages, their uniforms and the
/// forwarding list between them.
#[derive(Clone, Default)]
pub struct Program {
    vertex_shader: Option<VertexShader>,
    fragment_shader: Option<FragmentShader>,
    uniforms: Uniforms,
    varyings: Vec<Varying>,
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("vertex_shader", &self.vertex_shader.is_some())
            .field("fragment_shader", &self.fragment_shader.is_some())
            .field("varyings", &self.varyings)
            .finish_non_exhaustive()
    }
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_shaders(&mut self, vs: VertexShader, fs: FragmentShader) {
        self.vertex_shader = Some(vs);
        self.fragment_shader = Some(fs);
    }

    /// Both stages, or `None` until `attach_shaders` has been called.
    pub fn shaders(&self) -> Option<(&VertexShader, &FragmentShader)> {
        self.vertex_shader.as_ref().zip(self.fragment_shader.as_ref())
    }

    /// Declare that `slot` is forwarded as `kind`.
    ///
    /// The list keeps one entry per slot in first-declaration order; declaring
    /// a slot again replaces its type.
    pub fn set_varying(&mut self, slot: u32, kind: AttributeType) -> GpuResult<()> {
        let index = slot as usize;
        if index >= MAX_ATTRIBUTES {
            return Err(GpuError::AttributeOutOfRange(slot));
        }
        match self.varyings.iter_mut().find(|v| v.slot == index) {
            Some(existing) => existing.kind = kind,
            None => self.varyings.push(Varying { slot: index, kind }),
        }
        Ok(())
    }

    pub fn varyings(&self) -> &[Varying] {
        &self.varyings
    }

    pub fn set_uniform(&mut self, id: u32, value: Uniform) -> GpuResult<()> {
        self.uniforms.set(id, value)
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }
}
