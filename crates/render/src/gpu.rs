use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use softgpu_common::{
    AttributeType, BufferId, GpuError, GpuResult, InFragment, InVertex, IndexType, OutFragment,
    OutVertex, ProgramId, Uniform, Uniforms, VertexPullerId,
};
use softgpu_objects::{Buffer, ObjectTable, Program, VertexPuller};

use crate::framebuffer::Framebuffer;
use crate::pipeline::{self, DrawBindings, DrawStats};

/// The software GPU: object tables, binding state and the framebuffer.
///
/// Every operation on a handle checks that the handle names a live object
/// of the right kind and reports `GpuError::InvalidHandle` otherwise.
/// References held by a vertex puller are only resolved at draw time.
#[derive(Debug, Default)]
pub struct Gpu {
    buffers: ObjectTable<BufferId, Buffer>,
    pullers: ObjectTable<VertexPullerId, VertexPuller>,
    programs: ObjectTable<ProgramId, Program>,
    framebuffer: Framebuffer,
    active_puller: Option<VertexPullerId>,
    active_program: Option<ProgramId>,
}

impl Gpu {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Buffers ---

    /// Allocate a zero-filled buffer of `size` bytes.
    pub fn create_buffer(&mut self, size: usize) -> BufferId {
        let id = self.buffers.insert(Buffer::new(size));
        tracing::debug!(%id, size, "buffer created");
        id
    }

    pub fn delete_buffer(&mut self, id: BufferId) -> GpuResult<()> {
        self.buffers.remove(id)?;
        tracing::debug!(%id, "buffer deleted");
        Ok(())
    }

    pub fn set_buffer_data(&mut self, id: BufferId, offset: u64, data: &[u8]) -> GpuResult<()> {
        self.buffers.get_mut(id)?.write(offset, data)
    }

    pub fn get_buffer_data(&self, id: BufferId, offset: u64, out: &mut [u8]) -> GpuResult<()> {
        self.buffers.get(id)?.read(offset, out)
    }

    pub fn is_buffer(&self, id: BufferId) -> bool {
        self.buffers.contains(id)
    }

    // --- Vertex pullers ---

    pub fn create_vertex_puller(&mut self) -> VertexPullerId {
        let id = self.pullers.insert(VertexPuller::new());
        tracing::debug!(%id, "vertex puller created");
        id
    }

    /// Delete a puller. Deleting the bound puller also unbinds it.
    pub fn delete_vertex_puller(&mut self, id: VertexPullerId) -> GpuResult<()> {
        self.pullers.remove(id)?;
        if self.active_puller == Some(id) {
            self.active_puller = None;
        }
        tracing::debug!(%id, "vertex puller deleted");
        Ok(())
    }

    /// Configure read head `head`. The head's enabled flag is left as is.
    pub fn set_vertex_puller_head(
        &mut self,
        id: VertexPullerId,
        head: u32,
        kind: AttributeType,
        stride: u64,
        offset: u64,
        buffer: BufferId,
    ) -> GpuResult<()> {
        self.pullers
            .get_mut(id)?
            .set_head(head, kind, stride, offset, buffer)
    }

    /// Read vertex ids from `buffer` as `index_type` elements.
    pub fn set_vertex_puller_indexing(
        &mut self,
        id: VertexPullerId,
        index_type: IndexType,
        buffer: BufferId,
    ) -> GpuResult<()> {
        self.pullers.get_mut(id)?.set_indexing(index_type, buffer);
        Ok(())
    }

    pub fn disable_vertex_puller_indexing(&mut self, id: VertexPullerId) -> GpuResult<()> {
        self.pullers.get_mut(id)?.disable_indexing();
        Ok(())
    }

    pub fn enable_vertex_puller_head(&mut self, id: VertexPullerId, head: u32) -> GpuResult<()> {
        self.pullers.get_mut(id)?.enable_head(head)
    }

    pub fn disable_vertex_puller_head(&mut self, id: VertexPullerId, head: u32) -> GpuResult<()> {
        self.pullers.get_mut(id)?.disable_head(head)
    }

    pub fn bind_vertex_puller(&mut self, id: VertexPullerId) -> GpuResult<()> {
        self.pullers.get(id)?;
        self.active_puller = Some(id);
        tracing::debug!(%id, "vertex puller bound");
        Ok(())
    }

    pub fn unbind_vertex_puller(&mut self) {
        self.active_puller = None;
    }

    pub fn is_vertex_puller(&self, id: VertexPullerId) -> bool {
        self.pullers.contains(id)
    }

    pub fn active_vertex_puller(&self) -> Option<VertexPullerId> {
        self.active_puller
    }

    pub fn vertex_puller(&self, id: VertexPullerId) -> GpuResult<&VertexPuller> {
        self.pullers.get(id)
    }

    // --- Programs ---

    pub fn create_program(&mut self) -> ProgramId {
        let id = self.programs.insert(Program::new());
        tracing::debug!(%id, "program created");
        id
    }

    /// Delete a program. Deleting the active program also deactivates it.
    pub fn delete_program(&mut self, id: ProgramId) -> GpuResult<()> {
        self.programs.remove(id)?;
        if self.active_program == Some(id) {
            self.active_program = None;
        }
        tracing::debug!(%id, "program deleted");
        Ok(())
    }

    /// Attach both shader stages, replacing any previously attached pair.
    pub fn attach_shaders<V, F>(&mut self, id: ProgramId, vertex: V, fragment: F) -> GpuResult<()>
    where
        V: Fn(&mut OutVertex, &InVertex, &Uniforms) + Send + Sync + 'static,
        F: Fn(&mut OutFragment, &InFragment, &Uniforms) + Send + Sync + 'static,
    {
        self.programs
            .get_mut(id)?
            .attach_shaders(Arc::new(vertex), Arc::new(fragment));
        Ok(())
    }

    /// Forward vertex output attribute `slot` to the fragment stage as `kind`.
    pub fn set_vs2fs_type(
        &mut self,
        id: ProgramId,
        slot: u32,
        kind: AttributeType,
    ) -> GpuResult<()> {
        self.programs.get_mut(id)?.set_varying(slot, kind)
    }

    pub fn use_program(&mut self, id: ProgramId) -> GpuResult<()> {
        self.programs.get(id)?;
        self.active_program = Some(id);
        tracing::debug!(%id, "program in use");
        Ok(())
    }

    pub fn is_program(&self, id: ProgramId) -> bool {
        self.programs.contains(id)
    }

    pub fn active_program(&self) -> Option<ProgramId> {
        self.active_program
    }

    pub fn program(&self, id: ProgramId) -> GpuResult<&Program> {
        self.programs.get(id)
    }

    pub fn program_uniform(
        &mut self,
        id: ProgramId,
        uniform: u32,
        value: Uniform,
    ) -> GpuResult<()> {
        self.programs.get_mut(id)?.set_uniform(uniform, value)
    }

    pub fn program_uniform_1f(&mut self, id: ProgramId, uniform: u32, v: f32) -> GpuResult<()> {
        self.program_uniform(id, uniform, Uniform::Float(v))
    }

    pub fn program_uniform_2f(&mut self, id: ProgramId, uniform: u32, v: Vec2) -> GpuResult<()> {
        self.program_uniform(id, uniform, Uniform::Vec2(v))
    }

    pub fn program_uniform_3f(&mut self, id: ProgramId, uniform: u32, v: Vec3) -> GpuResult<()> {
        self.program_uniform(id, uniform, Uniform::Vec3(v))
    }

    pub fn program_uniform_4f(&mut self, id: ProgramId, uniform: u32, v: Vec4) -> GpuResult<()> {
        self.program_uniform(id, uniform, Uniform::Vec4(v))
    }

    pub fn program_uniform_matrix_4f(
        &mut self,
        id: ProgramId,
        uniform: u32,
        m: Mat4,
    ) -> GpuResult<()> {
        self.program_uniform(id, uniform, Uniform::Mat4(m))
    }

    // --- Framebuffer ---

    pub fn create_framebuffer(&mut self, width: u32, height: u32) {
        self.framebuffer = Framebuffer::new(width, height);
        tracing::debug!(width, height, "framebuffer created");
    }

    /// Release the framebuffer storage; dimensions become zero.
    pub fn delete_framebuffer(&mut self) {
        self.framebuffer = Framebuffer::default();
    }

    pub fn resize_framebuffer(&mut self, width: u32, height: u32) {
        self.framebuffer.resize(width, height);
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_color(&self) -> &[u8] {
        self.framebuffer.color()
    }

    pub fn framebuffer_color_mut(&mut self) -> &mut [u8] {
        self.framebuffer.color_mut()
    }

    pub fn framebuffer_depth(&self) -> &[f32] {
        self.framebuffer.depth()
    }

    pub fn framebuffer_depth_mut(&mut self) -> &mut [f32] {
        self.framebuffer.depth_mut()
    }

    pub fn framebuffer_width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn framebuffer_height(&self) -> u32 {
        self.framebuffer.height()
    }

    // --- Commands ---

    /// Fill the colour plane with `(r, g, b, a)` and reset depth.
    pub fn clear(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.framebuffer.clear(Vec4::new(r, g, b, a));
    }

    /// Draw `count` vertices as a triangle list with the bound puller and
    /// the active program.
    pub fn draw_triangles(&mut self, count: u32) -> GpuResult<DrawStats> {
        let puller_id = self.active_puller.ok_or(GpuError::NoVertexPullerBound)?;
        let program_id = self.active_program.ok_or(GpuError::NoProgramBound)?;
        let puller = self.pullers.get(puller_id)?;
        let program = self.programs.get(program_id)?;
        let (vertex_shader, fragment_shader) = program
            .shaders()
            .ok_or(GpuError::ShadersNotAttached(program_id.0))?;

        let bindings = DrawBindings {
            buffers: &self.buffers,
            puller,
            program,
            vertex_shader,
            fragment_shader,
        };
        pipeline::draw_triangles(bindings, &mut self.framebuffer, count)
    }
}
