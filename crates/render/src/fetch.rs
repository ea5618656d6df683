//! Vertex fetch: turns the bound puller's read heads and optional index
//! buffer into `InVertex` records.

use softgpu_common::{BufferId, GpuError, GpuResult, InVertex, IndexType};
use softgpu_objects::{Buffer, ObjectTable, VertexPuller};

/// Vertex id for draw position `j`: the `j`-th element of the index buffer
/// when indexing is enabled, `j` itself otherwise.
pub fn vertex_id(
    puller: &VertexPuller,
    buffers: &ObjectTable<BufferId, Buffer>,
    j: u32,
) -> GpuResult<u32> {
    let indexing = puller.indexing();
    if !indexing.enabled {
        return Ok(j);
    }
    let size = indexing.index_type.byte_size() as u64;
    let bytes = buffers
        .get(indexing.buffer)?
        .bytes(u64::from(j) * size, size)?;
    Ok(match indexing.index_type {
        IndexType::U8 => u32::from(bytes[0]),
        IndexType::U16 => u32::from(bytemuck::pod_read_unaligned::<u16>(bytes)),
        IndexType::U32 => bytemuck::pod_read_unaligned::<u32>(bytes),
    })
}

/// Assemble the input vertex for draw position `j`.
///
/// Every enabled head copies `kind.byte_size()` bytes from
/// `offset + stride * vertex_id` into its attribute slot; remaining
/// components and disabled slots stay zero.
pub fn fetch_vertex(
    puller: &VertexPuller,
    buffers: &ObjectTable<BufferId, Buffer>,
    j: u32,
) -> GpuResult<InVertex> {
    let mut vertex = InVertex {
        vertex_id: vertex_id(puller, buffers, j)?,
        ..InVertex::default()
    };
    for (slot, head) in puller.enabled_heads() {
        let buffer = buffers.get(head.buffer)?;
        let len = head.kind.byte_size();
        let offset = head
            .byte_offset(vertex.vertex_id)
            .ok_or(GpuError::BufferOutOfBounds {
                offset: u64::MAX,
                len: len as u64,
                size: buffer.len() as u64,
            })?;
        let src = buffer.bytes(offset, len as u64)?;
        bytemuck::bytes_of_mut(&mut vertex.attributes[slot])[..len].copy_from_slice(src);
    }
    Ok(vertex)
}
