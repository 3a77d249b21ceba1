//! Mesh geometry chunk
//!
//! A mesh payload is a 28-byte header, `layerCount` vertex attribute layers
//! and `submeshCount` submeshes. Submesh indices are local to the submesh's
//! own vertex window; a running offset moves them into the mesh's vertex
//! space, so submesh N is always translated by the sum of the vertex counts
//! of submeshes `0..N`.

use glam::{Vec2, Vec3};

use super::cursor::{Endian, XacCursor, count_from_i32};
use super::document::{AttributeSemantic, Mesh, Submesh, UNKNOWN_NODE_ID, VertexAttributeLayer};
use super::options::DecodeOptions;
use crate::error::{Error, Result};

/// Size of the fixed mesh header in bytes.
pub const MESH_HEADER_SIZE: usize = 28;

const LAYER_HEADER_SIZE: usize = 12;
const SUBMESH_HEADER_SIZE: usize = 16;
const BONE_ENTRY_SIZE: usize = 4;

/// Read a Mesh chunk payload.
///
/// A payload shorter than the header becomes a placeholder triangle when
/// [`DecodeOptions::mesh_fallback`] is set. Any other failure is local to
/// this chunk.
pub fn read_mesh(cursor: &mut XacCursor<'_>, options: &DecodeOptions) -> Result<Mesh> {
    if cursor.remaining() < MESH_HEADER_SIZE && options.mesh_fallback {
        let node_id = if cursor.remaining() >= 4 {
            cursor.read_i32()?
        } else {
            UNKNOWN_NODE_ID
        };
        tracing::debug!(
            "Mesh payload is {} bytes, using placeholder for node {}",
            cursor.len(),
            node_id
        );
        return Ok(Mesh::placeholder(node_id));
    }

    let node_id = cursor.read_i32()?;
    let influence_range_count = cursor.read_i32()?;
    let vertex_count = count_from_i32(cursor.read_i32()?);
    let _index_count = cursor.read_i32()?;
    let submesh_count = count_from_i32(cursor.read_i32()?);
    let layer_count = count_from_i32(cursor.read_i32()?);
    let is_collision = cursor.read_i32()? != 0;

    tracing::debug!(
        "Mesh for node {}: {} vertices, {} layers, {} submeshes",
        node_id,
        vertex_count,
        layer_count,
        submesh_count
    );

    // Caps allocations sized from the vertex count. Also rejects a layerless
    // mesh declaring more vertices than payload bytes, which would otherwise
    // decode to zero-filled vertices.
    if vertex_count > cursor.len() {
        return Err(Error::ChunkOverflow {
            what: "mesh vertex count",
            declared: vertex_count,
            remaining: cursor.len(),
        });
    }

    let mut layers = Vec::new();
    for _ in 0..layer_count {
        layers.push(read_layer(cursor, vertex_count)?);
    }

    let mut submeshes = Vec::new();
    let mut vertex_offset = 0usize;
    for _ in 0..submesh_count {
        let submesh = read_submesh(cursor, vertex_offset, vertex_count)?;
        vertex_offset = vertex_offset.saturating_add(submesh.vertex_count);
        submeshes.push(submesh);
    }

    if !submeshes.is_empty() && vertex_offset != vertex_count {
        if options.require_submesh_vertex_total {
            return Err(Error::SubmeshVertexMismatch {
                accumulated: vertex_offset,
                declared: vertex_count,
            });
        }
        tracing::warn!(
            "Mesh for node {}: submeshes cover {} of {} vertices",
            node_id,
            vertex_offset,
            vertex_count
        );
    }

    let endian = cursor.endian();
    let positions = unpack(&layers, AttributeSemantic::Position, vertex_count, endian, (12, Vec3::ZERO), |c| c.read_vec3())?;
    let uvs = unpack(&layers, AttributeSemantic::Uv, vertex_count, endian, (8, Vec2::ZERO), |c| c.read_vec2())?;
    let faces = build_faces(&submeshes);

    Ok(Mesh {
        node_id,
        influence_range_count,
        vertex_count,
        is_collision,
        layers,
        submeshes,
        positions,
        uvs,
        faces,
        placeholder: false,
    })
}

fn read_layer(cursor: &mut XacCursor<'_>, vertex_count: usize) -> Result<VertexAttributeLayer> {
    if cursor.remaining() < LAYER_HEADER_SIZE {
        return Err(Error::ChunkOverflow {
            what: "attribute layer header",
            declared: LAYER_HEADER_SIZE,
            remaining: cursor.remaining(),
        });
    }
    let semantic = AttributeSemantic::from_id(cursor.read_i32()?);
    let element_width = count_from_i32(cursor.read_i32()?);
    let keep_originals = cursor.read_u8()? != 0;
    let scale_factor = cursor.read_u8()?;
    let _reserved = cursor.read_u16()?;

    let size = vertex_count.saturating_mul(element_width);
    if size > cursor.remaining() {
        return Err(Error::ChunkOverflow {
            what: "attribute layer data",
            declared: size,
            remaining: cursor.remaining(),
        });
    }
    let data = cursor.read_bytes(size)?.to_vec();

    Ok(VertexAttributeLayer {
        semantic,
        element_width,
        keep_originals,
        scale_factor,
        data,
    })
}

/// Read one submesh, translating its indices by `vertex_offset`.
fn read_submesh(cursor: &mut XacCursor<'_>, vertex_offset: usize, mesh_vertex_count: usize) -> Result<Submesh> {
    if cursor.remaining() < SUBMESH_HEADER_SIZE {
        return Err(Error::ChunkOverflow {
            what: "submesh header",
            declared: SUBMESH_HEADER_SIZE,
            remaining: cursor.remaining(),
        });
    }
    let index_count = count_from_i32(cursor.read_i32()?);
    let vertex_count = count_from_i32(cursor.read_i32()?);
    let material_index = cursor.read_i32()?;
    let bone_count = count_from_i32(cursor.read_i32()?);

    let index_bytes = index_count.saturating_mul(4);
    if index_bytes > cursor.remaining() {
        return Err(Error::ChunkOverflow {
            what: "submesh indices",
            declared: index_bytes,
            remaining: cursor.remaining(),
        });
    }

    let mut indices = Vec::with_capacity(index_count);
    for _ in 0..index_count {
        let global = i64::from(cursor.read_i32()?) + vertex_offset as i64;
        if global < 0 || global >= mesh_vertex_count as i64 {
            return Err(Error::IndexOutOfRange {
                index: global,
                vertex_count: mesh_vertex_count,
            });
        }
        indices.push(global as u32);
    }

    let bone_bytes = bone_count.saturating_mul(BONE_ENTRY_SIZE);
    if bone_bytes > cursor.remaining() {
        return Err(Error::ChunkOverflow {
            what: "submesh bone list",
            declared: bone_bytes,
            remaining: cursor.remaining(),
        });
    }
    cursor.skip(bone_bytes)?;

    Ok(Submesh {
        indices,
        vertex_count,
        material_index,
        bone_count,
    })
}

/// Last layer with `semantic`. Later layers shadow earlier ones.
fn last_layer(layers: &[VertexAttributeLayer], semantic: AttributeSemantic) -> Option<&VertexAttributeLayer> {
    layers.iter().rev().find(|l| l.semantic == semantic)
}

/// Unpack one `size`-byte value per vertex from the last layer with `semantic`.
/// Vertices stay at `default` when the mesh has no such layer.
fn unpack<T: Copy>(
    layers: &[VertexAttributeLayer],
    semantic: AttributeSemantic,
    vertex_count: usize,
    endian: Endian,
    (size, default): (usize, T),
    read: impl Fn(&mut XacCursor<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let Some(layer) = last_layer(layers, semantic) else {
        return Ok(vec![default; vertex_count]);
    };
    (0..vertex_count)
        .map(|v| {
            let element = layer.element(v).unwrap_or_default();
            if element.len() < size {
                return Err(Error::TruncatedRead {
                    needed: size,
                    available: element.len(),
                });
            }
            read(&mut XacCursor::new(element, endian))
        })
        .collect()
}

/// Group each submesh's indices into triangles, in submesh order.
fn build_faces(submeshes: &[Submesh]) -> Vec<[u32; 3]> {
    let mut faces = Vec::new();
    for submesh in submeshes {
        let triples = submesh.indices.chunks_exact(3);
        if !triples.remainder().is_empty() {
            tracing::debug!(
                "Dropping {} trailing indices from submesh with material {}",
                triples.remainder().len(),
                submesh.material_index
            );
        }
        faces.extend(triples.map(|t| [t[0], t[1], t[2]]));
    }
    faces
}
