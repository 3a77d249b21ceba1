//! Node hierarchy chunk

use super::cursor::{XacCursor, count_from_i32};
use super::document::Node;
use crate::error::Result;

/// Shear vector, stored but unused.
const SHEAR_BYTES: usize = 12;
/// Skeletal and motion LOD masks.
const LOD_MASK_BYTES: usize = 8;

/// Read a Nodes chunk payload.
///
/// Node records carry no length of their own, so a truncated record cannot be
/// skipped; the error is returned as-is and the caller aborts the decode.
pub fn read_nodes(cursor: &mut XacCursor<'_>) -> Result<Vec<Node>> {
    let node_count = count_from_i32(cursor.read_i32()?);
    let root_count = cursor.read_i32()?;
    tracing::debug!("Nodes chunk: {} nodes, {} roots", node_count, root_count);

    // Each node is at least 160 bytes, don't trust the count for capacity
    let mut nodes = Vec::with_capacity(node_count.min(cursor.remaining() / 160));
    for _ in 0..node_count {
        nodes.push(read_node(cursor)?);
    }
    Ok(nodes)
}

fn read_node(cursor: &mut XacCursor<'_>) -> Result<Node> {
    let rotation = cursor.read_quat()?;
    let scale_rotation = cursor.read_quat()?;
    let position = cursor.read_vec3()?;
    let scale = cursor.read_vec3()?;
    cursor.skip(SHEAR_BYTES)?;
    cursor.skip(LOD_MASK_BYTES)?;
    let parent_index = cursor.read_i32()?;
    let _child_count = cursor.read_i32()?;
    let _include_in_bounds = cursor.read_i32()?;
    let _transform = cursor.read_mat4()?;
    let _importance = cursor.read_f32()?;
    let name = cursor.read_string()?;

    Ok(Node {
        name,
        parent_index,
        position,
        rotation,
        scale_rotation,
        scale,
    })
}
