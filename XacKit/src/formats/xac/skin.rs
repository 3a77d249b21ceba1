//! Skinning chunk

use super::cursor::{XacCursor, count_from_i32};
use super::document::{Skin, SkinInfluence, SkinRange};
use crate::error::Result;

/// Read a Skin chunk payload.
pub fn read_skin(cursor: &mut XacCursor<'_>) -> Result<Skin> {
    let node_id = cursor.read_i32()?;
    let bone_count = count_from_i32(cursor.read_i32()?);
    let influence_count = count_from_i32(cursor.read_i32()?);
    let is_collision = cursor.read_u8()? != 0;
    cursor.skip(3)?;

    tracing::debug!(
        "Skin for node {}: {} influences over {} bones",
        node_id,
        influence_count,
        bone_count
    );

    // 8 bytes per influence and per range
    let mut influences = Vec::with_capacity(influence_count.min(cursor.remaining() / 8));
    for _ in 0..influence_count {
        let weight = cursor.read_f32()?;
        let bone_id = cursor.read_i16()?;
        cursor.skip(2)?;
        influences.push(SkinInfluence { weight, bone_id });
    }

    let mut ranges = Vec::with_capacity(bone_count.min(cursor.remaining() / 8));
    for _ in 0..bone_count {
        ranges.push(SkinRange {
            first_influence: cursor.read_i32()?,
            count: cursor.read_i32()?,
        });
    }

    Ok(Skin {
        node_id,
        is_collision,
        influences,
        ranges,
    })
}
