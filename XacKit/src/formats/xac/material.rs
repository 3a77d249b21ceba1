//! Material and material-info chunks

use glam::Vec2;

use super::cursor::XacCursor;
use super::document::{Material, MaterialInfo, TextureLayer};
use crate::error::Result;

/// Read a standard Material chunk payload.
pub fn read_material(cursor: &mut XacCursor<'_>) -> Result<Material> {
    let ambient = cursor.read_vec4()?;
    let diffuse = cursor.read_vec4()?;
    let specular = cursor.read_vec4()?;
    let emissive = cursor.read_vec4()?;
    let shininess = cursor.read_f32()?;
    let specular_strength = cursor.read_f32()?;
    let opacity = cursor.read_f32()?;
    let ior = cursor.read_f32()?;
    let double_sided = cursor.read_u8()? != 0;
    let wireframe = cursor.read_u8()? != 0;
    let transparency_type = cursor.read_u8()?;
    let layer_count = cursor.read_u8()?;
    let name = cursor.read_string()?;

    let mut layers = Vec::with_capacity(usize::from(layer_count));
    for _ in 0..layer_count {
        layers.push(read_texture_layer(cursor)?);
    }

    tracing::debug!("Material '{}' with {} texture layers", name, layers.len());

    Ok(Material {
        name,
        ambient,
        diffuse,
        specular,
        emissive,
        shininess,
        specular_strength,
        opacity,
        ior,
        double_sided,
        wireframe,
        transparency_type,
        layers,
    })
}

fn read_texture_layer(cursor: &mut XacCursor<'_>) -> Result<TextureLayer> {
    let amount = cursor.read_f32()?;
    let uv_offset = Vec2::new(cursor.read_f32()?, cursor.read_f32()?);
    let uv_tiling = Vec2::new(cursor.read_f32()?, cursor.read_f32()?);
    let rotation = cursor.read_f32()?;
    let source_material = cursor.read_i16()?;
    let layer_type = cursor.read_u8()?;
    let _reserved = cursor.read_u8()?;
    let texture = cursor.read_string()?;

    Ok(TextureLayer {
        amount,
        uv_offset,
        uv_tiling,
        rotation,
        source_material,
        layer_type,
        texture,
    })
}

/// Read a MaterialInfo chunk payload.
pub fn read_material_info(cursor: &mut XacCursor<'_>) -> Result<MaterialInfo> {
    Ok(MaterialInfo {
        total_materials: cursor.read_i32()?,
        standard_materials: cursor.read_i32()?,
        fx_materials: cursor.read_i32()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formats::xac::cursor::Endian;
    use crate::formats::xac::test_support::PayloadWriter;
    use glam::Vec4;

    fn material_payload(textures: &[&str]) -> Vec<u8> {
        let mut w = PayloadWriter::new(Endian::Little);
        for c in [0.1f32, 0.8, 0.5, 0.0] {
            w.f32(c).f32(c).f32(c).f32(1.0);
        }
        w.f32(25.0).f32(1.0).f32(1.0).f32(1.5);
        w.u8(1).u8(0).u8(0).u8(textures.len() as u8);
        w.string("Hull");
        for (i, tex) in textures.iter().enumerate() {
            w.f32(1.0).f32(0.0).f32(0.0).f32(1.0).f32(1.0).f32(0.0);
            w.i16(-1).u8(i as u8 + 2).u8(0);
            w.string(tex);
        }
        w.finish()
    }

    #[test]
    fn test_reads_material_and_textures() {
        let data = material_payload(&["hull_diff.dds", "hull_norm.dds"]);
        let material = read_material(&mut XacCursor::new(&data, Endian::Little)).unwrap();

        assert_eq!(material.name, "Hull");
        assert_eq!(material.diffuse, Vec4::new(0.8, 0.8, 0.8, 1.0));
        assert_eq!(material.ior, 1.5);
        assert!(material.double_sided);
        assert!(!material.wireframe);
        assert_eq!(
            material.texture_paths().collect::<Vec<_>>(),
            vec!["hull_diff.dds", "hull_norm.dds"]
        );
        assert_eq!(material.layers[1].layer_type, 3);
        assert_eq!(material.layers[0].source_material, -1);
    }

    #[test]
    fn test_truncated_texture_path() {
        let mut data = material_payload(&["hull_diff.dds"]);
        data.truncate(data.len() - 3);
        assert!(matches!(
            read_material(&mut XacCursor::new(&data, Endian::Little)),
            Err(Error::TruncatedRead { .. })
        ));
    }

    #[test]
    fn test_reads_material_info() {
        let mut w = PayloadWriter::new(Endian::Big);
        w.i32(3).i32(2).i32(1);
        let data = w.finish();
        let info = read_material_info(&mut XacCursor::new(&data, Endian::Big)).unwrap();
        assert_eq!(info.standard_materials, 2);
        assert_eq!(info.fx_materials, 1);
    }
}
