//! Decoded XAC records
//!
//! Everything here is produced by a single linear pass over the file and is
//! not mutated once its owning chunk has been parsed.

use glam::{Quat, Vec2, Vec3, Vec4};
use serde::Serialize;

use super::cursor::Endian;

/// The 4-byte tag every XAC file starts with.
pub const XAC_MAGIC: [u8; 4] = *b"XAC ";

/// Size of the raw file header in bytes.
pub const FILE_HEADER_SIZE: usize = 8;

/// Node id used for a placeholder mesh whose payload was too short to name its node.
pub const UNKNOWN_NODE_ID: i32 = -1;

/// File header (raw bytes, no byte order applies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileHeader {
    pub major_version: u8,
    pub minor_version: u8,
    pub big_endian: bool,
    /// Matrix multiplication order byte, passed through uninterpreted.
    pub multiply_order: u8,
}

impl FileHeader {
    #[must_use]
    pub fn endian(&self) -> Endian {
        if self.big_endian { Endian::Big } else { Endian::Little }
    }
}

/// A skeleton node. Its index in the scene node list is its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    /// Raw parent index; negative or out-of-range values mark a root.
    pub parent_index: i32,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale_rotation: Quat,
    pub scale: Vec3,
}

/// Semantic of a per-vertex attribute layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeSemantic {
    Position,
    Normal,
    Tangent,
    Uv,
    Color32,
    OriginalVertexNumbers,
    Color128,
    Bitangent,
    Other(i32),
}

impl AttributeSemantic {
    #[must_use]
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => Self::Position,
            1 => Self::Normal,
            2 => Self::Tangent,
            3 => Self::Uv,
            4 => Self::Color32,
            5 => Self::OriginalVertexNumbers,
            6 => Self::Color128,
            7 => Self::Bitangent,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn id(self) -> i32 {
        match self {
            Self::Position => 0,
            Self::Normal => 1,
            Self::Tangent => 2,
            Self::Uv => 3,
            Self::Color32 => 4,
            Self::OriginalVertexNumbers => 5,
            Self::Color128 => 6,
            Self::Bitangent => 7,
            Self::Other(id) => id,
        }
    }
}

/// A per-vertex data channel.
///
/// `data.len()` is always `vertex_count * element_width`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexAttributeLayer {
    pub semantic: AttributeSemantic,
    pub element_width: usize,
    pub keep_originals: bool,
    pub scale_factor: u8,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl VertexAttributeLayer {
    /// Raw bytes of one vertex's element.
    #[must_use]
    pub fn element(&self, vertex: usize) -> Option<&[u8]> {
        let start = vertex.checked_mul(self.element_width)?;
        self.data.get(start..start.checked_add(self.element_width)?)
    }
}

/// A material group inside a mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submesh {
    /// Indices already translated into the owning mesh's vertex space.
    pub indices: Vec<u32>,
    pub vertex_count: usize,
    pub material_index: i32,
    /// Length of the bone list; the entries themselves are not kept.
    pub bone_count: usize,
}

/// Geometry attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh {
    pub node_id: i32,
    pub influence_range_count: i32,
    pub vertex_count: usize,
    pub is_collision: bool,
    pub layers: Vec<VertexAttributeLayer>,
    pub submeshes: Vec<Submesh>,
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub faces: Vec<[u32; 3]>,
    /// Set when the payload was too short and this mesh is a stand-in triangle.
    pub placeholder: bool,
}

impl Mesh {
    /// Single triangle over (0,0,0), (1,0,0), (0,1,0).
    #[must_use]
    pub fn placeholder(node_id: i32) -> Self {
        Self {
            node_id,
            influence_range_count: 0,
            vertex_count: 3,
            is_collision: false,
            layers: Vec::new(),
            submeshes: Vec::new(),
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: vec![Vec2::ZERO; 3],
            faces: vec![[0, 1, 2]],
            placeholder: true,
        }
    }

    /// Last layer with the given semantic, the one `positions` and `uvs`
    /// were unpacked from.
    #[must_use]
    pub fn layer(&self, semantic: AttributeSemantic) -> Option<&VertexAttributeLayer> {
        self.layers.iter().rev().find(|l| l.semantic == semantic)
    }
}

/// One bone's pull on a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinInfluence {
    pub weight: f32,
    pub bone_id: i16,
}

/// Slice of a skin's influence list owned by one bone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkinRange {
    pub first_influence: i32,
    pub count: i32,
}

/// Skinning data for the mesh on one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skin {
    pub node_id: i32,
    pub is_collision: bool,
    pub influences: Vec<SkinInfluence>,
    pub ranges: Vec<SkinRange>,
}

impl Skin {
    /// Influences owned by `bone`, or `None` when its range does not fit.
    #[must_use]
    pub fn bone_influences(&self, bone: usize) -> Option<&[SkinInfluence]> {
        let range = self.ranges.get(bone)?;
        let first = usize::try_from(range.first_influence).ok()?;
        let count = usize::try_from(range.count).ok()?;
        self.influences.get(first..first.checked_add(count)?)
    }
}

/// A texture map applied to a material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureLayer {
    pub amount: f32,
    pub uv_offset: Vec2,
    pub uv_tiling: Vec2,
    pub rotation: f32,
    pub source_material: i16,
    pub layer_type: u8,
    pub texture: String,
}

/// A standard material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub name: String,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub emissive: Vec4,
    pub shininess: f32,
    pub specular_strength: f32,
    pub opacity: f32,
    pub ior: f32,
    pub double_sided: bool,
    pub wireframe: bool,
    pub transparency_type: u8,
    pub layers: Vec<TextureLayer>,
}

impl Material {
    /// Texture paths in layer order.
    pub fn texture_paths(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.texture.as_str())
    }
}

/// Declared material totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialInfo {
    pub total_materials: i32,
    pub standard_materials: i32,
    pub fx_materials: i32,
}
