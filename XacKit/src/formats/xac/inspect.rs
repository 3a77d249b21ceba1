//! XAC file inspection utilities
//!
//! Condenses a decoded scene into counts and texture references that are
//! cheap to print or serialize.

use std::path::Path;

use serde::Serialize;

use super::diagnostics::Diagnostic;
use super::document::FileHeader;
use super::options::DecodeOptions;
use super::reader::{DecodedXac, decode_xac_bytes_with_options};
use crate::error::Result;

/// Information about an XAC file.
#[derive(Debug, Clone, Serialize)]
pub struct XacSummary {
    pub header: FileHeader,
    pub file_size: usize,
    pub chunk_count: usize,
    pub node_count: usize,
    pub root_count: usize,
    pub skin_count: usize,
    pub meshes: Vec<MeshSummary>,
    pub materials: Vec<MaterialSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-mesh counts.
#[derive(Debug, Clone, Serialize)]
pub struct MeshSummary {
    pub node_id: i32,
    /// Name of the owning node, when it resolves.
    pub node_name: Option<String>,
    pub vertex_count: usize,
    pub face_count: usize,
    pub submesh_count: usize,
    pub layer_count: usize,
    pub is_collision: bool,
    pub placeholder: bool,
}

/// Material name and the textures it references.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialSummary {
    pub name: String,
    pub textures: Vec<String>,
}

impl XacSummary {
    /// Summarize an already decoded file.
    #[must_use]
    pub fn from_decoded(decoded: &DecodedXac, file_size: usize) -> Self {
        let scene = &decoded.scene;

        let meshes = scene
            .meshes
            .values()
            .map(|mesh| MeshSummary {
                node_id: mesh.node_id,
                node_name: scene.mesh_node(mesh).map(|n| n.name.clone()),
                vertex_count: mesh.vertex_count,
                face_count: mesh.faces.len(),
                submesh_count: mesh.submeshes.len(),
                layer_count: mesh.layers.len(),
                is_collision: mesh.is_collision,
                placeholder: mesh.placeholder,
            })
            .collect();

        let materials = scene
            .materials
            .iter()
            .map(|m| MaterialSummary {
                name: m.name.clone(),
                textures: m.texture_paths().map(str::to_string).collect(),
            })
            .collect();

        Self {
            header: scene.header,
            file_size,
            chunk_count: decoded.chunk_count,
            node_count: scene.nodes.len(),
            root_count: scene.roots().count(),
            skin_count: scene.skins.len(),
            meshes,
            materials,
            diagnostics: decoded.diagnostics.clone(),
        }
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total faces across all meshes.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.meshes.iter().map(|m| m.face_count).sum()
    }
}

/// Get information about an XAC file.
///
/// # Errors
/// Returns an error if the file cannot be read or the decode cannot continue.
pub fn inspect_xac<P: AsRef<Path>>(source: P) -> Result<XacSummary> {
    inspect_xac_with_options(source, &DecodeOptions::default())
}

/// Get information about an XAC file with custom decode options.
///
/// # Errors
/// Returns an error if the file cannot be read or the decode cannot continue.
pub fn inspect_xac_with_options<P: AsRef<Path>>(source: P, options: &DecodeOptions) -> Result<XacSummary> {
    let data = std::fs::read(source.as_ref())?;
    let decoded = decode_xac_bytes_with_options(&data, options)?;
    Ok(XacSummary::from_decoded(&decoded, data.len()))
}
