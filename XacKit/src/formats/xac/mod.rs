//! XAC (EMotion FX actor) binary format support
//!
//! Decodes the skeleton, meshes, skins and materials of an actor file into a
//! [`Scene`]. Chunk-local problems are collected as [`Diagnostic`]s instead
//! of failing the decode.

pub mod batch;
pub mod chunk;
pub mod cursor;
pub mod diagnostics;
pub mod document;
pub mod inspect;
mod material;
mod mesh;
mod nodes;
pub mod options;
pub mod reader;
pub mod scene;
mod skin;
pub mod types;

#[cfg(test)]
mod test_support;

// Public API exports
pub use batch::{BatchEntry, BatchInspectResult, BatchProgress, batch_inspect, find_xac_files};
pub use chunk::{ChunkHeader, ChunkType};
pub use cursor::Endian;
pub use diagnostics::{Diagnostic, DiagnosticKind, LinkIssue, Severity};
pub use document::{
    AttributeSemantic, FileHeader, Material, MaterialInfo, Mesh, Node, Skin, SkinInfluence, SkinRange, Submesh,
    TextureLayer, VertexAttributeLayer, XAC_MAGIC,
};
pub use inspect::{MaterialSummary, MeshSummary, XacSummary, inspect_xac, inspect_xac_with_options};
pub use options::DecodeOptions;
pub use reader::{
    DecodedXac, decode_xac_bytes, decode_xac_bytes_with_options, decode_xac_bytes_with_progress, list_chunks,
    read_header, read_xac, read_xac_with_options,
};
pub use scene::Scene;
pub use types::{XacPhase, XacProgress, XacProgressCallback};
