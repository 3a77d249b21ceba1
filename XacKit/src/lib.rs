//! # XacKit
//!
//! A pure-Rust decoder for EMotion FX actor (`.xac`) files: skeleton
//! hierarchy, meshes with layered vertex attributes, skinning data and
//! materials.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xackit::formats::xac::read_xac;
//!
//! let decoded = read_xac("ship.xac")?;
//! println!("{} nodes, {} meshes", decoded.scene.nodes.len(), decoded.scene.meshes.len());
//!
//! // Chunk-local failures don't abort the decode
//! for diagnostic in &decoded.diagnostics {
//!     println!("{diagnostic}");
//! }
//! # Ok::<(), xackit::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use xackit::prelude::*;
//!
//! // Now you have access to:
//! // - read_xac, decode_xac_bytes, DecodeOptions
//! // - Scene, Node, Mesh, Skin, Material
//! // - Diagnostic, Severity, Error, Result, and more
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `xackit` command-line binary

pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::xac::{
        ChunkHeader, ChunkType, DecodeOptions, DecodedXac, Diagnostic, DiagnosticKind, LinkIssue, Material, Mesh,
        Node, Scene, Severity, Skin, SkinInfluence, Submesh, XacProgress, XacPhase, XacSummary,
        decode_xac_bytes, decode_xac_bytes_with_options, decode_xac_bytes_with_progress, inspect_xac,
        list_chunks, read_xac, read_xac_with_options,
    };

    // Batch exports
    pub use crate::formats::xac::{BatchInspectResult, batch_inspect, find_xac_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
