//! Non-fatal decode events
//!
//! Chunk-local failures never abort a decode. They are caught at the handler
//! boundary and recorded here, tagged with the chunk they came from, so a
//! caller can render them, filter them by [`Severity`], or ignore them.

use std::fmt;

use serde::Serialize;

use super::chunk::{ChunkHeader, ChunkType};
use crate::error::Error;

/// How much a diagnostic matters to a consumer of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A cross-chunk reference that could not be resolved after the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LinkIssue {
    /// A mesh names a node id that is not in the node list.
    MeshNodeMissing,
    /// A skin names a node id that is not in the node list.
    SkinNodeMissing,
    /// A submesh material index does not name a decoded material.
    MaterialIndexOutOfRange,
    /// A skin influence names a bone that is not in the node list.
    BoneOutOfRange,
    /// A skin range reaches past the skin's influence list.
    SkinRangeOutOfBounds,
    /// The MaterialInfo standard count differs from the materials decoded.
    MaterialCountMismatch,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    TruncatedRead,
    ChunkOverflow,
    IndexOutOfRange,
    SubmeshVertexMismatch,
    /// Any other chunk-local failure, such as a string that is not UTF-8.
    MalformedPayload,
    /// A short mesh payload was replaced by a placeholder triangle.
    DegenerateMeshFallback,
    UnknownChunkType,
    /// The declared chunk length ran past the end of the file.
    TruncatedPayload,
    Link(LinkIssue),
}

impl DiagnosticKind {
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::UnknownChunkType => Severity::Info,
            Self::DegenerateMeshFallback | Self::TruncatedPayload | Self::Link(_) => Severity::Warning,
            Self::TruncatedRead
            | Self::ChunkOverflow
            | Self::IndexOutOfRange
            | Self::SubmeshVertexMismatch
            | Self::MalformedPayload => Severity::Error,
        }
    }

    /// Classify a handler error caught at the chunk boundary.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::TruncatedRead { .. } => Self::TruncatedRead,
            Error::ChunkOverflow { .. } => Self::ChunkOverflow,
            Error::IndexOutOfRange { .. } => Self::IndexOutOfRange,
            Error::SubmeshVertexMismatch { .. } => Self::SubmeshVertexMismatch,
            _ => Self::MalformedPayload,
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Chunk the event came from; `None` for link issues.
    pub chunk_type: Option<ChunkType>,
    pub chunk_version: Option<i32>,
    /// Byte offset of the chunk header in the file.
    pub offset: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    /// Event tied to one chunk.
    #[must_use]
    pub fn chunk(kind: DiagnosticKind, header: &ChunkHeader, message: impl Into<String>) -> Self {
        Self {
            kind,
            chunk_type: Some(header.chunk_type),
            chunk_version: Some(header.version),
            offset: Some(header.offset),
            message: message.into(),
        }
    }

    /// Unresolved reference found while linking.
    #[must_use]
    pub fn link(issue: LinkIssue, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Link(issue),
            chunk_type: None,
            chunk_version: None,
            offset: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.severity())?;
        if let (Some(chunk_type), Some(offset)) = (self.chunk_type, self.offset) {
            write!(f, " {chunk_type} chunk at {offset:#x}:")?;
        }
        write!(f, " {}", self.message)
    }
}
