//! Error types for `XacKit`

use thiserror::Error;

/// The error type for `XacKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== XAC Format Errors ====================
    /// The file is not an XAC actor (header tag is not `XAC `).
    #[error("invalid XAC magic: expected \"XAC \", found {0:?}")]
    BadMagic([u8; 4]),

    /// Fewer bytes were available than a primitive or structure requires.
    #[error("truncated read: needed {needed} bytes, {available} available")]
    TruncatedRead {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the bounded window.
        available: usize,
    },

    /// A declared sub-structure does not fit in the rest of its chunk.
    #[error("chunk overflow: {what} declares {declared} bytes, {remaining} left in chunk")]
    ChunkOverflow {
        /// The sub-structure that overflowed.
        what: &'static str,
        /// Declared size in bytes (saturated on arithmetic overflow).
        declared: usize,
        /// Bytes remaining in the chunk window.
        remaining: usize,
    },

    /// A chunk header declared a negative payload length.
    #[error("invalid chunk length {length} at offset {offset}")]
    InvalidChunkLength {
        /// The declared length.
        length: i32,
        /// Byte offset of the chunk header.
        offset: usize,
    },

    /// A translated submesh index falls outside the mesh vertex buffer.
    #[error("submesh index {index} out of range for mesh with {vertex_count} vertices")]
    IndexOutOfRange {
        /// The global (translated) index.
        index: i64,
        /// Number of vertices in the owning mesh.
        vertex_count: usize,
    },

    /// The submesh vertex windows do not add up to the mesh vertex count.
    #[error("submesh vertex counts add up to {accumulated}, mesh declares {declared}")]
    SubmeshVertexMismatch {
        /// Final value of the running vertex offset.
        accumulated: usize,
        /// Vertex count from the mesh header.
        declared: usize,
    },

    // ==================== Parsing Errors ====================
    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `XacKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
