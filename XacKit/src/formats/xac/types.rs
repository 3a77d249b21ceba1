//! Progress types for XAC decoding

use super::chunk::ChunkType;

/// Progress callback type for XAC decoding.
///
/// Invoked only between chunks, which are the only safe checkpoints of a decode.
pub type XacProgressCallback<'a> = &'a (dyn Fn(&XacProgress) + Sync + Send);

/// Progress information during a decode
#[derive(Debug, Clone)]
pub struct XacProgress {
    /// Current decode phase
    pub phase: XacPhase,
    /// Number of chunks framed so far (1-indexed while decoding a chunk)
    pub chunk_index: usize,
    /// Current byte offset in the file
    pub offset: usize,
    /// Total file size in bytes
    pub total_bytes: usize,
    /// Type of the chunk about to be decoded, if any
    pub chunk_type: Option<ChunkType>,
}

impl XacProgress {
    /// Create a progress update for a phase boundary
    #[must_use]
    pub fn new(phase: XacPhase, offset: usize, total_bytes: usize) -> Self {
        Self {
            phase,
            chunk_index: 0,
            offset,
            total_bytes,
            chunk_type: None,
        }
    }

    /// Create a progress update for a chunk about to be decoded
    #[must_use]
    pub fn chunk(chunk_index: usize, chunk_type: ChunkType, offset: usize, total_bytes: usize) -> Self {
        Self {
            phase: XacPhase::DecodingChunk,
            chunk_index,
            offset,
            total_bytes,
            chunk_type: Some(chunk_type),
        }
    }

    /// Get the progress fraction by bytes (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total_bytes == 0 {
            1.0
        } else {
            self.offset as f32 / self.total_bytes as f32
        }
    }
}

/// Phase of an XAC decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XacPhase {
    /// Checking the file header
    ReadingHeader,
    /// Decoding one chunk
    DecodingChunk,
    /// Resolving cross-chunk references
    Linking,
    /// Decode finished
    Done,
}

impl XacPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadingHeader => "Reading header",
            Self::DecodingChunk => "Decoding chunk",
            Self::Linking => "Linking scene",
            Self::Done => "Done",
        }
    }
}
