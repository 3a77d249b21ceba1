//! Chunk framing
//!
//! After the file header an XAC file is a flat run of chunks, each a 12-byte
//! header `(type, length, version)` followed by exactly `length` payload
//! bytes. The framer hands out payload windows and always moves past the
//! declared length, so a handler that stops early never desynchronizes the
//! stream.

use std::fmt;

use serde::Serialize;

use super::cursor::{Endian, XacCursor};
use crate::error::{Error, Result};

/// Size of a chunk header in bytes.
pub const CHUNK_HEADER_SIZE: usize = 12;

/// Chunk type ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChunkType {
    Mesh,
    Skin,
    Material,
    Metadata,
    Nodes,
    MorphTargets,
    MaterialInfo,
    Unknown(i32),
}

impl ChunkType {
    #[must_use]
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::Mesh,
            2 => Self::Skin,
            3 => Self::Material,
            7 => Self::Metadata,
            0x0B => Self::Nodes,
            0x0C => Self::MorphTargets,
            0x0D => Self::MaterialInfo,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn id(self) -> i32 {
        match self {
            Self::Mesh => 1,
            Self::Skin => 2,
            Self::Material => 3,
            Self::Metadata => 7,
            Self::Nodes => 0x0B,
            Self::MorphTargets => 0x0C,
            Self::MaterialInfo => 0x0D,
            Self::Unknown(id) => id,
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mesh => f.write_str("Mesh"),
            Self::Skin => f.write_str("Skin"),
            Self::Material => f.write_str("Material"),
            Self::Metadata => f.write_str("Metadata"),
            Self::Nodes => f.write_str("Nodes"),
            Self::MorphTargets => f.write_str("MorphTargets"),
            Self::MaterialInfo => f.write_str("MaterialInfo"),
            Self::Unknown(id) => write!(f, "Unknown({id:#x})"),
        }
    }
}

/// A chunk header plus where it sits in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkHeader {
    pub chunk_type: ChunkType,
    /// Declared payload length.
    pub length: usize,
    pub version: i32,
    /// Byte offset of the header within the file.
    pub offset: usize,
}

impl ChunkHeader {
    /// Byte offset of the first payload byte.
    #[must_use]
    pub fn payload_offset(&self) -> usize {
        self.offset + CHUNK_HEADER_SIZE
    }
}

/// One framed chunk. Transient: consumed by a handler or dropped.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    pub header: ChunkHeader,
    pub payload: &'a [u8],
}

impl Chunk<'_> {
    /// The declared length ran past the end of the file and was clamped.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < self.header.length
    }
}

/// Splits the bytes after the file header into chunks.
#[derive(Debug, Clone)]
pub struct ChunkFramer<'a> {
    data: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> ChunkFramer<'a> {
    /// `start` is the offset of the first chunk header in `data`.
    #[must_use]
    pub fn new(data: &'a [u8], start: usize, endian: Endian) -> Self {
        Self {
            data,
            position: start.min(data.len()),
            endian,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Frame the next chunk.
    ///
    /// Returns `Ok(None)` once fewer than 12 bytes remain; a trailing partial
    /// header is discarded. A negative declared length cannot be skipped and
    /// is an error.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>> {
        let offset = self.position;
        if self.data.len() - offset < CHUNK_HEADER_SIZE {
            self.position = self.data.len();
            return Ok(None);
        }

        let mut cursor = XacCursor::new(&self.data[offset..offset + CHUNK_HEADER_SIZE], self.endian);
        let type_id = cursor.read_i32()?;
        let length = cursor.read_i32()?;
        let version = cursor.read_i32()?;

        let Ok(length) = usize::try_from(length) else {
            return Err(Error::InvalidChunkLength { length, offset });
        };

        let payload_start = offset + CHUNK_HEADER_SIZE;
        let payload_end = payload_start.saturating_add(length).min(self.data.len());
        self.position = payload_end;

        Ok(Some(Chunk {
            header: ChunkHeader {
                chunk_type: ChunkType::from_id(type_id),
                length,
                version,
                offset,
            },
            payload: &self.data[payload_start..payload_end],
        }))
    }
}
