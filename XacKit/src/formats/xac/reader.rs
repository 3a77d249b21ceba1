//! XAC file reading
//!
//! A decode is one linear pass: check the header, frame chunks until the
//! stream ends, hand each payload to its handler, then link the scene. All
//! pass state lives in a [`ParseContext`] owned by the call, so independent
//! files can be decoded concurrently.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::chunk::{Chunk, ChunkFramer, ChunkHeader, ChunkType};
use super::cursor::{Endian, XacCursor};
use super::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use super::document::{FILE_HEADER_SIZE, FileHeader, XAC_MAGIC};
use super::material::{read_material, read_material_info};
use super::mesh::read_mesh;
use super::nodes::read_nodes;
use super::options::DecodeOptions;
use super::scene::Scene;
use super::skin::read_skin;
use super::types::{XacPhase, XacProgress, XacProgressCallback};
use crate::error::{Error, Result};

/// A decoded scene plus everything that went wrong on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedXac {
    pub scene: Scene,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of chunks framed, including skipped ones.
    pub chunk_count: usize,
}

impl DecodedXac {
    /// Whether any chunk failed to decode.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }

    /// Diagnostics at or above `severity`.
    pub fn diagnostics_at(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity() >= severity)
    }
}

/// Read an XAC file from disk
///
/// # Errors
/// Returns an error if the file cannot be read, is not an XAC file, or has a
/// truncated node hierarchy.
pub fn read_xac<P: AsRef<Path>>(path: P) -> Result<DecodedXac> {
    read_xac_with_options(path, &DecodeOptions::default())
}

/// Read an XAC file from disk with custom options
///
/// # Errors
/// Returns an error if the file cannot be read or the decode cannot continue.
pub fn read_xac_with_options<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<DecodedXac> {
    let data = fs::read(path)?;
    decode_xac_bytes_with_options(&data, options)
}

/// Decode XAC data from bytes
///
/// # Errors
/// Returns an error if the data is not an XAC file or the decode cannot continue.
pub fn decode_xac_bytes(data: &[u8]) -> Result<DecodedXac> {
    decode_xac_bytes_with_options(data, &DecodeOptions::default())
}

/// Decode XAC data from bytes with custom options
///
/// # Errors
/// Returns an error if the data is not an XAC file or the decode cannot continue.
pub fn decode_xac_bytes_with_options(data: &[u8], options: &DecodeOptions) -> Result<DecodedXac> {
    decode_xac_bytes_with_progress(data, options, &|_| {})
}

/// Decode XAC data from bytes, reporting progress between chunks
///
/// # Errors
/// Only a bad header, a negative chunk length or a truncated node hierarchy
/// fail the decode. Every other problem becomes a [`Diagnostic`].
pub fn decode_xac_bytes_with_progress(
    data: &[u8],
    options: &DecodeOptions,
    progress: XacProgressCallback<'_>,
) -> Result<DecodedXac> {
    progress(&XacProgress::new(XacPhase::ReadingHeader, 0, data.len()));
    let header = read_header(data)?;
    tracing::debug!(
        "XAC v{}.{} ({})",
        header.major_version,
        header.minor_version,
        if header.big_endian { "big-endian" } else { "little-endian" }
    );

    let mut ctx = ParseContext::new(data, header, options);
    let mut chunk_index = 0;
    while let Some(chunk) = ctx.framer.next_chunk()? {
        chunk_index += 1;
        progress(&XacProgress::chunk(
            chunk_index,
            chunk.header.chunk_type,
            chunk.header.offset,
            data.len(),
        ));
        ctx.dispatch(chunk)?;
    }

    progress(&XacProgress::new(XacPhase::Linking, data.len(), data.len()));
    let decoded = ctx.finish(chunk_index);
    progress(&XacProgress::new(XacPhase::Done, data.len(), data.len()));
    Ok(decoded)
}

/// Read and validate the 8-byte file header.
///
/// # Errors
/// Returns [`Error::TruncatedRead`] for fewer than 8 bytes and
/// [`Error::BadMagic`] when the tag is not `XAC `.
pub fn read_header(data: &[u8]) -> Result<FileHeader> {
    if data.len() < FILE_HEADER_SIZE {
        return Err(Error::TruncatedRead {
            needed: FILE_HEADER_SIZE,
            available: data.len(),
        });
    }

    // Header bytes are raw, byte order does not apply yet
    let mut cursor = XacCursor::new(data, Endian::Little);
    let mut magic = [0u8; 4];
    magic.copy_from_slice(cursor.read_bytes(4)?);
    if magic != XAC_MAGIC {
        return Err(Error::BadMagic(magic));
    }

    Ok(FileHeader {
        major_version: cursor.read_u8()?,
        minor_version: cursor.read_u8()?,
        big_endian: cursor.read_u8()? != 0,
        multiply_order: cursor.read_u8()?,
    })
}

/// Frame every chunk without decoding payloads.
///
/// # Errors
/// Returns an error for a bad header or a negative chunk length.
pub fn list_chunks(data: &[u8]) -> Result<Vec<ChunkHeader>> {
    let header = read_header(data)?;
    let mut framer = ChunkFramer::new(data, FILE_HEADER_SIZE, header.endian());
    let mut chunks = Vec::new();
    while let Some(chunk) = framer.next_chunk()? {
        chunks.push(chunk.header);
    }
    Ok(chunks)
}

/// Working state of one decode.
struct ParseContext<'a> {
    framer: ChunkFramer<'a>,
    endian: Endian,
    options: &'a DecodeOptions,
    scene: Scene,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ParseContext<'a> {
    fn new(data: &'a [u8], header: FileHeader, options: &'a DecodeOptions) -> Self {
        let endian = header.endian();
        Self {
            framer: ChunkFramer::new(data, FILE_HEADER_SIZE, endian),
            endian,
            options,
            scene: Scene::new(header),
            diagnostics: Vec::new(),
        }
    }

    /// Route one chunk to its handler.
    ///
    /// Returns an error only when the whole decode must stop.
    fn dispatch(&mut self, chunk: Chunk<'_>) -> Result<()> {
        let header = chunk.header;
        tracing::debug!(
            "{} chunk at {:#x}: {} bytes, version {}",
            header.chunk_type,
            header.offset,
            header.length,
            header.version
        );

        if chunk.is_truncated() {
            self.diagnostics.push(Diagnostic::chunk(
                DiagnosticKind::TruncatedPayload,
                &header,
                format!(
                    "declared {} payload bytes, only {} left in file",
                    header.length,
                    chunk.payload.len()
                ),
            ));
        }

        let mut cursor = XacCursor::new(chunk.payload, self.endian);
        match header.chunk_type {
            // A short node list leaves every later reference dangling
            ChunkType::Nodes => match read_nodes(&mut cursor) {
                Ok(nodes) => self.scene.nodes.extend(nodes),
                Err(e @ Error::TruncatedRead { .. }) => return Err(e),
                Err(e) => self.chunk_failed(&header, &e),
            },
            ChunkType::Mesh => match read_mesh(&mut cursor, self.options) {
                Ok(mesh) => {
                    if mesh.placeholder {
                        self.diagnostics.push(Diagnostic::chunk(
                            DiagnosticKind::DegenerateMeshFallback,
                            &header,
                            format!(
                                "{}-byte mesh payload replaced by a placeholder triangle for node {}",
                                chunk.payload.len(),
                                mesh.node_id
                            ),
                        ));
                    }
                    self.scene.meshes.insert(mesh.node_id, mesh);
                }
                Err(e) => self.chunk_failed(&header, &e),
            },
            ChunkType::Skin => match read_skin(&mut cursor) {
                Ok(skin) => {
                    self.scene.skins.insert(skin.node_id, skin);
                }
                Err(e) => self.chunk_failed(&header, &e),
            },
            ChunkType::Material => match read_material(&mut cursor) {
                Ok(material) => self.scene.materials.push(material),
                Err(e) => self.chunk_failed(&header, &e),
            },
            ChunkType::MaterialInfo => match read_material_info(&mut cursor) {
                Ok(info) => self.scene.material_info = Some(info),
                Err(e) => self.chunk_failed(&header, &e),
            },
            ChunkType::Metadata | ChunkType::MorphTargets => {
                tracing::debug!("Skipping {} chunk", header.chunk_type);
            }
            ChunkType::Unknown(id) => {
                self.diagnostics.push(Diagnostic::chunk(
                    DiagnosticKind::UnknownChunkType,
                    &header,
                    format!("skipped {} bytes of unknown chunk type {id}", chunk.payload.len()),
                ));
            }
        }
        Ok(())
    }

    fn chunk_failed(&mut self, header: &ChunkHeader, error: &Error) {
        tracing::warn!(
            "{} chunk at {:#x} failed: {}",
            header.chunk_type,
            header.offset,
            error
        );
        self.diagnostics.push(Diagnostic::chunk(
            DiagnosticKind::from_error(error),
            header,
            error.to_string(),
        ));
    }

    fn finish(mut self, chunk_count: usize) -> DecodedXac {
        let issues = self.scene.link();
        for issue in &issues {
            tracing::debug!("{}", issue);
        }
        self.diagnostics.extend(issues);
        DecodedXac {
            scene: self.scene,
            diagnostics: self.diagnostics,
            chunk_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xac::test_support::PayloadWriter;
    use glam::Vec3;

    fn file(endian: Endian) -> PayloadWriter {
        let mut w = PayloadWriter::new(endian);
        w.bytes(b"XAC ").u8(1).u8(0).u8(u8::from(endian == Endian::Big)).u8(0);
        w
    }

    fn chunk(w: &mut PayloadWriter, type_id: i32, payload: &[u8]) {
        w.i32(type_id).i32(payload.len() as i32).i32(1).bytes(payload);
    }

    fn nodes_payload() -> Vec<u8> {
        let mut p = PayloadWriter::new(Endian::Little);
        p.i32(1).i32(1).node("root", -1, Vec3::ZERO);
        p.finish()
    }

    #[test]
    fn test_bad_magic() {
        let data = b"XAD \x01\x00\x00\x00";
        assert!(matches!(decode_xac_bytes(data), Err(Error::BadMagic(m)) if &m == b"XAD "));
    }

    #[test]
    fn test_short_header() {
        assert!(matches!(
            decode_xac_bytes(b"XAC \x01"),
            Err(Error::TruncatedRead { needed: 8, available: 5 })
        ));
    }

    #[test]
    fn test_empty_body() {
        let decoded = decode_xac_bytes(&file(Endian::Little).finish()).unwrap();
        assert!(decoded.scene.nodes.is_empty());
        assert!(decoded.diagnostics.is_empty());
        assert_eq!(decoded.scene.header.major_version, 1);
    }

    #[test]
    fn test_chunk_failure_does_not_stop_decode() {
        let mut w = file(Endian::Little);
        chunk(&mut w, 2, &[0; 6]);
        chunk(&mut w, 0x0B, &nodes_payload());

        let decoded = decode_xac_bytes(&w.finish()).unwrap();
        assert_eq!(decoded.scene.nodes.len(), 1);
        assert_eq!(decoded.chunk_count, 2);
        assert!(decoded.has_errors());
        assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::TruncatedRead);
        assert_eq!(decoded.diagnostics[0].chunk_type, Some(ChunkType::Skin));
        assert_eq!(decoded.diagnostics[0].offset, Some(8));
    }

    #[test]
    fn test_truncated_nodes_is_fatal() {
        let mut w = file(Endian::Little);
        let mut payload = nodes_payload();
        payload.truncate(40);
        chunk(&mut w, 0x0B, &payload);
        assert!(matches!(decode_xac_bytes(&w.finish()), Err(Error::TruncatedRead { .. })));
    }

    #[test]
    fn test_overlong_chunk_reports_truncated_payload() {
        let mut w = file(Endian::Little);
        w.i32(0x0D).i32(64).i32(1).i32(1).i32(1).i32(0);
        let decoded = decode_xac_bytes(&w.finish()).unwrap();
        assert_eq!(decoded.diagnostics[0].kind, DiagnosticKind::TruncatedPayload);
        assert_eq!(decoded.scene.material_info.map(|i| i.total_materials), Some(1));
    }

    #[test]
    fn test_metadata_skipped_silently() {
        let mut w = file(Endian::Little);
        chunk(&mut w, 7, &[1, 2, 3, 4, 5]);
        chunk(&mut w, 0x0C, &[9; 16]);
        let decoded = decode_xac_bytes(&w.finish()).unwrap();
        assert!(decoded.diagnostics.is_empty());
    }

    #[test]
    fn test_progress_reports_every_chunk() {
        use std::sync::Mutex;

        let mut w = file(Endian::Little);
        chunk(&mut w, 0x0B, &nodes_payload());
        chunk(&mut w, 42, &[]);
        let data = w.finish();

        let seen = Mutex::new(Vec::new());
        let last_fraction = Mutex::new(0.0);
        decode_xac_bytes_with_progress(&data, &DecodeOptions::default(), &|p| {
            seen.lock().unwrap().push((p.phase, p.chunk_type));
            *last_fraction.lock().unwrap() = p.percentage();
        })
        .unwrap();

        assert!((last_fraction.into_inner().unwrap() - 1.0_f32).abs() < f32::EPSILON);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                (XacPhase::ReadingHeader, None),
                (XacPhase::DecodingChunk, Some(ChunkType::Nodes)),
                (XacPhase::DecodingChunk, Some(ChunkType::Unknown(42))),
                (XacPhase::Linking, None),
                (XacPhase::Done, None),
            ]
        );
    }

    #[test]
    fn test_list_chunks() {
        let mut w = file(Endian::Big);
        w.i32(0x0B).i32(4).i32(2).bytes(&[0; 4]);
        w.i32(99).i32(0).i32(1);
        let chunks = list_chunks(&w.finish()).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_type, ChunkType::Nodes);
        assert_eq!(chunks[0].version, 2);
        assert_eq!(chunks[1].offset, 8 + 12 + 4);
    }
}
