//! File format handlers

pub mod xac;

// Re-export main document types
pub use xac::{DecodedXac, Scene, decode_xac_bytes, read_xac};
