//! Decode options for XAC files
//!
//! Controls the best-effort paths of the decoder. By default short mesh
//! payloads become placeholders and submesh vertex totals are enforced.

/// Options for decoding an XAC file.
///
/// # Example
///
/// ```
/// use xackit::formats::xac::DecodeOptions;
///
/// // Treat short mesh payloads as errors instead of placeholder triangles
/// let options = DecodeOptions::new()
///     .with_mesh_fallback(false)
///     .with_require_submesh_vertex_total(true);
/// assert!(!options.mesh_fallback);
/// ```
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Replace a mesh payload shorter than its 28-byte header with a single
    /// placeholder triangle. When disabled the chunk fails with a truncated
    /// read diagnostic.
    /// Default: true
    pub mesh_fallback: bool,

    /// Reject a mesh whose submesh vertex windows do not add up to its vertex
    /// count. When disabled the mismatch is only logged.
    /// Default: true
    pub require_submesh_vertex_total: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Create options with the default behaviour.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mesh_fallback: true,
            require_submesh_vertex_total: true,
        }
    }

    /// Create options that turn every best-effort path into a diagnostic.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            mesh_fallback: false,
            require_submesh_vertex_total: true,
        }
    }

    /// Set whether short mesh payloads become placeholder meshes.
    #[must_use]
    pub fn with_mesh_fallback(mut self, enabled: bool) -> Self {
        self.mesh_fallback = enabled;
        self
    }

    /// Set whether submesh vertex totals are enforced.
    #[must_use]
    pub fn with_require_submesh_vertex_total(mut self, required: bool) -> Self {
        self.require_submesh_vertex_total = required;
        self
    }
}
