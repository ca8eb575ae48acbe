//! rb_io — artifact I/O for the risk dashboard.
//!
//! - Typed wire formats for `coverage.json`, `effectiveness.json`, `residual.json`
//! - Ordered decoding of JSON objects (document order is display order)
//! - Sequential loader over a local directory or an http(s) base
//! - Dashboard manifest (base, title, cap, expected digests)
//! - SHA-256 digests and canonical JSON output
//!
//! Load failures are values, not panics: callers decide whether an artifact
//! failing is fatal. The loader itself never is.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod artifacts;
pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod manifest;
pub mod ordered;

/// Unified error for rb_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Local artifact could not be read.
    #[error("read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure talking to an http(s) base.
    #[error("fetch {location}: {msg}")]
    Fetch { location: String, msg: String },

    /// Remote answered with a non-success status.
    #[error("fetch {location}: HTTP {status}")]
    Status { location: String, status: u16 },

    /// Bytes were read but are not the expected JSON shape.
    #[error("json error at {location}: {msg}")]
    Json { location: String, msg: String },

    /// Raw bytes did not hash to the digest listed in the manifest.
    #[error("sha256 mismatch for {location}: expected {expected}, got {actual}")]
    Digest {
        location: String,
        expected: String,
        actual: String,
    },

    /// Base location is neither a usable directory path nor an http(s) URL.
    #[error("invalid artifact base: {0}")]
    Base(String),

    /// Output path errors (create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),
}

pub type IoResult<T> = Result<T, IoError>;

pub mod prelude {
    pub use crate::artifacts::{
        ArtifactBundle, ArtifactKind, ArtifactStatus, CoverageControl, CoverageReport,
        EffectivenessControl, EffectivenessReport, LoadOutcome, ResidualReport, RiskItem,
        SystemSummary,
    };
    pub use crate::loader::{ArtifactSource, Loader};
    pub use crate::manifest::{DashboardManifest, InputDigests, ManifestError};
    pub use crate::ordered::Ordered;
    pub use crate::{IoError, IoResult};
}
