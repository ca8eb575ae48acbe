// crates/rb_io/src/manifest.rs
//
// Dashboard manifest: where the artifacts live, what to call the page, how many
// top risks to show, and (optionally) what the artifacts must hash to.
//
// • Unknown fields are rejected.
// • `base` may be a directory (relative to the manifest's own directory) or an
//   http(s) URL. Any other scheme is rejected.
// • Digests must be lowercase 64-hex.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactKind;
use crate::hasher::is_lower_hex_64;
use crate::loader::{looks_like_url, ArtifactSource};

/// External manifest accepted by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardManifest {
    /// Optional identifier, echoed in logs only.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub top_risks_cap: Option<usize>,
    #[serde(default)]
    pub inputs_sha256: Option<InputDigests>,
}

/// Expected SHA-256 of each artifact's raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDigests {
    #[serde(default)]
    pub coverage: Option<String>,
    #[serde(default)]
    pub effectiveness: Option<String>,
    #[serde(default)]
    pub residual: Option<String>,
}

impl InputDigests {
    pub fn for_kind(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Coverage => self.coverage.as_deref(),
            ArtifactKind::Effectiveness => self.effectiveness.as_deref(),
            ArtifactKind::Residual => self.residual.as_deref(),
        }
    }
}

#[derive(Debug)]
pub enum ManifestError {
    Io(String, String),
    Parse(String),
    Empty(&'static str),
    BadScheme(String),
    DigestShape(&'static str, String),
    ZeroCap,
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ManifestError::*;
        match self {
            Io(p, e) => write!(f, "cannot read manifest {}: {}", p, e),
            Parse(e) => write!(f, "manifest is not valid: {}", e),
            Empty(k) => write!(f, "field must not be empty: {}", k),
            BadScheme(v) => write!(f, "base must be a directory or an http(s) URL: {}", v),
            DigestShape(k, v) => write!(f, "invalid sha256 format for {}: {}", k, v),
            ZeroCap => write!(f, "top_risks_cap must be at least 1"),
        }
    }
}
impl std::error::Error for ManifestError {}

/// Shape checks only; no I/O.
pub fn validate_manifest(man: &DashboardManifest) -> Result<(), ManifestError> {
    if let Some(b) = &man.base {
        if b.trim().is_empty() {
            return Err(ManifestError::Empty("base"));
        }
        if looks_like_url(b) {
            let lower = b.trim().to_ascii_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(ManifestError::BadScheme(b.clone()));
            }
        }
    }
    if let Some(t) = &man.title {
        if t.trim().is_empty() {
            return Err(ManifestError::Empty("title"));
        }
    }
    if man.top_risks_cap == Some(0) {
        return Err(ManifestError::ZeroCap);
    }
    if let Some(d) = &man.inputs_sha256 {
        for kind in ArtifactKind::ALL {
            if let Some(h) = d.for_kind(kind) {
                if !is_lower_hex_64(h) {
                    return Err(ManifestError::DigestShape(kind.as_str(), h.to_string()));
                }
            }
        }
    }
    Ok(())
}

/// Read, decode and validate a manifest file.
pub fn load_manifest(path: &Path) -> Result<DashboardManifest, ManifestError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ManifestError::Io(path.display().to_string(), e.to_string()))?;
    let man: DashboardManifest =
        serde_json::from_str(&text).map_err(|e| ManifestError::Parse(e.to_string()))?;
    validate_manifest(&man)?;
    Ok(man)
}

#[inline]
fn join_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

/// Resolve the manifest's `base` to an artifact source. Relative directories
/// are taken from `manifest_dir`; a missing base means `<manifest_dir>/dist`.
pub fn resolve_base(manifest_dir: &Path, man: &DashboardManifest) -> Result<ArtifactSource, ManifestError> {
    let raw = man.base.as_deref().unwrap_or("dist").trim();
    if looks_like_url(raw) {
        return ArtifactSource::parse(raw).map_err(|_| ManifestError::BadScheme(raw.to_string()));
    }
    Ok(ArtifactSource::Local(join_under(manifest_dir, raw)))
}
