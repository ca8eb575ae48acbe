//! Loader: fetch the three dashboard artifacts from one base location.
//!
//! The base is either a local directory (`dist`, `../dist`) or an http(s)
//! URL. Loads run strictly one after another (coverage → effectiveness →
//! residual). A failed load is logged and becomes `None`; it never stops the
//! next one. No retries, no caching, no timeouts.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::artifacts::{
    ArtifactBundle, ArtifactKind, ArtifactStatus, CoverageReport, EffectivenessReport, LoadOutcome,
    ResidualReport,
};
use crate::manifest::InputDigests;
use crate::{hasher, IoError, IoResult};

/// Where artifacts live.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactSource {
    Local(PathBuf),
    Remote(Url),
}

/// Returns true if `s` carries an explicit `<scheme>://`.
#[inline]
pub fn looks_like_url(s: &str) -> bool {
    s.trim().contains("://")
}

impl ArtifactSource {
    /// Parse a base string. URLs must be http or https; anything else is a
    /// directory path.
    pub fn parse(base: &str) -> IoResult<Self> {
        let base = base.trim();
        if base.is_empty() {
            return Err(IoError::Base("empty base".into()));
        }
        if !looks_like_url(base) {
            return Ok(ArtifactSource::Local(PathBuf::from(base)));
        }
        let mut url = Url::parse(base).map_err(|e| IoError::Base(format!("{base}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(IoError::Base(format!("{base}: only http(s) URLs are supported")));
        }
        // Url::join treats the last segment as a file unless the path ends in '/'.
        if !url.path().ends_with('/') {
            let p = format!("{}/", url.path());
            url.set_path(&p);
        }
        Ok(ArtifactSource::Remote(url))
    }

    /// Human-readable location of one artifact (used in logs and statuses).
    pub fn location(&self, kind: ArtifactKind) -> String {
        match self {
            ArtifactSource::Local(dir) => dir.join(kind.file_name()).display().to_string(),
            ArtifactSource::Remote(base) => match base.join(kind.file_name()) {
                Ok(u) => u.to_string(),
                Err(_) => format!("{base}{}", kind.file_name()),
            },
        }
    }
}

/// Sequential artifact loader.
#[derive(Debug, Clone)]
pub struct Loader {
    source: ArtifactSource,
    digests: InputDigests,
    #[cfg(feature = "remote")]
    client: reqwest::Client,
}

impl Loader {
    pub fn new(source: ArtifactSource) -> Self {
        Self {
            source,
            digests: InputDigests::default(),
            #[cfg(feature = "remote")]
            client: reqwest::Client::new(),
        }
    }

    /// Expect artifacts to hash to these digests; a mismatch makes that
    /// artifact absent.
    pub fn with_digests(mut self, digests: InputDigests) -> Self {
        self.digests = digests;
        self
    }

    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    /// Raw bytes of one artifact.
    pub async fn fetch_bytes(&self, kind: ArtifactKind) -> IoResult<Vec<u8>> {
        let location = self.source.location(kind);
        match &self.source {
            ArtifactSource::Local(dir) => {
                let path = dir.join(kind.file_name());
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| IoError::Read { location, source })
            }
            ArtifactSource::Remote(base) => self.fetch_remote(base, kind, location).await,
        }
    }

    #[cfg(feature = "remote")]
    async fn fetch_remote(&self, base: &Url, kind: ArtifactKind, location: String) -> IoResult<Vec<u8>> {
        let url = base
            .join(kind.file_name())
            .map_err(|e| IoError::Base(format!("{base}: {e}")))?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| IoError::Fetch { location: location.clone(), msg: e.to_string() })?;
        if !resp.status().is_success() {
            return Err(IoError::Status { location, status: resp.status().as_u16() });
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| IoError::Fetch { location, msg: e.to_string() })?;
        Ok(body.to_vec())
    }

    #[cfg(not(feature = "remote"))]
    async fn fetch_remote(&self, base: &Url, _kind: ArtifactKind, _location: String) -> IoResult<Vec<u8>> {
        Err(IoError::Base(format!("{base}: built without the `remote` feature")))
    }

    /// Fetch, digest-check and decode one artifact. Returns the value and its
    /// load outcome.
    pub async fn load<T: DeserializeOwned>(&self, kind: ArtifactKind) -> IoResult<(T, LoadOutcome)> {
        let location = self.source.location(kind);
        let bytes = self.fetch_bytes(kind).await?;
        let sha256 = hasher::verify_digest(&location, &bytes, self.digests.for_kind(kind))?;
        let value = serde_json::from_slice::<T>(&bytes)
            .map_err(|e| IoError::Json { location, msg: e.to_string() })?;
        Ok((value, LoadOutcome::Loaded { sha256, bytes: bytes.len() }))
    }

    /// `load`, with any failure logged and turned into `None`. The outcome is
    /// appended to `statuses` either way.
    pub async fn load_optional<T: DeserializeOwned>(
        &self,
        kind: ArtifactKind,
        statuses: &mut Vec<ArtifactStatus>,
    ) -> Option<T> {
        let location = self.source.location(kind);
        debug!(artifact = kind.as_str(), %location, "loading artifact");
        match self.load::<T>(kind).await {
            Ok((value, outcome)) => {
                statuses.push(ArtifactStatus { kind, location, outcome });
                Some(value)
            }
            Err(e) => {
                warn!(artifact = kind.as_str(), error = %e, "artifact unavailable; section will be skipped");
                statuses.push(ArtifactStatus {
                    kind,
                    location,
                    outcome: LoadOutcome::Absent { reason: e.to_string() },
                });
                None
            }
        }
    }

    /// Load all three artifacts in order. Never fails.
    pub async fn load_bundle(&self) -> ArtifactBundle {
        let mut statuses = Vec::with_capacity(ArtifactKind::ALL.len());
        let coverage = self.load_optional::<CoverageReport>(ArtifactKind::Coverage, &mut statuses).await;
        let effectiveness = self
            .load_optional::<EffectivenessReport>(ArtifactKind::Effectiveness, &mut statuses)
            .await;
        let residual = self.load_optional::<ResidualReport>(ArtifactKind::Residual, &mut statuses).await;
        ArtifactBundle { coverage, effectiveness, residual, statuses }
    }
}
