//! rb_report — turns loaded artifacts into a rendered dashboard page.
//!
//! Rules:
//! - No I/O here. Callers hand in an `ArtifactBundle` and a `Page`.
//! - Each section renders into its own container; a container missing from the
//!   page skips that section, except the controls and gaps tables, which must
//!   exist once both coverage and effectiveness are loaded.
//! - An absent artifact skips only the sections that read it.
//! - Serialization (`render_html`, `render_json`) is a separate step over the
//!   finished page.

#![deny(unsafe_code)]

use core::fmt;

use rb_io::artifacts::{ArtifactBundle, ArtifactKind, LoadOutcome};
use tracing::debug;

pub mod charts;
pub mod csv_preview;
pub mod heatmap;
pub mod structure;
pub mod summary;
pub mod surface;
pub mod tables;

#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;

pub use surface::{Cell, Container, ContainerId, Node, Page, SourceLine};

#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::render_json;

// ===== Errors =====
#[derive(Debug)]
pub enum ReportError {
    /// A container that must be on the page is not.
    MissingContainer(ContainerId),
    Template(String),
    Serialize(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::MissingContainer(id) => write!(f, "page has no #{id} container"),
            ReportError::Template(e) => write!(f, "template error: {e}"),
            ReportError::Serialize(e) => write!(f, "serialize error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Config =====
pub const DEFAULT_TITLE: &str = "Risk Dashboard";
pub const DEFAULT_TOP_RISKS: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub title: String,
    pub top_risks_cap: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { title: DEFAULT_TITLE.to_string(), top_risks_cap: DEFAULT_TOP_RISKS }
    }
}

/// Fill every present container from `bundle`, in the dashboard's fixed
/// section order. The CSV preview is not touched (see `csv_preview`).
pub fn render_dashboard(page: &mut Page, bundle: &ArtifactBundle, cfg: &DashboardConfig) -> Result<(), ReportError> {
    page.title = cfg.title.clone();

    let coverage = bundle.coverage.as_ref();
    let effectiveness = bundle.effectiveness.as_ref();
    let residual = bundle.residual.as_ref();

    summary::render_coverage_summary(coverage, page.coverage_domain.as_mut());
    summary::render_effectiveness_summary(effectiveness, page.effectiveness_domain.as_mut());

    summary::render_residual_summary(residual, page.residual_summary.as_mut());
    tables::render_top_risks(residual, cfg.top_risks_cap, page.risks_table.as_mut());
    heatmap::render_risk_heatmap(residual, page.risk_heatmap.as_mut());

    let cov_domains = coverage.map(|c| &c.domain_average_coverage);
    let eff_domains = effectiveness.map(|e| &e.domain_average_effectiveness);
    charts::render_bar_chart(cov_domains, page.coverage_bars.as_mut());
    charts::render_bar_chart(eff_domains, page.effectiveness_bars.as_mut());
    charts::render_domain_donuts(cov_domains, eff_domains, page.domain_donuts.as_mut());

    tables::render_controls_and_gaps(
        coverage,
        effectiveness,
        page.controls_table.as_mut(),
        page.gaps_table.as_mut(),
    )?;

    page.sources = source_lines(bundle);
    debug!(
        coverage = coverage.is_some(),
        effectiveness = effectiveness.is_some(),
        residual = residual.is_some(),
        "dashboard rendered"
    );
    Ok(())
}

/// Provenance rows: one per attempted load, with the producer name if known.
pub fn source_lines(bundle: &ArtifactBundle) -> Vec<SourceLine> {
    let generators = bundle.generators();
    bundle
        .statuses
        .iter()
        .map(|s| {
            let (status, detail) = match &s.outcome {
                LoadOutcome::Loaded { sha256, bytes } => ("loaded", format!("{bytes} bytes, sha256 {sha256}")),
                LoadOutcome::Absent { reason } => ("absent", reason.clone()),
            };
            SourceLine {
                artifact: s.kind.file_name(),
                location: s.location.clone(),
                status,
                detail,
                generated_by: generators.iter().find(|(k, _)| *k == s.kind).map(|(_, g)| g.to_string()),
                facts: artifact_facts(bundle, s.kind),
            }
        })
        .collect()
}

fn artifact_facts(bundle: &ArtifactBundle, kind: ArtifactKind) -> Vec<String> {
    match kind {
        ArtifactKind::Coverage => bundle.coverage.as_ref().map(structure::coverage_facts),
        ArtifactKind::Effectiveness => bundle.effectiveness.as_ref().map(structure::effectiveness_facts),
        ArtifactKind::Residual => bundle.residual.as_ref().map(structure::residual_facts),
    }
    .unwrap_or_default()
}
