//! Table renderers: top risks, control drilldown and control gaps.

use rb_core::level::{badge_class, badge_text};
use rb_core::rounding::{display_number, percent_label};
use rb_io::artifacts::{CoverageReport, EffectivenessReport, ResidualReport};
use tracing::debug;

use crate::structure::{control_rows, top_risks};
use crate::surface::{Cell, Container, ContainerId, Node};
use crate::ReportError;

/// Replace the container's rows with the `cap` highest residual risks.
pub fn render_top_risks(residual: Option<&ResidualReport>, cap: usize, container: Option<&mut Container>) {
    let (Some(r), Some(c)) = (residual, container) else {
        return;
    };
    c.clear();
    for row in top_risks(r, cap) {
        let it = row.item;
        let level = it.risk_level.as_deref();
        c.push(Node::Row {
            cells: vec![
                Cell::text(row.system),
                Cell::text(&it.risk_id),
                Cell::text(&it.asset_id),
                Cell::text(&it.threat),
                Cell::text(display_number(it.inherent_risk)),
                Cell::text(percent_label(it.combined_mitigation)),
                Cell::text(display_number(it.residual_risk)),
                Cell::Badge { text: badge_text(level).to_string(), class: badge_class(level) },
            ],
        });
    }
    debug!(rows = c.len(), cap, "top risks rendered");
}

/// Controls drilldown plus gaps. Skipped unless both reports are present;
/// once they are, both tables must exist on the page.
pub fn render_controls_and_gaps(
    coverage: Option<&CoverageReport>,
    effectiveness: Option<&EffectivenessReport>,
    controls: Option<&mut Container>,
    gaps: Option<&mut Container>,
) -> Result<(), ReportError> {
    let (Some(cov), Some(eff)) = (coverage, effectiveness) else {
        return Ok(());
    };
    let controls = controls.ok_or(ReportError::MissingContainer(ContainerId::ControlsTable))?;
    let gaps = gaps.ok_or(ReportError::MissingContainer(ContainerId::GapsTable))?;
    controls.clear();
    gaps.clear();

    for row in control_rows(cov, eff) {
        let cells = vec![
            Cell::text(&row.domain),
            Cell::text(row.ccc_id.as_str()),
            Cell::text(&row.title),
            Cell::text(format!("{}%", row.coverage_pct)),
            Cell::text(format!("{}%", row.effectiveness_pct)),
        ];
        if let Some(kind) = row.gap() {
            let mut gap_cells = cells.clone();
            gap_cells.push(Cell::text(kind.label()));
            gaps.push(Node::Row { cells: gap_cells });
        }
        controls.push(Node::Row { cells });
    }
    debug!(controls = controls.len(), gaps = gaps.len(), "controls and gaps rendered");
    Ok(())
}
