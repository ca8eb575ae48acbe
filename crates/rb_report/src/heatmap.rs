//! Per-system risk level heatmap.

use rb_core::level::RiskLevel;
use rb_core::rounding::display_number;
use rb_io::artifacts::ResidualReport;

use crate::structure::heat_rows;
use crate::surface::{Cell, Container, Node};

/// One row per system: name, four level counts, average residual. The count
/// cell under the worst level gets its `level-*` class.
pub fn render_risk_heatmap(residual: Option<&ResidualReport>, container: Option<&mut Container>) {
    let (Some(r), Some(c)) = (residual, container) else {
        return;
    };
    c.clear();
    for row in heat_rows(r) {
        let mut cells = Vec::with_capacity(6);
        cells.push(Cell::text(row.system));
        for lvl in RiskLevel::ALL {
            cells.push(Cell::Level {
                text: row.counts[lvl.ordinal()].to_string(),
                highlight: (row.worst == Some(lvl)).then(|| lvl.heat_class()),
            });
        }
        cells.push(Cell::text(display_number(row.avg_residual)));
        c.push(Node::Row { cells });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ContainerId;

    #[test]
    fn counts_and_single_highlight() {
        let r: ResidualReport = serde_json::from_str(
            r#"{"summary":{"Core":{"combined_mitigation":0.3,"avg_residual":11.5,"worst_level":"Critical"}},
                "systems":{"Core":[{"risk_level":"High"},{"risk_level":"High"},{"risk_level":"Critical"}]}}"#,
        )
        .unwrap();
        let mut c = Container::new(ContainerId::RiskHeatmap);
        render_risk_heatmap(Some(&r), Some(&mut c));
        assert_eq!(c.row_texts(), vec![vec!["Core", "0", "0", "2", "1", "11.5"]]);
        let highlights: Vec<Option<&str>> = c.nodes()[0]
            .cells()
            .iter()
            .filter_map(|cell| match cell {
                Cell::Level { highlight, .. } => Some(*highlight),
                _ => None,
            })
            .collect();
        assert_eq!(highlights, vec![None, None, None, Some("level-critical")]);
    }

    #[test]
    fn unknown_worst_highlights_nothing() {
        let r: ResidualReport = serde_json::from_str(
            r#"{"summary":{"S":{"combined_mitigation":0,"worst_level":"Severe"}},"systems":{"S":[]}}"#,
        )
        .unwrap();
        let mut c = Container::new(ContainerId::RiskHeatmap);
        render_risk_heatmap(Some(&r), Some(&mut c));
        assert!(c.nodes()[0]
            .cells()
            .iter()
            .all(|cell| !matches!(cell, Cell::Level { highlight: Some(_), .. })));
        assert_eq!(c.row_texts()[0][5], "0");
    }

    #[test]
    fn absent_residual_renders_nothing() {
        let mut c = Container::new(ContainerId::RiskHeatmap);
        render_risk_heatmap(None, Some(&mut c));
        assert!(c.is_empty());
    }
}
