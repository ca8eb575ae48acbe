//! Label/value summaries for coverage, effectiveness and residual risk.
//!
//! Summaries append to their container; they run once per page.

use rb_io::artifacts::{CoverageReport, EffectivenessReport, ResidualReport};
use rb_io::ordered::Ordered;

use crate::structure::{domain_pairs, residual_summary_line};
use crate::surface::{Container, Node};

fn push_domains(domains: &Ordered<f64>, container: &mut Container) {
    for (key, value) in domain_pairs(domains) {
        container.push(Node::Kv { key, value });
    }
}

pub fn render_coverage_summary(report: Option<&CoverageReport>, container: Option<&mut Container>) {
    if let (Some(r), Some(c)) = (report, container) {
        push_domains(&r.domain_average_coverage, c);
    }
}

pub fn render_effectiveness_summary(report: Option<&EffectivenessReport>, container: Option<&mut Container>) {
    if let (Some(r), Some(c)) = (report, container) {
        push_domains(&r.domain_average_effectiveness, c);
    }
}

pub fn render_residual_summary(report: Option<&ResidualReport>, container: Option<&mut Container>) {
    let (Some(r), Some(c)) = (report, container) else {
        return;
    };
    for (system, s) in r.summary.iter() {
        c.push(Node::Kv { key: system.to_string(), value: residual_summary_line(s) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ContainerId;

    #[test]
    fn coverage_pairs_in_document_order() {
        let r: CoverageReport =
            serde_json::from_str(r#"{"domain_average_coverage":{"Network":0.5,"IAM":0.823}}"#).unwrap();
        let mut c = Container::new(ContainerId::CoverageDomain);
        render_coverage_summary(Some(&r), Some(&mut c));
        assert_eq!(
            c.nodes(),
            &[
                Node::Kv { key: "Network".into(), value: "50%".into() },
                Node::Kv { key: "IAM".into(), value: "82%".into() },
            ]
        );
    }

    #[test]
    fn absent_report_leaves_container_empty() {
        let mut c = Container::new(ContainerId::EffectivenessDomain);
        render_effectiveness_summary(None, Some(&mut c));
        assert!(c.is_empty());
        // missing container is a no-op
        render_residual_summary(Some(&ResidualReport::default()), None);
    }

    #[test]
    fn residual_summary_per_system() {
        let r: ResidualReport = serde_json::from_str(
            r#"{"summary":{"Payments":{"combined_mitigation":0.5,"avg_residual":4,"worst_level":"Medium"}}}"#,
        )
        .unwrap();
        let mut c = Container::new(ContainerId::ResidualSummary);
        render_residual_summary(Some(&r), Some(&mut c));
        assert_eq!(
            c.nodes()[0],
            Node::Kv {
                key: "Payments".into(),
                value: "Mitigation 50% • Avg Resid 4 • Worst Medium".into()
            }
        );
    }
}
