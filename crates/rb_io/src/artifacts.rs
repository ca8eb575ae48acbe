//! Wire-facing artifact types.
//!
//! These mirror what the upstream coverage / effectiveness / residual stages
//! write. Only `ccc_id` on controls is required; every other field defaults so
//! that a sparse artifact still renders. Unknown fields are ignored.
//!
//! Provenance-only fields (counts, notes, per-system mitigation) decode
//! leniently: a value of the wrong shape reads as absent and never rejects the
//! report it sits in.

use rb_core::ids::{CccId, SystemId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::ordered::Ordered;

/// The three artifacts, in load order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Coverage,
    Effectiveness,
    Residual,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Coverage, ArtifactKind::Effectiveness, ArtifactKind::Residual];

    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Coverage => "coverage.json",
            ArtifactKind::Effectiveness => "effectiveness.json",
            ArtifactKind::Residual => "residual.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Coverage => "coverage",
            ArtifactKind::Effectiveness => "effectiveness",
            ArtifactKind::Residual => "residual",
        }
    }
}

/// Number or numeric string, as producers sometimes quote their counts.
fn json_number_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Decode a field if it has the expected shape, otherwise treat it as absent.
fn lenient<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(d)?;
    Ok(serde_json::from_value(v).ok())
}

/// A whole count; fractional or negative values are dropped.
fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(json_number_to_f64(&v).filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0).map(|n| n as u64))
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(json_number_to_f64(&v))
}

/// Keeps the numeric entries of an object, in document order.
fn lenient_number_map<'de, D: Deserializer<'de>>(d: D) -> Result<Ordered<f64>, D::Error> {
    let v = Value::deserialize(d)?;
    let map = match v {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    Ok(Ordered::from_pairs(map.into_iter().filter_map(|(k, v)| json_number_to_f64(&v).map(|n| (k, n)))))
}

// ----------------------------- coverage.json -----------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoverageReport {
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub ccc_count: Option<u64>,
    #[serde(default)]
    pub domain_average_coverage: Ordered<f64>,
    #[serde(default)]
    pub controls: Vec<CoverageControl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageControl {
    pub ccc_id: CccId,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub control_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub coverage: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub mappings_count: Option<u64>,
}

// --------------------------- effectiveness.json ---------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EffectivenessReport {
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub domain_average_effectiveness: Ordered<f64>,
    #[serde(default)]
    pub controls: Vec<EffectivenessControl>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectivenessControl {
    pub ccc_id: CccId,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub control_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub effectiveness: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub implementations_count: Option<u64>,
}

// ------------------------------ residual.json ------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResidualReport {
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub summary: Ordered<SystemSummary>,
    #[serde(default)]
    pub systems: Ordered<Vec<RiskItem>>,
    #[serde(default, deserialize_with = "lenient_number_map")]
    pub system_mitigation: Ordered<f64>,
}

impl ResidualReport {
    /// Total number of risk items across all systems.
    pub fn risk_count(&self) -> usize {
        self.systems.iter().map(|(_, items)| items.len()).sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemSummary {
    #[serde(default)]
    pub combined_mitigation: f64,
    #[serde(default)]
    pub avg_residual: Option<f64>,
    #[serde(default)]
    pub worst_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub risks: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskItem {
    #[serde(default)]
    pub risk_id: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub threat: String,
    #[serde(default)]
    pub inherent_risk: f64,
    #[serde(default)]
    pub combined_mitigation: f64,
    #[serde(default)]
    pub residual_risk: f64,
    /// Raw level name; kept as text so unexpected names still show on badges.
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub likelihood_inherent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub impact_inherent: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub system: Option<SystemId>,
}

// ------------------------------ load results ------------------------------

/// How one artifact load ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { sha256: String, bytes: usize },
    Absent { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub kind: ArtifactKind,
    pub location: String,
    pub outcome: LoadOutcome,
}

impl ArtifactStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Loaded { .. })
    }
}

/// Everything the renderers read. Any report may be absent.
#[derive(Debug, Clone, Default)]
pub struct ArtifactBundle {
    pub coverage: Option<CoverageReport>,
    pub effectiveness: Option<EffectivenessReport>,
    pub residual: Option<ResidualReport>,
    pub statuses: Vec<ArtifactStatus>,
}

impl ArtifactBundle {
    /// Producer name recorded in each loaded artifact, in load order.
    pub fn generators(&self) -> Vec<(ArtifactKind, &str)> {
        let mut out = Vec::new();
        if let Some(g) = self.coverage.as_ref().and_then(|r| r.generated_by.as_deref()) {
            out.push((ArtifactKind::Coverage, g));
        }
        if let Some(g) = self.effectiveness.as_ref().and_then(|r| r.generated_by.as_deref()) {
            out.push((ArtifactKind::Effectiveness, g));
        }
        if let Some(g) = self.residual.as_ref().and_then(|r| r.generated_by.as_deref()) {
            out.push((ArtifactKind::Residual, g));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_decodes_with_optional_fields() {
        let src = r#"{
            "generated_by": "compute_coverage.py",
            "ccc_count": 2,
            "domain_average_coverage": {"IAM": 0.75, "Network": 0.4},
            "controls": [
                {"ccc_id": "CCC-IAM-01", "domain": "IAM", "control_type": "Preventive",
                 "title": "MFA", "coverage": 0.9, "raw_sum": 1.2, "mappings_count": 3, "detail": []},
                {"ccc_id": "CCC-NET-01", "coverage": 0.4}
            ]
        }"#;
        let r: CoverageReport = serde_json::from_str(src).unwrap();
        assert_eq!(r.ccc_count, Some(2));
        assert_eq!(r.domain_average_coverage.keys().collect::<Vec<_>>(), vec!["IAM", "Network"]);
        assert_eq!(r.controls[0].mappings_count, Some(3));
        assert_eq!(r.controls[1].domain, "");
        assert_eq!(r.controls[1].ccc_id.as_str(), "CCC-NET-01");
    }

    #[test]
    fn control_without_id_is_rejected() {
        let src = r#"{"controls":[{"coverage":0.5}]}"#;
        assert!(serde_json::from_str::<CoverageReport>(src).is_err());
    }

    #[test]
    fn residual_decodes_systems_in_order() {
        let src = r#"{
            "summary": {"Payments": {"combined_mitigation": 0.42, "risks": 2, "avg_residual": 9.5, "worst_level": "High"}},
            "systems": {
                "Payments": [
                    {"risk_id": "R1", "asset_id": "Payments-API", "threat": "Fraud",
                     "inherent_risk": 16, "combined_mitigation": 0.42, "residual_risk": 9.28, "risk_level": "Medium"},
                    {"risk_id": "R2", "residual_risk": 12.5}
                ],
                "Default": []
            }
        }"#;
        let r: ResidualReport = serde_json::from_str(src).unwrap();
        assert_eq!(r.systems.keys().collect::<Vec<_>>(), vec!["Payments", "Default"]);
        assert_eq!(r.risk_count(), 2);
        let items = r.systems.get("Payments").unwrap();
        assert_eq!(items[0].inherent_risk, 16.0);
        assert_eq!(items[1].risk_level, None);
        assert_eq!(r.summary.get("Payments").unwrap().risks, Some(2));
    }

    #[test]
    fn malformed_provenance_fields_do_not_reject_the_report() {
        let src = r#"{
            "summary": {"S": {"combined_mitigation": 0.5, "risks": "many", "avg_residual": 4, "worst_level": "Low"}},
            "systems": {"S": [
                {"risk_id": "R1", "residual_risk": 4, "risk_level": "Low",
                 "likelihood_inherent": 3.5, "impact_inherent": [1], "notes": 7, "system": {"name": "S"}}
            ]},
            "system_mitigation": {"S": null, "T": 0.25, "U": "0.5"}
        }"#;
        let r: ResidualReport = serde_json::from_str(src).unwrap();
        let item = &r.systems.get("S").unwrap()[0];
        assert_eq!(item.residual_risk, 4.0);
        assert_eq!(item.likelihood_inherent, Some(3.5));
        assert_eq!(item.impact_inherent, None);
        assert_eq!(item.notes, None);
        assert_eq!(item.system, None);
        assert_eq!(r.summary.get("S").unwrap().risks, None);
        let mit: Vec<(&str, f64)> = r.system_mitigation.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(mit, vec![("T", 0.25), ("U", 0.5)]);

        let c: CoverageReport =
            serde_json::from_str(r#"{"ccc_count": -1, "controls": [{"ccc_id": "C1", "mappings_count": 2.5}]}"#).unwrap();
        assert_eq!(c.ccc_count, None);
        assert_eq!(c.controls[0].mappings_count, None);
    }

    #[test]
    fn outcome_serializes_tagged() {
        let s = ArtifactStatus {
            kind: ArtifactKind::Residual,
            location: "dist/residual.json".into(),
            outcome: LoadOutcome::Absent { reason: "missing".into() },
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_json_diff::assert_json_eq!(
            v,
            serde_json::json!({
                "kind": "residual",
                "location": "dist/residual.json",
                "outcome": {"status": "absent", "reason": "missing"}
            })
        );
    }
}
