use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const COVERAGE: &str = r#"{
  "generated_by": "compute_coverage.py",
  "domain_average_coverage": {"IAM": 0.9, "Network": 0.45},
  "controls": [
    {"ccc_id": "CCC-IAM-01", "domain": "IAM", "control_type": "Preventive", "title": "MFA", "coverage": 0.9},
    {"ccc_id": "CCC-NET-01", "domain": "Network", "control_type": "Detective", "title": "Segmentation", "coverage": 0.45}
  ]
}"#;

const EFFECTIVENESS: &str = r#"{
  "domain_average_effectiveness": {"IAM": 0.7},
  "controls": [{"ccc_id": "CCC-IAM-01", "effectiveness": 0.7}]
}"#;

const RESIDUAL: &str = r#"{
  "summary": {
    "Payments": {"combined_mitigation": 0.5, "avg_residual": 10, "worst_level": "Critical"}
  },
  "systems": {
    "Payments": [
      {"risk_id": "R-1", "asset_id": "API", "threat": "Fraud", "inherent_risk": 20,
       "combined_mitigation": 0.5, "residual_risk": 10, "risk_level": "High"},
      {"risk_id": "R-2", "asset_id": "DB", "threat": "Leak", "inherent_risk": 25,
       "combined_mitigation": 0.25, "residual_risk": 18.75, "risk_level": "Critical"}
    ]
  }
}"#;

fn write_dist(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("coverage.json"), COVERAGE).unwrap();
    fs::write(dir.join("effectiveness.json"), EFFECTIVENESS).unwrap();
    fs::write(dir.join("residual.json"), RESIDUAL).unwrap();
}

fn riskboard() -> Command {
    let mut cmd = Command::cargo_bin("riskboard").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn container<'a>(doc: &'a Value, id: &str) -> &'a Value {
    doc["containers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .unwrap_or_else(|| panic!("no container {id}"))
}

#[test]
fn renders_html_from_local_base() {
    let tmp = tempfile::tempdir().unwrap();
    let dist = tmp.path().join("dist");
    write_dist(&dist);
    let out = tmp.path().join("site");

    riskboard()
        .args(["--base", dist.to_str().unwrap(), "--out", out.to_str().unwrap(), "--title", "Q3 Risk"])
        .assert()
        .success();

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("<title>Q3 Risk</title>"));
    assert!(html.contains("Mitigation 50% • Avg Resid 10 • Worst Critical"));
    assert!(html.contains(r#"<span class="badge critical">Critical</span>"#));
    assert!(html.contains(r#"<td class="level-cell level-critical">1</td>"#));
    assert!(html.contains("Coverage &amp; Effectiveness"));
    assert!(html.contains("conic-gradient(#4ea1ff 80%, #20252e 80%)"));
    assert!(html.contains("2 risks in 1 systems"));
    assert!(!out.join("dashboard.json").exists());
}

#[test]
fn missing_artifacts_degrade_to_empty_sections() {
    let tmp = tempfile::tempdir().unwrap();
    let dist = tmp.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("coverage.json"), COVERAGE).unwrap();
    let out = tmp.path().join("site");

    riskboard()
        .args(["--base", dist.to_str().unwrap(), "--out", out.to_str().unwrap(), "--render", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("artifact unavailable"));

    let doc: Value = serde_json::from_str(&fs::read_to_string(out.join("dashboard.json")).unwrap()).unwrap();
    assert_eq!(container(&doc, "coverage-bars")["nodes"].as_array().unwrap().len(), 2);
    assert!(container(&doc, "risk-heatmap")["nodes"].as_array().unwrap().is_empty());
    assert!(container(&doc, "controls-table")["nodes"].as_array().unwrap().is_empty());
    let statuses: Vec<&str> = doc["sources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["loaded", "absent", "absent"]);
}

#[test]
fn csv_preview_and_json_output() {
    let tmp = tempfile::tempdir().unwrap();
    let dist = tmp.path().join("dist");
    write_dist(&dist);
    let csv = tmp.path().join("register.csv");
    fs::write(&csv, "risk_id,asset_id,threat,notes\r\nR-9,Laptop,Theft,encrypt\r\n\r\nR-10,VPN\r\n").unwrap();
    let out = tmp.path().join("site");

    riskboard()
        .args([
            "--base",
            dist.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
            "--render",
            "json",
            "--render",
            "html",
            "--top-risks",
            "1",
            "--quiet",
        ])
        .assert()
        .success();

    assert!(out.join("index.html").exists());
    let doc: Value = serde_json::from_str(&fs::read_to_string(out.join("dashboard.json")).unwrap()).unwrap();
    let rows = container(&doc, "csv-preview-table")["nodes"].as_array().unwrap().clone();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["cells"][2]["text"], "Theft");
    assert_eq!(rows[1]["cells"][5]["text"], "");
    let risks = container(&doc, "risks-table")["nodes"].as_array().unwrap().clone();
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0]["cells"][1]["text"], "R-2");
}

#[test]
fn manifest_supplies_cap_and_digests() {
    let tmp = tempfile::tempdir().unwrap();
    write_dist(&tmp.path().join("dist"));
    let manifest = tmp.path().join("dashboard.manifest.json");
    let bad = "0".repeat(64);
    fs::write(
        &manifest,
        format!(r#"{{"id":"demo","base":"dist","title":"From manifest","top_risks_cap":1,"inputs_sha256":{{"residual":"{bad}"}}}}"#),
    )
    .unwrap();
    let out = tmp.path().join("site");

    riskboard()
        .args(["--manifest", manifest.to_str().unwrap(), "--out", out.to_str().unwrap(), "--render", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("sha256 mismatch"));

    let doc: Value = serde_json::from_str(&fs::read_to_string(out.join("dashboard.json")).unwrap()).unwrap();
    assert_eq!(doc["title"], "From manifest");
    assert!(container(&doc, "risks-table")["nodes"].as_array().unwrap().is_empty());
    assert_eq!(container(&doc, "controls-table")["nodes"].as_array().unwrap().len(), 2);
}

#[test]
fn hidden_required_table_raises_the_alert() {
    let tmp = tempfile::tempdir().unwrap();
    let dist = tmp.path().join("dist");
    write_dist(&dist);

    riskboard()
        .args([
            "--base",
            dist.to_str().unwrap(),
            "--out",
            tmp.path().join("site").to_str().unwrap(),
            "--hide",
            "gaps-table",
        ])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Failed to load dashboard data"))
        .stderr(predicate::str::contains("gaps-table"));
}

#[test]
fn invalid_manifest_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = tmp.path().join("m.json");
    fs::write(&manifest, r#"{"base":"dist","theme":"dark"}"#).unwrap();

    riskboard()
        .args(["--manifest", manifest.to_str().unwrap(), "--out", tmp.path().to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("manifest is not valid"));
}

#[test]
fn base_and_manifest_together_are_rejected() {
    riskboard().args(["--base", "dist", "--manifest", "m.json"]).assert().code(2);
}
