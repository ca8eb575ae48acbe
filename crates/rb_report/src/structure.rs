//! crates/rb_report/src/structure.rs
//! Pure row builders: artifacts in, display-ready rows out.
//! No I/O and no container access. Everything here is deterministic.

use std::collections::HashMap;

use rb_core::determinism::{cmp_domain_then_id, sort_desc_stable};
use rb_core::ids::CccId;
use rb_core::level::RiskLevel;
use rb_core::rounding::{clamp_unit, display_number, to_percent};
use rb_io::artifacts::{CoverageReport, EffectivenessReport, ResidualReport, RiskItem, SystemSummary};
use rb_io::ordered::Ordered;

/// A control is a gap when either percentage is below this.
pub const GAP_THRESHOLD: i64 = 80;

/// Columns shown in the CSV preview, in order.
pub const CSV_COLUMNS: [&str; 6] =
    ["risk_id", "asset_id", "threat", "likelihood_inherent", "impact_inherent", "notes"];

// -------------------------- summaries --------------------------

/// `(domain, "<pct>%")` in document order.
pub fn domain_pairs(domains: &Ordered<f64>) -> Vec<(String, String)> {
    domains
        .iter()
        .map(|(k, v)| (k.to_string(), format!("{}%", to_percent(*v))))
        .collect()
}

/// `Mitigation 42% • Avg Resid 9.5 • Worst High`. Missing values print `n/a`.
pub fn residual_summary_line(s: &SystemSummary) -> String {
    let avg = s.avg_residual.map(display_number).unwrap_or_else(|| "n/a".to_string());
    let worst = s.worst_level.as_deref().unwrap_or("n/a");
    format!("Mitigation {}% • Avg Resid {} • Worst {}", to_percent(s.combined_mitigation), avg, worst)
}

// -------------------------- top risks --------------------------

#[derive(Clone, Debug)]
pub struct RiskRow<'a> {
    pub system: &'a str,
    pub item: &'a RiskItem,
}

/// Flatten systems, sort by residual descending (ties keep flatten order),
/// then keep the first `cap`.
pub fn top_risks(residual: &ResidualReport, cap: usize) -> Vec<RiskRow<'_>> {
    let mut rows: Vec<RiskRow<'_>> = residual
        .systems
        .iter()
        .flat_map(|(system, items)| items.iter().map(move |item| RiskRow { system, item }))
        .collect();
    sort_desc_stable(&mut rows, |r| r.item.residual_risk);
    rows.truncate(cap);
    rows
}

// ----------------------- controls and gaps -----------------------

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GapKind {
    Coverage,
    Effectiveness,
    Both,
}

impl GapKind {
    pub fn label(self) -> &'static str {
        match self {
            GapKind::Coverage => "Coverage",
            GapKind::Effectiveness => "Effectiveness",
            GapKind::Both => "Coverage & Effectiveness",
        }
    }
}

/// A coverage control joined with its effectiveness entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlRow {
    pub domain: String,
    pub ccc_id: CccId,
    pub title: String,
    pub coverage_pct: i64,
    pub effectiveness_pct: i64,
    /// False when no effectiveness entry shares this `ccc_id`.
    pub joined: bool,
}

impl ControlRow {
    pub fn gap(&self) -> Option<GapKind> {
        match (self.coverage_pct < GAP_THRESHOLD, self.effectiveness_pct < GAP_THRESHOLD) {
            (true, true) => Some(GapKind::Both),
            (true, false) => Some(GapKind::Coverage),
            (false, true) => Some(GapKind::Effectiveness),
            (false, false) => None,
        }
    }
}

/// One row per distinct coverage `ccc_id` (a repeated id keeps its last entry),
/// sorted by `(domain, ccc_id)`. Effectiveness-only ids are not included.
pub fn control_rows(coverage: &CoverageReport, effectiveness: &EffectivenessReport) -> Vec<ControlRow> {
    let mut cov_order: Vec<&str> = Vec::new();
    let mut cov_map = HashMap::new();
    for c in &coverage.controls {
        if cov_map.insert(c.ccc_id.as_str(), c).is_none() {
            cov_order.push(c.ccc_id.as_str());
        }
    }
    let eff_map: HashMap<&str, f64> = effectiveness
        .controls
        .iter()
        .map(|e| (e.ccc_id.as_str(), e.effectiveness))
        .collect();

    let mut rows: Vec<ControlRow> = cov_order
        .into_iter()
        .filter_map(|id| cov_map.get(id).copied())
        .map(|cov| {
            let eff = eff_map.get(cov.ccc_id.as_str()).copied();
            ControlRow {
                domain: cov.domain.clone(),
                ccc_id: cov.ccc_id.clone(),
                title: cov.title.clone(),
                coverage_pct: to_percent(cov.coverage),
                effectiveness_pct: to_percent(eff.unwrap_or(0.0)),
                joined: eff.is_some(),
            }
        })
        .collect();
    rows.sort_by(|a, b| cmp_domain_then_id(&a.domain, a.ccc_id.as_str(), &b.domain, b.ccc_id.as_str()));
    rows
}

// ----------------------------- bars -----------------------------

/// Fill gradient for a bar of `pct` percent.
pub fn bar_fill(pct: f64) -> &'static str {
    if pct < 50.0 {
        "linear-gradient(90deg, #ff5a5a, #ffb020)"
    } else if pct < 80.0 {
        "linear-gradient(90deg, #ffb020, #4ea1ff)"
    } else {
        "linear-gradient(90deg, #35c48a, #4ea1ff)"
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub width_pct: f64,
    pub fill: &'static str,
}

pub fn bars(domains: &Ordered<f64>) -> Vec<BarSpec> {
    domains
        .iter()
        .map(|(label, v)| {
            let width_pct = clamp_unit(*v) * 100.0;
            BarSpec { label: label.to_string(), width_pct, fill: bar_fill(width_pct) }
        })
        .collect()
}

// ---------------------------- donuts ----------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct DonutSpec {
    pub label: String,
    pub pct: i64,
}

impl DonutSpec {
    pub fn background(&self) -> String {
        format!("conic-gradient(#4ea1ff {p}%, #20252e {p}%)", p = self.pct)
    }
}

/// Coverage keys first, then effectiveness-only keys; a missing side counts as 0.
pub fn donuts(coverage: Option<&Ordered<f64>>, effectiveness: Option<&Ordered<f64>>) -> Vec<DonutSpec> {
    let mut domains: Vec<&str> = Vec::new();
    for m in [coverage, effectiveness].into_iter().flatten() {
        for k in m.keys() {
            if !domains.contains(&k) {
                domains.push(k);
            }
        }
    }
    domains
        .into_iter()
        .map(|d| {
            let cov = coverage.and_then(|m| m.get(d)).copied().unwrap_or(0.0);
            let eff = effectiveness.and_then(|m| m.get(d)).copied().unwrap_or(0.0);
            DonutSpec { label: d.to_string(), pct: to_percent((cov + eff) / 2.0) }
        })
        .collect()
}

// ---------------------------- heatmap ----------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct HeatRow {
    pub system: String,
    /// Counts in `RiskLevel::ALL` order.
    pub counts: [u64; 4],
    pub avg_residual: f64,
    /// `None` when the summary names a level outside the four known ones.
    pub worst: Option<RiskLevel>,
}

pub fn heat_rows(residual: &ResidualReport) -> Vec<HeatRow> {
    residual
        .systems
        .iter()
        .map(|(system, items)| {
            let mut counts = [0u64; 4];
            for lvl in items.iter().filter_map(|r| r.risk_level.as_deref()?.parse::<RiskLevel>().ok()) {
                counts[lvl.ordinal()] += 1;
            }
            let summary = residual.summary.get(system);
            let worst_raw = summary
                .and_then(|s| s.worst_level.as_deref())
                .filter(|s| !s.is_empty())
                .unwrap_or("Low");
            HeatRow {
                system: system.to_string(),
                counts,
                avg_residual: summary.and_then(|s| s.avg_residual).unwrap_or(0.0),
                worst: worst_raw.parse().ok(),
            }
        })
        .collect()
}

// ------------------------------ csv ------------------------------

/// One CSV data line keyed by header name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvRecord(Vec<(String, String)>);

impl CsvRecord {
    /// Value for `column`, or `""` when the header has no such column.
    pub fn get(&self, column: &str) -> &str {
        self.0.iter().find(|(k, _)| k == column).map(|(_, v)| v.as_str()).unwrap_or("")
    }
}

/// Naive comma split: no quoting, no escaping. Lines break on any CR/LF run,
/// blank lines are dropped, the first line is the header.
pub fn parse_csv(text: &str) -> Vec<CsvRecord> {
    let mut lines = text.split(['\r', '\n']).filter(|l| !l.trim().is_empty());
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header.split(',').map(str::trim).collect();
    lines
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            let mut rec: Vec<(String, String)> = Vec::with_capacity(headers.len());
            for (i, h) in headers.iter().enumerate() {
                let v = cols.get(i).map(|c| c.trim()).unwrap_or("").to_string();
                match rec.iter_mut().find(|(k, _)| k == h) {
                    Some(slot) => slot.1 = v,
                    None => rec.push((h.to_string(), v)),
                }
            }
            CsvRecord(rec)
        })
        .collect()
}

// -------------------------- provenance --------------------------

pub fn coverage_facts(r: &CoverageReport) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(n) = r.ccc_count {
        out.push(format!("{n} CCC controls"));
    }
    if let Some(n) = sum_present(r.controls.iter().map(|c| c.mappings_count)) {
        out.push(format!("{n} mappings"));
    }
    out
}

pub fn effectiveness_facts(r: &EffectivenessReport) -> Vec<String> {
    sum_present(r.controls.iter().map(|c| c.implementations_count))
        .map(|n| vec![format!("{n} implementations")])
        .unwrap_or_default()
}

/// Risk counts, per-system mitigation and how many items carry the optional
/// scoring, notes and system tags.
pub fn residual_facts(r: &ResidualReport) -> Vec<String> {
    let mut out = vec![format!("{} risks in {} systems", r.risk_count(), r.systems.len())];
    if let Some(n) = sum_present(r.summary.iter().map(|(_, s)| s.risks)) {
        if n as usize != r.risk_count() {
            out.push(format!("summary counts {n} risks"));
        }
    }
    if !r.system_mitigation.is_empty() {
        let parts: Vec<String> =
            r.system_mitigation.iter().map(|(k, v)| format!("{k} {}%", to_percent(*v))).collect();
        out.push(format!("mitigation {}", parts.join(", ")));
    }
    let items: Vec<&RiskItem> = r.systems.iter().flat_map(|(_, items)| items.iter()).collect();
    let scored = items.iter().filter(|i| i.likelihood_inherent.is_some() && i.impact_inherent.is_some()).count();
    let noted = items.iter().filter(|i| i.notes.as_deref().is_some_and(|n| !n.trim().is_empty())).count();
    let tagged = items.iter().filter(|i| i.system.is_some()).count();
    for (n, what) in [(scored, "scored"), (noted, "with notes"), (tagged, "system-tagged")] {
        if n > 0 {
            out.push(format!("{n} {what}"));
        }
    }
    out
}

fn sum_present(values: impl Iterator<Item = Option<u64>>) -> Option<u64> {
    values.flatten().fold(None, |acc, n| Some(acc.unwrap_or(0) + n))
}
