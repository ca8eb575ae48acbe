//! crates/rb_report/src/surface.rs
//! Output surfaces: a `Page` of named containers, each holding rendered nodes.
//!
//! Renderers never look containers up by themselves; they are handed
//! `Option<&mut Container>` and a `None` slot means "not on this page".
//! A page built with [`Page::full`] has every container; [`Page::hide`]
//! removes one to produce reduced layouts.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

/// Every named container a dashboard page can carry, in layout order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerId {
    CoverageDomain,
    EffectivenessDomain,
    ResidualSummary,
    RisksTable,
    ControlsTable,
    GapsTable,
    RiskHeatmap,
    CoverageBars,
    EffectivenessBars,
    DomainDonuts,
    CsvPreviewTable,
}

impl ContainerId {
    pub const ALL: [ContainerId; 11] = [
        ContainerId::CoverageDomain,
        ContainerId::EffectivenessDomain,
        ContainerId::ResidualSummary,
        ContainerId::RisksTable,
        ContainerId::ControlsTable,
        ContainerId::GapsTable,
        ContainerId::RiskHeatmap,
        ContainerId::CoverageBars,
        ContainerId::EffectivenessBars,
        ContainerId::DomainDonuts,
        ContainerId::CsvPreviewTable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerId::CoverageDomain => "coverage-domain",
            ContainerId::EffectivenessDomain => "effectiveness-domain",
            ContainerId::ResidualSummary => "residual-summary",
            ContainerId::RisksTable => "risks-table",
            ContainerId::ControlsTable => "controls-table",
            ContainerId::GapsTable => "gaps-table",
            ContainerId::RiskHeatmap => "risk-heatmap",
            ContainerId::CoverageBars => "coverage-bars",
            ContainerId::EffectivenessBars => "effectiveness-bars",
            ContainerId::DomainDonuts => "domain-donuts",
            ContainerId::CsvPreviewTable => "csv-preview-table",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            ContainerId::CoverageDomain => "Coverage by domain",
            ContainerId::EffectivenessDomain => "Effectiveness by domain",
            ContainerId::ResidualSummary => "Residual risk by system",
            ContainerId::RisksTable => "Top risks",
            ContainerId::ControlsTable => "Control drilldown",
            ContainerId::GapsTable => "Control gaps",
            ContainerId::RiskHeatmap => "Risk heatmap",
            ContainerId::CoverageBars => "Coverage",
            ContainerId::EffectivenessBars => "Effectiveness",
            ContainerId::DomainDonuts => "Domain posture",
            ContainerId::CsvPreviewTable => "Risk register preview",
        }
    }

    /// Column headers for table containers; empty for everything else.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ContainerId::RisksTable => &[
                "System", "Risk", "Asset", "Threat", "Inherent", "Mitigation", "Residual", "Level",
            ],
            ContainerId::ControlsTable => &["Domain", "CCC", "Title", "Coverage", "Effectiveness"],
            ContainerId::GapsTable => &["Domain", "CCC", "Title", "Coverage", "Effectiveness", "Gap"],
            ContainerId::RiskHeatmap => &["System", "Low", "Medium", "High", "Critical", "Avg residual"],
            ContainerId::CsvPreviewTable => &crate::structure::CSV_COLUMNS,
            _ => &[],
        }
    }

    /// CSS layout class for non-table containers.
    pub fn layout(self) -> &'static str {
        match self {
            ContainerId::CoverageBars | ContainerId::EffectivenessBars => "bars",
            ContainerId::DomainDonuts => "donuts",
            _ => "kvs",
        }
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainerId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown container id: {s}"))
    }
}

// ------------------------------- nodes -------------------------------

/// One table cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum Cell {
    Text { text: String },
    /// Risk level badge; `class` is the lower-cased level (may be empty).
    Badge { text: String, class: String },
    /// Heatmap count cell; `highlight` carries the worst-level class.
    Level { text: String, highlight: Option<&'static str> },
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text { text: s.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Cell::Text { text } | Cell::Badge { text, .. } | Cell::Level { text, .. } => text,
        }
    }
}

/// Anything a renderer can put into a container.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Kv { key: String, value: String },
    Row { cells: Vec<Cell> },
    Bar { label: String, width_pct: f64, width: String, fill: &'static str },
    Donut { label: String, pct: i64, text: String, background: String },
}

impl Node {
    /// Cells of a table row; empty for other node kinds.
    pub fn cells(&self) -> &[Cell] {
        match self {
            Node::Row { cells } => cells,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    id: ContainerId,
    nodes: Vec<Node>,
}

impl Container {
    pub fn new(id: ContainerId) -> Self {
        Self { id, nodes: Vec::new() }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cell texts of every row, for quick inspection.
    pub fn row_texts(&self) -> Vec<Vec<&str>> {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Row { .. }))
            .map(|n| n.cells().iter().map(Cell::as_text).collect())
            .collect()
    }
}

// ------------------------------- page -------------------------------

/// Where one artifact came from and how its load ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceLine {
    pub artifact: &'static str,
    pub location: String,
    pub status: &'static str,
    pub detail: String,
    pub generated_by: Option<String>,
    /// Counts and extras the producer reported beyond what the sections show.
    pub facts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub title: String,
    pub coverage_domain: Option<Container>,
    pub effectiveness_domain: Option<Container>,
    pub residual_summary: Option<Container>,
    pub risks_table: Option<Container>,
    pub controls_table: Option<Container>,
    pub gaps_table: Option<Container>,
    pub risk_heatmap: Option<Container>,
    pub coverage_bars: Option<Container>,
    pub effectiveness_bars: Option<Container>,
    pub domain_donuts: Option<Container>,
    pub csv_preview_table: Option<Container>,
    pub sources: Vec<SourceLine>,
}

impl Page {
    /// A page carrying every container, all empty.
    pub fn full(title: impl Into<String>) -> Self {
        let c = |id| Some(Container::new(id));
        Self {
            title: title.into(),
            coverage_domain: c(ContainerId::CoverageDomain),
            effectiveness_domain: c(ContainerId::EffectivenessDomain),
            residual_summary: c(ContainerId::ResidualSummary),
            risks_table: c(ContainerId::RisksTable),
            controls_table: c(ContainerId::ControlsTable),
            gaps_table: c(ContainerId::GapsTable),
            risk_heatmap: c(ContainerId::RiskHeatmap),
            coverage_bars: c(ContainerId::CoverageBars),
            effectiveness_bars: c(ContainerId::EffectivenessBars),
            domain_donuts: c(ContainerId::DomainDonuts),
            csv_preview_table: c(ContainerId::CsvPreviewTable),
            sources: Vec::new(),
        }
    }

    pub fn slot_mut(&mut self, id: ContainerId) -> &mut Option<Container> {
        match id {
            ContainerId::CoverageDomain => &mut self.coverage_domain,
            ContainerId::EffectivenessDomain => &mut self.effectiveness_domain,
            ContainerId::ResidualSummary => &mut self.residual_summary,
            ContainerId::RisksTable => &mut self.risks_table,
            ContainerId::ControlsTable => &mut self.controls_table,
            ContainerId::GapsTable => &mut self.gaps_table,
            ContainerId::RiskHeatmap => &mut self.risk_heatmap,
            ContainerId::CoverageBars => &mut self.coverage_bars,
            ContainerId::EffectivenessBars => &mut self.effectiveness_bars,
            ContainerId::DomainDonuts => &mut self.domain_donuts,
            ContainerId::CsvPreviewTable => &mut self.csv_preview_table,
        }
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        let slot = match id {
            ContainerId::CoverageDomain => &self.coverage_domain,
            ContainerId::EffectivenessDomain => &self.effectiveness_domain,
            ContainerId::ResidualSummary => &self.residual_summary,
            ContainerId::RisksTable => &self.risks_table,
            ContainerId::ControlsTable => &self.controls_table,
            ContainerId::GapsTable => &self.gaps_table,
            ContainerId::RiskHeatmap => &self.risk_heatmap,
            ContainerId::CoverageBars => &self.coverage_bars,
            ContainerId::EffectivenessBars => &self.effectiveness_bars,
            ContainerId::DomainDonuts => &self.domain_donuts,
            ContainerId::CsvPreviewTable => &self.csv_preview_table,
        };
        slot.as_ref()
    }

    /// Drop a container from the page.
    pub fn hide(&mut self, id: ContainerId) {
        *self.slot_mut(id) = None;
    }

    /// Present containers in layout order.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        ContainerId::ALL.into_iter().filter_map(move |id| self.container(id))
    }

    /// Serializable view shared by the HTML and JSON renderers.
    pub fn view(&self) -> PageView<'_> {
        PageView {
            title: &self.title,
            containers: self
                .containers()
                .map(|c| ContainerView {
                    id: c.id.as_str(),
                    heading: c.id.heading(),
                    columns: c.id.columns(),
                    layout: c.id.layout(),
                    nodes: &c.nodes,
                })
                .collect(),
            sources: &self.sources,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub containers: Vec<ContainerView<'a>>,
    pub sources: &'a [SourceLine],
}

#[derive(Debug, Serialize)]
pub struct ContainerView<'a> {
    pub id: &'static str,
    pub heading: &'static str,
    pub columns: &'static [&'static str],
    pub layout: &'static str,
    pub nodes: &'a [Node],
}
