//! Risk levels as produced by the residual-risk stage.
//!
//! Names are matched exactly (`"High"`, not `"high"`), the same way the
//! heatmap and summary look them up. Free-form level strings that do not
//! match still flow through badges untouched; see [`badge_text`] and
//! [`badge_class`].

use crate::errors::CoreError;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity ordered `Low < Medium < High < Critical`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Fixed column order used by the heatmap.
    pub const ALL: [RiskLevel; 4] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Column index in [`RiskLevel::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Heatmap highlight class for the worst-level cell.
    pub fn heat_class(self) -> &'static str {
        match self {
            RiskLevel::Low => "level-low",
            RiskLevel::Medium => "level-medium",
            RiskLevel::High => "level-high",
            RiskLevel::Critical => "level-critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            "Critical" => Ok(RiskLevel::Critical),
            other => Err(CoreError::UnknownLevel(other.to_string())),
        }
    }
}

/// Badge text: the raw level, or `Unknown` when missing or empty.
pub fn badge_text(raw: Option<&str>) -> &str {
    match raw {
        Some(s) if !s.is_empty() => s,
        _ => "Unknown",
    }
}

/// Badge style class: the raw level lower-cased (empty when missing).
pub fn badge_class(raw: Option<&str>) -> String {
    raw.unwrap_or_default().to_lowercase()
}
