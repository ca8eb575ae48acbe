//! rb_core — Core types and display helpers for the risk dashboard.
//!
//! This crate is **I/O-free**. It defines the small set of stable types shared
//! by `rb_io`, `rb_report` and `rb_cli`:
//!
//! - `RiskLevel` (Low < Medium < High < Critical) and its style tokens
//! - Control / system identifiers (`CccId`, `SystemId`)
//! - Percent rounding and number display that match the published dashboard
//! - Canonical ordering helpers for derived rows
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod determinism;
pub mod ids;
pub mod level;
pub mod rounding;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core parsing.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        EmptyId,
        UnknownLevel(String),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::EmptyId => write!(f, "identifier must not be empty"),
                CoreError::UnknownLevel(s) => write!(f, "unknown risk level: {s}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod prelude {
    pub use crate::determinism::{cmp_domain_then_id, sort_desc_stable};
    pub use crate::errors::CoreError;
    pub use crate::ids::{CccId, SystemId};
    pub use crate::level::RiskLevel;
    pub use crate::rounding::{clamp_unit, display_number, percent_label, round_half_up, to_percent};
}
