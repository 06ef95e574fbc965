//! # White-Horse Screening Engine
//!
//! Pure decision logic: given one valuation snapshot and a series of
//! financial-statement records it produces a [`Verdict`]. No I/O happens here;
//! fetching is the job of `api-client`, presentation the job of the binary.
//!
//! Stages run in a fixed order and the first failure ends the evaluation:
//!
//! 1. valuation gate (10-year PB and PE-TTM percentiles),
//! 2. industry exclusion,
//! 3. receivables-vs-revenue growth consistency,
//! 4. inventory-vs-revenue growth consistency,
//! 5. December current-ratio floor.

use crate::error::AnalyzerError;
use configuration::ScreenerConfig;
use core_types::{FundamentalsRecord, ValuationSnapshot, Verdict};

pub mod error;
pub mod ledger;
pub mod trend;
pub mod valuation;

pub use ledger::{GrowthDelta, YearEndFigures, YearEndLedger};
pub use trend::{TrendEngine, INSUFFICIENT_HISTORY_NOTE};
pub use valuation::ValuationGate;

/// The main screening engine.
#[derive(Debug, Clone)]
pub struct Screener {
    gate: ValuationGate,
    trend: TrendEngine,
}

impl Screener {
    pub fn new(config: &ScreenerConfig) -> Result<Self, AnalyzerError> {
        if !(0.0..=1.0).contains(&config.percentile_ceiling) {
            return Err(AnalyzerError::InvalidThreshold(format!(
                "percentile ceiling {} is outside [0, 1]",
                config.percentile_ceiling
            )));
        }
        if config.epsilon.is_nan() || config.epsilon < 0.0 {
            return Err(AnalyzerError::InvalidThreshold(format!(
                "epsilon {} must not be negative",
                config.epsilon
            )));
        }
        if config.year_window < 3 {
            return Err(AnalyzerError::InvalidThreshold(format!(
                "year window {} leaves fewer than two year pairs",
                config.year_window
            )));
        }

        Ok(Self {
            gate: ValuationGate::new(config.percentile_ceiling, config.epsilon),
            trend: TrendEngine {
                excluded_industries: config
                    .excluded_industries
                    .iter()
                    .map(|name| name.trim().to_string())
                    .collect(),
                epsilon: config.epsilon,
                current_ratio_floor: config.current_ratio_floor,
                year_window: config.year_window,
                require_full_history: config.require_full_history,
            },
        })
    }

    /// Screens one stock. Deterministic: the same inputs always give the same verdict.
    pub fn evaluate(&self, snapshot: &ValuationSnapshot, records: &[FundamentalsRecord]) -> Verdict {
        match self.check_valuation(snapshot) {
            Some(verdict) => verdict,
            None => self.check_fundamentals(records),
        }
    }

    /// Runs only the valuation gate; `Some` carries the rejection.
    ///
    /// Lets the caller skip fetching fundamentals for a stock that is
    /// already rejected.
    pub fn check_valuation(&self, snapshot: &ValuationSnapshot) -> Option<Verdict> {
        self.gate.check(snapshot)
    }

    /// Runs the fundamentals stages on their own.
    pub fn check_fundamentals(&self, records: &[FundamentalsRecord]) -> Verdict {
        self.trend.evaluate(records)
    }
}
