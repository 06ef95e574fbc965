use serde::{Deserialize, Serialize};
use std::fmt;

/// The screening rule responsible for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailingRule {
    /// Every rule passed.
    None,
    BankIndustryExcluded,
    ValuationTooHigh,
    /// Receivables grew faster than revenue in two consecutive years.
    GrowthConsistencyOne,
    /// Inventory grew faster than revenue in two consecutive years.
    GrowthConsistencyTwo,
    LiquidityFloor,
    /// Fewer year-end records than the growth rules need (strict mode only).
    InsufficientHistory,
}

impl FailingRule {
    /// A short human-readable label used in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            FailingRule::None => "all rules passed",
            FailingRule::BankIndustryExcluded => "bank industry excluded",
            FailingRule::ValuationTooHigh => "valuation too high",
            FailingRule::GrowthConsistencyOne => "receivables outgrowing revenue",
            FailingRule::GrowthConsistencyTwo => "inventory outgrowing revenue",
            FailingRule::LiquidityFloor => "current ratio below floor",
            FailingRule::InsufficientHistory => "insufficient year-end history",
        }
    }
}

impl fmt::Display for FailingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
