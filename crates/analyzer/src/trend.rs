use crate::ledger::{GrowthDelta, YearEndLedger};
use core_types::compare::smaller_within;
use core_types::{FailingRule, FundamentalsRecord, Verdict};

/// Note attached to the verdict when the growth rules could not run.
pub const INSUFFICIENT_HISTORY_NOTE: &str = "insufficient history";

/// The metric revenue growth is compared against in a consistency rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counterpart {
    Receivables,
    Inventory,
}

impl Counterpart {
    fn name(self) -> &'static str {
        match self {
            Counterpart::Receivables => "accounts receivable",
            Counterpart::Inventory => "inventory",
        }
    }

    fn rule(self) -> FailingRule {
        match self {
            Counterpart::Receivables => FailingRule::GrowthConsistencyOne,
            Counterpart::Inventory => FailingRule::GrowthConsistencyTwo,
        }
    }

    fn growth(self, delta: &GrowthDelta) -> f64 {
        match self {
            Counterpart::Receivables => delta.receivables,
            Counterpart::Inventory => delta.inventory,
        }
    }
}

/// Applies the fundamentals rules in order: industry exclusion, the two
/// growth-consistency rules, then the liquidity floor.
#[derive(Debug, Clone)]
pub struct TrendEngine {
    pub(crate) excluded_industries: Vec<String>,
    pub(crate) epsilon: f64,
    pub(crate) current_ratio_floor: f64,
    pub(crate) year_window: usize,
    pub(crate) require_full_history: bool,
}

impl TrendEngine {
    /// Runs every stage and returns the first failure, or a pass.
    pub fn evaluate(&self, records: &[FundamentalsRecord]) -> Verdict {
        if let Some(verdict) = self.check_exclusion(records) {
            return verdict;
        }

        let mut notes = Vec::new();
        let ledger = YearEndLedger::from_records(records);
        match ledger.growth_deltas(self.year_window) {
            Some(deltas) => {
                for delta in &deltas {
                    tracing::debug!(
                        from = delta.from_year,
                        to = delta.to_year,
                        revenue = delta.revenue,
                        receivables = delta.receivables,
                        inventory = delta.inventory,
                        "Year-over-year growth."
                    );
                }
                for counterpart in [Counterpart::Receivables, Counterpart::Inventory] {
                    if let Some(verdict) = self.check_consistency(&deltas, counterpart) {
                        return verdict;
                    }
                }
            }
            None => {
                let explanation = format!(
                    "{}: {} year-end report(s) found, the growth rules need {}",
                    INSUFFICIENT_HISTORY_NOTE,
                    ledger.len(),
                    self.year_window
                );
                if self.require_full_history {
                    tracing::info!(year_ends = ledger.len(), "Rejected for short history.");
                    return Verdict::fail(FailingRule::InsufficientHistory, explanation, notes);
                }
                tracing::warn!(year_ends = ledger.len(), "Skipping growth-consistency rules.");
                notes.push(explanation);
            }
        }

        if let Some(verdict) = self.check_liquidity(records, &notes) {
            return verdict;
        }

        tracing::info!("All fundamentals rules passed.");
        Verdict::pass(notes)
    }

    /// The first record's industry decides exclusion.
    fn check_exclusion(&self, records: &[FundamentalsRecord]) -> Option<Verdict> {
        let industry = records.first()?.industry_name.trim();
        if self.excluded_industries.iter().any(|name| name == industry) {
            tracing::info!(industry, "Industry is excluded from screening.");
            return Some(Verdict::fail(
                FailingRule::BankIndustryExcluded,
                format!(
                    "industry '{}' is excluded: its balance sheet makes the receivables, inventory and current ratio rules meaningless",
                    industry
                ),
                Vec::new(),
            ));
        }
        None
    }

    /// Fails when the counterpart grew faster than revenue in two
    /// consecutive year pairs, checking the oldest pairs first.
    fn check_consistency(&self, deltas: &[GrowthDelta], counterpart: Counterpart) -> Option<Verdict> {
        let outgrown = |d: &GrowthDelta| smaller_within(d.revenue, counterpart.growth(d), self.epsilon);

        let offending = deltas
            .windows(2)
            .find(|pair| outgrown(&pair[0]) && outgrown(&pair[1]))?;

        tracing::info!(
            rule = ?counterpart.rule(),
            first = offending[0].to_year,
            second = offending[1].to_year,
            "Growth consistency rule failed."
        );
        let detail = offending
            .iter()
            .map(|d| {
                format!(
                    "{}->{}: revenue {:+.2} vs {} {:+.2}",
                    d.from_year,
                    d.to_year,
                    d.revenue,
                    counterpart.name(),
                    counterpart.growth(d)
                )
            })
            .collect::<Vec<_>>()
            .join("; ");

        Some(Verdict::fail(
            counterpart.rule(),
            format!(
                "{} grew faster than operating revenue in two consecutive years ({})",
                counterpart.name(),
                detail
            ),
            Vec::new(),
        ))
    }

    /// Every December record in the series counts, not just the growth window.
    fn check_liquidity(&self, records: &[FundamentalsRecord], notes: &[String]) -> Option<Verdict> {
        let offending = records
            .iter()
            .filter(|r| r.is_year_end())
            .find(|r| smaller_within(r.current_ratio, self.current_ratio_floor, self.epsilon))?;

        tracing::info!(
            year = offending.fiscal_year(),
            current_ratio = offending.current_ratio,
            "Liquidity floor breached."
        );
        Some(Verdict::fail(
            FailingRule::LiquidityFloor,
            format!(
                "fiscal year {} current ratio {:.4} is below {:.2}",
                offending.fiscal_year(),
                offending.current_ratio,
                self.current_ratio_floor
            ),
            notes.to_vec(),
        ))
    }
}
