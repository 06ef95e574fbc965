use core_types::compare::smaller_within;
use core_types::{FailingRule, ValuationSnapshot, Verdict};

/// Rejects stocks whose PB or PE-TTM sits in the expensive half of its
/// own 10-year history.
#[derive(Debug, Clone, Copy)]
pub struct ValuationGate {
    ceiling: f64,
    epsilon: f64,
}

impl ValuationGate {
    pub fn new(ceiling: f64, epsilon: f64) -> Self {
        Self { ceiling, epsilon }
    }

    /// Returns the rejecting verdict, or `None` if the snapshot passes.
    ///
    /// PB is checked before PE-TTM; only the first breach is reported.
    pub fn check(&self, snapshot: &ValuationSnapshot) -> Option<Verdict> {
        let checks = [
            (
                "PB",
                snapshot.price_to_book,
                snapshot.price_to_book_percentile_10y,
            ),
            (
                "PE-TTM",
                snapshot.price_to_earnings_ttm,
                snapshot.price_to_earnings_ttm_percentile_10y,
            ),
        ];

        for (name, value, percentile) in checks {
            if smaller_within(self.ceiling, percentile, self.epsilon) {
                tracing::info!(metric = name, value, percentile, "Valuation gate rejected the stock.");
                return Some(Verdict::fail(
                    FailingRule::ValuationTooHigh,
                    format!(
                        "current {} {:.2} sits at the {:.2}% 10-year percentile, above the {:.2}% ceiling: valuation too high",
                        name,
                        value,
                        percentile * 100.0,
                        self.ceiling * 100.0
                    ),
                    Vec::new(),
                ));
            }
        }

        tracing::info!(
            pb_percentile = snapshot.price_to_book_percentile_10y,
            pe_percentile = snapshot.price_to_earnings_ttm_percentile_10y,
            "Valuation gate passed."
        );
        None
    }
}
