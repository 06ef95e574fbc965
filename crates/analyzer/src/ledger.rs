use core_types::FundamentalsRecord;
use std::collections::BTreeMap;

/// Full-year figures taken from one December report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearEndFigures {
    pub revenue: f64,
    pub receivables: f64,
    pub inventory: f64,
}

/// Year-over-year change of each metric between two consecutive year-ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthDelta {
    pub from_year: i32,
    pub to_year: i32,
    pub revenue: f64,
    pub receivables: f64,
    pub inventory: f64,
}

/// Year-end figures keyed by fiscal year, built once per evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearEndLedger {
    years: BTreeMap<i32, YearEndFigures>,
}

impl YearEndLedger {
    /// Collects every December record. A later record for the same fiscal year
    /// replaces an earlier one (restated reports arrive after the original).
    pub fn from_records(records: &[FundamentalsRecord]) -> Self {
        let years = records
            .iter()
            .filter(|r| r.is_year_end())
            .map(|r| {
                (
                    r.fiscal_year(),
                    YearEndFigures {
                        revenue: r.operating_revenue,
                        receivables: r.accounts_receivable,
                        inventory: r.inventory,
                    },
                )
            })
            .collect();
        Self { years }
    }

    /// Number of fiscal years with a December report.
    pub(crate) fn len(&self) -> usize {
        self.years.len()
    }

    /// Deltas across the `window` most recent year-ends, oldest pair first.
    ///
    /// Returns `None` when fewer than `window` year-ends are present. The
    /// window slides over the years actually reported, so a gap year simply
    /// makes the pair span two calendar years.
    pub fn growth_deltas(&self, window: usize) -> Option<Vec<GrowthDelta>> {
        if window < 2 || self.years.len() < window {
            return None;
        }
        let recent: Vec<(i32, YearEndFigures)> = self
            .years
            .iter()
            .skip(self.years.len() - window)
            .map(|(year, figures)| (*year, *figures))
            .collect();

        let deltas = recent
            .windows(2)
            .map(|pair| {
                let (from_year, prev) = pair[0];
                let (to_year, curr) = pair[1];
                GrowthDelta {
                    from_year,
                    to_year,
                    revenue: curr.revenue - prev.revenue,
                    receivables: curr.receivables - prev.receivables,
                    inventory: curr.inventory - prev.inventory,
                }
            })
            .collect();
        Some(deltas)
    }
}
