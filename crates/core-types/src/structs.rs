use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated A-share stock code.
///
/// The code must parse to an integer strictly between `0` and `999999`. The
/// original text (including leading zeros, e.g. `"000651"`) is preserved because
/// that is what the data provider expects in requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StockCode(String);

impl StockCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StockCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(n) if n > 0 && n < 999_999 => Ok(Self(trimmed.to_string())),
            _ => Err(CoreError::InvalidStockCode(s.to_string())),
        }
    }
}

impl TryFrom<String> for StockCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StockCode> for String {
    fn from(code: StockCode) -> Self {
        code.0
    }
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The latest valuation figures for one stock on one date.
///
/// Percentiles are fractions in `[0, 1]`: the share of the rolling window in
/// which the metric was at or below today's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub date: Option<NaiveDate>,
    pub stock_code: Option<String>,
    pub stock_name: Option<String>,

    pub price_to_book: f64,
    pub price_to_book_percentile_10y: f64,
    pub price_to_book_percentile_all: f64,

    pub price_to_earnings_ttm: f64,
    pub price_to_earnings_ttm_percentile_10y: f64,
    pub price_to_earnings_ttm_percentile_all: f64,

    /// PE-TTM computed on earnings with non-recurring items deducted.
    /// Reported only; never gated on.
    pub deducted_pe_ttm: Option<f64>,
    pub deducted_pe_ttm_percentile_10y: Option<f64>,
    pub deducted_pe_ttm_percentile_all: Option<f64>,
}

/// One financial-statement data point, reported quarterly.
///
/// Monetary amounts are cumulative to the report date, so the December record is
/// the full fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsRecord {
    pub date: NaiveDate,
    pub operating_revenue: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    /// Total current assets / total current liabilities.
    pub current_ratio: f64,
    pub industry_name: String,
}

impl FundamentalsRecord {
    /// `true` for a December report, the canonical annual snapshot.
    pub fn is_year_end(&self) -> bool {
        self.date.month() == 12
    }

    pub fn fiscal_year(&self) -> i32 {
        self.date.year()
    }
}
