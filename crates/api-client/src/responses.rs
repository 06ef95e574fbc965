use crate::error::ApiError;
use chrono::NaiveDate;
use core_types::{FundamentalsRecord, ValuationSnapshot};
use serde::Deserialize;

// The provider mixes conventions: envelope and identity fields are camelCase,
// metric fields keep their snake_case API names (`pb_pos10`, `tca_tcl_r`).

/// The `{code, msg, data}` envelope wrapping every provider response.
#[derive(Debug, Clone, Deserialize)]
pub struct LixingerEnvelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> LixingerEnvelope<T> {
    /// Unwraps the data array, treating an empty one as fatal.
    pub fn into_data(self, endpoint: &str) -> Result<Vec<T>, ApiError> {
        if !self.data.is_empty() {
            return Ok(self.data);
        }
        match self.msg.filter(|m| !m.trim().is_empty()) {
            Some(msg) => Err(ApiError::Provider { code: self.code, msg }),
            None => Err(ApiError::EmptyData(endpoint.to_string())),
        }
    }
}

/// One record from the valuation (fundamental) endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawValuation {
    pub date: Option<String>,
    #[serde(rename = "stockCode")]
    pub stock_code: Option<String>,
    #[serde(rename = "stockCnName")]
    pub stock_name: Option<String>,
    #[serde(default)]
    pub pb: f64,
    #[serde(default)]
    pub pb_pos10: f64,
    #[serde(default)]
    pub pb_pos_all: f64,
    #[serde(default)]
    pub pe_ttm: f64,
    #[serde(default)]
    pub pe_ttm_pos10: f64,
    #[serde(default)]
    pub pe_ttm_pos_all: f64,
    pub d_pe_ttm: Option<f64>,
    pub d_pe_ttm_pos10: Option<f64>,
    pub d_pe_ttm_pos_all: Option<f64>,
}

impl TryFrom<RawValuation> for ValuationSnapshot {
    type Error = ApiError;

    fn try_from(raw: RawValuation) -> Result<Self, Self::Error> {
        let date = raw.date.as_deref().map(parse_provider_date).transpose()?;
        Ok(ValuationSnapshot {
            date,
            stock_code: raw.stock_code,
            stock_name: raw.stock_name,
            price_to_book: raw.pb,
            price_to_book_percentile_10y: raw.pb_pos10,
            price_to_book_percentile_all: raw.pb_pos_all,
            price_to_earnings_ttm: raw.pe_ttm,
            price_to_earnings_ttm_percentile_10y: raw.pe_ttm_pos10,
            price_to_earnings_ttm_percentile_all: raw.pe_ttm_pos_all,
            deducted_pe_ttm: raw.d_pe_ttm,
            deducted_pe_ttm_percentile_10y: raw.d_pe_ttm_pos10,
            deducted_pe_ttm_percentile_all: raw.d_pe_ttm_pos_all,
        })
    }
}

/// A `{ "t": value }` wrapper; `t` is the cumulative-to-date total.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTotal {
    #[serde(default)]
    pub t: Option<f64>,
}

impl RawTotal {
    fn value(&self) -> f64 {
        self.t.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProfitStatement {
    /// Operating revenue.
    #[serde(default)]
    pub bi: RawTotal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBalanceSheet {
    /// Accounts receivable.
    #[serde(default)]
    pub ar: RawTotal,
    /// Inventory.
    #[serde(default)]
    pub s: RawTotal,
    /// Current ratio.
    #[serde(default)]
    pub tca_tcl_r: RawTotal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuarter {
    #[serde(rename = "profitStatement", default)]
    pub profit_statement: RawProfitStatement,
    #[serde(rename = "balanceSheet", default)]
    pub balance_sheet: RawBalanceSheet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIndustry {
    #[serde(rename = "cnName", default)]
    pub cn_name: String,
}

/// One record from the financial statement (industry) endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStatement {
    pub date: String,
    #[serde(rename = "stockCode")]
    pub stock_code: Option<String>,
    #[serde(default)]
    pub q: RawQuarter,
    #[serde(default)]
    pub industry: RawIndustry,
}

impl TryFrom<RawStatement> for FundamentalsRecord {
    type Error = ApiError;

    fn try_from(raw: RawStatement) -> Result<Self, Self::Error> {
        Ok(FundamentalsRecord {
            date: parse_provider_date(&raw.date)?,
            operating_revenue: raw.q.profit_statement.bi.value(),
            accounts_receivable: raw.q.balance_sheet.ar.value(),
            inventory: raw.q.balance_sheet.s.value(),
            current_ratio: raw.q.balance_sheet.tca_tcl_r.value(),
            industry_name: raw.industry.cn_name,
        })
    }
}

/// Parses a provider date, which is either `YYYY-MM-DD` or a full
/// RFC 3339 timestamp such as `2017-12-31T00:00:00+08:00`.
///
/// Only the calendar part is kept; the provider reports in China local time.
pub fn parse_provider_date(value: &str) -> Result<NaiveDate, ApiError> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| ApiError::InvalidData(format!("Invalid date '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2017, 12, 31).unwrap();
        assert_eq!(parse_provider_date("2017-12-31").unwrap(), expected);
        assert_eq!(parse_provider_date("2017-12-31T00:00:00+08:00").unwrap(), expected);
        assert!(matches!(
            parse_provider_date("31/12/2017"),
            Err(ApiError::InvalidData(_))
        ));
    }

    #[test]
    fn statement_record_flattens_nested_metrics() {
        let raw: RawStatement = serde_json::from_str(
            r#"{
                "date": "2016-12-31T00:00:00+08:00",
                "stockCode": "000651",
                "q": {
                    "profitStatement": { "bi": { "t": 1000.5 } },
                    "balanceSheet": { "ar": { "t": 30.0 }, "s": { "t": 90.0 }, "tca_tcl_r": { "t": 1.13 } }
                },
                "industry": { "cnName": "家用电器" }
            }"#,
        )
        .unwrap();

        let record = FundamentalsRecord::try_from(raw).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2016, 12, 31).unwrap());
        assert_eq!(record.operating_revenue, 1000.5);
        assert_eq!(record.accounts_receivable, 30.0);
        assert_eq!(record.inventory, 90.0);
        assert_eq!(record.current_ratio, 1.13);
        assert_eq!(record.industry_name, "家用电器");
    }

    #[test]
    fn missing_metrics_default_to_zero() {
        let raw: RawStatement = serde_json::from_str(
            r#"{ "date": "2016-12-31", "q": { "balanceSheet": { "s": { "t": null } } } }"#,
        )
        .unwrap();

        let record = FundamentalsRecord::try_from(raw).unwrap();
        assert_eq!(record.inventory, 0.0);
        assert_eq!(record.operating_revenue, 0.0);
        assert_eq!(record.industry_name, "");
    }

    #[test]
    fn empty_envelope_is_reported_with_provider_message() {
        let envelope: LixingerEnvelope<RawValuation> =
            serde_json::from_str(r#"{ "code": 0, "msg": "token is invalid", "data": [] }"#).unwrap();
        match envelope.into_data("/a/stock/fundamental") {
            Err(ApiError::Provider { code, msg }) => {
                assert_eq!(code, 0);
                assert_eq!(msg, "token is invalid");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let envelope: LixingerEnvelope<RawValuation> = serde_json::from_str(r#"{ "code": 1 }"#).unwrap();
        assert!(matches!(
            envelope.into_data("/a/stock/fundamental"),
            Err(ApiError::EmptyData(_))
        ));
    }
}
