use crate::error::ApiError;
use crate::responses::{LixingerEnvelope, RawStatement, RawValuation};
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::ApiConfig;
use core_types::{FundamentalsRecord, StockCode, ValuationSnapshot};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::parse_provider_date;

/// Valuation metrics requested for the snapshot: PB, PE-TTM and deducted
/// PE-TTM, each with its 10-year and all-time percentile.
pub const VALUATION_METRICS: [&str; 9] = [
    "pb",
    "pb_pos10",
    "pb_pos_all",
    "pe_ttm",
    "pe_ttm_pos10",
    "pe_ttm_pos_all",
    "d_pe_ttm",
    "d_pe_ttm_pos10",
    "d_pe_ttm_pos_all",
];

/// Statement metrics: operating revenue, accounts receivable, inventory and
/// current ratio, all as cumulative totals.
pub const STATEMENT_METRICS: [&str; 4] = [
    "q.profitStatement.bi.t",
    "q.balanceSheet.ar.t",
    "q.balanceSheet.s.t",
    "q.balanceSheet.tca_tcl_r.t",
];

/// The interface the screener uses to obtain its two inputs.
///
/// Kept as a trait so the orchestration can be exercised against a fake
/// provider without network access.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Fetches the valuation snapshot of `code` on `date`.
    async fn fetch_valuation(
        &self,
        code: &StockCode,
        date: NaiveDate,
    ) -> Result<ValuationSnapshot, ApiError>;

    /// Fetches quarterly statement records between `start` and `end`,
    /// sorted ascending by report date.
    async fn fetch_fundamentals(
        &self,
        code: &StockCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FundamentalsRecord>, ApiError>;
}

/// The JSON body shared by both endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LixingerRequest<'a> {
    stock_codes: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    metrics: &'a [&'a str],
    token: &'a str,
}

/// A concrete implementation of the `FundamentalsProvider` for the Lixinger Open API.
#[derive(Clone)]
pub struct LixingerClient {
    client: reqwest::Client,
    base_url: String,
    fundamental_path: String,
    statement_path: String,
    token: String,
}

impl LixingerClient {
    pub fn new(api_config: &ApiConfig, token: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
            fundamental_path: api_config.fundamental_path.clone(),
            statement_path: api_config.statement_path.clone(),
            token: token.into(),
        })
    }

    async fn _post<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &LixingerRequest<'_>,
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, codes = ?request.stock_codes, "Calling Lixinger API");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: LixingerEnvelope<T> = serde_json::from_str(&text).map_err(|e| {
            ApiError::Deserialization(format!("{}. Original text: {}", e, text))
        })?;
        envelope.into_data(path)
    }
}

#[async_trait]
impl FundamentalsProvider for LixingerClient {
    async fn fetch_valuation(
        &self,
        code: &StockCode,
        date: NaiveDate,
    ) -> Result<ValuationSnapshot, ApiError> {
        let request = LixingerRequest {
            stock_codes: [code.as_str()],
            date: Some(date.format("%Y-%m-%d").to_string()),
            start_date: None,
            end_date: None,
            metrics: &VALUATION_METRICS,
            token: &self.token,
        };

        let records: Vec<RawValuation> = self._post(&self.fundamental_path, &request).await?;
        tracing::debug!(count = records.len(), "Received valuation records");

        // One code and one date were requested, so the first record is the snapshot.
        let raw = records
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::EmptyData(self.fundamental_path.clone()))?;
        ValuationSnapshot::try_from(raw)
    }

    async fn fetch_fundamentals(
        &self,
        code: &StockCode,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FundamentalsRecord>, ApiError> {
        let request = LixingerRequest {
            stock_codes: [code.as_str()],
            date: None,
            start_date: Some(start.format("%Y-%m-%d").to_string()),
            end_date: Some(end.format("%Y-%m-%d").to_string()),
            metrics: &STATEMENT_METRICS,
            token: &self.token,
        };

        let raw: Vec<RawStatement> = self._post(&self.statement_path, &request).await?;
        let mut records = raw
            .into_iter()
            .map(FundamentalsRecord::try_from)
            .collect::<Result<Vec<_>, ApiError>>()?;
        records.sort_by_key(|r| r.date);

        tracing::debug!(count = records.len(), "Received statement records");
        Ok(records)
    }
}
