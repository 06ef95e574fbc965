use analyzer::Screener;
use api_client::FundamentalsProvider;
use api_client::error::ApiError;
use chrono::NaiveDate;
use core_types::{StockCode, ValuationSnapshot, Verdict};
use serde::Serialize;

/// What to screen and over which dates.
#[derive(Debug, Clone)]
pub struct ScreeningRequest {
    pub code: StockCode,
    /// Date of the valuation snapshot.
    pub snapshot_date: NaiveDate,
    /// First day of the statement series.
    pub start_date: NaiveDate,
    /// Last day of the statement series.
    pub end_date: NaiveDate,
}

/// Everything the binary prints for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub stock_code: StockCode,
    pub snapshot: ValuationSnapshot,
    /// Number of statement records fetched; zero when the gate rejected first.
    pub statement_records: usize,
    pub verdict: Verdict,
}

/// Fetches both inputs and screens them.
///
/// The valuation snapshot is fetched and gated first; the statement series is
/// only requested when the gate passes. Provider errors abort the run.
pub async fn screen(
    provider: &dyn FundamentalsProvider,
    screener: &Screener,
    request: &ScreeningRequest,
) -> Result<ScreeningReport, ApiError> {
    let snapshot = provider
        .fetch_valuation(&request.code, request.snapshot_date)
        .await?;
    tracing::info!(
        date = %request.snapshot_date,
        pb = snapshot.price_to_book,
        pe_ttm = snapshot.price_to_earnings_ttm,
        "Fetched valuation snapshot."
    );

    if let Some(verdict) = screener.check_valuation(&snapshot) {
        return Ok(ScreeningReport {
            stock_code: request.code.clone(),
            snapshot,
            statement_records: 0,
            verdict,
        });
    }

    let records = provider
        .fetch_fundamentals(&request.code, request.start_date, request.end_date)
        .await?;
    tracing::info!(
        records = records.len(),
        from = %request.start_date,
        to = %request.end_date,
        "Fetched statement series."
    );

    let verdict = screener.check_fundamentals(&records);
    Ok(ScreeningReport {
        stock_code: request.code.clone(),
        snapshot,
        statement_records: records.len(),
        verdict,
    })
}
