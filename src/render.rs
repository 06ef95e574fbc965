use crate::screening::ScreeningReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// Renders a report as a two-column table for the terminal.
pub fn render_table(report: &ScreeningReport) -> String {
    let snapshot = &report.snapshot;
    let verdict = &report.verdict;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Item", "Value"]);

    let stock = match &snapshot.stock_name {
        Some(name) => format!("{} {}", report.stock_code, name),
        None => report.stock_code.to_string(),
    };
    table.add_row(vec![Cell::new("Stock"), Cell::new(stock)]);
    if let Some(date) = snapshot.date {
        table.add_row(vec![Cell::new("Snapshot date"), Cell::new(date)]);
    }
    table.add_row(vec![
        Cell::new("PB"),
        Cell::new(metric(
            snapshot.price_to_book,
            snapshot.price_to_book_percentile_10y,
            snapshot.price_to_book_percentile_all,
        )),
    ]);
    table.add_row(vec![
        Cell::new("PE-TTM"),
        Cell::new(metric(
            snapshot.price_to_earnings_ttm,
            snapshot.price_to_earnings_ttm_percentile_10y,
            snapshot.price_to_earnings_ttm_percentile_all,
        )),
    ]);
    if let (Some(value), Some(pos10), Some(pos_all)) = (
        snapshot.deducted_pe_ttm,
        snapshot.deducted_pe_ttm_percentile_10y,
        snapshot.deducted_pe_ttm_percentile_all,
    ) {
        table.add_row(vec![Cell::new("Deducted PE-TTM"), Cell::new(metric(value, pos10, pos_all))]);
    }
    if report.statement_records > 0 {
        table.add_row(vec![
            Cell::new("Statement records"),
            Cell::new(report.statement_records),
        ]);
    }

    let (status, color) = if verdict.passed {
        ("PASS", Color::Green)
    } else {
        ("FAIL", Color::Red)
    };
    table.add_row(vec![Cell::new("Verdict"), Cell::new(status).fg(color)]);
    table.add_row(vec![Cell::new("Rule"), Cell::new(verdict.failing_rule)]);
    table.add_row(vec![Cell::new("Explanation"), Cell::new(&verdict.explanation)]);
    for note in &verdict.notes {
        table.add_row(vec![Cell::new("Note"), Cell::new(note)]);
    }

    table.to_string()
}

fn metric(value: f64, pos10: f64, pos_all: f64) -> String {
    format!(
        "{:.2} (10y percentile {:.2}%, all-time {:.2}%)",
        value,
        pos10 * 100.0,
        pos_all * 100.0
    )
}
