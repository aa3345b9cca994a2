//! Weight history summary for the trend panel: latest measurement, entry
//! count, and the date-ordered series behind the chart.

use crate::dates::normalize_date_str;
use crate::domains::nutrition::field_as_number;
use crate::types::WeightTrend;
use healthsheet_client::Row;

/// Summarize the Weight table. Rows without a parseable date are skipped;
/// an empty table yields an empty trend, not an error.
pub fn summarize_weight(rows: &[Row]) -> WeightTrend {
    let mut points: Vec<(String, f64, f64)> = rows
        .iter()
        .filter_map(|row| {
            let date = row
                .get("date")
                .and_then(|v| v.as_str())
                .and_then(normalize_date_str)?;
            Some((date, field_as_number(row, "weight_kg"), field_as_number(row, "bmi")))
        })
        .collect();
    points.sort_by(|a, b| a.0.cmp(&b.0));

    let latest = points.last().cloned();
    WeightTrend {
        latest_weight_kg: latest.as_ref().map(|(_, w, _)| *w),
        latest_bmi: latest.as_ref().map(|(_, _, b)| *b),
        entry_count: points.len(),
        series: points.into_iter().map(|(d, w, _)| (d, w)).collect(),
    }
}
