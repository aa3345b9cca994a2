//! Daily nutrition/hydration aggregation.
//!
//! Pure over already-normalized rows: never fails, never mutates its
//! inputs. Bad data is absorbed at this boundary (non-numeric cells count
//! as 0, unparseable dates match no day) rather than raised.

use crate::dates::normalize_date_str;
use crate::types::DailyTotals;
use chrono::NaiveDate;
use healthsheet_client::Row;
use serde_json::Value;

/// Coerce a cell to a number: JSON number, or string parseable as f64,
/// else 0. Missing, blank, and non-numeric cells all contribute 0.
pub fn field_as_number(row: &Row, field: &str) -> f64 {
    match row.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Whether a row's stored date, under any historical representation,
/// lands on the target day.
fn row_is_on(row: &Row, target: &str) -> bool {
    row.get("date")
        .and_then(|v| match v {
            Value::String(s) => normalize_date_str(s),
            _ => None,
        })
        .is_some_and(|normalized| normalized == target)
}

/// Compute total nutrition and hydration for one calendar date from the
/// full unfiltered Food and Water row sets.
pub fn compute_daily_totals(target: NaiveDate, food_rows: &[Row], water_rows: &[Row]) -> DailyTotals {
    let target = target.format("%Y-%m-%d").to_string();
    let mut totals = DailyTotals::default();

    for row in food_rows.iter().filter(|r| row_is_on(r, &target)) {
        totals.calories += field_as_number(row, "calories");
        totals.protein_g += field_as_number(row, "protein_g");
        totals.carbs_g += field_as_number(row, "carbs_g");
        totals.fat_g += field_as_number(row, "fat_g");
    }
    for row in water_rows.iter().filter(|r| row_is_on(r, &target)) {
        totals.water_ml += field_as_number(row, "volume_ml");
    }
    totals
}
