//! Table schemas and schema-drift tolerance.
//!
//! Earlier revisions of the spreadsheet renamed a few columns; this module
//! resolves each canonical field from the canonical name first, then each
//! known historical alias in a fixed priority order. Rows leaving the store
//! adapter carry canonical names only, so the aggregation core never has to
//! know an alias existed.

use crate::{Row, Table};
use serde_json::Value;

/// Canonical column name plus historical aliases, highest priority first.
pub struct FieldSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

const WEIGHT_FIELDS: &[FieldSpec] = &[
    FieldSpec { canonical: "date", aliases: &[] },
    FieldSpec { canonical: "height_cm", aliases: &["height"] },
    FieldSpec { canonical: "weight_kg", aliases: &["weight"] },
    FieldSpec { canonical: "bmi", aliases: &[] },
    FieldSpec { canonical: "waist_cm", aliases: &["waist"] },
];

const FOOD_FIELDS: &[FieldSpec] = &[
    FieldSpec { canonical: "date", aliases: &[] },
    FieldSpec { canonical: "time", aliases: &[] },
    FieldSpec { canonical: "food_name", aliases: &["food"] },
    FieldSpec { canonical: "calories", aliases: &["kcal"] },
    FieldSpec { canonical: "protein_g", aliases: &["protein"] },
    FieldSpec { canonical: "carbs_g", aliases: &["carbs"] },
    FieldSpec { canonical: "fat_g", aliases: &["fat"] },
];

// The hydration column is the worst drift offender: it has shipped under
// three different headers across schema versions.
const WATER_FIELDS: &[FieldSpec] = &[
    FieldSpec { canonical: "date", aliases: &[] },
    FieldSpec { canonical: "time", aliases: &[] },
    FieldSpec { canonical: "volume_ml", aliases: &["water_ml", "amount"] },
];

/// Field specs for a table, canonical column order.
pub fn fields(table: Table) -> &'static [FieldSpec] {
    match table {
        Table::Weight => WEIGHT_FIELDS,
        Table::Food => FOOD_FIELDS,
        Table::Water => WATER_FIELDS,
    }
}

/// Canonical header row for a table.
pub fn header(table: Table) -> Vec<&'static str> {
    fields(table).iter().map(|f| f.canonical).collect()
}

/// Resolve one field from a raw row: canonical name first, then each alias
/// in priority order.
pub fn resolve_field<'a>(row: &'a Row, spec: &FieldSpec) -> Option<&'a Value> {
    if let Some(v) = row.get(spec.canonical) {
        return Some(v);
    }
    spec.aliases.iter().find_map(|alias| row.get(*alias))
}

/// Rewrite a raw row to canonical field names. Unknown columns are dropped;
/// a column absent under every known name is simply absent in the result.
pub fn normalize_row(table: Table, raw: &Row) -> Row {
    let mut out = Row::new();
    for spec in fields(table) {
        if let Some(v) = resolve_field(raw, spec) {
            out.insert(spec.canonical.to_string(), v.clone());
        }
    }
    out
}
