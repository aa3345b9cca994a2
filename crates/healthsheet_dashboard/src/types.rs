//! Data model for the health dashboard.
//!
//! Entries are created once on submit and never mutated; totals and reports
//! are derived fresh per render and never persisted.

use chrono::NaiveDate;
use healthsheet_client::{ConfigValue, Row};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

/// Round to one decimal, matching what the sheet stores.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One body-weight measurement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// Computed at construction, rounded to 1 decimal at write time.
    pub bmi: f64,
    pub waist_cm: Option<f64>,
}

impl WeightEntry {
    pub fn new(date: NaiveDate, height_cm: f64, weight_kg: f64, waist_cm: Option<f64>) -> Self {
        let height_m = height_cm / 100.0;
        let bmi = round1(weight_kg / (height_m * height_m));
        Self {
            date,
            height_cm,
            weight_kg,
            bmi,
            waist_cm,
        }
    }

    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("date".into(), json!(self.date.format("%Y-%m-%d").to_string()));
        row.insert("height_cm".into(), json!(self.height_cm));
        row.insert("weight_kg".into(), json!(self.weight_kg));
        row.insert("bmi".into(), json!(self.bmi));
        if let Some(waist) = self.waist_cm {
            row.insert("waist_cm".into(), json!(waist));
        }
        row
    }
}

/// One food intake record, usually built from a confirmed AI estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FoodEntry {
    pub date: NaiveDate,
    /// HH:MM
    pub time: String,
    pub food_name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl FoodEntry {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("date".into(), json!(self.date.format("%Y-%m-%d").to_string()));
        row.insert("time".into(), json!(self.time));
        row.insert("food_name".into(), json!(self.food_name));
        row.insert("calories".into(), json!(self.calories));
        row.insert("protein_g".into(), json!(self.protein_g));
        row.insert("carbs_g".into(), json!(self.carbs_g));
        row.insert("fat_g".into(), json!(self.fat_g));
        row
    }
}

/// One water intake record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WaterEntry {
    pub date: NaiveDate,
    /// HH:MM
    pub time: String,
    pub volume_ml: f64,
}

impl WaterEntry {
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("date".into(), json!(self.date.format("%Y-%m-%d").to_string()));
        row.insert("time".into(), json!(self.time));
        row.insert("volume_ml".into(), json!(self.volume_ml));
        row
    }
}

/// Totals for one calendar date, derived per request and never cached.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub water_ml: f64,
}

/// Typed view over the goal keys of the config tab.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Goals {
    /// kg; 0 means unset.
    pub target_weight: f64,
    /// ml/day
    pub target_water: f64,
    /// kcal/day
    pub target_cal: f64,
    /// g/day
    pub target_protein: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            target_weight: 0.0,
            target_water: 2000.0,
            target_cal: 2000.0,
            target_protein: 60.0,
        }
    }
}

impl Goals {
    /// Build from the raw config mapping. Absent or text-valued keys keep
    /// their defaults.
    pub fn from_config(config: &HashMap<String, ConfigValue>) -> Self {
        let mut goals = Self::default();
        let numeric = |key: &str| config.get(key).and_then(ConfigValue::as_f64);
        if let Some(v) = numeric("target_weight") {
            goals.target_weight = v;
        }
        if let Some(v) = numeric("target_water") {
            goals.target_water = v;
        }
        if let Some(v) = numeric("target_cal") {
            goals.target_cal = v;
        }
        if let Some(v) = numeric("target_protein") {
            goals.target_protein = v;
        }
        goals
    }
}

/// Each macro's share of total macro-derived energy, in percent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MacroBreakdown {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Blocking,
    Advisory,
}

/// A derived advisory or blocking message from comparing totals to goals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

/// Output of the goal evaluator for one day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoalReport {
    pub cal_percent: f64,
    pub protein_percent: f64,
    pub macros: MacroBreakdown,
    pub alerts: Vec<Alert>,
}

/// One rendered day: totals plus the goal report.
#[derive(Clone, Debug, Serialize)]
pub struct DailySummary {
    /// YYYY-MM-DD
    pub date: String,
    pub totals: DailyTotals,
    pub report: GoalReport,
}

/// Weight history summary for the trend panel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WeightTrend {
    pub latest_weight_kg: Option<f64>,
    pub latest_bmi: Option<f64>,
    pub entry_count: usize,
    /// (YYYY-MM-DD, weight_kg), sorted by date ascending.
    pub series: Vec<(String, f64)>,
}
