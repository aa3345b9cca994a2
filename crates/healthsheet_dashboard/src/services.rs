//! The dashboard service: wires the record store, config store, and
//! estimator together with the input-clamping and partial-failure policies.

use crate::dates::resolve_entry_instant;
use crate::domains::{goals::evaluate_goals, nutrition::compute_daily_totals, weight::summarize_weight};
use crate::error::{DashboardError, DashboardResult};
use crate::state::{PendingEstimate, PendingSlot};
use crate::types::{DailySummary, FoodEntry, Goals, WaterEntry, WeightEntry, WeightTrend};
use chrono::NaiveDate;
use healthsheet_client::{ConfigStore, ConfigValue, NutritionEstimator, RecordStore, Row, Table};
use std::sync::Arc;

/// Allowed input ranges; out-of-range submissions are clamped at this
/// boundary, not raised.
const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);
const WEIGHT_RANGE_KG: (f64, f64) = (0.0, 200.0);
const WATER_RANGE_ML: (f64, f64) = (0.0, 5000.0);

/// The fixed quick-add water amount, one glass.
pub const QUICK_ADD_WATER_ML: f64 = 250.0;

/// Goal keys the config tab carries.
pub const GOAL_KEYS: [&str; 4] = ["target_weight", "target_water", "target_cal", "target_protein"];

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
    config: Arc<dyn ConfigStore>,
    estimator: Arc<dyn NutritionEstimator>,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        config: Arc<dyn ConfigStore>,
        estimator: Arc<dyn NutritionEstimator>,
    ) -> Self {
        Self {
            store,
            config,
            estimator,
        }
    }

    /// Record a body-weight measurement. BMI is computed here and stored
    /// with the row.
    pub async fn record_weight(
        &self,
        date: NaiveDate,
        height_cm: f64,
        weight_kg: f64,
        waist_cm: Option<f64>,
    ) -> DashboardResult<WeightEntry> {
        let height_cm = height_cm.clamp(HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1);
        let weight_kg = weight_kg.clamp(WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1);
        let entry = WeightEntry::new(date, height_cm, weight_kg, waist_cm);
        self.store.append(Table::Weight, entry.to_row()).await?;
        tracing::info!(date = %date, weight_kg, bmi = entry.bmi, "weight recorded");
        Ok(entry)
    }

    /// Record a water intake.
    pub async fn record_water(
        &self,
        date: NaiveDate,
        time: &str,
        volume_ml: f64,
    ) -> DashboardResult<WaterEntry> {
        let entry = WaterEntry {
            date,
            time: time.to_string(),
            volume_ml: volume_ml.clamp(WATER_RANGE_ML.0, WATER_RANGE_ML.1),
        };
        self.store.append(Table::Water, entry.to_row()).await?;
        Ok(entry)
    }

    /// Record one glass via the fixed quick-add amount.
    pub async fn quick_add_water(&self, date: NaiveDate, time: &str) -> DashboardResult<WaterEntry> {
        self.record_water(date, time, QUICK_ADD_WATER_ML).await
    }

    /// Ask the estimator for a nutrition record and park it in the slot
    /// for the user to confirm or discard. Estimator failure surfaces as
    /// an error and leaves the slot unchanged.
    pub async fn request_estimate(
        &self,
        image: Option<&[u8]>,
        text: Option<&str>,
        slot: &mut PendingSlot,
    ) -> DashboardResult<()> {
        let raw = self
            .estimator
            .estimate(image, text)
            .await
            .map_err(|e| DashboardError::Estimation(e.to_string()))?;

        // date/time are hints: absent or malformed means "now".
        let (date, time) = resolve_entry_instant(raw.date.as_deref(), raw.time.as_deref());
        let entry = FoodEntry {
            date,
            time,
            food_name: raw.food_name.clone(),
            calories: raw.calories,
            protein_g: raw.protein,
            carbs_g: raw.carbs,
            fat_g: raw.fat,
        };
        if slot.replace(PendingEstimate { entry, raw }).is_some() {
            tracing::debug!("previous pending estimate displaced");
        }
        Ok(())
    }

    /// Confirm the pending estimate, appending it to the Food table. The
    /// estimate stays in the slot if the append fails so the user can
    /// retry.
    pub async fn confirm_estimate(&self, slot: &mut PendingSlot) -> DashboardResult<FoodEntry> {
        let pending = slot
            .take()
            .ok_or_else(|| DashboardError::Validation("no estimate awaiting confirmation".into()))?;
        match self.store.append(Table::Food, pending.entry.to_row()).await {
            Ok(()) => Ok(pending.entry),
            Err(e) => {
                slot.replace(pending);
                Err(e.into())
            }
        }
    }

    /// Drop the pending estimate without storing anything.
    pub fn discard_estimate(&self, slot: &mut PendingSlot) {
        if slot.take().is_some() {
            tracing::debug!("pending estimate discarded");
        }
    }

    /// Read a table for aggregation, degrading a failed read to zero
    /// contribution so one outage cannot blank the whole daily view.
    async fn read_or_empty(&self, table: Table) -> Vec<Row> {
        match self.store.read_all(table).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(table = table.tab_name(), error = %e, "table read failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Compute the daily summary for one date: fresh reads of Food and
    /// Water, aggregation, then goal evaluation. A config-store read
    /// failure is a store outage and surfaces as an error.
    pub async fn daily_summary(&self, date: NaiveDate) -> DashboardResult<DailySummary> {
        let food_rows = self.read_or_empty(Table::Food).await;
        let water_rows = self.read_or_empty(Table::Water).await;
        let totals = compute_daily_totals(date, &food_rows, &water_rows);

        let goals = self.load_goals().await?;
        let report = evaluate_goals(&totals, &goals);
        Ok(DailySummary {
            date: date.format("%Y-%m-%d").to_string(),
            totals,
            report,
        })
    }

    /// Weight history summary for the trend panel.
    pub async fn weight_trend(&self) -> DashboardResult<WeightTrend> {
        let rows = self.store.read_all(Table::Weight).await?;
        Ok(summarize_weight(&rows))
    }

    /// Load the typed goal view; absent keys keep their defaults.
    pub async fn load_goals(&self) -> DashboardResult<Goals> {
        let config = self.config.get_all().await?;
        Ok(Goals::from_config(&config))
    }

    /// Save one goal value, typed as integer when it rounds to a whole
    /// number.
    pub async fn save_goal(&self, key: &str, value: f64) -> DashboardResult<()> {
        if !GOAL_KEYS.contains(&key) {
            return Err(DashboardError::Validation(format!("unknown goal key: {key}")));
        }
        let value = if value.fract() == 0.0 {
            ConfigValue::Int(value as i64)
        } else {
            ConfigValue::Float(value)
        };
        self.config.set(key, &value).await?;
        Ok(())
    }
}
