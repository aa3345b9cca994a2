//! Core of the spreadsheet-backed personal health dashboard: daily
//! nutrition/hydration aggregation, goal evaluation, weight trends, and
//! the service that wires the remote collaborators together.
//!
//! The aggregation and evaluation functions in [`domains`] are pure and
//! infallible; all I/O and error handling lives in
//! [`services::DashboardService`].

pub mod dates;
pub mod domains;
pub mod error;
pub mod services;
pub mod state;
pub mod types;

mod test_utils;

pub use error::{DashboardError, DashboardResult};
pub use services::{DashboardService, QUICK_ADD_WATER_ML};
pub use state::{PendingEstimate, PendingSlot};
pub use types::{
    Alert, DailySummary, DailyTotals, FoodEntry, GoalReport, Goals, MacroBreakdown, Severity,
    WaterEntry, WeightEntry, WeightTrend,
};
