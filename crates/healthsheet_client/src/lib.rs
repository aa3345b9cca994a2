//! Collaborator traits and reqwest-based clients for the spreadsheet-backed
//! record store, the goal config store, and the nutrition estimation service.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod schema;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl SheetError {
    /// Map a non-2xx status and body snippet to the matching variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => SheetError::Auth(body),
            404 => SheetError::NotFound(body),
            422 => SheetError::InvalidInput(body),
            _ => SheetError::Api { status, body },
        }
    }
}

/// The three logical tables of the health spreadsheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Weight,
    Food,
    Water,
}

impl Table {
    /// Tab name as it appears in the spreadsheet.
    pub fn tab_name(self) -> &'static str {
        match self {
            Table::Weight => "Weight",
            Table::Food => "Food",
            Table::Water => "Water",
        }
    }
}

/// A stored row as a field-name-to-value mapping. Rows handed out by a
/// [`RecordStore`] carry canonical field names only (see [`schema`]).
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Append-only tabular storage for the Weight/Food/Water tables.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Append a single row. Fire-and-forget: no retry, no dedup.
    async fn append(&self, table: Table, row: Row) -> Result<(), SheetError>;

    /// Read the full table. An empty table yields `Ok(vec![])`, never an
    /// error; rows come back with canonical field names.
    async fn read_all(&self, table: Table) -> Result<Vec<Row>, SheetError>;
}

/// A goal value as stored in the config tab, auto-typed on read.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ConfigValue {
    /// Auto-type a raw cell: integer when whole-valued, decimal when it
    /// parses as a float, otherwise the original text.
    pub fn from_raw(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Int(i)
                } else {
                    let f = n.as_f64().unwrap_or(0.0);
                    if f.fract() == 0.0 {
                        ConfigValue::Int(f as i64)
                    } else {
                        ConfigValue::Float(f)
                    }
                }
            }
            serde_json::Value::String(s) => Self::from_text(s),
            other => ConfigValue::Text(other.to_string()),
        }
    }

    fn from_text(s: &str) -> Self {
        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return ConfigValue::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.fract() == 0.0 {
                return ConfigValue::Int(f as i64);
            }
            return ConfigValue::Float(f);
        }
        ConfigValue::Text(s.to_string())
    }

    /// Numeric view; text values have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            ConfigValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Float(v) => write!(f, "{v}"),
            ConfigValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Key-value persistence for user-chosen goals.
#[async_trait]
pub trait ConfigStore: Send + Sync + 'static {
    async fn get_all(&self) -> Result<HashMap<String, ConfigValue>, SheetError>;

    /// Upsert: update the existing key's value or append a new key.
    async fn set(&self, key: &str, value: &ConfigValue) -> Result<(), SheetError>;
}

/// One nutrition estimate from the remote vision/text model.
///
/// Numeric fields accept numbers arriving as strings; `date`/`time` are
/// optional hints the caller validates against `YYYY-MM-DD`/`HH:MM` and
/// discards when malformed.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EstimateResponse {
    pub food_name: String,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub calories: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub protein: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub carbs: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub fat: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}"))),
        other => Err(D::Error::custom(format!(
            "expected number or numeric string, got {other}"
        ))),
    }
}

/// Remote AI estimator turning a meal photo and/or free text into a
/// nutrition record.
#[async_trait]
pub trait NutritionEstimator: Send + Sync + 'static {
    /// At least one of `image`/`text` must be present. No partial record
    /// is ever accepted: an unparseable response is an error.
    async fn estimate(
        &self,
        image: Option<&[u8]>,
        text: Option<&str>,
    ) -> Result<EstimateResponse, SheetError>;
}
