//! Shared in-memory mock collaborators used by unit tests.
//!
//! Keep this module `#[cfg(test)]`-only.
#![cfg(test)]

use async_trait::async_trait;
use healthsheet_client::{
    ConfigStore, ConfigValue, EstimateResponse, NutritionEstimator, RecordStore, Row, SheetError,
    Table,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory record + config store. Individual tables (or the config tab)
/// can be told to fail to exercise the degradation paths.
pub struct MockStore {
    tables: Mutex<HashMap<Table, Vec<Row>>>,
    config: Mutex<HashMap<String, ConfigValue>>,
    failing_tables: Mutex<HashSet<Table>>,
    failing_config: Mutex<bool>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            config: Mutex::new(HashMap::new()),
            failing_tables: Mutex::new(HashSet::new()),
            failing_config: Mutex::new(false),
        }
    }

    /// Seed a table from a JSON array of row objects.
    pub fn seed(&self, table: Table, rows: serde_json::Value) {
        let rows: Vec<Row> = rows
            .as_array()
            .expect("array")
            .iter()
            .map(|v| v.as_object().expect("object").clone())
            .collect();
        self.tables.lock().unwrap().insert(table, rows);
    }

    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_table(&self, table: Table) {
        self.failing_tables.lock().unwrap().insert(table);
    }

    pub fn fail_config(&self) {
        *self.failing_config.lock().unwrap() = true;
    }

    pub fn set_config(&self, key: &str, value: ConfigValue) {
        self.config.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn config_value(&self, key: &str) -> Option<ConfigValue> {
        self.config.lock().unwrap().get(key).cloned()
    }

    fn check_table(&self, table: Table) -> Result<(), SheetError> {
        if self.failing_tables.lock().unwrap().contains(&table) {
            return Err(SheetError::Api {
                status: 500,
                body: "simulated outage".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn append(&self, table: Table, row: Row) -> Result<(), SheetError> {
        self.check_table(table)?;
        self.tables.lock().unwrap().entry(table).or_default().push(row);
        Ok(())
    }

    async fn read_all(&self, table: Table) -> Result<Vec<Row>, SheetError> {
        self.check_table(table)?;
        Ok(self.rows(table))
    }
}

#[async_trait]
impl ConfigStore for MockStore {
    async fn get_all(&self) -> Result<HashMap<String, ConfigValue>, SheetError> {
        if *self.failing_config.lock().unwrap() {
            return Err(SheetError::Api {
                status: 500,
                body: "simulated outage".into(),
            });
        }
        Ok(self.config.lock().unwrap().clone())
    }

    async fn set(&self, key: &str, value: &ConfigValue) -> Result<(), SheetError> {
        if *self.failing_config.lock().unwrap() {
            return Err(SheetError::Api {
                status: 500,
                body: "simulated outage".into(),
            });
        }
        self.set_config(key, value.clone());
        Ok(())
    }
}

/// Scripted estimator: always returns the same response or the same error.
pub struct MockEstimator {
    outcome: Result<EstimateResponse, String>,
}

impl MockEstimator {
    pub fn ok(response: EstimateResponse) -> Self {
        Self {
            outcome: Ok(response),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl NutritionEstimator for MockEstimator {
    async fn estimate(
        &self,
        _image: Option<&[u8]>,
        _text: Option<&str>,
    ) -> Result<EstimateResponse, SheetError> {
        self.outcome
            .clone()
            .map_err(|msg| SheetError::Api { status: 503, body: msg })
    }
}
