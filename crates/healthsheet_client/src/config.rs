use crate::SheetError;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub spreadsheet_id: String,
    pub base_url: String,
    pub estimator_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, SheetError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, SheetError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("HEALTHSHEET_API_KEY")
            .ok_or_else(|| SheetError::Config("HEALTHSHEET_API_KEY missing".into()))?;
        let spreadsheet_id = get("HEALTHSHEET_SPREADSHEET_ID")
            .ok_or_else(|| SheetError::Config("HEALTHSHEET_SPREADSHEET_ID missing".into()))?;
        let base_url =
            get("HEALTHSHEET_BASE_URL").unwrap_or_else(|| "https://sheets.example.com".into());
        let estimator_url = get("HEALTHSHEET_ESTIMATOR_URL")
            .unwrap_or_else(|| "https://estimator.example.com".into());
        Ok(Self {
            api_key: SecretString::new(api.into()),
            spreadsheet_id,
            base_url,
            estimator_url,
        })
    }
}
