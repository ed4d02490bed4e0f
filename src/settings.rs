use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dates::{DatePolicy, SlashOrder, DEFAULT_FIXED_YEAR};
use crate::error::{ForecastError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Default currency for single-entity conversions.
    #[serde(default)]
    pub currency: Option<String>,
    /// Default parent entity id for single-entity conversions.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default = "default_fixed_year")]
    pub fixed_year: i32,
    #[serde(default)]
    pub slash_order: SlashOrder,
}

fn default_fixed_year() -> i32 {
    DEFAULT_FIXED_YEAR
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: None,
            parent_id: None,
            fixed_year: default_fixed_year(),
            slash_order: SlashOrder::default(),
        }
    }
}

impl Settings {
    pub fn date_policy(&self) -> DatePolicy {
        DatePolicy {
            fixed_year: self.fixed_year,
            slash_order: self.slash_order,
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("forecast-import")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ForecastError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            currency: Some("SEK".to_string()),
            parent_id: Some("ENTITY_ID".to_string()),
            fixed_year: 2026,
            slash_order: SlashOrder::DayFirst,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, settings);
        assert!(content.contains("\"day-first\""));
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.currency.is_none());
        assert_eq!(s.date_policy(), DatePolicy::default());
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"currency": "EUR"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.currency.as_deref(), Some("EUR"));
        assert_eq!(s.fixed_year, 2025);
        assert_eq!(s.slash_order, SlashOrder::MonthFirst);
    }
}
