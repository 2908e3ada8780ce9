use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::window::BreakdownPeriod;
use crate::currency::{CurrencyFormatter, GroupingStyle, LocaleConfig, RUPEE};
use crate::errors::DashboardError;
use crate::utils::{app_data_dir, config_file_in, ensure_dir};

const TMP_SUFFIX: &str = "tmp";

/// Display preferences and widget limits. Every field has a default so a
/// partial file still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "DashboardConfig::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub grouping: GroupingStyle,
    #[serde(default = "DashboardConfig::default_decimal_places")]
    pub decimal_places: u32,
    #[serde(default = "DashboardConfig::default_trend_months")]
    pub trend_months: u32,
    #[serde(default)]
    pub breakdown_period: BreakdownPeriod,
    #[serde(default = "DashboardConfig::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "DashboardConfig::default_trend_series_limit")]
    pub trend_series_limit: usize,
    #[serde(default = "DashboardConfig::default_goal_preview_limit")]
    pub goal_preview_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            grouping: GroupingStyle::default(),
            decimal_places: Self::default_decimal_places(),
            trend_months: Self::default_trend_months(),
            breakdown_period: BreakdownPeriod::default(),
            recent_limit: Self::default_recent_limit(),
            trend_series_limit: Self::default_trend_series_limit(),
            goal_preview_limit: Self::default_goal_preview_limit(),
        }
    }
}

impl DashboardConfig {
    pub fn default_currency_symbol() -> String {
        RUPEE.into()
    }

    pub fn default_decimal_places() -> u32 {
        2
    }

    pub fn default_trend_months() -> u32 {
        3
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_trend_series_limit() -> usize {
        5
    }

    pub fn default_goal_preview_limit() -> usize {
        3
    }

    pub fn formatter(&self) -> CurrencyFormatter {
        let locale = LocaleConfig {
            grouping: self.grouping,
            ..LocaleConfig::default()
        };
        CurrencyFormatter::new(self.currency_symbol.clone(), locale, self.decimal_places)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `config.json` under the application data directory.
    pub fn new() -> Result<Self, DashboardError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, DashboardError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Missing file means defaults.
    pub fn load(&self) -> Result<DashboardConfig, DashboardError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "no config file; using defaults");
            Ok(DashboardConfig::default())
        }
    }

    pub fn save(&self, config: &DashboardConfig) -> Result<(), DashboardError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "dashboard config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Replaces `path` with `data` via a sibling temp file, so readers see either
/// the old or the new config. Missing parent directories are created.
fn write_atomic(path: &Path, data: &str) -> Result<(), DashboardError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: DashboardConfig =
            serde_json::from_str(r#"{"trend_months": 6, "grouping": "western"}"#).expect("parse");
        assert_eq!(cfg.trend_months, 6);
        assert_eq!(cfg.grouping, GroupingStyle::Western);
        assert_eq!(cfg.currency_symbol, "₹");
        assert_eq!(cfg.goal_preview_limit, 3);
        assert_eq!(cfg.breakdown_period, BreakdownPeriod::ThisMonth);
    }

    #[test]
    fn save_recreates_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("piggy");
        let manager = ConfigManager::with_base_dir(base.clone()).expect("manager");
        fs::remove_dir_all(&base).expect("remove base");

        manager.save(&DashboardConfig::default()).expect("save");
        assert!(manager.path().exists());
        assert!(!tmp_path(manager.path()).exists());
        assert_eq!(manager.load().expect("load"), DashboardConfig::default());
    }

    #[test]
    fn tmp_path_keeps_extension() {
        let path = PathBuf::from("/data/config.json");
        assert_eq!(tmp_path(&path), PathBuf::from("/data/config.json.tmp"));
    }
}
