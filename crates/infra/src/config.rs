//! Process configuration from environment variables.

use std::path::PathBuf;

use tracing::warn;

use kiosk_library::DEFAULT_LOAN_DAYS;

pub const DATA_FILE_VAR: &str = "KIOSK_DATA_FILE";
pub const ASSETS_DIR_VAR: &str = "KIOSK_ASSETS_DIR";
pub const LOAN_DAYS_VAR: &str = "KIOSK_LOAN_DAYS";

const DEFAULT_DATA_FILE: &str = "library_data.json";
const DEFAULT_ASSETS_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    /// JSON document holding books and loans.
    pub data_file: PathBuf,
    /// Directory that item images are copied into and resolved from.
    pub assets_dir: PathBuf,
    pub loan_days: u64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            loan_days: DEFAULT_LOAN_DAYS,
        }
    }
}

impl KioskConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let loan_days = match get(LOAN_DAYS_VAR) {
            None => defaults.loan_days,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(days) if days > 0 => days,
                _ => {
                    warn!(
                        var = LOAN_DAYS_VAR,
                        value = %raw,
                        default = defaults.loan_days,
                        "invalid loan period; using default"
                    );
                    defaults.loan_days
                }
            },
        };

        Self {
            data_file: get(DATA_FILE_VAR).map(PathBuf::from).unwrap_or(defaults.data_file),
            assets_dir: get(ASSETS_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.assets_dir),
            loan_days,
        }
    }
}
