//! Teller configuration
//!
//! The obfuscation key and banned-PIN extensions are configuration, not
//! language-level literals, so deployments can swap them without a
//! rebuild.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use coffer_core::{DEFAULT_OBFUSCATION_KEY, DEFAULT_OPENING_BALANCE_CENTS, MAX_WRONG_ATTEMPTS};

use crate::error::Result;

/// Teller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TellerConfig {
    /// Path to the account store file
    pub data_path: PathBuf,

    /// Key for the at-rest XOR obfuscation of records
    pub obfuscation_key: String,

    /// Consecutive wrong PINs before an account locks
    pub max_wrong_attempts: u32,

    /// Opening balance for new accounts, in cents
    pub opening_balance_cents: u64,

    /// Banned PINs on top of the built-in list
    pub extra_banned_pins: Vec<String>,
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            data_path: Self::default_data_path(),
            obfuscation_key: String::from_utf8_lossy(DEFAULT_OBFUSCATION_KEY).into_owned(),
            max_wrong_attempts: MAX_WRONG_ATTEMPTS,
            opening_balance_cents: DEFAULT_OPENING_BALANCE_CENTS,
            extra_banned_pins: Vec::new(),
        }
    }
}

impl TellerConfig {
    /// Get the default account store path
    pub fn default_data_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coffer")
            .join("accounts.db")
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = TellerConfig::default();
        assert_eq!(config.max_wrong_attempts, 3);
        assert_eq!(config.opening_balance_cents, 100_000);
        assert!(config.extra_banned_pins.is_empty());
        assert!(!config.obfuscation_key.is_empty());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("teller.json");

        let mut config = TellerConfig::default();
        config.max_wrong_attempts = 5;
        config.extra_banned_pins.push("8888".into());
        config.save(&path).unwrap();

        let loaded = TellerConfig::load(&path).unwrap();
        assert_eq!(loaded.max_wrong_attempts, 5);
        assert_eq!(loaded.extra_banned_pins, vec!["8888".to_string()]);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(TellerConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
