use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::render::Locale;

pub const CONFIG_FILE: &str = "hamour.toml";

/// Runtime knobs read from `hamour.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default = "default_session_expiry_hours")]
    pub session_expiry_hours: i64,
}

fn default_db_path() -> String {
    String::from("website/db/hamour.db")
}

fn default_output_dir() -> String {
    String::from("website/public")
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_session_expiry_hours() -> i64 {
    24
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: default_db_path(),
            output_dir: default_output_dir(),
            locale: Locale::default(),
            bcrypt_cost: default_bcrypt_cost(),
            session_expiry_hours: default_session_expiry_hours(),
        }
    }
}

impl AppConfig {
    pub fn parse(text: &str) -> Result<AppConfig, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    /// Load from `path`. A missing file means defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<AppConfig, String> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).map_err(|e| format!("{}: {}", path.display(), e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(format!("{}: {}", path.display(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_given_keys() {
        let cfg = AppConfig::parse("locale = \"en\"\nbcrypt_cost = 6\n").unwrap();
        assert_eq!(cfg.locale, Locale::En);
        assert_eq!(cfg.bcrypt_cost, 6);
        assert_eq!(cfg.db_path, "website/db/hamour.db");
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::parse("locale = \"fr\"").is_err());
        assert!(AppConfig::parse("db_path = ").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }
}
