use std::error::Error;
use std::fs;
use std::path::Path;

use acct_key::KeyConfig;
use serde::{Deserialize, Serialize};

/// TOML settings for the `acct` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliSettings {
    /// Derivation settings, read from the top level of the file.
    #[serde(flatten)]
    pub key: KeyConfig,
    /// Worker threads for batch processing; zero selects the rayon default.
    #[serde(default)]
    pub threads: usize,
    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            key: KeyConfig::default(),
            threads: 0,
            log_level: default_log_level(),
        }
    }
}

/// Loads TOML settings, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CliSettings, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(CliSettings::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;
    let settings: CliSettings = toml::from_str(&text)
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acct_key::DuplicatePolicy;

    #[test]
    fn missing_path_yields_defaults() {
        assert_eq!(load_config(None).expect("defaults"), CliSettings::default());
    }

    #[test]
    fn flat_toml_fills_key_and_cli_settings() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("acct.toml");
        fs::write(
            &path,
            "algorithm = \"siphash-128\"\nduplicates = \"reject\"\nthreads = 4\n",
        )
        .expect("write config");
        let settings = load_config(Some(&path)).expect("config");
        assert_eq!(settings.key.algorithm, "siphash-128");
        assert_eq!(settings.key.duplicates, DuplicatePolicy::Reject);
        assert_eq!(settings.threads, 4);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn malformed_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("acct.toml");
        fs::write(&path, "duplicates = \"sometimes\"\n").expect("write config");
        assert!(load_config(Some(&path)).is_err());
        fs::write(&path, "threads = \"many\"\n").expect("write config");
        assert!(load_config(Some(&path)).is_err());
    }
}
