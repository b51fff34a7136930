//! Configuration file loading.
//!
//! A missing file is replaced by the bundled template. A file that cannot be
//! parsed degrades to an empty module list with the default threshold. Only
//! failure to create the file is fatal.

use crate::config::schema::{
    Configuration, RequiredModule, DEFAULT_TPS_ALERT_THRESHOLD, REQUIRED_MODULES_KEY,
    THRESHOLD_KEY,
};
use crate::config::template::materialize_default;
use crate::error::{Result, SentinelError};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Load the sentinel configuration from `path`.
///
/// # Errors
///
/// Returns `ConfigCreation` if the file is missing and the bundled template
/// cannot be written. Parse failures are logged and yield
/// [`Configuration::default`].
pub fn load(path: &Path) -> Result<Configuration> {
    if !path.exists() {
        materialize_default(path)?;
    }

    match load_config_value(path) {
        Ok(value) => Ok(from_value(&value)),
        Err(e) => {
            tracing::error!("Unable to load config file! {}", e);
            Ok(Configuration::default())
        }
    }
}

/// Load a config file as a raw YAML value.
///
/// # Errors
///
/// Returns `ConfigParse` if the file cannot be read or is not valid YAML.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| SentinelError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_config_value(&content, path)
}

/// Parse YAML content into a raw value.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config_value(content: &str, source_path: &Path) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| SentinelError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse YAML content straight into a [`Configuration`].
pub fn parse_config(content: &str, source_path: &Path) -> Result<Configuration> {
    parse_config_value(content, source_path).map(|value| from_value(&value))
}

/// Extract a [`Configuration`] from a parsed YAML document.
///
/// Unknown keys are ignored. A non-numeric threshold falls back to the
/// default, and a non-boolean module flag counts as `false`.
pub fn from_value(value: &Value) -> Configuration {
    let tps_alert_threshold = value
        .get(THRESHOLD_KEY)
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_TPS_ALERT_THRESHOLD);

    let required_modules = match value.get(REQUIRED_MODULES_KEY).and_then(Value::as_mapping) {
        Some(section) => section
            .iter()
            .filter_map(|(key, flag)| {
                let name = key_to_string(key)?;
                Some(RequiredModule::new(name, flag.as_bool().unwrap_or(false)))
            })
            .collect(),
        None => {
            tracing::error!(
                "Unable to find path {} in config file!",
                REQUIRED_MODULES_KEY
            );
            Vec::new()
        }
    };

    Configuration {
        tps_alert_threshold,
        required_modules,
    }
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
