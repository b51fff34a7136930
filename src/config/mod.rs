//! Configuration loading and defaults.
//!
//! - Schema types in [`schema`]
//! - File loading and lenient parsing in [`loader`]
//! - The bundled default template in [`template`]
//!
//! # Example
//!
//! ```
//! use server_sentinel::config::load;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "tps-alert-threshold: 17\nrequired-plugins:\n  Essentials: true\n").unwrap();
//!
//! let config = load(&path).unwrap();
//! assert_eq!(config.tps_alert_threshold, 17.0);
//! assert_eq!(config.enforced_modules().collect::<Vec<_>>(), vec!["Essentials"]);
//! ```

pub mod loader;
pub mod schema;
pub mod template;

pub use loader::{from_value, load, load_config_value, parse_config, parse_config_value};
pub use schema::{
    Configuration, RequiredModule, DEFAULT_TPS_ALERT_THRESHOLD, REQUIRED_MODULES_KEY,
    THRESHOLD_KEY,
};
pub use template::{default_config_bytes, materialize_default, CONFIG_FILE_NAME};
