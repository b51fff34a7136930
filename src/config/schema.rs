//! Configuration types.

/// Threshold used when `tps-alert-threshold` is absent or not a number.
pub const DEFAULT_TPS_ALERT_THRESHOLD: f64 = 15.0;

/// Key holding the alert threshold.
pub const THRESHOLD_KEY: &str = "tps-alert-threshold";

/// Key holding the module-name to required-flag mapping.
pub const REQUIRED_MODULES_KEY: &str = "required-plugins";

/// A module declared in the config, with its required flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredModule {
    pub name: String,
    pub required: bool,
}

impl RequiredModule {
    pub fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }
}

/// Sentinel configuration, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Samples at or below this value raise a `tps_alert`.
    pub tps_alert_threshold: f64,

    /// Declared modules in file order.
    pub required_modules: Vec<RequiredModule>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tps_alert_threshold: DEFAULT_TPS_ALERT_THRESHOLD,
            required_modules: Vec::new(),
        }
    }
}

impl Configuration {
    /// Names of modules whose flag is `true`, in declaration order.
    pub fn enforced_modules(&self) -> impl Iterator<Item = &str> {
        self.required_modules
            .iter()
            .filter(|m| m.required)
            .map(|m| m.name.as_str())
    }
}
