//! Startup dependency check.
//!
//! The check is all-or-nothing: every enforced module is evaluated, and a
//! single absent one fails the whole check.

use crate::config::RequiredModule;
use crate::error::{Result, SentinelError};
use crate::host::ModuleRegistry;

/// Outcome of a dependency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// `false` iff `missing` is non-empty.
    pub ok: bool,

    /// Required-but-absent modules in declaration order.
    pub missing: Vec<String>,
}

impl CheckResult {
    fn from_missing(missing: Vec<String>) -> Self {
        Self {
            ok: missing.is_empty(),
            missing,
        }
    }

    /// Missing names joined with `,`, no trailing separator.
    pub fn payload(&self) -> String {
        self.missing.join(",")
    }

    /// Convert into a `Result`, failing with `MissingRequiredModules`.
    pub fn into_result(self) -> Result<()> {
        if self.ok {
            Ok(())
        } else {
            Err(SentinelError::MissingRequiredModules {
                missing: self.missing,
            })
        }
    }
}

/// Checks declared modules against the host's registry.
pub struct DependencyChecker<'a> {
    registry: &'a dyn ModuleRegistry,
}

impl<'a> DependencyChecker<'a> {
    pub fn new(registry: &'a dyn ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate every declared module before deciding.
    ///
    /// Entries flagged `false` are skipped whether or not they are loaded.
    pub fn check(&self, modules: &[RequiredModule]) -> CheckResult {
        let mut missing = Vec::new();

        for module in modules.iter().filter(|m| m.required) {
            if self.registry.is_loaded(&module.name) {
                tracing::info!(
                    "Required module: {} has successfully loaded on the server.",
                    module.name
                );
            } else {
                tracing::error!(
                    "Required module: {} is not loaded on the server!",
                    module.name
                );
                missing.push(module.name.clone());
            }
        }

        CheckResult::from_missing(missing)
    }
}
