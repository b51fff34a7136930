//! Supervisor lifecycle states.

use std::fmt;

/// Where the supervisor is in its lifecycle.
///
/// `Initializing → CheckingDependencies → {ShuttingDown | Monitoring}`.
/// Both final states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Initializing,
    CheckingDependencies,
    ShuttingDown,
    Monitoring,
}

impl SupervisorState {
    /// Whether moving to `next` is a legal transition.
    pub fn can_transition_to(self, next: SupervisorState) -> bool {
        use SupervisorState::*;
        matches!(
            (self, next),
            (Initializing, CheckingDependencies)
                | (CheckingDependencies, ShuttingDown)
                | (CheckingDependencies, Monitoring)
        )
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupervisorState::Initializing => "initializing",
            SupervisorState::CheckingDependencies => "checking dependencies",
            SupervisorState::ShuttingDown => "shutting down",
            SupervisorState::Monitoring => "monitoring",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_forward_transitions_are_legal() {
        use SupervisorState::*;
        assert!(Initializing.can_transition_to(CheckingDependencies));
        assert!(CheckingDependencies.can_transition_to(Monitoring));
        assert!(CheckingDependencies.can_transition_to(ShuttingDown));
        assert!(!Initializing.can_transition_to(Monitoring));
        assert!(!Monitoring.can_transition_to(ShuttingDown));
        assert!(!ShuttingDown.can_transition_to(Monitoring));
    }
}
