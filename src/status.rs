// ABOUTME: Canonical interpretation of raw stack status strings.
// ABOUTME: A static lookup table maps remote statuses onto a small lifecycle state space.

use serde::Serialize;
use std::fmt;

/// Status reported for a stack that the control plane does not know about.
pub const NOT_FOUND_SENTINEL: &str = "DOESNT_EXIST";

const IN_PROGRESS_SUFFIX: &str = "_IN_PROGRESS";

/// The only stack state the orchestrator reasons over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalState {
    NotDeployed,
    InProgress,
    Succeeded,
    Failed,
    Unknown,
}

impl CanonicalState {
    /// No further progress is expected once a stack reaches a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, CanonicalState::Succeeded | CanonicalState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalState::NotDeployed => "not deployed",
            CanonicalState::InProgress => "in progress",
            CanonicalState::Succeeded => "succeeded",
            CanonicalState::Failed => "failed",
            CanonicalState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CanonicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusClass {
    Missing,
    Success,
    /// The stack is back in a known-good state but the requested change was reverted.
    RollbackComplete,
    Failure,
}

const STATUS_TABLE: &[(&str, StatusClass)] = &[
    (NOT_FOUND_SENTINEL, StatusClass::Missing),
    ("DELETE_COMPLETE", StatusClass::Missing),
    ("CREATE_COMPLETE", StatusClass::Success),
    ("UPDATE_COMPLETE", StatusClass::Success),
    ("ROLLBACK_COMPLETE", StatusClass::RollbackComplete),
    ("UPDATE_ROLLBACK_COMPLETE", StatusClass::RollbackComplete),
    ("CREATE_FAILED", StatusClass::Failure),
    ("DELETE_FAILED", StatusClass::Failure),
    ("UPDATE_ROLLBACK_FAILED", StatusClass::Failure),
    ("ROLLBACK_FAILED", StatusClass::Failure),
];

/// Maps raw control-plane statuses to [`CanonicalState`].
///
/// Whether a completed rollback counts as success is a deliberate setting:
/// the stack is consistent afterwards, but the change that was asked for did
/// not land. Callers that care about the difference must look at which
/// operation they submitted as well as the classified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusClassifier {
    rollback_complete_is_success: bool,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self {
            rollback_complete_is_success: true,
        }
    }
}

impl StatusClassifier {
    pub fn new(rollback_complete_is_success: bool) -> Self {
        Self {
            rollback_complete_is_success,
        }
    }

    pub fn rollback_complete_is_success(&self) -> bool {
        self.rollback_complete_is_success
    }

    /// Classify a raw status. `None` means the stack could not be found.
    pub fn classify(&self, raw: Option<&str>) -> CanonicalState {
        let Some(raw) = raw else {
            return CanonicalState::NotDeployed;
        };

        let class = STATUS_TABLE
            .iter()
            .find(|(status, _)| *status == raw)
            .map(|(_, class)| *class);

        match class {
            Some(StatusClass::Missing) => CanonicalState::NotDeployed,
            Some(StatusClass::Success) => CanonicalState::Succeeded,
            Some(StatusClass::RollbackComplete) if self.rollback_complete_is_success => {
                CanonicalState::Succeeded
            }
            Some(StatusClass::RollbackComplete) | Some(StatusClass::Failure) => {
                CanonicalState::Failed
            }
            None if raw.ends_with(IN_PROGRESS_SUFFIX) => CanonicalState::InProgress,
            None => CanonicalState::Unknown,
        }
    }

    /// Shorthand for `classify(raw).is_terminal()`.
    pub fn is_terminal(&self, raw: Option<&str>) -> bool {
        self.classify(raw).is_terminal()
    }
}
