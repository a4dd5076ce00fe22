// ABOUTME: Error types for stack orchestration.
// ABOUTME: SNAFU context selectors for failed queries, missing stacks and expired deadlines.

use snafu::Snafu;
use std::time::Duration;

use crate::control::ControlError;

/// Errors that interrupt an orchestration call.
///
/// Rejected submissions are not errors: they end `apply` with a
/// [`DeploymentOutcome`](super::DeploymentOutcome) instead.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StackError {
    #[snafu(display("failed to query status of {stack}: {source}"))]
    StatusQuery { stack: String, source: ControlError },

    #[snafu(display("failed to read events of {stack}: {source}"))]
    EventQuery { stack: String, source: ControlError },

    #[snafu(display("stack {stack} is not deployed"))]
    NotDeployed { stack: String },

    #[snafu(display(
        "{stack} did not reach a terminal state within {}s",
        elapsed.as_secs()
    ))]
    Deadline { stack: String, elapsed: Duration },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackErrorKind {
    /// A status or event query failed (network blip, throttling, ...).
    QueryFailed,
    /// The operation needs an existing stack.
    NotDeployed,
    /// Polling gave up before a terminal state.
    DeadlineExceeded,
}

impl StackError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> StackErrorKind {
        match self {
            StackError::StatusQuery { .. } | StackError::EventQuery { .. } => {
                StackErrorKind::QueryFailed
            }
            StackError::NotDeployed { .. } => StackErrorKind::NotDeployed,
            StackError::Deadline { .. } => StackErrorKind::DeadlineExceeded,
        }
    }

    /// The control plane error behind a failed query, if any.
    pub fn control_error(&self) -> Option<&ControlError> {
        match self {
            StackError::StatusQuery { source, .. } | StackError::EventQuery { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
