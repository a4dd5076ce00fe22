// ABOUTME: Orchestration state marker types for the type state pattern.
// ABOUTME: Each marker carries the data that exists once the run has reached it.

use super::request::DeploymentOutcome;
use super::strategy::StackAction;
use crate::events::EventCursor;

/// Initial state: request built, nothing sent yet.
/// Available actions: `validate()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

/// Template accepted by the control plane.
/// Available actions: `decide()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Validated;

/// Create or update chosen.
/// Available actions: `submit()`
#[derive(Debug, Clone, Copy)]
pub struct Decided {
    pub(crate) action: StackAction,
}

/// Operation accepted; progress is observed through the cursor.
/// Available actions: `wait()`
#[derive(Debug)]
pub struct Submitted {
    pub(crate) action: StackAction,
    pub(crate) cursor: EventCursor,
}

/// Terminal state.
/// Available actions: `outcome()`
#[derive(Debug, Clone, Copy)]
pub struct Done {
    pub(crate) outcome: DeploymentOutcome,
}
