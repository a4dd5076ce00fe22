// ABOUTME: Create-versus-update selection from the stack's current state.
// ABOUTME: Only a stack that does not exist is created; everything else is updated.

use std::fmt;

use crate::status::CanonicalState;

/// Which submission an apply makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackAction {
    Create,
    Update,
}

impl StackAction {
    /// Pick the action for a stack in `state`.
    ///
    /// Stacks that are mid-operation or failed are still updated; whether
    /// that is allowed is up to the control plane, whose rejection surfaces
    /// as a failed submission.
    pub fn for_state(state: CanonicalState) -> Self {
        match state {
            CanonicalState::NotDeployed => StackAction::Create,
            CanonicalState::InProgress
            | CanonicalState::Succeeded
            | CanonicalState::Failed
            | CanonicalState::Unknown => StackAction::Update,
        }
    }
}

impl fmt::Display for StackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackAction::Create => f.write_str("create"),
            StackAction::Update => f.write_str("update"),
        }
    }
}
