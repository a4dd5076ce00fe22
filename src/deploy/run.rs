// ABOUTME: One apply call, parameterized by its orchestration state.
// ABOUTME: State types carry their own data for compile-time guarantees.

use chrono::{DateTime, Utc};

use super::request::{DeploymentOutcome, DeploymentRequest};
use super::stack::Stack;
use super::state::{Decided, Done, Idle, Submitted};
use super::strategy::StackAction;

/// An apply in progress, parameterized by its current state.
///
/// The run borrows the stack and the request for its whole life, so neither
/// can change between validation and submission.
pub struct Run<'a, C, S> {
    pub(crate) stack: &'a Stack<C>,
    pub(crate) request: &'a DeploymentRequest,
    pub(crate) state: S,
}

impl<'a, C> Run<'a, C, Idle> {
    pub fn new(stack: &'a Stack<C>, request: &'a DeploymentRequest) -> Self {
        Run {
            stack,
            request,
            state: Idle,
        }
    }
}

impl<'a, C, S> Run<'a, C, S> {
    /// Move to the next state.
    pub(crate) fn transition<T>(self, state: T) -> Run<'a, C, T> {
        Run {
            stack: self.stack,
            request: self.request,
            state,
        }
    }

    /// End the run early with an outcome.
    pub(crate) fn finish(self, outcome: DeploymentOutcome) -> Run<'a, C, Done> {
        self.transition(Done { outcome })
    }
}

impl<C> Run<'_, C, Decided> {
    pub fn action(&self) -> StackAction {
        self.state.action
    }
}

impl<C> Run<'_, C, Submitted> {
    pub fn action(&self) -> StackAction {
        self.state.action
    }

    /// Instant captured just before submission; earlier events are ignored.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.state.cursor.since()
    }
}

impl<C> Run<'_, C, Done> {
    pub fn outcome(&self) -> DeploymentOutcome {
        self.state.outcome
    }
}
