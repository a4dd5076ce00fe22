// ABOUTME: State transition methods for an apply run.
// ABOUTME: Each method consumes self and returns the next state, or Done when the run ends early.

use chrono::Utc;

use crate::control::StackControl;
use crate::events::EventCursor;
use crate::output::ProgressSink;
use crate::status::CanonicalState;

use super::error::StackError;
use super::request::DeploymentOutcome;
use super::run::Run;
use super::stack::Until;
use super::state::{Decided, Done, Idle, Submitted, Validated};
use super::strategy::StackAction;

/// Result of a step that can end the run without an error.
pub type StepResult<'a, C, T> = Result<Run<'a, C, T>, Run<'a, C, Done>>;

// =============================================================================
// Idle -> Validated
// =============================================================================

impl<'a, C: StackControl> Run<'a, C, Idle> {
    /// Have the control plane check the template.
    ///
    /// A rejected template ends the run as `Failed`; nothing is submitted.
    pub async fn validate(self) -> StepResult<'a, C, Validated> {
        let (target, request) = (self.stack, self.request);
        let stack = target.identity();
        let result = target.control().validate_template(&request.template).await;

        match result {
            Ok(()) => {
                tracing::debug!(%stack, "Template is valid");
                Ok(self.transition(Validated))
            }
            Err(e) => {
                tracing::warn!(%stack, "Template rejected: {}", e);
                Err(self.finish(DeploymentOutcome::Failed))
            }
        }
    }
}

// =============================================================================
// Validated -> Decided
// =============================================================================

impl<'a, C: StackControl> Run<'a, C, Validated> {
    /// Choose between create and update from the stack's current state.
    ///
    /// # Errors
    ///
    /// Returns `StackError::StatusQuery` if the status query fails.
    pub async fn decide(self) -> Result<Run<'a, C, Decided>, StackError> {
        let target = self.stack;
        let state = target.state().await?;
        let action = StackAction::for_state(state);
        tracing::info!(stack = %target.identity(), %state, %action, "Chose stack action");
        Ok(self.transition(Decided { action }))
    }
}

// =============================================================================
// Decided -> Submitted
// =============================================================================

impl<'a, C: StackControl> Run<'a, C, Decided> {
    /// Submit the create or update.
    ///
    /// "No updates are to be performed." ends the run as `NoUpdates`; any
    /// other rejection ends it as `Failed`. Nothing is retried.
    pub async fn submit(self) -> StepResult<'a, C, Submitted> {
        let (target, request) = (self.stack, self.request);
        let action = self.state.action;
        let control = target.control();
        let stack = target.identity();
        let cursor = EventCursor::starting_at(Utc::now());

        let result = match action {
            StackAction::Create => control.create_stack(stack, &request.create_options()).await,
            StackAction::Update => control.update_stack(stack, &request.update_options()).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(%stack, %action, "Submitted stack operation");
                if action == StackAction::Create {
                    // Give the control plane time to register the new stack
                    let settle = target.polling_settings().settle_delay;
                    if !settle.is_zero() {
                        tokio::time::sleep(settle).await;
                    }
                }
                Ok(self.transition(Submitted { action, cursor }))
            }
            Err(e) if e.is_no_updates() => {
                tracing::info!(%stack, "No updates are to be performed");
                Err(self.finish(DeploymentOutcome::NoUpdates))
            }
            Err(e) => {
                tracing::warn!(%stack, %action, "Submission rejected: {}", e);
                Err(self.finish(DeploymentOutcome::Failed))
            }
        }
    }
}

// =============================================================================
// Submitted -> Done
// =============================================================================

impl<'a, C: StackControl> Run<'a, C, Submitted> {
    /// Report progress until the stack reaches a terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error if a status or event query fails, or the configured
    /// deadline passes first.
    pub async fn wait<S: ProgressSink + ?Sized>(
        self,
        sink: &S,
    ) -> Result<Run<'a, C, Done>, StackError> {
        let Run {
            stack,
            request,
            state: Submitted { cursor, .. },
        } = self;

        let state = stack.watch(cursor, sink, Until::Terminal).await?;
        let outcome = if state == CanonicalState::Succeeded {
            DeploymentOutcome::Succeeded
        } else {
            DeploymentOutcome::Failed
        };

        Ok(Run {
            stack,
            request,
            state: Done { outcome },
        })
    }
}
