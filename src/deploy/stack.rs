// ABOUTME: The orchestrator for one stack identity: apply, delete and status queries.
// ABOUTME: Owns the control plane handle and the polling loop shared by apply and delete.

use chrono::Utc;
use snafu::ResultExt;
use tokio::time::Instant;

use crate::config::{Config, PollSettings};
use crate::control::{ControlError, StackControl, StackDescription, StackOutput};
use crate::events::{self, EventCursor, StackEvent};
use crate::output::ProgressSink;
use crate::status::{CanonicalState, StatusClassifier};
use crate::types::StackIdentity;

use super::error::{DeadlineSnafu, EventQuerySnafu, StackError};
use super::report::StatusReport;
use super::request::{DeploymentOutcome, DeploymentRequest};
use super::run::Run;

/// When the polling loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Until {
    /// Succeeded or Failed.
    Terminal,
    /// Terminal, or the stack is gone (a finished delete).
    TerminalOrGone,
}

impl Until {
    fn reached(self, state: CanonicalState) -> bool {
        match self {
            Until::Terminal => state.is_terminal(),
            Until::TerminalOrGone => state.is_terminal() || state == CanonicalState::NotDeployed,
        }
    }
}

/// Manages the lifecycle of one stack through a control plane.
///
/// Holds no state between calls: every `apply` or `delete` starts a fresh
/// event cursor.
pub struct Stack<C> {
    identity: StackIdentity,
    control: C,
    classifier: StatusClassifier,
    polling: PollSettings,
}

impl<C> std::fmt::Debug for Stack<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("identity", &self.identity)
            .field("classifier", &self.classifier)
            .field("polling", &self.polling)
            .finish()
    }
}

impl<C> Stack<C> {
    /// Create an orchestrator with default classification and polling.
    pub fn new(identity: StackIdentity, control: C) -> Self {
        Self {
            identity,
            control,
            classifier: StatusClassifier::default(),
            polling: PollSettings::default(),
        }
    }

    /// Create an orchestrator for the stack described by `config`.
    pub fn from_config(config: &Config, control: C) -> Self {
        Self::new(config.identity(), control)
            .classifier(config.classifier())
            .polling(config.polling)
    }

    /// Set how raw statuses are classified.
    pub fn classifier(mut self, classifier: StatusClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set polling timings.
    pub fn polling(mut self, polling: PollSettings) -> Self {
        self.polling = polling;
        self
    }

    pub fn identity(&self) -> &StackIdentity {
        &self.identity
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn polling_settings(&self) -> &PollSettings {
        &self.polling
    }
}

impl<C: StackControl> Stack<C> {
    /// Describe the stack, with a missing stack as `None`.
    async fn describe(&self) -> Result<Option<StackDescription>, StackError> {
        match self.control.describe_stack(&self.identity).await {
            Ok(description) => Ok(Some(description)),
            Err(ControlError::NotFound(_)) => Ok(None),
            Err(source) => Err(StackError::StatusQuery {
                stack: self.identity.to_string(),
                source,
            }),
        }
    }

    /// Current canonical state. A missing stack is `NotDeployed`, not an error.
    pub async fn state(&self) -> Result<CanonicalState, StackError> {
        let description = self.describe().await?;
        Ok(self
            .classifier
            .classify(description.as_ref().map(|d| d.status.as_str())))
    }

    pub async fn status_report(&self) -> Result<StatusReport, StackError> {
        let description = self.describe().await?;
        let state = self
            .classifier
            .classify(description.as_ref().map(|d| d.status.as_str()));

        let (status, reason) = match description {
            Some(d) => (Some(d.status), d.status_reason),
            None => (None, None),
        };

        Ok(StatusReport {
            stack: self.identity.name().clone(),
            state,
            status,
            reason,
        })
    }

    /// Send the status report to `sink` and return it.
    pub async fn emit_status<S: ProgressSink + ?Sized>(
        &self,
        sink: &S,
    ) -> Result<StatusReport, StackError> {
        let report = self.status_report().await?;
        sink.status(&report);
        Ok(report)
    }

    /// Declared outputs of the stack.
    ///
    /// # Errors
    ///
    /// Returns `StackError::NotDeployed` if the stack does not exist.
    pub async fn outputs(&self) -> Result<Vec<StackOutput>, StackError> {
        let description = self.describe().await?;
        let exists = description.as_ref().is_some_and(|d| {
            self.classifier.classify(Some(d.status.as_str())) != CanonicalState::NotDeployed
        });

        match description {
            Some(d) if exists => Ok(d.outputs),
            _ => Err(self.not_deployed()),
        }
    }

    /// Send the stack's outputs to `sink` and return them.
    pub async fn emit_outputs<S: ProgressSink + ?Sized>(
        &self,
        sink: &S,
    ) -> Result<Vec<StackOutput>, StackError> {
        let outputs = self.outputs().await?;
        sink.outputs(self.identity.name(), &outputs);
        Ok(outputs)
    }

    /// The complete event log, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StackError::NotDeployed` if the stack does not exist.
    pub async fn event_history(&self) -> Result<Vec<StackEvent>, StackError> {
        if self.state().await? == CanonicalState::NotDeployed {
            return Err(self.not_deployed());
        }

        match self.control.list_events(&self.identity).await {
            Ok(log) => Ok(events::chronological(log)),
            Err(ControlError::NotFound(_)) => Err(self.not_deployed()),
            Err(source) => Err(StackError::EventQuery {
                stack: self.identity.to_string(),
                source,
            }),
        }
    }

    /// Create or update the stack from `request` and wait for the result.
    ///
    /// Rejections by the control plane are outcomes, not errors: a rejected
    /// template or submission gives `Failed`, an update that changes nothing
    /// gives `NoUpdates`.
    ///
    /// # Errors
    ///
    /// Returns an error if a status or event query fails, or the polling
    /// deadline passes.
    pub async fn apply<S: ProgressSink + ?Sized>(
        &self,
        request: &DeploymentRequest,
        sink: &S,
    ) -> Result<DeploymentOutcome, StackError> {
        sink.progress(&format!(
            "Validating {} for {}",
            request.template.describe(),
            self.identity
        ));
        let run = match Run::new(self, request).validate().await {
            Ok(run) => run,
            Err(done) => {
                sink.progress("Template failed validation");
                return Ok(done.outcome());
            }
        };

        let run = run.decide().await?;
        sink.progress(&format!(
            "Attempting to {} stack - {}",
            run.action(),
            self.identity.name()
        ));

        let run = match run.submit().await {
            Ok(run) => run,
            Err(done) => return Ok(done.outcome()),
        };

        let done = run.wait(sink).await?;
        tracing::info!(stack = %self.identity, outcome = %done.outcome(), "Apply finished");
        Ok(done.outcome())
    }

    /// Delete the stack and wait until it is gone or the delete fails.
    ///
    /// Returns `false` if the delete was rejected or ended in a failed state.
    ///
    /// # Errors
    ///
    /// Returns an error if a status or event query fails, or the polling
    /// deadline passes.
    pub async fn delete<S: ProgressSink + ?Sized>(&self, sink: &S) -> Result<bool, StackError> {
        sink.progress(&format!(
            "Attempting to delete stack - {}",
            self.identity.name()
        ));
        let cursor = EventCursor::starting_at(Utc::now());

        if let Err(e) = self.control.delete_stack(&self.identity).await {
            tracing::warn!(stack = %self.identity, "Delete rejected: {}", e);
            return Ok(false);
        }
        tracing::info!(stack = %self.identity, "Submitted stack delete");

        let state = self.watch(cursor, sink, Until::TerminalOrGone).await?;
        Ok(state != CanonicalState::Failed)
    }

    /// Poll until `until` is reached, reporting each new event once, in order.
    pub(crate) async fn watch<S: ProgressSink + ?Sized>(
        &self,
        mut cursor: EventCursor,
        sink: &S,
        until: Until,
    ) -> Result<CanonicalState, StackError> {
        let started = Instant::now();

        loop {
            if !self.polling.interval.is_zero() {
                tokio::time::sleep(self.polling.interval).await;
            }

            let fresh = cursor
                .poll(&self.control, &self.identity)
                .await
                .context(EventQuerySnafu {
                    stack: self.identity.to_string(),
                })?;
            for event in &fresh {
                sink.stack_event(event);
            }

            let state = self.state().await?;
            tracing::debug!(
                stack = %self.identity,
                %state,
                new_events = fresh.len(),
                seen = cursor.seen_count(),
                "Polled stack"
            );

            if until.reached(state) {
                return Ok(state);
            }

            if let Some(deadline) = self.polling.deadline
                && started.elapsed() >= deadline
            {
                return DeadlineSnafu {
                    stack: self.identity.to_string(),
                    elapsed: started.elapsed(),
                }
                .fail();
            }
        }
    }

    fn not_deployed(&self) -> StackError {
        StackError::NotDeployed {
            stack: self.identity.to_string(),
        }
    }
}
