// ABOUTME: Stack control plane operations trait.
// ABOUTME: Validate, create, update, delete, describe and list events for one stack.

use async_trait::async_trait;

use super::error::ControlError;
use super::types::{CreateOptions, StackDescription, UpdateOptions};
use crate::events::StackEvent;
use crate::template::TemplateSource;
use crate::types::StackIdentity;

/// Remote operations the orchestrator consumes.
///
/// Every call completes when the control plane has accepted or rejected the
/// request; progress of the accepted operation is observed through
/// [`describe_stack`](StackControl::describe_stack) and
/// [`list_events`](StackControl::list_events).
#[async_trait]
pub trait StackControl: Send + Sync {
    /// Ask the control plane to check a template.
    async fn validate_template(&self, template: &TemplateSource) -> Result<(), ControlError>;

    /// Submit creation of a new stack.
    async fn create_stack(
        &self,
        stack: &StackIdentity,
        options: &CreateOptions,
    ) -> Result<(), ControlError>;

    /// Submit an update of an existing stack.
    async fn update_stack(
        &self,
        stack: &StackIdentity,
        options: &UpdateOptions,
    ) -> Result<(), ControlError>;

    /// Submit deletion of a stack.
    async fn delete_stack(&self, stack: &StackIdentity) -> Result<(), ControlError>;

    /// Current status, status reason and outputs. `NotFound` if the stack does not exist.
    async fn describe_stack(&self, stack: &StackIdentity)
    -> Result<StackDescription, ControlError>;

    /// The complete event log, in no particular order.
    async fn list_events(&self, stack: &StackIdentity) -> Result<Vec<StackEvent>, ControlError>;
}
