// ABOUTME: The deployment request handed to one apply call, and its outcome.
// ABOUTME: Splits into create or update options, which carry different field sets.

use serde::Serialize;
use std::fmt;

use crate::control::{CreateOptions, Parameter, Tag, UpdateOptions};
use crate::template::TemplateSource;

/// Everything needed to create or update a stack. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub template: TemplateSource,
    pub parameters: Vec<Parameter>,
    pub capabilities: Vec<String>,
    pub disable_rollback: bool,
    pub notification_arns: Vec<String>,
    pub tags: Vec<Tag>,
}

impl DeploymentRequest {
    /// A request with no parameters, capabilities, notifications or tags.
    pub fn new(template: TemplateSource) -> Self {
        Self {
            template,
            parameters: vec![],
            capabilities: vec![],
            disable_rollback: false,
            notification_arns: vec![],
            tags: vec![],
        }
    }

    pub fn create_options(&self) -> CreateOptions {
        CreateOptions {
            template: self.template.clone(),
            parameters: self.parameters.clone(),
            capabilities: self.capabilities.clone(),
            disable_rollback: self.disable_rollback,
            notification_arns: self.notification_arns.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn update_options(&self) -> UpdateOptions {
        UpdateOptions {
            template: self.template.clone(),
            parameters: self.parameters.clone(),
            capabilities: self.capabilities.clone(),
        }
    }
}

/// Final result of one apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentOutcome {
    Succeeded,
    Failed,
    /// The stack already matches the template; nothing was submitted.
    NoUpdates,
}

impl DeploymentOutcome {
    /// Succeeded and NoUpdates both leave the stack as requested.
    pub fn is_success(self) -> bool {
        !matches!(self, DeploymentOutcome::Failed)
    }
}

impl fmt::Display for DeploymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeploymentOutcome::Succeeded => "succeeded",
            DeploymentOutcome::Failed => "failed",
            DeploymentOutcome::NoUpdates => "no updates",
        };
        f.write_str(s)
    }
}
