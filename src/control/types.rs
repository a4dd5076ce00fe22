// ABOUTME: Request and response types shared by StackControl implementations.
// ABOUTME: Create carries the full option set; update only parameters and capabilities.

use serde::{Deserialize, Serialize};

use crate::template::TemplateSource;

/// A template parameter. Order within a request is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Options for creating a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOptions {
    #[serde(flatten)]
    pub template: TemplateSource,
    pub parameters: Vec<Parameter>,
    pub capabilities: Vec<String>,
    pub disable_rollback: bool,
    pub notification_arns: Vec<String>,
    pub tags: Vec<Tag>,
}

/// Options for updating a stack. Tags and notification targets are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOptions {
    #[serde(flatten)]
    pub template: TemplateSource,
    pub parameters: Vec<Parameter>,
    pub capabilities: Vec<String>,
}

/// Current description of an existing stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDescription {
    pub status: String,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub outputs: Vec<StackOutput>,
}

/// A value declared in the template's outputs section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackOutput {
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value: String,
}
