// ABOUTME: Point-in-time status summary of a stack.
// ABOUTME: Carries the raw status next to its canonical state for text and JSON output.

use serde::Serialize;

use crate::status::CanonicalState;
use crate::types::StackName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    #[serde(serialize_with = "serialize_stack_name")]
    pub stack: StackName,
    pub state: CanonicalState,
    /// Raw status; `None` when the stack does not exist.
    pub status: Option<String>,
    pub reason: Option<String>,
}

fn serialize_stack_name<S: serde::Serializer>(
    name: &StackName,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(name.as_str())
}
