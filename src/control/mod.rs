// ABOUTME: Boundary to the remote stack control plane.
// ABOUTME: Defines the StackControl trait, its request/response types and an HTTP binding.

mod error;
mod http;
mod stack_control;
mod types;

pub use error::{ControlError, NO_UPDATES_MESSAGE};
pub use http::HttpControl;
pub use stack_control::StackControl;
pub use types::{CreateOptions, Parameter, StackDescription, StackOutput, Tag, UpdateOptions};
