// ABOUTME: Stack orchestration using the type state pattern.
// ABOUTME: Exports the Stack orchestrator, apply run states, requests and outcomes.

mod error;
mod report;
mod request;
mod run;
mod stack;
mod state;
mod strategy;
mod transitions;

pub use error::{StackError, StackErrorKind};
pub use report::StatusReport;
pub use request::{DeploymentOutcome, DeploymentRequest};
pub use run::Run;
pub use stack::Stack;
pub use state::{Decided, Done, Idle, Submitted, Validated};
pub use strategy::StackAction;
pub use transitions::StepResult;
