// ABOUTME: Command module aggregator for the cloudformer CLI.
// ABOUTME: Re-exports apply, delete and inspection command handlers.

mod apply;
mod connection;
mod delete;
mod inspect;

pub use apply::apply;
pub use delete::delete;
pub use inspect::{events, outputs, status, validate};
