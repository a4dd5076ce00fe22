// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;
mod identity;
mod region;
mod stack_name;

pub use id::{EventId, Id, PhysicalResourceId};
pub use identity::StackIdentity;
pub use region::{Region, RegionError};
pub use stack_name::{StackName, StackNameError};
