// ABOUTME: The name/region pair that addresses one stack.
// ABOUTME: Fixed for the lifetime of an orchestration run.

use std::fmt;

use super::{Region, StackName};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackIdentity {
    name: StackName,
    region: Region,
}

impl StackIdentity {
    pub fn new(name: StackName, region: Region) -> Self {
        Self { name, region }
    }

    pub fn name(&self) -> &StackName {
        &self.name
    }

    pub fn region(&self) -> &Region {
        &self.region
    }
}

impl fmt::Display for StackIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.region)
    }
}
