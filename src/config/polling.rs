// ABOUTME: Timing of the progress polling loop.
// ABOUTME: Poll interval, post-create settle delay and an optional overall deadline.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PollSettings {
    /// Pause before each poll of the event log and status.
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Pause after a create is accepted, before polling starts.
    #[serde(default = "default_settle_delay", with = "humantime_serde")]
    pub settle_delay: Duration,

    /// Give up waiting after this long. Unbounded when unset.
    #[serde(default, with = "humantime_serde")]
    pub deadline: Option<Duration>,
}

fn default_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_settle_delay() -> Duration {
    Duration::from_secs(10)
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings {
            interval: default_interval(),
            settle_delay: default_settle_delay(),
            deadline: None,
        }
    }
}

impl PollSettings {
    /// No waiting at all. Useful against in-process control planes.
    pub fn immediate() -> Self {
        PollSettings {
            interval: Duration::ZERO,
            settle_delay: Duration::ZERO,
            deadline: None,
        }
    }
}
