// ABOUTME: Stack event records and the exactly-once filter over repeated log snapshots.
// ABOUTME: Each poll re-reads the whole event log; only unseen, current events come out, oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::control::{ControlError, StackControl};
use crate::types::{EventId, PhysicalResourceId, StackIdentity};

/// One entry of a stack's event log. Never mutated once observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEvent {
    pub event_id: EventId,
    pub timestamp: DateTime<Utc>,
    pub logical_resource_id: String,
    /// Unset until the resource has been provisioned.
    #[serde(default)]
    pub physical_resource_id: Option<PhysicalResourceId>,
    pub resource_type: String,
    pub resource_status: String,
    #[serde(default)]
    pub resource_status_reason: Option<String>,
}

/// Filter one full snapshot of the event log.
///
/// Drops events stamped before `since` and events whose id is already in
/// `seen`, then orders the rest by timestamp. The sort is stable, so events
/// sharing a timestamp keep their snapshot order. Returns the new events and
/// `seen` grown by their ids.
pub fn dedup(
    snapshot: Vec<StackEvent>,
    since: DateTime<Utc>,
    mut seen: HashSet<EventId>,
) -> (Vec<StackEvent>, HashSet<EventId>) {
    let mut fresh = Vec::new();

    for event in snapshot {
        if event.timestamp < since {
            continue;
        }
        // insert() also rejects an id repeated within this snapshot
        if seen.insert(event.event_id.clone()) {
            fresh.push(event);
        }
    }

    fresh.sort_by_key(|event| event.timestamp);
    (fresh, seen)
}

/// Sort a full event log oldest first, without filtering.
pub fn chronological(mut events: Vec<StackEvent>) -> Vec<StackEvent> {
    events.sort_by_key(|event| event.timestamp);
    events
}

/// Polling state for one operation: its start instant and every event id
/// reported so far. Scoped to a single apply or delete call.
#[derive(Debug)]
pub struct EventCursor {
    since: DateTime<Utc>,
    seen: HashSet<EventId>,
}

impl EventCursor {
    pub fn starting_at(since: DateTime<Utc>) -> Self {
        Self {
            since,
            seen: HashSet::new(),
        }
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// Number of distinct events reported through this cursor.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Feed one snapshot through the filter, returning only new events.
    pub fn observe(&mut self, snapshot: Vec<StackEvent>) -> Vec<StackEvent> {
        let seen = std::mem::take(&mut self.seen);
        let (fresh, seen) = dedup(snapshot, self.since, seen);
        self.seen = seen;
        fresh
    }

    /// Re-read the stack's event log and return the events not reported yet.
    ///
    /// A stack that no longer exists has no events; that is not an error here
    /// because a finished delete looks exactly like that.
    pub async fn poll<C: StackControl + ?Sized>(
        &mut self,
        control: &C,
        stack: &StackIdentity,
    ) -> Result<Vec<StackEvent>, ControlError> {
        let snapshot = match control.list_events(stack).await {
            Ok(events) => events,
            Err(ControlError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        Ok(self.observe(snapshot))
    }
}
