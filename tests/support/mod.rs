// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted in-process control plane and a recording progress sink.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Once;

use cloudformer::config::PollSettings;
use cloudformer::control::{
    ControlError, CreateOptions, StackControl, StackDescription, StackOutput, UpdateOptions,
};
use cloudformer::deploy::{DeploymentRequest, Stack, StatusReport};
use cloudformer::events::StackEvent;
use cloudformer::output::ProgressSink;
use cloudformer::template::TemplateSource;
use cloudformer::types::{EventId, PhysicalResourceId, Region, StackIdentity, StackName};

pub mod gateway;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("cloudformer=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn identity(name: &str) -> StackIdentity {
    StackIdentity::new(
        StackName::new(name).unwrap(),
        Region::new("us-east-1").unwrap(),
    )
}

pub fn request() -> DeploymentRequest {
    DeploymentRequest::new(TemplateSource::Body(r#"{"Resources":{}}"#.to_string()))
}

/// A stack over `control` that never sleeps.
pub fn stack(control: ScriptedControl) -> Stack<ScriptedControl> {
    init_tracing();
    Stack::new(identity("web"), control).polling(PollSettings::immediate())
}

/// An instant well in the future, so scripted events are never older than a
/// run's start instant.
pub fn later(offset_secs: i64) -> DateTime<Utc> {
    Utc::now() + Duration::hours(1) + Duration::seconds(offset_secs)
}

/// An instant safely before any run starts.
pub fn stale() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
}

pub fn event(id: &str, at: DateTime<Utc>, logical: &str, status: &str) -> StackEvent {
    StackEvent {
        event_id: EventId::new(id),
        timestamp: at,
        logical_resource_id: logical.to_string(),
        physical_resource_id: Some(PhysicalResourceId::new(format!("phys-{logical}"))),
        resource_type: "AWS::S3::Bucket".to_string(),
        resource_status: status.to_string(),
        resource_status_reason: None,
    }
}

pub fn event_ids(events: &[StackEvent]) -> Vec<String> {
    events
        .iter()
        .map(|e| e.event_id.as_str().to_string())
        .collect()
}

/// One scripted reply to `describe_stack`.
#[derive(Debug, Clone)]
pub enum Describe {
    Status(&'static str),
    Missing,
    Fail(ControlError),
}

impl Describe {
    fn reply(&self, outputs: &[StackOutput]) -> Result<StackDescription, ControlError> {
        match self {
            Describe::Status(status) => Ok(StackDescription {
                status: status.to_string(),
                status_reason: None,
                outputs: outputs.to_vec(),
            }),
            Describe::Missing => Err(ControlError::NotFound("Stack does not exist".to_string())),
            Describe::Fail(e) => Err(e.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    validate: Option<ControlError>,
    create: Option<ControlError>,
    update: Option<ControlError>,
    delete: Option<ControlError>,
    describes: VecDeque<Describe>,
    event_batches: VecDeque<Result<Vec<StackEvent>, ControlError>>,
    outputs: Vec<StackOutput>,
}

#[derive(Debug, Default, Clone)]
pub struct Calls {
    pub validate: usize,
    pub create: Vec<CreateOptions>,
    pub update: Vec<UpdateOptions>,
    pub delete: usize,
    pub describe: usize,
    pub list_events: usize,
}

/// A control plane that replays scripted replies.
///
/// Describe replies and event snapshots are consumed in order; the last one
/// of each keeps being returned.
#[derive(Debug, Default)]
pub struct ScriptedControl {
    script: Mutex<Script>,
    calls: Mutex<Calls>,
}

impl ScriptedControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_template(self, message: &str) -> Self {
        self.script.lock().validate = Some(ControlError::Validation(message.to_string()));
        self
    }

    pub fn reject_create(self, error: ControlError) -> Self {
        self.script.lock().create = Some(error);
        self
    }

    pub fn reject_update(self, error: ControlError) -> Self {
        self.script.lock().update = Some(error);
        self
    }

    pub fn reject_delete(self, error: ControlError) -> Self {
        self.script.lock().delete = Some(error);
        self
    }

    pub fn statuses(self, replies: impl IntoIterator<Item = Describe>) -> Self {
        self.script.lock().describes.extend(replies);
        self
    }

    pub fn snapshot(self, events: Vec<StackEvent>) -> Self {
        self.script.lock().event_batches.push_back(Ok(events));
        self
    }

    pub fn failing_events(self, error: ControlError) -> Self {
        self.script.lock().event_batches.push_back(Err(error));
        self
    }

    pub fn outputs(self, outputs: Vec<StackOutput>) -> Self {
        self.script.lock().outputs = outputs;
        self
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().clone()
    }
}

fn next_sticky<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

fn scripted(error: &Option<ControlError>) -> Result<(), ControlError> {
    match error {
        Some(e) => Err(e.clone()),
        None => Ok(()),
    }
}

#[async_trait]
impl StackControl for ScriptedControl {
    async fn validate_template(&self, _template: &TemplateSource) -> Result<(), ControlError> {
        self.calls.lock().validate += 1;
        scripted(&self.script.lock().validate)
    }

    async fn create_stack(
        &self,
        _stack: &StackIdentity,
        options: &CreateOptions,
    ) -> Result<(), ControlError> {
        self.calls.lock().create.push(options.clone());
        scripted(&self.script.lock().create)
    }

    async fn update_stack(
        &self,
        _stack: &StackIdentity,
        options: &UpdateOptions,
    ) -> Result<(), ControlError> {
        self.calls.lock().update.push(options.clone());
        scripted(&self.script.lock().update)
    }

    async fn delete_stack(&self, _stack: &StackIdentity) -> Result<(), ControlError> {
        self.calls.lock().delete += 1;
        scripted(&self.script.lock().delete)
    }

    async fn describe_stack(
        &self,
        _stack: &StackIdentity,
    ) -> Result<StackDescription, ControlError> {
        self.calls.lock().describe += 1;
        let mut script = self.script.lock();
        let reply = next_sticky(&mut script.describes).unwrap_or(Describe::Missing);
        reply.reply(&script.outputs)
    }

    async fn list_events(&self, _stack: &StackIdentity) -> Result<Vec<StackEvent>, ControlError> {
        self.calls.lock().list_events += 1;
        let mut script = self.script.lock();
        next_sticky(&mut script.event_batches).unwrap_or(Ok(Vec::new()))
    }
}

/// Records everything the orchestrator reports.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<String>>,
    pub events: Mutex<Vec<StackEvent>>,
    pub statuses: Mutex<Vec<StatusReport>>,
    pub outputs: Mutex<Vec<StackOutput>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_ids(&self) -> Vec<String> {
        event_ids(&self.events.lock())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn progress(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }

    fn stack_event(&self, event: &StackEvent) {
        self.events.lock().push(event.clone());
    }

    fn status(&self, report: &StatusReport) {
        self.statuses.lock().push(report.clone());
    }

    fn outputs(&self, _stack: &StackName, outputs: &[StackOutput]) {
        self.outputs.lock().extend_from_slice(outputs);
    }
}
