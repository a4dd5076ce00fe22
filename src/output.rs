// ABOUTME: Output formatting for CLI feedback and the orchestrator's progress sink.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::control::StackOutput;
use crate::deploy::StatusReport;
use crate::events::StackEvent;
use crate::types::StackName;

/// Receives progress from the orchestrator as structured data.
///
/// Formatting is entirely up to the sink.
pub trait ProgressSink: Send + Sync {
    /// A free-form progress line.
    fn progress(&self, message: &str);

    /// A stack event, reported once, in timestamp order.
    fn stack_event(&self, event: &StackEvent);

    /// A status summary.
    fn status(&self, report: &StatusReport);

    /// The stack's declared outputs.
    fn outputs(&self, stack: &StackName, outputs: &[StackOutput]);
}

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration_secs(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => print_json(&JsonMessage {
                event: "success",
                message,
                duration_secs: self.duration_secs(),
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonMessage {
                    event: "error",
                    message,
                    duration_secs: self.duration_secs(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a list of events outside of a polling loop (the `events` command).
    pub fn event_log(&self, events: &[StackEvent]) {
        for event in events {
            self.stack_event(event);
        }
    }
}

impl ProgressSink for Output {
    fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    fn stack_event(&self, event: &StackEvent) {
        match self.mode {
            OutputMode::Normal => println!("{}", format_event(event)),
            OutputMode::Quiet => {}
            OutputMode::Json => print_json(&JsonRecord {
                event: "stack_event",
                data: event,
            }),
        }
    }

    fn status(&self, report: &StatusReport) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{}", format_status(report)),
            OutputMode::Json => print_json(&JsonRecord {
                event: "status",
                data: report,
            }),
        }
    }

    fn outputs(&self, stack: &StackName, outputs: &[StackOutput]) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                if outputs.is_empty() && self.mode == OutputMode::Normal {
                    println!("{stack} has no outputs");
                }
                for output in outputs {
                    println!("{}", format_output(output));
                }
            }
            OutputMode::Json => print_json(&JsonRecord {
                event: "outputs",
                data: outputs,
            }),
        }
    }
}

/// `timestamp - physical id - logical id - type - status - reason`
pub fn format_event(event: &StackEvent) -> String {
    format!(
        "{} - {} - {} - {} - {} - {}",
        event.timestamp.to_rfc3339(),
        event
            .physical_resource_id
            .as_ref()
            .map(|id| id.as_str())
            .unwrap_or(""),
        event.logical_resource_id,
        event.resource_type,
        event.resource_status,
        event.resource_status_reason.as_deref().unwrap_or("")
    )
}

pub fn format_status(report: &StatusReport) -> String {
    match &report.status {
        Some(status) => format!(
            "{} - {} - {}",
            report.stack,
            status,
            report.reason.as_deref().unwrap_or("")
        ),
        None => format!("{} - Not Deployed", report.stack),
    }
}

pub fn format_output(output: &StackOutput) -> String {
    format!(
        "{} - {} - {}",
        output.key,
        output.description.as_deref().unwrap_or(""),
        output.value
    )
}

fn print_json<T: Serialize>(value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        println!("{json}");
    }
}

#[derive(Serialize)]
struct JsonMessage<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct JsonRecord<'a, T: Serialize + ?Sized> {
    event: &'a str,
    data: &'a T,
}
