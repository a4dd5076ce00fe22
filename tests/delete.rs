// ABOUTME: Integration tests for deleting a stack and watching it go away.
// ABOUTME: A delete ends when the stack is gone or reaches a failed state.

mod support;

use cloudformer::config::PollSettings;
use cloudformer::control::ControlError;
use cloudformer::deploy::StackErrorKind;
use std::time::Duration;
use support::{Describe, RecordingSink, ScriptedControl, event, later, stack};
use tokio::time::Instant;

#[tokio::test]
async fn delete_waits_until_stack_is_gone() {
    let control = ScriptedControl::new()
        .statuses([
            Describe::Status("DELETE_IN_PROGRESS"),
            Describe::Status("DELETE_IN_PROGRESS"),
            Describe::Missing,
        ])
        .snapshot(vec![event("d1", later(1), "web", "DELETE_IN_PROGRESS")])
        .snapshot(vec![
            event("d1", later(1), "web", "DELETE_IN_PROGRESS"),
            event("d2", later(2), "Bucket", "DELETE_COMPLETE"),
        ])
        .failing_events(ControlError::NotFound("Stack does not exist".to_string()));
    let target = stack(control);
    let sink = RecordingSink::new();

    let deleted = target.delete(&sink).await.unwrap();

    assert!(deleted);
    assert_eq!(target.control().calls().delete, 1);
    assert_eq!(sink.event_ids(), vec!["d1", "d2"]);
}

#[tokio::test]
async fn delete_complete_status_counts_as_gone() {
    let control = ScriptedControl::new().statuses([Describe::Status("DELETE_COMPLETE")]);
    let target = stack(control);

    assert!(target.delete(&RecordingSink::new()).await.unwrap());
}

#[tokio::test]
async fn failed_delete_returns_false() {
    let control = ScriptedControl::new().statuses([
        Describe::Status("DELETE_IN_PROGRESS"),
        Describe::Status("DELETE_FAILED"),
    ]);
    let target = stack(control);

    assert!(!target.delete(&RecordingSink::new()).await.unwrap());
}

#[tokio::test]
async fn rejected_delete_returns_false_without_polling() {
    let control = ScriptedControl::new().reject_delete(ControlError::Api {
        status: 403,
        message: "Access denied".to_string(),
    });
    let target = stack(control);

    assert!(!target.delete(&RecordingSink::new()).await.unwrap());
    let calls = target.control().calls();
    assert_eq!(calls.describe, 0);
    assert_eq!(calls.list_events, 0);
}

#[tokio::test]
async fn status_failure_while_deleting_is_an_error() {
    let control = ScriptedControl::new().statuses([Describe::Fail(ControlError::Transport(
        "timed out".to_string(),
    ))]);
    let target = stack(control);

    let err = target.delete(&RecordingSink::new()).await.unwrap_err();

    assert_eq!(err.kind(), StackErrorKind::QueryFailed);
}

#[tokio::test]
async fn delete_announces_itself() {
    let target = stack(ScriptedControl::new());
    let sink = RecordingSink::new();

    target.delete(&sink).await.unwrap();

    assert_eq!(sink.messages(), vec!["Attempting to delete stack - web"]);
}

#[tokio::test(start_paused = true)]
async fn delete_polls_each_interval_without_settling() {
    let control = ScriptedControl::new().statuses([
        Describe::Status("DELETE_IN_PROGRESS"),
        Describe::Missing,
    ]);
    let target = stack(control).polling(PollSettings {
        interval: Duration::from_secs(30),
        settle_delay: Duration::from_secs(10),
        deadline: None,
    });

    let started = Instant::now();
    assert!(target.delete(&RecordingSink::new()).await.unwrap());

    let elapsed = started.elapsed();
    assert!(
        elapsed >= Duration::from_secs(60) && elapsed < Duration::from_secs(61),
        "took {elapsed:?}"
    );
}
