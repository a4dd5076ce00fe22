// ABOUTME: Read-only commands: status, events, outputs and template validation.
// ABOUTME: A stack that is not deployed is reported, not treated as a hard error.

use super::connection::connect;
use cloudformer::config::Config;
use cloudformer::control::StackControl;
use cloudformer::deploy::{StackError, StackErrorKind};
use cloudformer::error::Result;
use cloudformer::output::Output;

pub async fn status(config: Config, output: Output) -> Result<bool> {
    let stack = connect(&config)?;
    stack.emit_status(&output).await?;
    Ok(true)
}

pub async fn events(config: Config, output: Output) -> Result<bool> {
    let stack = connect(&config)?;
    match stack.event_history().await {
        Ok(history) => {
            output.event_log(&history);
            Ok(true)
        }
        Err(e) => not_deployed_or(e, &output),
    }
}

pub async fn outputs(config: Config, output: Output) -> Result<bool> {
    let stack = connect(&config)?;
    match stack.emit_outputs(&output).await {
        Ok(_) => Ok(true),
        Err(e) => not_deployed_or(e, &output),
    }
}

pub async fn validate(config: Config, output: Output) -> Result<bool> {
    let template = config.deployment_request()?.template;
    let stack = connect(&config)?;

    match stack.control().validate_template(&template).await {
        Ok(()) => {
            output.success(&format!("Template {} is valid", config.template));
            Ok(true)
        }
        Err(e) => {
            output.error(&format!("Unable to validate {} - {}", config.template, e));
            Ok(false)
        }
    }
}

fn not_deployed_or(error: StackError, output: &Output) -> Result<bool> {
    if error.kind() == StackErrorKind::NotDeployed {
        output.error("Stack not up.");
        return Ok(false);
    }
    Err(error.into())
}
