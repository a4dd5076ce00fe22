// ABOUTME: Apply command implementation.
// ABOUTME: Resolves the template, creates or updates the stack and reports the outcome.

use super::connection::connect;
use cloudformer::config::Config;
use cloudformer::deploy::DeploymentOutcome;
use cloudformer::error::Result;
use cloudformer::output::Output;

/// Apply the configured template. Returns whether the stack ended up as requested.
pub async fn apply(config: Config, mut output: Output) -> Result<bool> {
    output.start_timer();

    let request = config.deployment_request()?;
    let stack = connect(&config)?;

    let outcome = stack.apply(&request, &output).await?;
    match outcome {
        DeploymentOutcome::Succeeded => {
            output.success(&format!("Stack {} deployed", config.stack));
        }
        DeploymentOutcome::NoUpdates => {
            output.success(&format!("Stack {} is up to date", config.stack));
        }
        DeploymentOutcome::Failed => {
            output.error(&format!(
                "Unable to deploy {}. Check the event log for more information.",
                config.stack
            ));
        }
    }

    Ok(outcome.is_success())
}
