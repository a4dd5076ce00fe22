// ABOUTME: Delete command implementation.
// ABOUTME: Deletes the stack and follows its event log until it is gone.

use super::connection::connect;
use cloudformer::config::Config;
use cloudformer::error::Result;
use cloudformer::output::Output;

pub async fn delete(config: Config, mut output: Output) -> Result<bool> {
    output.start_timer();

    let stack = connect(&config)?;
    let deleted = stack.delete(&output).await?;

    if deleted {
        output.success(&format!("Stack {} deleted", config.stack));
    } else {
        output.error(&format!(
            "Unable to delete {}. Check the event log for more information.",
            config.stack
        ));
    }

    Ok(deleted)
}
