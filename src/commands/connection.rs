// ABOUTME: Shared helper for building the stack orchestrator from config.
// ABOUTME: Eliminates duplication across apply, delete and inspection commands.

use cloudformer::config::Config;
use cloudformer::control::HttpControl;
use cloudformer::deploy::Stack;
use cloudformer::error::Result;

/// Connect the configured stack to its control-plane gateway.
pub fn connect(config: &Config) -> Result<Stack<HttpControl>> {
    tracing::debug!("Using control plane at {}", config.endpoint);
    let control = HttpControl::new(&config.endpoint)?;
    Ok(Stack::from_config(config, control))
}
