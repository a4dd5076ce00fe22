// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates cloudformer.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Region, StackName};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    stack: Option<&str>,
    region: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(s) = stack {
        config.stack = StackName::new(s).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    if let Some(r) = region {
        config.region = Region::new(r).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"stack: {}
region: {}
endpoint: {}
template: {}
parameters: {{}}
capabilities: []
# disable_rollback: false
# notify: []
# tags:
#   team: platform
# Treat ROLLBACK_COMPLETE / UPDATE_ROLLBACK_COMPLETE as a successful end state
# rollback_complete_is_success: true
# polling:
#   interval: 30s
#   settle_delay: 10s
#   deadline: 1h
"#,
        config.stack, config.region, config.endpoint, config.template
    )
}
