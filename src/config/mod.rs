// ABOUTME: Configuration types and parsing for cloudformer.yml.
// ABOUTME: Handles YAML parsing, discovery, environment overrides and request building.

mod deserialize;
mod init;
mod polling;

pub use init::init_config;
pub use polling::PollSettings;

use deserialize::{
    deserialize_parameters, deserialize_region, deserialize_region_option,
    deserialize_stack_name, deserialize_stack_name_option, deserialize_tags,
};

use crate::control::{Parameter, Tag};
use crate::deploy::DeploymentRequest;
use crate::error::{Error, Result};
use crate::status::StatusClassifier;
use crate::template::TemplateSource;
use crate::types::{Region, StackIdentity, StackName};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "cloudformer.yml";
pub const CONFIG_FILENAME_ALT: &str = "cloudformer.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".cloudformer/config.yml";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4580";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_stack_name")]
    pub stack: StackName,

    #[serde(deserialize_with = "deserialize_region")]
    pub region: Region,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Template path (relative to the config file) or HTTPS URL.
    pub template: String,

    #[serde(default, deserialize_with = "deserialize_parameters")]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub capabilities: Vec<String>,

    #[serde(default)]
    pub disable_rollback: bool,

    #[serde(default)]
    pub notify: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<Tag>,

    #[serde(default = "default_rollback_complete_is_success")]
    pub rollback_complete_is_success: bool,

    #[serde(default)]
    pub polling: PollSettings,

    #[serde(default)]
    pub environments: HashMap<String, Environment>,

    /// Directory the config was loaded from; template paths resolve against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Per-environment overrides, selected with `--env`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Environment {
    #[serde(default, deserialize_with = "deserialize_stack_name_option")]
    pub stack: Option<StackName>,

    #[serde(default, deserialize_with = "deserialize_region_option")]
    pub region: Option<Region>,

    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub template: Option<String>,

    #[serde(default, deserialize_with = "deserialize_parameters")]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub capabilities: Option<Vec<String>>,

    #[serde(default)]
    pub notify: Option<Vec<String>>,

    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<Tag>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_rollback_complete_is_success() -> bool {
    true
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&content)?;
        config.base_dir = config_root(path);
        Ok(config)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn for_environment(&self, name: &str) -> Result<Config> {
        let env = self
            .environments
            .get(name)
            .ok_or_else(|| Error::UnknownEnvironment(name.to_string()))?;

        let mut merged = self.clone();

        if let Some(ref stack) = env.stack {
            merged.stack = stack.clone();
        }

        if let Some(ref region) = env.region {
            merged.region = region.clone();
        }

        if let Some(ref endpoint) = env.endpoint {
            merged.endpoint = endpoint.clone();
        }

        if let Some(ref template) = env.template {
            merged.template = template.clone();
        }

        // Merge by key, keeping the position of keys that already exist
        for param in &env.parameters {
            match merged.parameters.iter_mut().find(|p| p.key == param.key) {
                Some(existing) => existing.value = param.value.clone(),
                None => merged.parameters.push(param.clone()),
            }
        }

        for tag in &env.tags {
            match merged.tags.iter_mut().find(|t| t.key == tag.key) {
                Some(existing) => existing.value = tag.value.clone(),
                None => merged.tags.push(tag.clone()),
            }
        }

        if let Some(ref capabilities) = env.capabilities {
            merged.capabilities = capabilities.clone();
        }

        if let Some(ref notify) = env.notify {
            merged.notify = notify.clone();
        }

        Ok(merged)
    }

    pub fn identity(&self) -> StackIdentity {
        StackIdentity::new(self.stack.clone(), self.region.clone())
    }

    pub fn classifier(&self) -> StatusClassifier {
        StatusClassifier::new(self.rollback_complete_is_success)
    }

    /// Resolve the template and build the request for one apply.
    pub fn deployment_request(&self) -> Result<DeploymentRequest> {
        let template = TemplateSource::resolve(&self.template, &self.base_dir)?;
        Ok(DeploymentRequest {
            template,
            parameters: self.parameters.clone(),
            capabilities: self.capabilities.clone(),
            disable_rollback: self.disable_rollback,
            notification_arns: self.notify.clone(),
            tags: self.tags.clone(),
        })
    }

    pub fn template() -> Self {
        Config {
            stack: StackName::new("my-stack").unwrap(),
            region: Region::new("us-east-1").unwrap(),
            endpoint: default_endpoint(),
            template: "template.json".to_string(),
            parameters: vec![],
            capabilities: vec![],
            disable_rollback: false,
            notify: vec![],
            tags: vec![],
            rollback_complete_is_success: default_rollback_complete_is_success(),
            polling: PollSettings::default(),
            environments: HashMap::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

/// The project directory a config file belongs to.
fn config_root(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if parent.ends_with(".cloudformer") {
        parent.parent().unwrap_or(parent).to_path_buf()
    } else {
        parent.to_path_buf()
    }
}
