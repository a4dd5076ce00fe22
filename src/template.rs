// ABOUTME: Template source resolution: remote URL or inline body read from disk.
// ABOUTME: A source is always exactly one of the two, so a request can never carry both.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template reference cannot be empty")]
    Empty,

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the control plane should take the template from.
///
/// Serializes as `{"template_body": ...}` or `{"template_url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TemplateSource {
    #[serde(rename = "template_body")]
    Body(String),
    #[serde(rename = "template_url")]
    Url(String),
}

impl TemplateSource {
    /// Resolve a template reference from configuration.
    ///
    /// HTTPS URLs to a `.json` document or to an S3 object are handed to the
    /// control plane as URLs. Anything else is a file path, relative paths
    /// being taken from `base_dir`, and is read into an inline body.
    pub fn resolve(reference: &str, base_dir: &Path) -> Result<Self, TemplateError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(TemplateError::Empty);
        }

        if is_remote_template(reference) {
            return Ok(TemplateSource::Url(reference.to_string()));
        }

        let path = base_dir.join(reference);
        let body = std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Read template body from {}", path.display());

        Ok(TemplateSource::Body(body))
    }

    pub fn is_url(&self) -> bool {
        matches!(self, TemplateSource::Url(_))
    }

    /// Short description for progress output.
    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Body(body) => format!("inline template ({} bytes)", body.len()),
            TemplateSource::Url(url) => url.clone(),
        }
    }
}

/// Whether a reference names a template the control plane fetches itself.
pub fn is_remote_template(reference: &str) -> bool {
    let Some(rest) = reference.strip_prefix("https://") else {
        return false;
    };

    if rest.len() > ".json".len() && rest.ends_with(".json") {
        return true;
    }

    match rest.split_once('/') {
        Some((host, _)) => host.starts_with("s3") && host.ends_with(".amazonaws.com"),
        None => false,
    }
}
