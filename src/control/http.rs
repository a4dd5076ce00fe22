// ABOUTME: StackControl implementation over a JSON/HTTP control-plane gateway.
// ABOUTME: One hyper http1 connection per call; status codes map onto ControlError.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode, Uri};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::net::TcpStream;

use super::error::ControlError;
use super::stack_control::StackControl;
use super::types::{CreateOptions, StackDescription, UpdateOptions};
use crate::events::StackEvent;
use crate::template::TemplateSource;
use crate::types::StackIdentity;

/// Error body returned by the gateway on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Client for a control-plane gateway reachable over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpControl {
    host: String,
    port: u16,
    base_path: String,
}

impl HttpControl {
    /// Create a client for an endpoint such as `http://localhost:4580/api`.
    pub fn new(endpoint: &str) -> Result<Self, ControlError> {
        let uri: Uri = endpoint
            .parse()
            .map_err(|e| ControlError::Transport(format!("invalid endpoint {endpoint}: {e}")))?;

        match uri.scheme_str() {
            Some("http") => {}
            other => {
                return Err(ControlError::Transport(format!(
                    "unsupported endpoint scheme: {}",
                    other.unwrap_or("<none>")
                )));
            }
        }

        let host = uri
            .host()
            .ok_or_else(|| ControlError::Transport(format!("endpoint has no host: {endpoint}")))?
            .to_string();

        Ok(Self {
            host,
            port: uri.port_u16().unwrap_or(80),
            base_path: uri.path().trim_end_matches('/').to_string(),
        })
    }

    fn stack_path(&self, stack: &StackIdentity) -> String {
        format!(
            "{}/regions/{}/stacks/{}",
            self.base_path,
            urlencoding::encode(stack.region().as_str()),
            urlencoding::encode(stack.name().as_str())
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes, ControlError> {
        let stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                ControlError::Transport(format!(
                    "failed to connect to {}:{}: {}",
                    self.host, self.port, e
                ))
            })?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| ControlError::Transport(format!("HTTP handshake failed: {e}")))?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("control plane connection error: {}", e);
            }
        });

        let has_body = body.is_some();
        let mut builder = Request::builder()
            .method(method.clone())
            .uri(path)
            .header("Host", format!("{}:{}", self.host, self.port))
            .header("Accept", "application/json");
        if has_body {
            builder = builder.header("Content-Type", "application/json");
        }
        let req = builder
            .body(Full::new(Bytes::from(body.unwrap_or_default())))
            .map_err(|e| ControlError::Transport(format!("failed to build request: {e}")))?;

        tracing::debug!("{} {}", method, path);
        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| ControlError::Transport(format!("request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| ControlError::Transport(format!("failed to read response: {e}")))?
            .to_bytes();

        if status.is_success() {
            Ok(body)
        } else {
            Err(map_error_response(status, &body))
        }
    }

    async fn send_json<T: serde::Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &T,
    ) -> Result<Bytes, ControlError> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| ControlError::Transport(format!("failed to encode request: {e}")))?;
        self.send(method, path, Some(body)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ControlError> {
        let body = self.send(Method::GET, path, None).await?;
        serde_json::from_slice(&body)
            .map_err(|e| ControlError::Transport(format!("malformed response from {path}: {e}")))
    }
}

/// Map a non-2xx gateway response to a control error.
fn map_error_response(status: StatusCode, body: &[u8]) -> ControlError {
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
    let (code, message) = match parsed {
        Some(ErrorBody { code, message }) => (code, message),
        None => (None, String::from_utf8_lossy(body).trim().to_string()),
    };

    match status {
        StatusCode::NOT_FOUND => ControlError::NotFound(message),
        StatusCode::BAD_REQUEST if code.as_deref() == Some("ValidationError") => {
            ControlError::Validation(message)
        }
        _ => ControlError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl StackControl for HttpControl {
    async fn validate_template(&self, template: &TemplateSource) -> Result<(), ControlError> {
        let path = format!("{}/templates/validate", self.base_path);
        self.send_json(Method::POST, &path, template).await?;
        Ok(())
    }

    async fn create_stack(
        &self,
        stack: &StackIdentity,
        options: &CreateOptions,
    ) -> Result<(), ControlError> {
        self.send_json(Method::POST, &self.stack_path(stack), options)
            .await?;
        Ok(())
    }

    async fn update_stack(
        &self,
        stack: &StackIdentity,
        options: &UpdateOptions,
    ) -> Result<(), ControlError> {
        self.send_json(Method::PUT, &self.stack_path(stack), options)
            .await?;
        Ok(())
    }

    async fn delete_stack(&self, stack: &StackIdentity) -> Result<(), ControlError> {
        self.send(Method::DELETE, &self.stack_path(stack), None)
            .await?;
        Ok(())
    }

    async fn describe_stack(
        &self,
        stack: &StackIdentity,
    ) -> Result<StackDescription, ControlError> {
        self.get_json(&self.stack_path(stack)).await
    }

    async fn list_events(&self, stack: &StackIdentity) -> Result<Vec<StackEvent>, ControlError> {
        let path = format!("{}/events", self.stack_path(stack));
        self.get_json(&path).await
    }
}
