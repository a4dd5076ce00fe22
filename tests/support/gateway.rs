// ABOUTME: Minimal in-process HTTP gateway for exercising HttpControl.
// ABOUTME: Serves canned JSON replies per route and records every request it receives.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: String,
}

/// Replies to each `(method, path)` with a fixed status and body; anything
/// else gets a 404.
pub struct FakeGateway {
    routes: Vec<Route>,
}

/// A running gateway. Stops when dropped with the test runtime.
pub struct RunningGateway {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl RunningGateway {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn route(mut self, method: &'static str, path: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    pub async fn start(self) -> RunningGateway {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(self.routes);

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let routes = Arc::clone(&routes);
                        let recorded = Arc::clone(&recorded);
                        async move { Ok::<_, Infallible>(reply(req, &routes, &recorded).await) }
                    });
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        eprintln!("fake gateway connection error: {e}");
                    }
                });
            }
        });

        RunningGateway {
            endpoint: format!("http://{addr}/api"),
            requests,
        }
    }
}

async fn reply(
    req: Request<Incoming>,
    routes: &[Route],
    recorded: &Mutex<Vec<Recorded>>,
) -> Response<Full<Bytes>> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let body = match req.into_body().collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).to_string(),
        Err(e) => {
            return respond(500, format!(r#"{{"message":"unreadable request body: {e}"}}"#));
        }
    };

    let (status, reply) = routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, r#"{"message":"Stack does not exist"}"#.to_string()));
    recorded.lock().push(Recorded { method, path, body });

    respond(status, reply)
}

fn respond(status: u16, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = StatusCode::from_u16(status).unwrap();
    response
        .headers_mut()
        .insert("Content-Type", "application/json".parse().unwrap());
    response
}
