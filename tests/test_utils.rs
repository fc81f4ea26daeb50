//! Test utilities for NextMove integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use nextmove::config::ClientConfig;
use nextmove::{ApiError, GenerateReplyResult, ReplyClient, ReplyGenerator, ReplyRequest, Style};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

pub type GenerateResult = Result<GenerateReplyResult, ApiError>;

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> ReplyClient {
    client_with_timeout(base_url, Duration::from_secs(5))
}

pub fn client_with_timeout(base_url: &str, timeout: Duration) -> ReplyClient {
    ReplyClient::new(&ClientConfig {
        base_url: Some(base_url.to_string()),
        request_timeout: timeout,
        ..ClientConfig::default()
    })
    .unwrap()
}

pub fn request(message: &str) -> ReplyRequest {
    ReplyRequest::new(message, None, Style::new("Cool")).unwrap()
}

pub fn reply(best: &str) -> GenerateReplyResult {
    GenerateReplyResult {
        best_reply: best.to_string(),
        alternatives: vec![best.to_string(); 3],
        explanation: None,
        follow_up: None,
    }
}

/// Answers requests from a fixed queue, in order
pub struct CannedGenerator {
    answers: Mutex<VecDeque<GenerateResult>>,
    seen: Mutex<Vec<ReplyRequest>>,
}

impl CannedGenerator {
    pub fn new(answers: Vec<GenerateResult>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<ReplyRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyGenerator for CannedGenerator {
    async fn generate_reply(&self, request: &ReplyRequest) -> GenerateResult {
        self.seen.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::server("no canned answer left")))
    }
}

/// Holds each request until the test releases it through its gate.
///
/// Every started request reports its message on the `started` channel.
pub struct GatedGenerator {
    gates: Mutex<HashMap<String, oneshot::Receiver<GenerateResult>>>,
    started: mpsc::UnboundedSender<String>,
}

impl GatedGenerator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (started, rx) = mpsc::unbounded_channel();
        let generator = Self {
            gates: Mutex::new(HashMap::new()),
            started,
        };
        (generator, rx)
    }

    /// Register a gate for `message`; sending on it resolves that request
    pub fn gate(&self, message: &str) -> oneshot::Sender<GenerateResult> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(message.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ReplyGenerator for GatedGenerator {
    async fn generate_reply(&self, request: &ReplyRequest) -> GenerateResult {
        let gate = self.gates.lock().unwrap().remove(request.message());
        let _ = self.started.send(request.message().to_string());
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::server("gate dropped"))),
            None => Err(ApiError::server("no gate registered")),
        }
    }
}
