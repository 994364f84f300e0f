//! In-process `CompletionProvider` double for handler tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::{CompletionProvider, CompletionRequest, LlmError};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Empty,
    Fail { status: u16, message: String },
}

pub struct StubProvider {
    name: &'static str,
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl StubProvider {
    pub fn new(name: &'static str, reply: Reply) -> Self {
        Self {
            name,
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn text(name: &'static str, text: &str) -> Self {
        Self::new(name, Reply::Text(text.to_string()))
    }

    pub fn failing(name: &'static str, message: &str) -> Self {
        Self::new(
            name,
            Reply::Fail {
                status: 500,
                message: message.to_string(),
            },
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(Some(text.clone())),
            Reply::Empty => Ok(None),
            Reply::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
