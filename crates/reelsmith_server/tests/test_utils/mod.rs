//! Mock completion backends shared by the server tests.

#![allow(dead_code)]

use async_trait::async_trait;
use reelsmith_core::SamplingOptions;
use reelsmith_error::{TransportError, TransportErrorKind};
use reelsmith_interface::TextCompletion;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How a mock backend answers.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Text(String),
    Status(u16, String),
    Panic,
}

/// Backend that returns a fixed reply and records every call.
#[derive(Debug)]
pub struct MockCompletion {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last: Mutex<Option<(String, SamplingOptions)>>,
}

impl MockCompletion {
    pub fn replying(text: &str) -> Self {
        Self::new(MockBehavior::Text(text.to_string()))
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self::new(MockBehavior::Status(status, body.to_string()))
    }

    pub fn panicking() -> Self {
        Self::new(MockBehavior::Panic)
    }

    fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, SamplingOptions)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(
        &self,
        prompt: &str,
        options: &SamplingOptions,
    ) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((prompt.to_string(), *options));
        match &self.behavior {
            MockBehavior::Text(text) => Ok(text.clone()),
            MockBehavior::Status(status, body) => Err(TransportError::new(TransportErrorKind::Status {
                status: *status,
                body: body.clone(),
            })),
            MockBehavior::Panic => panic!("stub backend exploded"),
        }
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }

    fn base_url(&self) -> &str {
        "http://stub:11434"
    }
}
