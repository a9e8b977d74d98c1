//! Recording generator for tests.

use super::generator::{GenerationRequest, Generator};
use crate::error::{MurmurError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

pub struct MockGenerator {
    reply: std::result::Result<String, String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(MurmurError::Generation)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["mock-model".to_string()])
    }
}
