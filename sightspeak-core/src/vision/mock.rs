//! Mock model backends for testing
//!
//! Both mocks capture every request they receive and replay scripted
//! responses in order, so tests can assert on exactly what would have gone
//! over the wire without any network I/O.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::provider::{GenerativeModel, VisionQa};
use super::types::{GenerateRequest, GenerateResponse, TokenUsage};

#[derive(Clone)]
pub struct MockGenerativeModel {
    responses: Arc<Mutex<Vec<String>>>,
    captured: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockGenerativeModel {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn captured_requests(&self) -> Vec<GenerateRequest> {
        self.captured.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.captured.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        self.captured.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            anyhow::bail!("Mock generative model has no scripted responses left");
        }

        Ok(GenerateResponse {
            text: responses.remove(0),
            usage: TokenUsage::default(),
        })
    }
}

#[derive(Clone)]
pub struct MockVisionQa {
    answers: Arc<Mutex<Vec<Vec<String>>>>,
    captured: Arc<Mutex<Vec<(Vec<u8>, String)>>>,
}

impl MockVisionQa {
    pub fn new(answers: Vec<Vec<String>>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers)),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_question(&self) -> Option<(Vec<u8>, String)> {
        self.captured.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionQa for MockVisionQa {
    async fn ask(&self, image: &[u8], question: &str) -> Result<Vec<String>> {
        self.captured
            .lock()
            .unwrap()
            .push((image.to_vec(), question.to_string()));

        let mut answers = self.answers.lock().unwrap();
        if answers.is_empty() {
            anyhow::bail!("Mock vision model has no scripted answers left");
        }

        Ok(answers.remove(0))
    }
}
