use async_trait::async_trait;
use mood_mirror::{
    Error, Result,
    llm::{GenerationInput, LlmClient},
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock generation client that replays scripted replies and records every call.
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub replies: Arc<Mutex<Vec<Result<String>>>>,
    pub requests: Arc<Mutex<Vec<GenerationInput>>>,
    /// Directory whose entries are counted at call time, to observe scratch files.
    pub watch_dir: Option<PathBuf>,
    pub files_seen: Arc<Mutex<Vec<usize>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            watch_dir: None,
            files_seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push(Ok(reply.into()));
        self
    }

    pub fn with_error(self, error: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(Err(Error::generation(error.into())));
        self
    }

    pub fn watching(mut self, dir: impl Into<PathBuf>) -> Self {
        self.watch_dir = Some(dir.into());
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationInput> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn files_seen(&self) -> Vec<usize> {
        self.files_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, input: GenerationInput) -> Result<String> {
        self.requests.lock().unwrap().push(input);

        if let Some(dir) = &self.watch_dir {
            let count = std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0);
            self.files_seen.lock().unwrap().push(count);
        }

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::generation("No more mock replies available"));
        }

        replies.remove(0)
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}
