use dockershrink::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock AdvisoryService returning a canned response
///
/// Every request is recorded so tests can inspect what the use case sent.
#[derive(Clone)]
pub struct MockAdvisoryService {
    response: Option<AdvisoryResponse>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl MockAdvisoryService {
    pub fn new(response: AdvisoryResponse) -> Self {
        Self {
            response: Some(response),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A service whose every call fails
    pub fn with_failure() -> Self {
        Self {
            response: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested_dockerfiles(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl AdvisoryService for MockAdvisoryService {
    fn optimize_dockerfile(&self, request: &AdvisoryRequest<'_>) -> Result<AdvisoryResponse> {
        self.requests
            .lock()
            .unwrap()
            .push(request.dockerfile.to_string());
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => anyhow::bail!("Mock advisory service failure"),
        }
    }
}
