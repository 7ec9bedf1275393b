use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use shoal::error::GatewayError;
use shoal::port::{GatewayResponse, HttpGateway};
use url::Url;

/// Deterministic test double for the HTTP gateway.
#[derive(Default)]
pub struct ScriptedGateway {
    results: Mutex<VecDeque<Result<GatewayResponse, GatewayError>>>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedGateway {
    pub fn push_response(&self, status: u16, body: &str) {
        self.results.lock().unwrap().push_back(Ok(GatewayResponse {
            status,
            body: body.as_bytes().to_vec(),
        }));
    }

    pub fn push_error(&self, error: GatewayError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpGateway for ScriptedGateway {
    async fn get(&self, url: &Url) -> Result<GatewayResponse, GatewayError> {
        self.requests.lock().unwrap().push(url.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(GatewayResponse {
                    status: 200,
                    body: b"{}".to_vec(),
                })
            })
    }
}
