#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use topclient::{ClientConfig, HttpMethod, Result, TopClient, Transport};

pub const TEST_URL: &str = "http://router.test/rest";

/// A request captured by [`MockTransport`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub params: HashMap<String, String>,
}

/// Transport returning canned bodies and recording what was sent
///
/// Bodies are served in order; the last one repeats once the queue drains.
#[derive(Default)]
pub struct MockTransport {
    bodies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new(bodies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            bodies: Mutex::new(bodies.iter().map(|b| (*b).to_string()).collect()),
            ..Default::default()
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            params: params.iter().cloned().collect(),
        });

        let next = self.bodies.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(body) = next {
            *last = Some(body);
        }
        Ok(last.clone().unwrap_or_default())
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("test_appkey", "test_appsecret").with_rest_url(TEST_URL)
}

/// Client wired to a mock transport serving `bodies`
pub fn mock_client(bodies: &[&str]) -> (TopClient, Arc<MockTransport>) {
    let transport = MockTransport::new(bodies);
    let client = TopClient::with_transport(test_config(), transport.clone())
        .expect("valid test config");
    (client, transport)
}
