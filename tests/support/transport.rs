//! Event transport that records what it is asked to do.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use sentinelpay::error::{Error, Result};
use sentinelpay::port::outbound::transport::EventTransport;

#[derive(Debug, Default)]
pub struct TransportLog {
    pub declared: Vec<String>,
    pub sent: Vec<(String, Vec<u8>)>,
    pub closed: bool,
}

/// Transport double. Clones share one log.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    log: Arc<Mutex<TransportLog>>,
    fail_send: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose `send` always fails.
    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        self.log.lock().sent.clone()
    }

    pub fn sent_json(&self) -> Vec<(String, serde_json::Value)> {
        self.sent()
            .into_iter()
            .map(|(dest, body)| (dest, serde_json::from_slice(&body).expect("json body")))
            .collect()
    }

    pub fn declared(&self) -> Vec<String> {
        self.log.lock().declared.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.log.lock().closed
    }
}

#[async_trait]
impl EventTransport for RecordingTransport {
    async fn declare(&self, destination: &str) -> Result<()> {
        self.log.lock().declared.push(destination.to_string());
        Ok(())
    }

    async fn send(&self, destination: &str, body: &[u8]) -> Result<()> {
        if self.fail_send {
            return Err(Error::Broker("channel closed".into()));
        }
        self.log
            .lock()
            .sent
            .push((destination.to_string(), body.to_vec()));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.log.lock().closed = true;
        Ok(())
    }
}
