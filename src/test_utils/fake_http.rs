use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::dispatch::CapturedResponse;
use crate::dispatch::HttpCall;
use crate::dispatch::HttpSender;
use crate::DispatchError;

/// Scripted HTTP sender: answers by URL substring, records every call.
pub struct RecordingSender {
    calls: Mutex<Vec<HttpCall>>,
    responses: Mutex<HashMap<String, CapturedResponse>>,
    fail_substrings: Mutex<Vec<String>>,
    default_response: CapturedResponse,
}

impl RecordingSender {
    /// Sender answering 200 with an empty body to everything.
    pub fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(HashMap::new()),
            fail_substrings: Mutex::new(Vec::new()),
            default_response: CapturedResponse {
                status: 200,
                ..CapturedResponse::default()
            },
        }
    }

    /// Script a response for any URL containing `substring`.
    pub fn respond(
        self,
        substring: &str,
        response: CapturedResponse,
    ) -> Self {
        self.responses.lock().insert(substring.to_string(), response);
        self
    }

    pub fn respond_status(
        self,
        substring: &str,
        status: u16,
    ) -> Self {
        self.respond(
            substring,
            CapturedResponse {
                status,
                ..CapturedResponse::default()
            },
        )
    }

    /// Fail any URL containing `substring` with a timeout.
    pub fn fail_on(
        self,
        substring: &str,
    ) -> Self {
        self.fail_substrings.lock().push(substring.to_string());
        self
    }

    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls whose URL contains `substring`.
    pub fn count(
        &self,
        substring: &str,
    ) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.url.contains(substring))
            .count()
    }
}

#[async_trait]
impl HttpSender for RecordingSender {
    async fn send(
        &self,
        call: &HttpCall,
        timeout: Duration,
    ) -> std::result::Result<CapturedResponse, DispatchError> {
        self.calls.lock().push(call.clone());

        if self
            .fail_substrings
            .lock()
            .iter()
            .any(|s| call.url.contains(s))
        {
            return Err(DispatchError::Timeout {
                url: call.url.clone(),
                duration: timeout,
            });
        }

        let scripted = self
            .responses
            .lock()
            .iter()
            .find(|(substring, _)| call.url.contains(substring.as_str()))
            .map(|(_, response)| response.clone());

        Ok(scripted.unwrap_or_else(|| self.default_response.clone()))
    }
}
