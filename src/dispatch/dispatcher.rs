use std::sync::Arc;
use std::time::Duration;

use super::CapturedResponse;
use super::HttpCall;
use super::HttpSender;
use super::ResolvedRequest;
use crate::deploy::ClusterHandle;
use crate::DispatchError;

/// Issues resolved requests against the cluster under test.
///
/// Threads the shared [`ClusterHandle`] explicitly so engine tests can
/// substitute a fake cluster; never a process-wide singleton.
pub struct RequestDispatcher {
    sender: Arc<dyn HttpSender>,
    handle: Arc<ClusterHandle>,
    timeout: Duration,
}

impl RequestDispatcher {
    pub fn new(
        sender: Arc<dyn HttpSender>,
        handle: Arc<ClusterHandle>,
        timeout: Duration,
    ) -> Self {
        Self {
            sender,
            handle,
            timeout,
        }
    }

    /// Issue one call of a case's sweep.
    ///
    /// # Errors
    /// [`DispatchError`] on network or timeout failure; the caller turns
    /// it into a non-matching response, not a suite abort.
    pub async fn dispatch(
        &self,
        request: &ResolvedRequest,
    ) -> std::result::Result<CapturedResponse, DispatchError> {
        let call = HttpCall {
            method: request.method,
            url: self.handle.resolve_url(&request.uri),
            headers: request.headers.clone(),
            body: request.body.clone(),
        };
        self.sender.send(&call, self.timeout).await
    }
}
