use std::sync::Arc;
use std::time::Duration;

use crate::deploy::ClusterHandle;
use crate::dispatch::Binding;
use crate::dispatch::HttpSender;

/// Everything an action primitive needs: the live cluster, the case's
/// resolved parameters, and the HTTP collaborator for side-effecting
/// calls.
#[derive(Clone)]
pub struct ActionContext {
    pub handle: Arc<ClusterHandle>,
    pub binding: Binding,
    pub sender: Arc<dyn HttpSender>,
    pub timeout: Duration,
}

impl ActionContext {
    pub fn new(
        handle: Arc<ClusterHandle>,
        binding: Binding,
        sender: Arc<dyn HttpSender>,
        timeout: Duration,
    ) -> Self {
        Self {
            handle,
            binding,
            sender,
            timeout,
        }
    }
}
