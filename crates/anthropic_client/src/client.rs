use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use crate::anthropic::AnthropicClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Credential present and transport built.
    Ready,
    /// Construction failed; every call fails until the process restarts.
    Unusable,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one system prompt and one user message, return the reply text.
    ///
    /// Exactly one upstream attempt is made per call.
    async fn complete(&self, system: &str, user_message: &str) -> Result<String>;

    fn state(&self) -> ClientState {
        ClientState::Ready
    }
}

/// Stand-in used when [`AnthropicClient`] could not be built.
#[derive(Debug, Clone)]
pub struct UninitializedClient {
    reason: String,
}

impl UninitializedClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl CompletionClient for UninitializedClient {
    async fn complete(&self, _system: &str, _user_message: &str) -> Result<String> {
        Err(ClientError::NotInitialized(self.reason.clone()))
    }

    fn state(&self) -> ClientState {
        ClientState::Unusable
    }
}

/// Build the process-wide client once at start-up.
///
/// Construction failures are logged and turned into an [`UninitializedClient`]
/// so the server can still start and answer health checks.
pub fn build_completion_client(config: ClientConfig) -> Arc<dyn CompletionClient> {
    match AnthropicClient::new(config) {
        Ok(client) => {
            info!(
                "Anthropic client ready (model: {}, endpoint: {})",
                client.model(),
                client.messages_url()
            );
            Arc::new(client)
        }
        Err(e) => {
            error!("Failed to initialize Anthropic client: {}", e);
            Arc::new(UninitializedClient::new(e.to_string()))
        }
    }
}
