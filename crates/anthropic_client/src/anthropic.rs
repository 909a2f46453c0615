//! Anthropic Messages API adapter.

use std::time::Instant;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Proxy, StatusCode,
};

use crate::api_types::{ErrorEnvelope, MessagesRequest};
use crate::client::CompletionClient;
use crate::config::{ApiKey, ClientConfig, ProxyAuth, ProxyConfig, ANTHROPIC_VERSION};
use crate::error::{ClientError, Result};
use crate::normalize::normalize_response;

/// Anthropic Messages API client. One POST per [`CompletionClient::complete`].
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    messages_url: String,
    config: ClientConfig,
}

impl AnthropicClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = config.api_key.as_ref().ok_or(ClientError::MissingApiKey)?;
        let client = build_http_client(&config, api_key)?;

        Ok(Self {
            client,
            messages_url: config.messages_url(),
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    pub fn build_request(&self, system: &str, user_message: &str) -> MessagesRequest {
        MessagesRequest::new(&self.config, system, user_message)
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, system: &str, user_message: &str) -> Result<String> {
        let body = self.build_request(system, user_message);
        debug!(
            "Sending Anthropic request: model={}, max_tokens={}, input_chars={}",
            body.model,
            body.max_tokens,
            user_message.chars().count()
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.messages_url)
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ClientError::Transport)?;

        if !status.is_success() {
            let message = api_error_message(status, &text);
            warn!(
                "Anthropic API returned HTTP {} after {:?}: {}",
                status,
                start.elapsed(),
                message
            );
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(
            "Anthropic reply received after {:?} ({} bytes)",
            start.elapsed(),
            text.len()
        );
        Ok(normalize_response(&text))
    }
}

fn default_headers(api_key: &ApiKey) -> Result<HeaderMap> {
    let mut key =
        HeaderValue::from_str(api_key.expose()).map_err(|_| ClientError::InvalidApiKey)?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", key);
    headers.insert(
        "anthropic-version",
        HeaderValue::from_static(ANTHROPIC_VERSION),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}

fn apply_proxy_auth(proxy: Proxy, auth: Option<&ProxyAuth>) -> Proxy {
    let Some(auth) = auth else {
        return proxy;
    };
    if auth.username.is_empty() {
        return proxy;
    }
    proxy.basic_auth(&auth.username, &auth.password)
}

fn build_proxy(config: &ProxyConfig) -> Result<Proxy> {
    let proxy = Proxy::all(&config.url).map_err(|e| ClientError::InvalidProxy(e.to_string()))?;
    Ok(apply_proxy_auth(proxy, config.auth.as_ref()))
}

fn build_http_client(config: &ClientConfig, api_key: &ApiKey) -> Result<Client> {
    // HTTP_PROXY / HTTPS_PROXY / ALL_PROXY are ignored, even when malformed.
    let mut builder = Client::builder()
        .no_proxy()
        .default_headers(default_headers(api_key)?);
    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(build_proxy(proxy)?);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ClientError::Build)
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = ErrorEnvelope::parse_message(body) {
        return message;
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
