//! Client for the Anthropic Messages API.
//!
//! The crate exposes one seam, [`CompletionClient`], with a single HTTP
//! adapter ([`AnthropicClient`]) and a sentinel ([`UninitializedClient`]) that
//! stands in when the adapter could not be constructed.

pub mod anthropic;
pub mod api_types;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;

pub use anthropic::AnthropicClient;
pub use api_types::{MessagesRequest, RequestMessage, Role};
pub use client::{build_completion_client, ClientState, CompletionClient, UninitializedClient};
pub use config::{ApiKey, ClientConfig, ProxyAuth, ProxyConfig};
pub use error::{ClientError, Result};
pub use normalize::{normalize_response, EMPTY_RESPONSE_PLACEHOLDER};
