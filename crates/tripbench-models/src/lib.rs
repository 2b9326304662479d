//! Concrete [`tripbench_core::ModelAdapter`] backends over HTTP.
//!
//! - [`openai`]: OpenAI-compatible `/chat/completions` (hosted or local)
//! - [`anthropic`]: Anthropic Messages, optionally with web search

pub mod anthropic;
pub mod error;
mod http;
pub mod openai;

pub use anthropic::{AnthropicClient, AnthropicConfig, WebSearchTool};
pub use error::{ModelsError, Result};
pub use http::DEFAULT_REQUEST_TIMEOUT_MS;
pub use openai::{OpenAiCompatClient, OpenAiCompatConfig};
