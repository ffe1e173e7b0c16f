//! Chat model trait and provider-neutral message types
//!
//! The dispatcher talks to the LLM through this seam so it can be tested
//! with a scripted model instead of a live provider.

use crate::models::ToolCallRequest;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

pub mod openai;
pub use openai::{OpenAiClient, OpenAiConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything one dispatch turn sends to the provider: system instruction,
/// running history, latest user turn, and the registry's tool definitions.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<Value>,
}

/// Provider reply: free text commentary, and at most one structured
/// tool-call directive.
#[derive(Debug, Clone, Default)]
pub struct ChatOutcome {
    pub commentary: Option<String>,
    pub tool_call: Option<ToolCallRequest>,
}

/// Trait for chat-completion providers with tool-calling support
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome>;
}
