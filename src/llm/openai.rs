//! OpenAI chat-completions client with tool calling
//!
//! Uses a long-lived reqwest::Client for connection pooling. Transport
//! failures and retryable HTTP statuses are retried a bounded number of
//! times before surfacing as a transport error.

use super::{ChatMessage, ChatModel, ChatOutcome, ChatRequest, ChatRole};
use crate::error::AgentError;
use crate::models::ToolCallRequest;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::time::Duration;
use tracing::{error, info, warn};

/// Provider configuration, read from the hosting environment.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_retries: u32,
}

impl OpenAiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            temperature: 0.5,
            max_retries: 2,
        }
    }
}

/// Reusable OpenAI client (connection-pooled)
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()?;

        Ok(Self { client, config })
    }

    fn completion_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    async fn send_once(
        &self,
        body: &CompletionRequest<'_>,
    ) -> std::result::Result<CompletionResponse, SendError> {
        let response = self
            .client
            .post(self.completion_url())
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| SendError::Network(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, "OpenAI API error response");
            return Err(SendError::Status(status, error_text));
        }

        response.json::<CompletionResponse>().await.map_err(|e| {
            error!("Failed to parse OpenAI response: {}", e);
            SendError::Parse(format!("OpenAI parse error: {}", e))
        })
    }
}

/// Intermediate failure classification for the retry loop
enum SendError {
    Network(String),
    Status(StatusCode, String),
    Parse(String),
}

impl SendError {
    fn is_retryable(&self) -> bool {
        match self {
            SendError::Network(_) => true,
            SendError::Status(status, _) => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            SendError::Parse(_) => false,
        }
    }
}

impl From<SendError> for AgentError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Network(message) => AgentError::Transport(message),
            SendError::Status(status, body) => {
                AgentError::Transport(format!("OpenAI API returned {}: {}", status, body))
            }
            SendError::Parse(message) => AgentError::LlmResponse(message),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome> {
        if self.config.api_key.is_empty() {
            return Err(AgentError::Config(
                "OPENAI_API_KEY not configured".to_string(),
            ));
        }

        let body = CompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            tools: &request.tools,
        };

        info!(model = %self.config.model, "Calling OpenAI API");

        let mut attempt = 0;
        let response = loop {
            match self.send_once(&body).await {
                Ok(response) => break response,
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(attempt, "Retrying OpenAI call after transport failure");
                    tokio::time::sleep(Duration::from_millis(500 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err.into()),
            }
        };

        parse_outcome(response)
    }
}

fn parse_outcome(response: CompletionResponse) -> Result<ChatOutcome> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::LlmResponse("No choices in OpenAI response".to_string()))?;

    let commentary = choice.message.content.filter(|c| !c.is_empty());

    let tool_call = match choice.message.tool_calls {
        Some(calls) if !calls.is_empty() => {
            if calls.len() > 1 {
                warn!(
                    count = calls.len(),
                    "Model returned multiple tool calls; using the first"
                );
            }
            let call = calls.into_iter().next().ok_or_else(|| {
                AgentError::LlmResponse("Empty tool call list".to_string())
            })?;

            let arguments: Value = if call.function.arguments.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&call.function.arguments).map_err(|e| {
                    AgentError::LlmResponse(format!(
                        "Tool call arguments are not valid JSON: {}",
                        e
                    ))
                })?
            };

            Some(ToolCallRequest {
                name: call.function.name,
                arguments,
            })
        }
        _ => None,
    };

    Ok(ChatOutcome {
        commentary,
        tool_call,
    })
}

//
// ================= Wire Types =================
//

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    tools: &'a [Value],
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        Self {
            role,
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunctionCall,
}

#[derive(Debug, Deserialize)]
struct WireFunctionCall {
    name: String,
    // JSON-encoded argument object, as the API delivers it
    arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo",
            temperature: 0.5,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: "You generate financial requests".to_string(),
                },
                WireMessage {
                    role: "user",
                    content: "check my bank balance".to_string(),
                },
            ],
            tools: &[json!({"type": "function", "function": {"name": "request_paytm_balance_enquiry"}})],
        };

        let serialized = serde_json::to_string(&request).unwrap();
        assert!(serialized.contains("gpt-3.5-turbo"));
        assert!(serialized.contains("check my bank balance"));
        assert!(serialized.contains("request_paytm_balance_enquiry"));
    }

    #[test]
    fn test_request_omits_empty_tools() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo",
            temperature: 0.5,
            messages: vec![],
            tools: &[],
        };

        let serialized = serde_json::to_string(&request).unwrap();
        assert!(!serialized.contains("tools"));
    }

    #[test]
    fn test_parse_plain_reply() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Did you mean a Paytm balance or an ISO format bank balance?"
                },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let outcome = parse_outcome(response).unwrap();
        assert!(outcome.tool_call.is_none());
        assert!(outcome.commentary.unwrap().contains("Paytm"));
    }

    #[test]
    fn test_parse_tool_call_reply() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "request_paytm_balance_enquiry",
                            "arguments": "{\"userToken\": \"ABC\", \"mid\": \"M1\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }))
        .unwrap();

        let outcome = parse_outcome(response).unwrap();
        let call = outcome.tool_call.unwrap();
        assert_eq!(call.name, "request_paytm_balance_enquiry");
        assert_eq!(call.arguments["userToken"], "ABC");
        assert_eq!(call.arguments["mid"], "M1");
    }

    #[test]
    fn test_parse_rejects_malformed_arguments() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "x", "arguments": "not json"}
                    }]
                }
            }]
        }))
        .unwrap();

        let err = parse_outcome(response).unwrap_err();
        assert!(matches!(err, AgentError::LlmResponse(_)));
    }

    #[test]
    fn test_retry_classification() {
        assert!(SendError::Network("connection reset".to_string()).is_retryable());
        assert!(SendError::Status(StatusCode::TOO_MANY_REQUESTS, String::new()).is_retryable());
        assert!(SendError::Status(StatusCode::BAD_GATEWAY, String::new()).is_retryable());
        assert!(!SendError::Status(StatusCode::UNAUTHORIZED, String::new()).is_retryable());
        assert!(!SendError::Parse("bad json".to_string()).is_retryable());
    }

    #[test]
    fn test_empty_arguments_become_empty_object() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "check_account_balance", "arguments": ""}
                    }]
                }
            }]
        }))
        .unwrap();

        let outcome = parse_outcome(response).unwrap();
        assert_eq!(outcome.tool_call.unwrap().arguments, json!({}));
    }
}
