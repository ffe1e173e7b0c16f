//! Dispatcher/agent adapter
//!
//! Single-shot mapping from one user turn to {commentary, payload}:
//! natural-language understanding is delegated entirely to the LLM's
//! tool-calling feature, and every failure class degrades to a
//! conversational message so no turn can take the session down.

use crate::error::AgentError;
use crate::llm::{ChatMessage, ChatModel, ChatRequest};
use crate::models::AgentReply;
use crate::session::{ConversationTurn, Role};
use crate::tools::ToolRegistry;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fixed system instruction sent on every turn.
///
/// The bank-balance rule is deliberate: an unqualified "bank balance"
/// request must be disambiguated between the Paytm-style JSON enquiry and
/// the ISO-formatted enquiry before any builder is invoked.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an intelligent assistant specialized in generating structured financial requests based on user queries. \
Your primary function is to interpret user inputs and create appropriate JSON or ISO 8583 formatted requests for various financial operations.

Follow these steps:
1. If the user mentions 'bank balance' without specifying the type, ask them to clarify whether they want a Paytm balance or an ISO format bank balance.
2. Once the type is clear, check if all required parameters are provided.
3. If any required information is missing, ask the user to provide it. Never invent missing values.
4. Only generate the request when all necessary information is available.
5. Do not include any sensitive information like actual account numbers or passwords in your responses, and do not ask users for real card numbers, CVVs, or passwords.
6. Use emojis occasionally to maintain a friendly tone.

Available balance enquiry types:
1. Paytm Balance Enquiry (JSON format)
2. Bank Balance Enquiry (ISO 8583 format)

Remember to always clarify the type of balance enquiry before proceeding. \
Every answer must be strictly either in JSON format or ISO 8583 format, never both in one answer. \
If the user asks for a Paytm Balance Enquiry you must respond with the request in JSON format. \
If the user asks for a Bank Balance Enquiry you must respond in ISO 8583 format.";

const SERVICE_UNAVAILABLE_REPLY: &str =
    "The request generator is temporarily unavailable. Please try again in a moment.";

const DISPATCH_FAILURE_REPLY: &str =
    "Something went wrong while generating that request. Please try again.";

const NOT_CONFIGURED_REPLY: &str =
    "The request generator is not configured with an LLM API credential yet.";

const DEFAULT_PAYLOAD_COMMENTARY: &str = "Here is the generated request:";

/// Translates a user utterance plus history into at most one builder
/// invocation, via the LLM's structured tool-calling.
pub struct Dispatcher {
    model: Arc<dyn ChatModel>,
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(model: Arc<dyn ChatModel>, registry: Arc<ToolRegistry>) -> Self {
        Self { model, registry }
    }

    fn build_request(&self, user_text: &str, history: &[ConversationTurn]) -> ChatRequest {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_INSTRUCTION));

        for turn in history {
            let message = match turn.role {
                Role::User => ChatMessage::user(&turn.content),
                Role::Assistant => ChatMessage::assistant(&turn.content),
            };
            messages.push(message);
        }

        messages.push(ChatMessage::user(user_text));

        ChatRequest {
            messages,
            tools: self.registry.tool_definitions(),
        }
    }

    /// Handle one user turn. Never fails the session: transport faults,
    /// unknown builders, and bad arguments all come back as commentary.
    pub async fn handle(&self, user_text: &str, history: &[ConversationTurn]) -> AgentReply {
        let request = self.build_request(user_text, history);

        let outcome = match self.model.complete(&request).await {
            Ok(outcome) => outcome,
            Err(AgentError::Transport(message)) => {
                warn!("LLM transport failure after retries: {}", message);
                return AgentReply::commentary(SERVICE_UNAVAILABLE_REPLY);
            }
            Err(AgentError::Config(message)) => {
                warn!("LLM not configured: {}", message);
                return AgentReply::commentary(NOT_CONFIGURED_REPLY);
            }
            Err(e) => {
                error!("LLM call failed: {}", e);
                return AgentReply::commentary(DISPATCH_FAILURE_REPLY);
            }
        };

        let Some(call) = outcome.tool_call else {
            // Plain reply: clarification question or general response.
            let commentary = outcome
                .commentary
                .unwrap_or_else(|| DISPATCH_FAILURE_REPLY.to_string());
            return AgentReply::commentary(commentary);
        };

        // Log the builder name only; argument values may be user-sensitive.
        info!(builder = %call.name, "Invoking request builder");

        match self.registry.invoke(&call.name, &call.arguments) {
            Ok(payload) => {
                let commentary = outcome
                    .commentary
                    .unwrap_or_else(|| DEFAULT_PAYLOAD_COMMENTARY.to_string());
                AgentReply::with_payload(commentary, payload)
            }
            Err(AgentError::InvalidArgument(message)) => {
                info!(builder = %call.name, "Rejected builder arguments: {}", message);
                AgentReply::commentary(format!(
                    "I couldn't use those details ({}). Could you restate the request with the correct values?",
                    message
                ))
            }
            Err(AgentError::ToolNotFound(name)) => {
                error!(builder = %name, "LLM selected a builder that is not registered");
                AgentReply::commentary(DISPATCH_FAILURE_REPLY)
            }
            Err(e) => {
                error!(builder = %call.name, "Builder invocation failed: {}", e);
                AgentReply::commentary(DISPATCH_FAILURE_REPLY)
            }
        }
    }
}
