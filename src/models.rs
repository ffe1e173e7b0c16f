//! Core data models for the financial request generator

use serde::{Deserialize, Serialize};
use serde_json::Value;

//
// ================= Rendered Payload =================
//

/// Serialization shape of a generated request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    Json,
    XmlTemplate,
}

/// A single generated financial request.
///
/// Immutable once produced; carries no identity beyond its text. The only
/// builder that embeds a freshly generated token is the Stripe payment
/// intent (`metadata.order_id`), which is non-deterministic by design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedPayload {
    pub format: PayloadFormat,
    pub body: String,
}

impl RenderedPayload {
    /// Render a JSON payload with keys in builder-declared order.
    pub fn json(value: &Value) -> crate::Result<Self> {
        Ok(Self {
            format: PayloadFormat::Json,
            body: serde_json::to_string_pretty(value)?,
        })
    }

    /// Wrap an already-templated markup body (pseudo ISO 8583).
    pub fn template(body: String) -> Self {
        Self {
            format: PayloadFormat::XmlTemplate,
            body,
        }
    }
}

//
// ================= Tool Invocation =================
//

/// Structured "call this builder with these arguments" instruction,
/// as extracted from the LLM's tool-call directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    pub arguments: Value,
}

//
// ================= Dispatcher Reply =================
//

/// What one dispatcher turn hands back to the conversation shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub commentary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<RenderedPayload>,
}

impl AgentReply {
    pub fn commentary(text: impl Into<String>) -> Self {
        Self {
            commentary: text.into(),
            payload: None,
        }
    }

    pub fn with_payload(text: impl Into<String>, payload: RenderedPayload) -> Self {
        Self {
            commentary: text.into(),
            payload: Some(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_payload_preserves_declared_key_order() {
        let payload = RenderedPayload::json(&json!({
            "zeta": 1,
            "alpha": 2,
            "mid": 3,
        }))
        .unwrap();

        let zeta = payload.body.find("zeta").unwrap();
        let alpha = payload.body.find("alpha").unwrap();
        let mid = payload.body.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_reply_without_payload_omits_key() {
        let reply = AgentReply::commentary("Which balance enquiry did you mean?");
        let serialized = serde_json::to_string(&reply).unwrap();
        assert!(!serialized.contains("payload"));
    }
}
