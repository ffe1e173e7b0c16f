//! Financial Request Generator
//!
//! A chat-driven generator of structured financial requests:
//! - A fixed catalog of pure request builders (JSON and pseudo-ISO-8583 templates)
//! - An ordered tool registry shown to the LLM for selection
//! - A dispatcher that delegates natural-language understanding to an
//!   external LLM's tool-calling feature
//! - Thin HTTP and CLI conversation shells
//!
//! FLOW:
//! USER TEXT → DISPATCHER → LLM (tool selection) → BUILDER → PAYLOAD

pub mod api;
pub mod dispatcher;
pub mod error;
pub mod llm;
pub mod models;
pub mod session;
pub mod tools;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use session::{ConversationTurn, Role, Session};
