//! Chat completion result models
//!
//! Decoding schemas for chat completion API responses:
//! - The completion result, its choices and token usage
//! - Per-token log probabilities
//! - Chat messages dispatched on their `role`
//! - User content that is either plain text or a list of text/image parts
//!
//! Decoding is pure and synchronous. Transport, authentication and
//! streaming belong to the caller.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::types::{
    AssistantMessageParam, ChatResult, Choice, ChoiceLogprobs, CompletionUsage, FinishReason,
    FunctionCall, ImageDetail, ImageUrl, MessageParam, Role, SystemMessageParam, TokenLogprob,
    ToolCall, ToolCallType, ToolMessageParam, TopLogprob, UserMessageContent, UserMessageParam,
    VisionContent,
};
pub use config::{LogFormat, LoggingConfig};
pub use domain::DecodeError;
pub use infrastructure::init_logging;

/// Decode a chat completion response body
pub fn decode_chat_result(body: &[u8]) -> Result<ChatResult, DecodeError> {
    ChatResult::from_slice(body)
}
