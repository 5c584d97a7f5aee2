//! OpenAI-compatible API types
//!
//! These types mirror the OpenAI chat completion response format.

pub mod chat;
pub mod content;
pub mod logprobs;
pub mod message;

pub use chat::{ChatResult, Choice, CompletionUsage, FinishReason};
pub use content::{ImageDetail, ImageUrl, UserMessageContent, VisionContent};
pub use logprobs::{ChoiceLogprobs, TokenLogprob, TopLogprob};
pub use message::{
    AssistantMessageParam, FunctionCall, MessageParam, Role, SystemMessageParam, ToolCall,
    ToolCallType, ToolMessageParam, UserMessageParam,
};
