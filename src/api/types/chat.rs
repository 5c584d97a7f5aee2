//! Chat completion result types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{logprobs::ChoiceLogprobs, message::MessageParam};
use crate::domain::DecodeError;

/// Reason for completion finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    /// Deprecated in favor of `ToolCalls`
    FunctionCall,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
            Self::FunctionCall => "function_call",
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinishReason {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stop" => Ok(Self::Stop),
            "length" => Ok(Self::Length),
            "tool_calls" => Ok(Self::ToolCalls),
            "content_filter" => Ok(Self::ContentFilter),
            "function_call" => Ok(Self::FunctionCall),
            other => Err(DecodeError::type_mismatch(format!(
                "unknown finish reason `{}`",
                other
            ))),
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUsage {
    /// Tokens in the generated completion
    pub completion_tokens: u32,
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Prompt plus completion
    pub total_tokens: u32,
}

impl CompletionUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            completion_tokens,
            prompt_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }

    /// The API promises `total = prompt + completion`; this does not enforce it
    pub fn is_consistent(&self) -> bool {
        u64::from(self.prompt_tokens) + u64::from(self.completion_tokens)
            == u64::from(self.total_tokens)
    }
}

/// A choice in the chat completion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<ChoiceLogprobs>,
    pub message: MessageParam,
    /// Kept as the raw string so that new values never fail decoding.
    /// See [`Choice::finish_reason_kind`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Choice {
    /// Known finish reason, `None` when absent or unrecognized
    pub fn finish_reason_kind(&self) -> Option<FinishReason> {
        self.finish_reason.as_deref()?.parse().ok()
    }
}

/// Chat completion result (OpenAI format)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub id: String,
    /// Always `chat.completion`
    pub object: String,
    /// Unix timestamp in seconds. Compatible servers may send a fraction.
    pub created: f64,
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
    /// Backend configuration fingerprint, for use with the request `seed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,
}

impl ChatResult {
    /// Decode a response body
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::finish_decode(serde_json::from_slice(bytes))
    }

    /// Decode an already parsed response body
    pub fn from_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        Self::finish_decode(serde_json::from_value(value))
    }

    fn finish_decode(result: Result<Self, serde_json::Error>) -> Result<Self, DecodeError> {
        match result {
            Ok(decoded) => {
                debug!(
                    id = %decoded.id,
                    model = %decoded.model,
                    choices = decoded.choices.len(),
                    "Decoded chat completion"
                );
                Ok(decoded)
            }
            Err(e) => {
                let error = DecodeError::from(e);
                warn!(error = %error, "Failed to decode chat completion");
                Err(error)
            }
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Creation time, `None` if `created` is not finite or out of range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        if !self.created.is_finite() {
            return None;
        }

        let seconds = self.created.floor();
        let nanos = ((self.created - seconds) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(seconds as i64, nanos)
    }

    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }
}

impl FromStr for ChatResult {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::finish_decode(serde_json::from_str(s))
    }
}
