//! Chat message parameters, dispatched on the `role` field

use serde::{
    de::{self, Error as _, Unexpected},
    Deserialize, Deserializer, Serialize,
};
use serde_json::Value;

use super::content::UserMessageContent;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessageParam {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessageParam {
    pub content: UserMessageContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessageParam {
    /// Absent when the assistant only requested tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMessageParam {
    pub content: String,
    /// Tool call this message answers
    pub tool_call_id: String,
}

/// Kind of tool call. The API only defines functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallType {
    Function,
}

/// Tool call requested by the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: ToolCallType,
    pub function: FunctionCall,
}

/// Function call details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments as JSON text, exactly as generated by the model
    pub arguments: String,
}

impl FunctionCall {
    /// Parse the arguments text. The model may emit invalid JSON.
    pub fn parsed_arguments(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.arguments)
    }
}

/// A chat message, one variant per role
///
/// Decoding reads `role` first and then decodes the whole object again as
/// the matching variant. Unknown roles are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum MessageParam {
    System(SystemMessageParam),
    User(UserMessageParam),
    Assistant(AssistantMessageParam),
    Tool(ToolMessageParam),
}

impl MessageParam {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(SystemMessageParam {
            content: content.into(),
            name: None,
        })
    }

    pub fn user(content: impl Into<UserMessageContent>) -> Self {
        Self::User(UserMessageParam {
            content: content.into(),
            name: None,
        })
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(AssistantMessageParam {
            content: Some(content.into()),
            name: None,
            tool_calls: None,
        })
    }

    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self::Tool(ToolMessageParam {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            Self::System(_) => Role::System,
            Self::User(_) => Role::User,
            Self::Assistant(_) => Role::Assistant,
            Self::Tool(_) => Role::Tool,
        }
    }

    /// Text content of the message, text parts joined by newlines
    pub fn text(&self) -> Option<String> {
        match self {
            Self::System(m) => Some(m.content.clone()),
            Self::User(m) => Some(m.content.to_text()),
            Self::Assistant(m) => m.content.clone(),
            Self::Tool(m) => Some(m.content.clone()),
        }
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant(AssistantMessageParam {
                tool_calls: Some(calls),
                ..
            }) => calls,
            _ => &[],
        }
    }
}

impl<'de> Deserialize<'de> for MessageParam {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        let Some(object) = value.as_object() else {
            return Err(de::Error::invalid_type(
                unexpected(&value),
                &"a chat message object",
            ));
        };

        let role = object
            .get("role")
            .ok_or_else(|| D::Error::missing_field("role"))?;
        let role = Role::deserialize(role).map_err(D::Error::custom)?;

        match role {
            Role::System => SystemMessageParam::deserialize(value).map(Self::System),
            Role::User => UserMessageParam::deserialize(value).map(Self::User),
            Role::Assistant => AssistantMessageParam::deserialize(value).map(Self::Assistant),
            Role::Tool => ToolMessageParam::deserialize(value).map(Self::Tool),
        }
        .map_err(D::Error::custom)
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Unexpected::Unsigned(u)
            } else if let Some(i) = n.as_i64() {
                Unexpected::Signed(i)
            } else {
                Unexpected::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
