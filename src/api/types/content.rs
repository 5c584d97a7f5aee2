//! User message content: plain text or a list of text/image parts

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fidelity requested for an image part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    Auto,
    Low,
    High,
}

/// Image reference inside a content part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Either a URL of the image or base64 encoded image data
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImageDetail>,
}

impl ImageUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: ImageDetail) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Content part for multimodal user messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisionContent {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl VisionContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl::new(url),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::ImageUrl { .. } => None,
        }
    }
}

/// Content of a user message
///
/// The API sends no tag for this union. Decoding tries a plain string first
/// and falls back to a list of [`VisionContent`] parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserMessageContent {
    Text(String),
    Parts(Vec<VisionContent>),
}

impl UserMessageContent {
    /// Get the text content, concatenating text parts if needed
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(VisionContent::as_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn parts(&self) -> &[VisionContent] {
        match self {
            Self::Text(_) => &[],
            Self::Parts(parts) => parts,
        }
    }
}

impl From<String> for UserMessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for UserMessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<VisionContent>> for UserMessageContent {
    fn from(parts: Vec<VisionContent>) -> Self {
        Self::Parts(parts)
    }
}

impl<'de> Deserialize<'de> for UserMessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        let text_err = match String::deserialize(&value) {
            Ok(text) => return Ok(Self::Text(text)),
            Err(err) => err,
        };

        let parts_err = match Vec::<VisionContent>::deserialize(&value) {
            Ok(parts) => return Ok(Self::Parts(parts)),
            Err(err) => err,
        };

        Err(de::Error::custom(format_args!(
            "user message content: expected a string or an array of content parts \
             (as string: {}; as content parts: {})",
            text_err, parts_err
        )))
    }
}
