//! Log probability detail attached to a choice

use serde::{Deserialize, Serialize};

/// Log probability information for a choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceLogprobs {
    /// Per-token log probabilities of the message content
    #[serde(default)]
    pub content: Option<Vec<TokenLogprob>>,
}

impl ChoiceLogprobs {
    pub fn tokens(&self) -> &[TokenLogprob] {
        self.content.as_deref().unwrap_or_default()
    }

    /// Concatenated UTF-8 bytes of every token that carries them
    pub fn text_bytes(&self) -> Vec<u8> {
        self.tokens()
            .iter()
            .filter_map(|t| t.bytes.as_deref())
            .flatten()
            .copied()
            .collect()
    }
}

/// Log probability of one generated token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLogprob {
    pub token: String,
    /// UTF-8 bytes of the token. A character split across several tokens only
    /// decodes once the bytes are combined. `None` when the token has no byte
    /// representation.
    ///
    /// A value outside 0..=255 fails the whole decode as a type mismatch.
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    pub logprob: f64,
    /// Most likely tokens at this position. May hold fewer entries than
    /// requested.
    pub top_logprobs: Vec<TopLogprob>,
}

impl TokenLogprob {
    pub fn probability(&self) -> f64 {
        self.logprob.exp()
    }
}

/// One alternative token at a position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopLogprob {
    pub token: String,
    /// UTF-8 bytes of the token, same rules as [`TokenLogprob::bytes`]
    #[serde(default)]
    pub bytes: Option<Vec<u8>>,
    pub logprob: f64,
}

impl TopLogprob {
    pub fn probability(&self) -> f64 {
        self.logprob.exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_logprob_fields() {
        let logprob: TokenLogprob = serde_json::from_value(json!({
            "token": "Hi",
            "bytes": [72, 105],
            "logprob": -0.25,
            "top_logprobs": [
                {"token": "Hi", "bytes": [72, 105], "logprob": -0.25},
                {"token": "Hello", "bytes": null, "logprob": -1.5}
            ]
        }))
        .unwrap();

        assert_eq!(logprob.token, "Hi");
        assert_eq!(logprob.bytes, Some(vec![72, 105]));
        assert_eq!(logprob.logprob, -0.25);
        assert_eq!(logprob.top_logprobs.len(), 2);
        assert_eq!(logprob.top_logprobs[1].bytes, None);
    }

    #[test]
    fn test_logprob_must_be_numeric() {
        let result = serde_json::from_value::<TopLogprob>(json!({
            "token": "Hi",
            "logprob": "low"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_top_logprobs_required() {
        let err = serde_json::from_value::<TokenLogprob>(json!({
            "token": "Hi",
            "logprob": -0.1
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "missing field `top_logprobs`");
    }

    #[test]
    fn test_out_of_range_byte_is_type_mismatch() {
        let response = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hi"},
                "logprobs": {"content": [{
                    "token": "Hi",
                    "bytes": [72, 300],
                    "logprob": -0.1,
                    "top_logprobs": []
                }]}
            }]
        });

        let err = crate::ChatResult::from_value(response).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.message().contains("300"));
    }

    #[test]
    fn test_probability() {
        let top = TopLogprob {
            token: "a".to_string(),
            bytes: None,
            logprob: 0.0,
        };
        assert_eq!(top.probability(), 1.0);
    }

    #[test]
    fn test_text_bytes_joins_split_character() {
        // "é" split across two tokens
        let logprobs: ChoiceLogprobs = serde_json::from_value(json!({
            "content": [
                {"token": "\\xc3", "bytes": [195], "logprob": -0.1, "top_logprobs": []},
                {"token": "\\xa9", "bytes": [169], "logprob": -0.2, "top_logprobs": []},
                {"token": "<eos>", "bytes": null, "logprob": -0.3, "top_logprobs": []}
            ]
        }))
        .unwrap();

        assert_eq!(logprobs.tokens().len(), 3);
        assert_eq!(String::from_utf8(logprobs.text_bytes()).unwrap(), "é");
    }

    #[test]
    fn test_null_content() {
        let logprobs: ChoiceLogprobs = serde_json::from_value(json!({"content": null})).unwrap();
        assert!(logprobs.tokens().is_empty());
        assert!(logprobs.text_bytes().is_empty());
    }
}
