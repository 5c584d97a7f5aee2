use serde_json::error::Category;
use thiserror::Error;

/// Failure to decode a chat completion response
///
/// `line` and `column` are the 1-based position reported by `serde_json`
/// when decoding from text, and 0 when decoding from a `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Missing field: {message}")]
    MissingField {
        field: String,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Type mismatch: {message}")]
    TypeMismatch {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Malformed JSON: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

impl DecodeError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::MissingField {
            message: format!("missing field `{}`", field),
            field,
            line: 0,
            column: 0,
        }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    /// Name of the absent field, for `MissingField` errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Message without the position suffix
    pub fn message(&self) -> &str {
        match self {
            Self::MissingField { message, .. }
            | Self::TypeMismatch { message, .. }
            | Self::Syntax { message, .. } => message,
        }
    }

    /// Position in the input text, if the error was raised while reading text
    pub fn position(&self) -> Option<(usize, usize)> {
        let (line, column) = match self {
            Self::MissingField { line, column, .. }
            | Self::TypeMismatch { line, column, .. }
            | Self::Syntax { line, column, .. } => (*line, *column),
        };

        (line > 0).then_some((line, column))
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        let message = strip_position(err.to_string(), line, column);

        match err.classify() {
            Category::Data => match missing_field_name(&message) {
                Some(field) => Self::MissingField {
                    field,
                    message,
                    line,
                    column,
                },
                None => Self::TypeMismatch {
                    message,
                    line,
                    column,
                },
            },
            _ => Self::Syntax {
                message,
                line,
                column,
            },
        }
    }
}

/// serde_json appends " at line L column C" when it knows the position
fn strip_position(message: String, line: usize, column: usize) -> String {
    if line == 0 {
        return message;
    }

    let suffix = format!(" at line {} column {}", line, column);
    match message.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => message,
    }
}

/// Only a message that *starts* with serde's missing-field wording counts.
/// Union exhaustion errors may quote one further in and stay type mismatches.
fn missing_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Probe {
        id: String,
        count: u32,
    }

    #[test]
    fn test_missing_field_from_text() {
        let err: DecodeError = serde_json::from_str::<Probe>("{\"count\": 1}")
            .unwrap_err()
            .into();

        assert!(err.is_missing_field());
        assert_eq!(err.field(), Some("id"));
        assert_eq!(err.message(), "missing field `id`");
        assert!(err.position().is_some());
    }

    #[test]
    fn test_type_mismatch_from_value() {
        let value = serde_json::json!({"id": "x", "count": "many"});
        let err: DecodeError = serde_json::from_value::<Probe>(value).unwrap_err().into();

        assert!(err.is_type_mismatch());
        assert!(err.message().starts_with("invalid type: string \"many\""));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_syntax_error() {
        let err: DecodeError = serde_json::from_str::<Probe>("{\"id\": \"x\",")
            .unwrap_err()
            .into();

        assert!(matches!(err, DecodeError::Syntax { .. }));
        assert!(err.to_string().starts_with("Malformed JSON: "));
    }

    #[test]
    fn test_constructors() {
        let error = DecodeError::missing_field("choices");
        assert_eq!(error.to_string(), "Missing field: missing field `choices`");
        assert_eq!(error.field(), Some("choices"));

        let error = DecodeError::type_mismatch("expected a list");
        assert_eq!(error.to_string(), "Type mismatch: expected a list");
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_nested_missing_field_is_not_misread() {
        let err = DecodeError::from(<serde_json::Error as serde::de::Error>::custom(
            "user message content: expected a string (missing field `url`)",
        ));

        assert!(err.is_type_mismatch());
    }
}
