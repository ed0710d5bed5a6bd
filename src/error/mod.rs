//! Error handling for the economics model
//!
//! Every record is either fully constructed or rejected with one of these errors.
//! Derived values (issuance, rewards, fees, conversions) never fail once a record exists.

use std::fmt;

/// Result type alias for economics operations
pub type Result<T> = std::result::Result<T, EconomicsError>;

/// Error types for record construction, configuration and input loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EconomicsError {
    /// A `0x`-prefixed hex quantity failed to parse (carries the raw input)
    MalformedHex(String),
    /// A decimal-in-string explorer field failed to parse
    MalformedDecimal { field: String, value: String },
    /// A required key is absent from the raw mapping
    MissingField(String),
    /// A structural invariant of the payload is violated
    MalformedPayload(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
    /// JSON/TOML decoding errors
    Serialization(String),
}

impl fmt::Display for EconomicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomicsError::MalformedHex(raw) => write!(f, "Malformed hex quantity: {raw:?}"),
            EconomicsError::MalformedDecimal { field, value } => {
                write!(f, "Malformed decimal in field '{field}': {value:?}")
            }
            EconomicsError::MissingField(name) => write!(f, "Missing required field: {name}"),
            EconomicsError::MalformedPayload(msg) => write!(f, "Malformed payload: {msg}"),
            EconomicsError::Config(msg) => write!(f, "Configuration error: {msg}"),
            EconomicsError::Io(msg) => write!(f, "I/O error: {msg}"),
            EconomicsError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for EconomicsError {}

impl From<std::io::Error> for EconomicsError {
    fn from(err: std::io::Error) -> Self {
        EconomicsError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EconomicsError {
    fn from(err: serde_json::Error) -> Self {
        EconomicsError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EconomicsError {
    fn from(err: toml::de::Error) -> Self {
        EconomicsError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EconomicsError::MissingField("gasUsed".to_string());
        assert_eq!(err.to_string(), "Missing required field: gasUsed");

        let err = EconomicsError::MalformedHex("1a".to_string());
        assert_eq!(err.to_string(), "Malformed hex quantity: \"1a\"");

        let err = EconomicsError::MalformedDecimal {
            field: "gas".to_string(),
            value: "-1".to_string(),
        };
        assert!(err.to_string().contains("'gas'"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EconomicsError = parse_err.into();
        assert!(matches!(err, EconomicsError::Serialization(_)));
    }
}
