//! Text encoding of the reason list for the persisted slot.
//!
//! # Responsibility
//! - Encode a full list snapshot as one JSON string.
//! - Decode a stored string back into an ordered list.
//!
//! # Invariants
//! - Encoding is a JSON array of `{"id", "text"}` objects in list order.
//! - No schema version field is written or expected.

use crate::model::reason::Reason;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Error raised when a stored list cannot be encoded or decoded.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid reason list encoding: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Encodes the full list snapshot.
pub fn encode_reasons(reasons: &[Reason]) -> CodecResult<String> {
    Ok(serde_json::to_string(reasons)?)
}

/// Decodes a stored list snapshot, preserving order and ids verbatim.
pub fn decode_reasons(raw: &str) -> CodecResult<Vec<Reason>> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::{decode_reasons, encode_reasons};
    use crate::model::reason::{Reason, ReasonId};

    #[test]
    fn encode_uses_id_and_text_fields() {
        let reasons = vec![Reason {
            id: ReasonId::new("1"),
            text: "Out of ingredients".to_string(),
        }];
        assert_eq!(
            encode_reasons(&reasons).unwrap(),
            r#"[{"id":"1","text":"Out of ingredients"}]"#
        );
    }

    #[test]
    fn decode_accepts_empty_array() {
        assert!(decode_reasons("[]").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        let err = decode_reasons(r#"{"id":"1"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid reason list encoding"));
    }
}
