//! Reason domain model.
//!
//! # Responsibility
//! - Define the record shown to staff when they cancel an order.
//! - Provide text normalization shared by every write path.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the record and never reused.
//! - Text is validated on mutation only; hydrated records are trusted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier of one reason.
///
/// Serialized as a bare string so hydrated ids (`"1"`, timestamp strings,
/// UUIDs) survive a round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonId(String);

impl ReasonId {
    /// Wraps an existing identifier verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ReasonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReasonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ReasonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation error for reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonValidationError {
    /// Text is empty or whitespace-only after trimming.
    EmptyText,
}

impl Display for ReasonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "reason text cannot be empty"),
        }
    }
}

impl Error for ReasonValidationError {}

/// One cancellation reason.
///
/// Serialized as `{"id": "...", "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub id: ReasonId,
    pub text: String,
}

impl Reason {
    /// Creates a reason with a caller-provided id from user input.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `text` is blank after trimming.
    pub fn with_id(id: ReasonId, text: &str) -> Result<Self, ReasonValidationError> {
        Ok(Self {
            id,
            text: normalize_text(text)?,
        })
    }
}

/// Trims user input and rejects blank values.
pub fn normalize_text(text: &str) -> Result<String, ReasonValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ReasonValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Returns the fixed example list used when nothing has been stored yet.
pub fn seed_reasons() -> Vec<Reason> {
    [
        ("1", "Out of ingredients"),
        ("2", "Customer changed mind"),
        ("3", "Equipment malfunction"),
    ]
    .into_iter()
    .map(|(id, text)| Reason {
        id: ReasonId::new(id),
        text: text.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, seed_reasons, Reason, ReasonId, ReasonValidationError};

    #[test]
    fn normalize_text_trims_and_rejects_blank() {
        assert_eq!(normalize_text("  Spill \n").unwrap(), "Spill");
        assert_eq!(
            normalize_text(" \t ").unwrap_err(),
            ReasonValidationError::EmptyText
        );
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(ReasonId::generate(), ReasonId::generate());
    }

    #[test]
    fn with_id_stores_trimmed_text_and_rejects_blank() {
        let reason = Reason::with_id(ReasonId::new("9"), "  Too loud  ").unwrap();
        assert_eq!(reason.text, "Too loud");
        assert_eq!(reason.id.as_str(), "9");
        assert_eq!(
            Reason::with_id(ReasonId::new("9"), "\t").unwrap_err(),
            ReasonValidationError::EmptyText
        );
    }

    #[test]
    fn seed_has_three_ordered_entries() {
        let seed = seed_reasons();
        let ids: Vec<&str> = seed.iter().map(|reason| reason.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(seed[0].text, "Out of ingredients");
    }
}
