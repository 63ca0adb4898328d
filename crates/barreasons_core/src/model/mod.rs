//! Domain model for the cancellation reason list.
//!
//! # Responsibility
//! - Define the reason record and its identifier.
//! - Define the single-slot edit state used while renaming a reason.
//!
//! # Invariants
//! - Reason ids are unique within one list.
//! - Text written through mutations is trimmed and non-empty.

pub mod edit;
pub mod reason;
