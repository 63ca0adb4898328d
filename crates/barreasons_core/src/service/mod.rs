//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory reason list and its mutation rules.
//! - Keep UI/FFI layers decoupled from persistence details.

pub mod reason_list;
