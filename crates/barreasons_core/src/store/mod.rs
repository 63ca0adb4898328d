//! Persisted store port and its implementations.
//!
//! # Responsibility
//! - Define the opaque key-value slot contract the list is mirrored into.
//! - Provide in-memory and SQLite-backed slot implementations.
//! - Bridge list snapshots to the slot (encode on write, hydrate on startup).
//!
//! # Invariants
//! - The list lives under exactly one key; no other keys are written.
//! - Every write replaces the whole serialized list.

pub mod kv;
pub mod persistence;
pub mod sqlite_kv;
