//! UI-facing bridge for the reason list core.
//! Dart bindings are generated from `api` by flutter_rust_bridge codegen.

pub mod api;
