//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues HTTP calls and defines the call-group traits, `types` defines
//! the wire schema, and `error` the failure taxonomy shared by both.

pub mod api;
pub mod error;
pub mod types;
