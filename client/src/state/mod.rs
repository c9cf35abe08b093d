//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `settings`) so individual components can
//! depend on small focused stores. Each store is an explicit value provided
//! through Leptos context rather than an ambient global.

pub mod auth;
pub mod settings;
