//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Providers own the process-wide stores (`AuthProvider`, `SettingsProvider`);
//! `ProtectedRoute` gates admin views on the session they expose.

pub mod auth_provider;
pub mod protected_route;
pub mod settings_provider;
