//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and reads the shared stores
//! (`AppAuth`, `AppSettings`) from context.

pub mod admin;
pub mod home;
pub mod login;
pub mod not_found;
