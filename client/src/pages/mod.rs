//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (guards, async flows, timers)
//! and delegates rendering details to `components`.

pub mod home;
pub mod login;
