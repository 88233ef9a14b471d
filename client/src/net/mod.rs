//! Networking modules for the user lookup REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and the `UserLookup` seam, `types` defines the
//! shared wire schema.

pub mod api;
pub mod types;
