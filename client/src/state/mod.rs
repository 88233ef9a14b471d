//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`login`, `pulse`, `guard`, `session`) and kept
//! free of Leptos types so transitions can be tested without a DOM.

pub mod guard;
pub mod login;
pub mod pulse;
pub mod session;
