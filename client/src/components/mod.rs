//! Reusable UI component modules.

pub mod outlined_input;
