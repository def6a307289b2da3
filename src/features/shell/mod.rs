//! Shell integration.

pub mod completions;

pub use completions::{completion_install_instructions, generate_completions};
