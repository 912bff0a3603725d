//! Prompt assembly for grounded generation

mod prompt;

pub use prompt::{PromptBuilder, NOT_KNOWN_PHRASE};
