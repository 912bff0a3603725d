//! Response types for the ask endpoint

use serde::{Deserialize, Serialize};

/// POST /api/ask response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The generated answer
    pub answer: String,
}

impl AskResponse {
    /// Create a response from an answer string
    pub fn new(answer: String) -> Self {
        Self { answer }
    }
}
