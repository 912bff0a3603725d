//! Request types for the ask endpoint

use serde::{Deserialize, Serialize};

/// POST /api/ask request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question
    pub question: String,
}
