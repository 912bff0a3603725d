//! The question-answering chain
//!
//! An explicit, owned composition of retriever, prompt builder, and
//! generation client. Built once at startup; holds no per-request state,
//! so concurrent calls are independent.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::LlmProvider;
use crate::retrieval::Retriever;
use crate::types::ScoredChunk;

/// Reply for empty or whitespace-only questions
pub const EMPTY_QUESTION_REPLY: &str = "Please enter a question.";

/// Retriever → prompt → LLM, one method per stage
pub struct RagChain {
    retriever: Retriever,
    llm: Arc<dyn LlmProvider>,
}

impl RagChain {
    /// Assemble the chain
    pub fn new(retriever: Retriever, llm: Arc<dyn LlmProvider>) -> Self {
        Self { retriever, llm }
    }

    /// Answer a question from the indexed documents
    pub async fn answer(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Ok(EMPTY_QUESTION_REPLY.to_string());
        }

        let retrieved = self.retriever.retrieve(question).await?;
        let context = Self::format_context(&retrieved);
        let prompt = PromptBuilder::build_prompt(&context, question);
        let raw = self.llm.generate(&prompt).await?;

        Ok(Self::format_answer(raw))
    }

    /// Join retrieved chunk texts into one context block
    fn format_context(chunks: &[ScoredChunk]) -> String {
        chunks
            .iter()
            .map(|c| c.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Post-process the model output before returning it
    ///
    /// Currently the identity; kept as the place where answer formatting
    /// (e.g. source annotation) would go.
    fn format_answer(answer: String) -> String {
        answer
    }
}
