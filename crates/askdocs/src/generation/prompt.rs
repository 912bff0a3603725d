//! Prompt template for grounded question answering

/// The phrase the model is instructed to emit when the context does not
/// contain the answer.
pub const NOT_KNOWN_PHRASE: &str = "I don't know";

/// Prompt builder for grounded queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full prompt from retrieved context and the question
    ///
    /// One fixed template with exactly two placeholders, substituted
    /// verbatim. The model is told to answer only from the context.
    pub fn build_prompt(context: &str, question: &str) -> String {
        format!(
            r#"You are a helpful assistant.
Answer ONLY using the given context.
If the answer is not present, say "{not_known}".

Context:
{context}

Question:
{question}

Answer:
"#,
            not_known = NOT_KNOWN_PHRASE,
            context = context,
            question = question
        )
    }
}
