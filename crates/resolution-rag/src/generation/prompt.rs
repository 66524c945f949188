//! Prompt template for grounded answers

use crate::providers::VectorSearchResult;

/// Delimiter placed between chunk texts in the context block
pub const CONTEXT_DELIMITER: &str = "\n\n";

/// Prompt builder for resolution queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunk texts in rank order
    pub fn build_context(results: &[VectorSearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_DELIMITER)
    }

    /// Fill the answer template with context and question
    pub fn build_rag_prompt(question: &str, context: &str) -> String {
        format!(
            "Eres un asistente experto y formal en normativa del MINAM. \
Responde con precisión y profesionalismo basándote únicamente en el CONTEXTO proporcionado. \
Si la información no está en el contexto, indica de forma clara que no puedes responder.

CONTEXTO: {context}
PREGUNTA: {question}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, Metadata, RawDocument};

    fn result(text: &str) -> VectorSearchResult {
        let doc = RawDocument::new(text, Metadata::new());
        VectorSearchResult {
            chunk: Chunk::new(&doc, text.to_string(), 0, 0, text.chars().count()),
            similarity: 0.5,
        }
    }

    #[test]
    fn test_context_joins_in_order() {
        let context = PromptBuilder::build_context(&[result("primero"), result("segundo")]);
        assert_eq!(context, "primero\n\nsegundo");
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(PromptBuilder::build_context(&[]), "");
    }

    #[test]
    fn test_prompt_contains_context_and_question() {
        let prompt = PromptBuilder::build_rag_prompt("¿Quién?", "Se designa a Juan Perez.");

        assert!(prompt.starts_with("Eres un asistente experto y formal en normativa del MINAM."));
        assert!(prompt.contains("basándote únicamente en el CONTEXTO proporcionado"));
        assert!(prompt.contains("indica de forma clara que no puedes responder"));
        assert!(prompt.contains("CONTEXTO: Se designa a Juan Perez.\nPREGUNTA: ¿Quién?"));
        assert!(prompt.ends_with("PREGUNTA: ¿Quién?"));
    }
}
