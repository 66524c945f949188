//! Query request types

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Query request for the RAG pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve (configured default when omitted)
    #[serde(default)]
    pub top_k: Option<usize>,
}

impl QueryRequest {
    /// Create a new query
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: None,
        }
    }

    /// Set the number of results to retrieve
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Trimmed question, rejecting blank input
    pub fn validated_question(&self) -> Result<&str> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(Error::InvalidRequest("question must not be empty".to_string()));
        }
        Ok(question)
    }

    /// Requested k, falling back to `default` and capped at `max`
    pub fn effective_top_k(&self, default: usize, max: usize) -> usize {
        self.top_k.unwrap_or(default).min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_question_rejected() {
        let request = QueryRequest::new("   ");
        assert!(matches!(
            request.validated_question(),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_top_k_defaults_and_cap() {
        assert_eq!(QueryRequest::new("q").effective_top_k(5, 50), 5);
        assert_eq!(QueryRequest::new("q").with_top_k(3).effective_top_k(5, 50), 3);
        assert_eq!(QueryRequest::new("q").with_top_k(500).effective_top_k(5, 50), 50);
    }

    #[test]
    fn test_deserialize_without_top_k() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "¿Quién fue designado Director?"}"#).unwrap();
        assert_eq!(request.top_k, None);
        assert_eq!(
            request.validated_question().unwrap(),
            "¿Quién fue designado Director?"
        );
    }
}
