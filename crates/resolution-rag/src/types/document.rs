//! Document and chunk types with source tracking for citations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use uuid::Uuid;

/// Metadata key holding a resolution's title
pub const TITLE_KEY: &str = "titulo";
/// Metadata key holding a resolution's document type
pub const TYPE_KEY: &str = "tipo";
/// Shown when a chunk has no title
pub const DEFAULT_TITLE: &str = "Sin título disponible";
/// Shown when a chunk has no type
pub const DEFAULT_TYPE: &str = "Documento";

/// Record metadata: every top-level field except the text field
pub type Metadata = Map<String, Value>;

/// One record of the input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Document body
    pub text: String,
    /// Remaining record fields (title, type, ...)
    pub metadata: Metadata,
    /// File the record was read from
    pub source: String,
    /// 1-based record number within the file
    pub seq_num: usize,
}

impl RawDocument {
    /// Create a document with metadata
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
            source: String::new(),
            seq_num: 0,
        }
    }

    /// Attach the file position the record came from
    pub fn with_source(mut self, source: impl Into<String>, seq_num: usize) -> Self {
        self.source = source.into();
        self.seq_num = seq_num;
        self
    }
}

/// A window of a document's text, the unit that is embedded and cited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable chunk ID derived from source, record and position
    pub id: Uuid,
    /// Chunk text
    pub text: String,
    /// Metadata copied from the parent document
    pub metadata: Metadata,
    /// Record number of the parent document
    pub document_index: usize,
    /// Position of this chunk within its document
    pub chunk_index: u32,
    /// Character offset (inclusive) in the parent text
    pub char_start: usize,
    /// Character offset (exclusive) in the parent text
    pub char_end: usize,
}

impl Chunk {
    /// Create a chunk of `doc` covering characters `char_start..char_end`
    pub fn new(
        doc: &RawDocument,
        text: String,
        chunk_index: u32,
        char_start: usize,
        char_end: usize,
    ) -> Self {
        let key = format!("{}#{}#{}", doc.source, doc.seq_num, chunk_index);
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()),
            text,
            metadata: doc.metadata.clone(),
            document_index: doc.seq_num,
            chunk_index,
            char_start,
            char_end,
        }
    }

    /// Title for citations
    pub fn title(&self) -> Cow<'_, str> {
        self.metadata_text(TITLE_KEY).unwrap_or(Cow::Borrowed(DEFAULT_TITLE))
    }

    /// Document type for citations
    pub fn doc_type(&self) -> Cow<'_, str> {
        self.metadata_text(TYPE_KEY).unwrap_or(Cow::Borrowed(DEFAULT_TYPE))
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }

    /// Display text of a metadata field; `None` when missing, null or blank.
    /// Non-string values are shown as their JSON text.
    fn metadata_text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.metadata.get(key)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_citation_labels() {
        let doc = RawDocument::new(
            "Se designa a Juan Perez como Director.",
            metadata(json!({"titulo": "RM-001", "tipo": "Resolución"})),
        );
        let chunk = Chunk::new(&doc, doc.text.clone(), 0, 0, 38);

        assert_eq!(chunk.title(), "RM-001");
        assert_eq!(chunk.doc_type(), "Resolución");
        assert_eq!(chunk.char_len(), 38);
    }

    #[test]
    fn test_citation_label_defaults() {
        let doc = RawDocument::new("texto", metadata(json!({"titulo": "", "tipo": null})));
        let chunk = Chunk::new(&doc, doc.text.clone(), 0, 0, 5);
        assert_eq!(chunk.title(), DEFAULT_TITLE);
        assert_eq!(chunk.doc_type(), DEFAULT_TYPE);

        let doc = RawDocument::new("texto", Metadata::new());
        let chunk = Chunk::new(&doc, doc.text.clone(), 0, 0, 5);
        assert_eq!(chunk.title(), DEFAULT_TITLE);
        assert_eq!(chunk.doc_type(), DEFAULT_TYPE);
    }

    #[test]
    fn test_non_string_labels_are_rendered() {
        let doc = RawDocument::new("texto", metadata(json!({"titulo": 2025, "tipo": 7})));
        let chunk = Chunk::new(&doc, doc.text.clone(), 0, 0, 5);

        assert_eq!(chunk.title(), "2025");
        assert_eq!(chunk.doc_type(), "7");
    }

    #[test]
    fn test_chunk_ids_are_stable() {
        let doc = RawDocument::new("abc", Metadata::new()).with_source("data.jsonl", 3);
        let a = Chunk::new(&doc, "abc".to_string(), 0, 0, 3);
        let b = Chunk::new(&doc, "abc".to_string(), 0, 0, 3);
        let c = Chunk::new(&doc, "abc".to_string(), 1, 0, 3);

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.document_index, 3);
    }
}
