//! Line-delimited JSON document loading

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{Metadata, RawDocument};

/// Reads one `RawDocument` per non-blank line of a JSONL file
pub struct JsonlLoader {
    /// Input file
    path: PathBuf,
    /// Field holding the document body
    text_field: String,
}

impl JsonlLoader {
    /// Create a loader for `path`, taking the body from `text_field`
    pub fn new(path: impl Into<PathBuf>, text_field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text_field: text_field.into(),
        }
    }

    /// Input file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record of the file
    ///
    /// Any unreadable file or malformed line fails the whole load; a partial
    /// corpus would silently change answers.
    pub fn load(&self) -> Result<Vec<RawDocument>> {
        let source = self.path.display().to_string();

        let file = File::open(&self.path).map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                "file not found".to_string()
            } else {
                format!("cannot open file: {}", e)
            };
            Error::ingestion(&source, message)
        })?;

        let mut documents = Vec::new();

        for (line_idx, line) in BufReader::new(file).lines().enumerate() {
            let line_number = line_idx + 1;
            let line = line.map_err(|e| {
                Error::ingestion(&source, format!("line {}: cannot read: {}", line_number, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let document = self.parse_line(&line, line_number)?;
            documents.push(document.with_source(&source, line_number));
        }

        tracing::info!("Loaded {} documents from {}", documents.len(), source);

        Ok(documents)
    }

    /// Parse one record
    fn parse_line(&self, line: &str, line_number: usize) -> Result<RawDocument> {
        let source = self.path.display().to_string();

        let value: Value = serde_json::from_str(line).map_err(|e| {
            Error::ingestion(&source, format!("line {}: malformed JSON: {}", line_number, e))
        })?;

        let Value::Object(mut record) = value else {
            return Err(Error::ingestion(
                &source,
                format!("line {}: expected a JSON object", line_number),
            ));
        };

        let text = match record.remove(&self.text_field) {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => {
                return Err(Error::ingestion(
                    &source,
                    format!("line {}: missing field '{}'", line_number, self.text_field),
                ));
            }
            // Non-string bodies are kept as their JSON text
            Some(other) => other.to_string(),
        };

        let metadata: Metadata = record;
        Ok(RawDocument::new(text, metadata))
    }
}
