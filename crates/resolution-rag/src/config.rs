//! Configuration for the RAG system

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_PATH_ENV: &str = "RAG_CONFIG";

/// Main RAG system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Source document configuration
    pub data: DataConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Hosted model configuration
    pub llm: LlmConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
}

impl RagConfig {
    /// Load configuration: `.env`, then the TOML file (if any), then environment overrides
    ///
    /// The file is taken from `path`, or from `RAG_CONFIG` when `path` is `None`.
    /// Without either, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // A missing .env file is the normal case
        let _ = dotenv::dotenv();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("RAG_DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }
        if let Some(host) = lookup("RAG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("RAG_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid RAG_PORT value: {}", port),
            }
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            if self.llm.provider == LlmBackend::Gemini {
                self.llm.model = model;
            }
        }
        if self.llm.api_key.is_none() {
            self.llm.api_key = lookup(&self.llm.api_key_env);
        }
    }

    /// Reject configurations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunking.chunk_size must be positive".to_string()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.embeddings.dimensions == 0 {
            return Err(Error::Config("embeddings.dimensions must be positive".to_string()));
        }
        if self.embeddings.batch_size == 0 {
            return Err(Error::Config("embeddings.batch_size must be positive".to_string()));
        }
        if self.data.text_field.is_empty() {
            return Err(Error::Config("data.text_field must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Source document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Line-delimited JSON file with one record per document
    pub path: PathBuf,
    /// Field holding the document body; every other field becomes metadata
    pub text_field: String,
    /// Build the index at startup instead of on the first query
    pub eager_index: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data.jsonl"),
            text_field: "texto_completo".to_string(),
            eager_index: true,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,
    /// Prefer ending a chunk right after whitespace
    pub respect_whitespace: bool,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            respect_whitespace: true,
        }
    }
}

/// Which embedding implementation to use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local feature hashing, no model download
    #[default]
    Hashing,
    /// Ollama `/api/embeddings`
    Ollama,
    /// Sentence-transformers ONNX model (requires the `onnx` feature)
    Onnx,
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding implementation
    pub provider: EmbeddingBackend,
    /// Model name (Ollama model or sentence-transformers repo name)
    pub model: String,
    /// Embedding dimensions (384 for MiniLM)
    pub dimensions: usize,
    /// Chunks embedded per batch while building the index
    pub batch_size: usize,
    /// Maximum sequence length (ONNX only)
    pub max_length: usize,
    /// Cache directory for downloaded models
    pub cache_dir: PathBuf,
    /// Ollama base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingBackend::Hashing,
            model: "all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 32,
            max_length: 256,
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("resolution-rag")
                .join("models"),
            base_url: "http://localhost:11434".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Which hosted model API to call
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// Google Generative Language API (API key)
    #[default]
    Gemini,
    /// Local Ollama server (no credential)
    Ollama,
}

/// Hosted model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model API
    pub provider: LlmBackend,
    /// Model identifier
    pub model: String,
    /// Sampling temperature; 0.0 keeps answers reproducible
    pub temperature: f32,
    /// API key; read from `api_key_env` when not set in the file
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API base URL; the provider default is used when unset
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Output token limit (provider default when unset)
    pub max_output_tokens: Option<u32>,
}

impl LlmConfig {
    /// Base URL for the configured provider
    pub fn resolved_base_url(&self) -> String {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, LlmBackend::Gemini) => {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }
            (None, LlmBackend::Ollama) => "http://localhost:11434".to_string(),
        }
    }

    /// The API key, if one is set and not blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmBackend::Gemini,
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.0,
            api_key: None,
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: None,
            timeout_secs: 120,
            max_output_tokens: None,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Chunks retrieved per question
    pub top_k: usize,
    /// Upper bound for a per-request `top_k`
    pub max_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_top_k: 50,
        }
    }
}
