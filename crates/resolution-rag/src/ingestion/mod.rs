//! JSONL document loading and character-window chunking

mod chunker;
mod loader;

pub use chunker::TextChunker;
pub use loader::JsonlLoader;
