//! Once-per-process index construction

use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::index::FlatIndex;
use crate::error::{Error, Result};
use crate::providers::VectorStoreProvider;

/// Observable state of the shared index
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IndexState {
    /// No build has completed yet
    Pending,
    /// Built and searchable
    Ready { chunks: usize, documents: usize },
    /// The build failed; queries are refused until restart
    Unavailable { message: String },
}

/// Outcome of the build; the error keeps only the message
type BuildOutcome = std::result::Result<Arc<FlatIndex>, String>;

/// Holds the result of the single index build
///
/// Concurrent callers of `get_or_build` wait on the same build. The outcome
/// is cached whether it succeeded or not, so a failed load is not retried
/// on every request.
#[derive(Default)]
pub struct IndexCell {
    cell: OnceCell<BuildOutcome>,
}

impl IndexCell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index, running `build` if no build has happened yet
    pub async fn get_or_build<F, Fut>(&self, build: F) -> Result<Arc<FlatIndex>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FlatIndex>>,
    {
        let outcome = self
            .cell
            .get_or_init(|| async move {
                match build().await {
                    Ok(index) => Ok(Arc::new(index)),
                    Err(e) => {
                        tracing::error!("Index build failed: {}", e);
                        Err(e.to_string())
                    }
                }
            })
            .await;

        Self::to_result(outcome)
    }

    /// Current state without triggering a build
    pub fn state(&self) -> IndexState {
        match self.cell.get() {
            None => IndexState::Pending,
            Some(Ok(index)) => IndexState::Ready {
                chunks: index.len(),
                documents: index.document_count(),
            },
            Some(Err(message)) => IndexState::Unavailable {
                message: message.clone(),
            },
        }
    }

    fn to_result(outcome: &BuildOutcome) -> Result<Arc<FlatIndex>> {
        outcome
            .as_ref()
            .map(Arc::clone)
            .map_err(|message| Error::IndexUnavailable(message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn empty_index() -> FlatIndex {
        FlatIndex::from_embedded(Vec::new(), Vec::new(), 4).unwrap()
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_build() {
        let cell = Arc::new(IndexCell::new());
        let builds = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cell = Arc::clone(&cell);
            let builds = Arc::clone(&builds);
            handles.push(tokio::spawn(async move {
                cell.get_or_build(move || async move {
                    builds.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                    Ok(empty_index())
                })
                .await
                .map(|_| ())
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cell.state(), IndexState::Ready { chunks: 0, documents: 0 });
    }

    #[tokio::test]
    async fn test_failure_is_cached() {
        let cell = IndexCell::new();
        assert_eq!(cell.state(), IndexState::Pending);

        let err = cell
            .get_or_build(|| async { Err(Error::ingestion("data.jsonl", "file not found")) })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IndexUnavailable(ref m) if m.contains("file not found")));

        // A second build closure never runs
        let again = cell.get_or_build(|| async { Ok(empty_index()) }).await;
        assert!(matches!(again, Err(Error::IndexUnavailable(_))));
        assert!(matches!(cell.state(), IndexState::Unavailable { .. }));
    }
}
