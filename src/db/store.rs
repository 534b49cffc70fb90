use crate::{
    error::AppResult,
    models::{InteractionLog, MovieSummary, StoredEmbedding},
    services::metadata_filter::MovieFilter,
};

/// Document store holding movie metadata, embeddings and the interaction log
///
/// The retrieval pipeline only reads through this trait, apart from
/// `insert_interaction`, which is called from the recorder's background task.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    /// Identifiers of every movie satisfying all active predicates of `filter`
    async fn find_ids(&self, filter: &MovieFilter) -> AppResult<Vec<String>>;

    /// Embedding rows for the given identifiers. Identifiers with no row are
    /// simply absent from the result.
    async fn find_embeddings(&self, ids: &[String]) -> AppResult<Vec<StoredEmbedding>>;

    /// Title and director for the given identifiers
    async fn find_summaries(&self, ids: &[String]) -> AppResult<Vec<MovieSummary>>;

    /// Every genre tag present in the store, unsorted and possibly repeated
    async fn distinct_genres(&self) -> AppResult<Vec<String>>;

    /// Appends one entry to the interaction log
    async fn insert_interaction(&self, log: &InteractionLog) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
