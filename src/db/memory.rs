use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{InteractionLog, MovieRecord, MovieSummary, StoredEmbedding},
    services::metadata_filter::MovieFilter,
};

/// Movie store held entirely in memory
///
/// Records are iterated in insertion order. Used by the test suites and for
/// running the service without a database.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<InMemoryStoreInner>>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    movies: Vec<MovieRecord>,
    embeddings: HashMap<String, Vec<f32>>,
    interactions: Vec<InteractionLog>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a movie, with its embedding when one is given
    pub async fn insert_movie(&self, record: MovieRecord, embedding: Option<Vec<f32>>) {
        let mut inner = self.inner.write().await;
        if let Some(embedding) = embedding {
            inner.embeddings.insert(record.imdb_id.clone(), embedding);
        }
        inner.movies.push(record);
    }

    /// Every interaction logged so far, oldest first
    pub async fn interactions(&self) -> Vec<InteractionLog> {
        self.inner.read().await.interactions.clone()
    }
}

#[async_trait::async_trait]
impl MovieStore for InMemoryStore {
    async fn find_ids(&self, filter: &MovieFilter) -> AppResult<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .movies
            .iter()
            .filter(|movie| filter.matches(movie))
            .map(|movie| movie.imdb_id.clone())
            .collect())
    }

    async fn find_embeddings(&self, ids: &[String]) -> AppResult<Vec<StoredEmbedding>> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| {
                inner.embeddings.get(id).map(|embedding| StoredEmbedding {
                    imdb_id: id.clone(),
                    embedding: Some(embedding.clone()),
                })
            })
            .collect())
    }

    async fn find_summaries(&self, ids: &[String]) -> AppResult<Vec<MovieSummary>> {
        let inner = self.inner.read().await;
        Ok(inner
            .movies
            .iter()
            .filter(|movie| ids.contains(&movie.imdb_id))
            .map(MovieSummary::from)
            .collect())
    }

    async fn distinct_genres(&self) -> AppResult<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .movies
            .iter()
            .flat_map(|movie| movie.genre.iter().cloned())
            .collect())
    }

    async fn insert_interaction(&self, log: &InteractionLog) -> AppResult<()> {
        self.inner.write().await.interactions.push(log.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
