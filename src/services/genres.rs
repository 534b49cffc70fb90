use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    db::{Cache, CacheKey, MovieStore},
    error::AppResult,
    models::is_unavailable_genre,
};

/// Read-only listing of the genres present in the store
#[derive(Clone)]
pub struct GenreCatalog {
    store: Arc<dyn MovieStore>,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl GenreCatalog {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self {
            store,
            cache: None,
            cache_ttl: 0,
        }
    }

    /// Serves the genre list from Redis for `ttl` seconds between store reads
    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    /// Sorted, de-duplicated genre tags without the "unavailable" sentinel
    ///
    /// Cache failures fall back to the store.
    pub async fn list_genres(&self) -> AppResult<Vec<String>> {
        if let Some(cache) = &self.cache {
            match cache.get_from_cache::<Vec<String>>(&CacheKey::Genres).await {
                Ok(Some(genres)) => {
                    tracing::debug!(count = genres.len(), "Genre cache hit");
                    return Ok(genres);
                }
                Ok(None) => tracing::debug!("Genre cache miss"),
                Err(e) => tracing::warn!(error = %e, "Genre cache read failed"),
            }
        }

        let genres = normalize_genres(self.store.distinct_genres().await?);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set_in_cache(&CacheKey::Genres, &genres, self.cache_ttl).await {
                tracing::warn!(error = %e, "Genre cache write failed");
            }
        }

        Ok(genres)
    }
}

/// Drops sentinel and blank tags, then sorts and de-duplicates
fn normalize_genres(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .filter(|tag| !is_unavailable_genre(tag))
        .map(|tag| tag.trim().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_redis_client, MockMovieStore};
    use tokio_test::assert_ok;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_sorts_dedupes_and_drops_sentinels() {
        let genres = normalize_genres(tags(&["Noir", "Drama", "unavailable", "Noir", "N/A", " ", "Action"]));
        assert_eq!(genres, tags(&["Action", "Drama", "Noir"]));
    }

    #[tokio::test]
    async fn test_empty_store_yields_empty_list() {
        let mut store = MockMovieStore::new();
        store.expect_distinct_genres().returning(|| Ok(vec![]));

        let catalog = GenreCatalog::new(Arc::new(store));
        let genres = assert_ok!(catalog.list_genres().await);
        assert!(genres.is_empty());
    }

    #[tokio::test]
    async fn test_list_genres_is_idempotent() {
        let mut store = MockMovieStore::new();
        store
            .expect_distinct_genres()
            .times(2)
            .returning(|| Ok(tags(&["Sci-Fi", "Crime", "unavailable"])));

        let catalog = GenreCatalog::new(Arc::new(store));
        let first = catalog.list_genres().await.unwrap();
        let second = catalog.list_genres().await.unwrap();

        assert_eq!(first, tags(&["Crime", "Sci-Fi"]));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unreachable_cache_falls_back_to_store() {
        let mut store = MockMovieStore::new();
        store
            .expect_distinct_genres()
            .times(1)
            .returning(|| Ok(tags(&["Noir", "Drama", "unavailable", "Noir"])));

        // Opening the client does not connect, so reads and writes fail at call time
        let cache = Cache::new(create_redis_client("redis://127.0.0.1:1").unwrap());
        let cached = GenreCatalog::new(Arc::new(store)).with_cache(cache, 60);

        let mut plain_store = MockMovieStore::new();
        plain_store
            .expect_distinct_genres()
            .returning(|| Ok(tags(&["Noir", "Drama", "unavailable", "Noir"])));
        let plain = GenreCatalog::new(Arc::new(plain_store));

        let genres = assert_ok!(cached.list_genres().await);
        assert_eq!(genres, tags(&["Drama", "Noir"]));
        assert_eq!(genres, plain.list_genres().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_error_surfaces_behind_failing_cache() {
        let mut store = MockMovieStore::new();
        store
            .expect_distinct_genres()
            .returning(|| Err(crate::error::AppError::Internal("store down".to_string())));

        let cache = Cache::new(create_redis_client("redis://127.0.0.1:1").unwrap());
        let catalog = GenreCatalog::new(Arc::new(store)).with_cache(cache, 60);

        assert!(catalog.list_genres().await.is_err());
    }
}
