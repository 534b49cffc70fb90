use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{InteractionLog, PromptQuery, PromptResponse},
    services::{
        embedding::EmbeddingModel,
        knn::EphemeralIndex,
        metadata_filter::filter_candidates,
        prompt::assemble,
        recorder::InteractionRecorder,
        vector_fetch::fetch_vectors,
    },
};

/// Runs prompt generation requests through the retrieval pipeline
///
/// Holds only shared, immutable handles. Every request builds its own index
/// and nothing is retained between requests.
#[derive(Clone)]
pub struct PromptService {
    store: Arc<dyn MovieStore>,
    model: Arc<dyn EmbeddingModel>,
    recorder: InteractionRecorder,
    top_k: usize,
}

impl PromptService {
    pub fn new(
        store: Arc<dyn MovieStore>,
        model: Arc<dyn EmbeddingModel>,
        recorder: InteractionRecorder,
        top_k: usize,
    ) -> Self {
        Self {
            store,
            model,
            recorder,
            top_k,
        }
    }

    /// Finds the movies closest to the query's plot and derives a poster prompt
    ///
    /// The pipeline:
    /// 1. Validate title and plot (before touching the store or the model)
    /// 2. Filter candidates by genre, poster style and release window
    /// 3. Fetch candidate embeddings, logging any that are missing
    /// 4. Embed the plot and search an index built over the candidates
    /// 5. Join titles and directors and render the prompt
    /// 6. Queue the interaction for logging without waiting on it
    pub async fn generate_prompt(
        &self,
        query: PromptQuery,
        request_id: Option<Uuid>,
    ) -> AppResult<PromptResponse> {
        query.validate()?;
        let start = Instant::now();

        let candidate_ids = filter_candidates(self.store.as_ref(), &query).await?;
        let fetched = fetch_vectors(self.store.as_ref(), &candidate_ids).await?;

        let query_vector = self.model.encode(&query.plot).await?;

        let neighbors = {
            let index = EphemeralIndex::build(fetched.vectors)?;
            index.search(&query_vector, self.top_k)?
        };

        let nearest_ids: Vec<String> = neighbors
            .iter()
            .filter_map(|n| fetched.present_ids.get(n.position).cloned())
            .collect();
        let summaries: HashMap<_, _> = self
            .store
            .find_summaries(&nearest_ids)
            .await?
            .into_iter()
            .map(|summary| (summary.imdb_id.clone(), summary))
            .collect();

        let assembled = assemble(&query, &neighbors, &fetched.present_ids, &summaries)?;

        tracing::info!(
            candidates = candidate_ids.len(),
            embedded = fetched.present_ids.len(),
            missing = fetched.missing_ids.len(),
            returned = assembled.ranked_ids.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Prompt generated"
        );
        tracing::debug!(prompt = %assembled.prompt, "Rendered prompt");

        self.recorder.record(InteractionLog::new(
            &query,
            request_id,
            assembled.movie_titles.clone(),
            assembled.prompt.clone(),
        ));

        Ok(PromptResponse {
            imdb_ids: assembled.ranked_ids,
            movie_titles: assembled.movie_titles,
            prompt: assembled.prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockMovieStore;
    use crate::error::AppError;
    use crate::models::{MovieSummary, StoredEmbedding};
    use crate::services::embedding::MockEmbeddingModel;
    use tokio_test::assert_err;

    fn query() -> PromptQuery {
        PromptQuery {
            title: "X".to_string(),
            plot: "a detective in rain".to_string(),
            ..Default::default()
        }
    }

    fn model_returning(vector: Vec<f32>) -> MockEmbeddingModel {
        let mut model = MockEmbeddingModel::new();
        model.expect_encode().returning(move |_| Ok(vector.clone()));
        model.expect_dimensions().return_const(2usize);
        model
    }

    /// Store with three candidates, of which B has no embedding
    fn store_with_candidates(insert_result: fn() -> AppResult<()>) -> MockMovieStore {
        let mut store = MockMovieStore::new();
        store.expect_name().return_const("mock");
        store
            .expect_find_ids()
            .returning(|_| Ok(vec!["A".to_string(), "B".to_string(), "C".to_string()]));
        store.expect_find_embeddings().returning(|_| {
            Ok(vec![
                StoredEmbedding {
                    imdb_id: "A".to_string(),
                    embedding: Some(vec![5.0, 5.0]),
                },
                StoredEmbedding {
                    imdb_id: "C".to_string(),
                    embedding: Some(vec![1.0, 0.0]),
                },
            ])
        });
        store.expect_find_summaries().returning(|ids| {
            Ok(ids
                .iter()
                .map(|id| MovieSummary {
                    imdb_id: id.clone(),
                    title: Some(format!("Movie {}", id)),
                    director: Some(format!("Director {}", id)),
                })
                .collect())
        });
        store.expect_insert_interaction().returning(move |_| insert_result());
        store
    }

    #[tokio::test]
    async fn test_blank_input_rejected_before_store_access() {
        // No expectations: any store or model call would panic
        let store = MockMovieStore::new();
        let model = MockEmbeddingModel::new();
        let mut log_store = MockMovieStore::new();
        log_store.expect_name().return_const("mock");
        let (recorder, handle) = InteractionRecorder::spawn(Arc::new(log_store));
        let service = PromptService::new(Arc::new(store), Arc::new(model), recorder, 5);

        let blank_title = PromptQuery {
            title: "  ".to_string(),
            ..query()
        };
        let err = assert_err!(service.generate_prompt(blank_title, None).await);
        assert!(matches!(err, AppError::Validation(_)));

        let blank_plot = PromptQuery {
            plot: "\t".to_string(),
            ..query()
        };
        let err = assert_err!(service.generate_prompt(blank_plot, None).await);
        assert!(matches!(err, AppError::Validation(_)));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_pipeline_skips_missing_embeddings() {
        let store: Arc<dyn MovieStore> = Arc::new(store_with_candidates(|| Ok(())));
        let (recorder, handle) = InteractionRecorder::spawn(store.clone());
        let service = PromptService::new(store, Arc::new(model_returning(vec![0.0, 0.0])), recorder, 5);

        let response = service.generate_prompt(query(), None).await.unwrap();
        handle.shutdown().await;

        assert_eq!(response.imdb_ids, vec!["C".to_string(), "A".to_string()]);
        assert_eq!(response.movie_titles["Movie C"], "Director C");
        assert!(response
            .prompt
            .contains("The top 2 closest movies are Movie C by Director C, Movie A by Director A."));
    }

    #[tokio::test]
    async fn test_top_k_limits_results() {
        let store: Arc<dyn MovieStore> = Arc::new(store_with_candidates(|| Ok(())));
        let (recorder, handle) = InteractionRecorder::spawn(store.clone());
        let service = PromptService::new(store, Arc::new(model_returning(vec![4.0, 4.0])), recorder, 1);

        let response = service.generate_prompt(query(), None).await.unwrap();
        handle.shutdown().await;

        assert_eq!(response.imdb_ids, vec!["A".to_string()]);
    }

    #[tokio::test]
    async fn test_recorder_failure_does_not_fail_request() {
        let store: Arc<dyn MovieStore> = Arc::new(store_with_candidates(|| {
            Err(AppError::Internal("connection reset".to_string()))
        }));
        let (recorder, handle) = InteractionRecorder::spawn(store.clone());
        let service = PromptService::new(store, Arc::new(model_returning(vec![0.0, 0.0])), recorder, 5);

        let response = service.generate_prompt(query(), None).await;
        handle.shutdown().await;

        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_model_dimension_mismatch_is_index_error() {
        let store: Arc<dyn MovieStore> = Arc::new(store_with_candidates(|| Ok(())));
        let (recorder, handle) = InteractionRecorder::spawn(store.clone());
        let service =
            PromptService::new(store, Arc::new(model_returning(vec![0.0, 0.0, 0.0])), recorder, 5);

        let result = service.generate_prompt(query(), None).await;
        handle.shutdown().await;

        assert!(matches!(result, Err(AppError::IndexBuild(_))));
    }
}
