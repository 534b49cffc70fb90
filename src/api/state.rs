use std::sync::Arc;

use crate::{
    db::MovieStore,
    services::{EmbeddingModel, GenreCatalog, InteractionRecorder, PromptService},
};

/// Shared application state
///
/// Built once at start-up. Cloning is cheap: every field is a handle.
#[derive(Clone)]
pub struct AppState {
    pub prompt_service: PromptService,
    pub genre_catalog: GenreCatalog,
}

impl AppState {
    pub fn new(prompt_service: PromptService, genre_catalog: GenreCatalog) -> Self {
        Self {
            prompt_service,
            genre_catalog,
        }
    }

    /// Wires the services over one store and model, without a genre cache
    pub fn from_parts(
        store: Arc<dyn MovieStore>,
        model: Arc<dyn EmbeddingModel>,
        recorder: InteractionRecorder,
        top_k: usize,
    ) -> Self {
        let prompt_service = PromptService::new(store.clone(), model, recorder, top_k);
        let genre_catalog = GenreCatalog::new(store);
        Self::new(prompt_service, genre_catalog)
    }
}
