use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::PromptQuery;

/// Append-only record of one prompt generation, stored in `user_inputs`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionLog {
    pub id: Uuid,
    /// Request that produced the entry, when it came in over HTTP
    pub request_id: Option<Uuid>,
    pub title: String,
    pub plot: String,
    pub genre: Option<String>,
    pub style: Option<String>,
    pub is_retro: bool,
    pub similar_movies: BTreeMap<String, String>,
    pub generated_prompt: String,
    pub created_at: DateTime<Utc>,
}

impl InteractionLog {
    pub fn new(
        query: &PromptQuery,
        request_id: Option<Uuid>,
        similar_movies: BTreeMap<String, String>,
        generated_prompt: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            title: query.title.clone(),
            plot: query.plot.clone(),
            genre: query.genre.clone(),
            style: query.style.clone(),
            is_retro: query.is_retro,
            similar_movies,
            generated_prompt,
            created_at: Utc::now(),
        }
    }
}
