use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PosterStyle;
use crate::error::{AppError, AppResult};

/// Request body for prompt generation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptQuery {
    /// Title of the movie the poster is for
    pub title: String,
    /// Free-text plot description, embedded for similarity search
    pub plot: String,
    /// Genre tag to restrict candidates to
    #[serde(default)]
    pub genre: Option<String>,
    /// Poster style selector, either a canonical tag or a display label
    #[serde(default)]
    pub style: Option<String>,
    /// Restrict candidates to movies released 1970 through 1989
    #[serde(default)]
    pub is_retro: bool,
}

impl PromptQuery {
    /// Rejects queries whose title or plot is blank
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() || self.plot.trim().is_empty() {
            return Err(AppError::Validation(
                "Your title or plot description cannot be empty.".to_string(),
            ));
        }
        Ok(())
    }

    /// Requested genre, ignoring blank selections
    pub fn genre_tag(&self) -> Option<&str> {
        self.genre
            .as_deref()
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
    }

    /// Poster style the selector maps to, if it is recognised
    pub fn poster_style(&self) -> Option<PosterStyle> {
        self.style.as_deref().and_then(PosterStyle::from_selector)
    }
}

/// Response body for prompt generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptResponse {
    /// Nearest movies, closest first
    #[serde(rename = "imdbIDs")]
    pub imdb_ids: Vec<String>,
    /// Title to director for the nearest movies
    #[serde(rename = "movieTitles")]
    pub movie_titles: BTreeMap<String, String>,
    pub prompt: String,
}
