use std::collections::{BTreeMap, HashMap};

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, PosterStyle, PromptQuery},
    services::knn::Neighbor,
};

pub const UNKNOWN_TITLE: &str = "unknown title";
pub const UNKNOWN_DIRECTOR: &str = "unknown director";

/// Ranked search output joined with metadata, plus the rendered prompt
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledResult {
    pub ranked_ids: Vec<String>,
    /// Title to director. A later movie with the same title replaces an
    /// earlier one.
    pub movie_titles: BTreeMap<String, String>,
    pub prompt: String,
}

/// Prompt template family, chosen by the query's style selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    Illustration,
    RealisticPhotography,
    Default,
}

impl PromptTemplate {
    pub fn for_query(query: &PromptQuery) -> Self {
        match query.poster_style() {
            Some(PosterStyle::Illustration) => PromptTemplate::Illustration,
            Some(PosterStyle::RealisticPhotography) => PromptTemplate::RealisticPhotography,
            Some(PosterStyle::DigitalArt3d) | None => PromptTemplate::Default,
        }
    }

    pub fn render(&self, plot: &str, description: &str, count: usize, title: &str) -> String {
        match self {
            PromptTemplate::Illustration => format!(
                "Create an image (no text) for the poster for a movie with this plot: {plot}. \
                 The top {count} closest movies are {description}. \
                 Generate a poster that is in a flat-image illustration style. \
                 The text '{title}' must be clearly visible as the title."
            ),
            PromptTemplate::RealisticPhotography => format!(
                "Create an image (no text) that prominently features a close-up of the face of \
                 main subject for the poster for a movie with this plot: {plot}. \
                 The top {count} closest movies are {description}. \
                 Generate a poster that stylistically resembles that of the similar movies. \
                 The text '{title}' must be clearly visible as the title."
            ),
            PromptTemplate::Default => format!(
                "Create an image (no text) for the poster for a movie with this plot: {plot}. \
                 The top {count} closest movies are {description}. \
                 Generate a poster that stylistically resembles that of the similar movies. \
                 The text '{title}' must be clearly visible as the title."
            ),
        }
    }
}

/// Maps search hits back to movie identifiers and renders the prompt
///
/// `present_ids` must be the identifier list the index was built from, so
/// that each neighbor's position resolves to its movie.
pub fn assemble(
    query: &PromptQuery,
    neighbors: &[Neighbor],
    present_ids: &[String],
    summaries: &HashMap<String, MovieSummary>,
) -> AppResult<AssembledResult> {
    let ranked_ids = neighbors
        .iter()
        .map(|neighbor| {
            present_ids.get(neighbor.position).cloned().ok_or_else(|| {
                AppError::Internal(format!(
                    "neighbor position {} outside candidate list of {}",
                    neighbor.position,
                    present_ids.len()
                ))
            })
        })
        .collect::<AppResult<Vec<String>>>()?;

    let mut movie_titles = BTreeMap::new();
    let mut entries = Vec::with_capacity(ranked_ids.len());

    for id in &ranked_ids {
        let summary = summaries.get(id);
        let title = summary
            .and_then(|s| s.title.as_deref())
            .unwrap_or(UNKNOWN_TITLE);
        let director = summary
            .and_then(|s| s.director.as_deref())
            .unwrap_or(UNKNOWN_DIRECTOR);

        entries.push(format!("{} by {}", title, director));
        movie_titles.insert(title.to_string(), director.to_string());
    }

    let description = entries.join(", ");
    let prompt = PromptTemplate::for_query(query).render(
        &query.plot,
        &description,
        ranked_ids.len(),
        &query.title,
    );

    Ok(AssembledResult {
        ranked_ids,
        movie_titles,
        prompt,
    })
}
