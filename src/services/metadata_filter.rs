use chrono::NaiveDate;

use crate::{
    db::MovieStore,
    error::{AppError, AppResult},
    models::{MovieRecord, PosterStyle, PromptQuery},
};

/// First release date accepted by the retro filter
pub const RETRO_START: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(date) => date,
    None => panic!("invalid retro start date"),
};

/// Last release date accepted by the retro filter
pub const RETRO_END: NaiveDate = match NaiveDate::from_ymd_opt(1989, 12, 31) {
    Some(date) => date,
    None => panic!("invalid retro end date"),
};

/// Conjunction of metadata predicates over movie records
///
/// Each field is one predicate; `None` means the predicate is inactive and
/// imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    /// Genre tag the record's genre list must contain
    pub genre: Option<String>,
    /// Required poster style
    pub poster_style: Option<PosterStyle>,
    /// Inclusive release date range
    pub release_range: Option<(NaiveDate, NaiveDate)>,
}

impl MovieFilter {
    /// Translates the structured fields of a query into predicates
    pub fn from_query(query: &PromptQuery) -> Self {
        Self {
            genre: query.genre_tag().map(str::to_string),
            poster_style: query.poster_style(),
            release_range: query.is_retro.then_some((RETRO_START, RETRO_END)),
        }
    }

    /// Whether `record` satisfies every active predicate
    pub fn matches(&self, record: &MovieRecord) -> bool {
        if let Some(genre) = &self.genre {
            if !record.genre.iter().any(|tag| tag == genre) {
                return false;
            }
        }

        if let Some(style) = self.poster_style {
            if record.poster_style != Some(style) {
                return false;
            }
        }

        if let Some((start, end)) = self.release_range {
            match record.release_date {
                Some(date) if date >= start && date <= end => {}
                _ => return false,
            }
        }

        true
    }
}

/// Returns the identifiers of every stored movie matching the query's filters
///
/// Fails with [`AppError::NoMatch`] when nothing matches.
pub async fn filter_candidates(store: &dyn MovieStore, query: &PromptQuery) -> AppResult<Vec<String>> {
    let filter = MovieFilter::from_query(query);
    let ids = store.find_ids(&filter).await?;

    tracing::debug!(
        genre = ?filter.genre,
        poster_style = ?filter.poster_style,
        retro = filter.release_range.is_some(),
        candidates = ids.len(),
        "Metadata filter applied"
    );

    if ids.is_empty() {
        return Err(AppError::NoMatch);
    }

    Ok(ids)
}
