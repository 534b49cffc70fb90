use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Genre tag the catalog uses for movies with no known genre
pub const GENRE_UNAVAILABLE: &str = "unavailable";

/// Older imports wrote this instead of [`GENRE_UNAVAILABLE`]
const LEGACY_GENRE_UNAVAILABLE: &str = "N/A";

/// Returns true for genre tags that mark missing data rather than a real genre
pub fn is_unavailable_genre(tag: &str) -> bool {
    let tag = tag.trim();
    tag.is_empty()
        || tag.eq_ignore_ascii_case(GENRE_UNAVAILABLE)
        || tag == LEGACY_GENRE_UNAVAILABLE
}

/// Visual style a stored poster was classified under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosterStyle {
    #[serde(rename = "illustration")]
    Illustration,
    #[serde(rename = "realistic_photography")]
    RealisticPhotography,
    #[serde(rename = "3d_digital_art")]
    DigitalArt3d,
}

impl PosterStyle {
    /// Canonical tag as stored in the `poster_style` column
    pub fn as_str(&self) -> &'static str {
        match self {
            PosterStyle::Illustration => "illustration",
            PosterStyle::RealisticPhotography => "realistic_photography",
            PosterStyle::DigitalArt3d => "3d_digital_art",
        }
    }

    /// Parses a style selector sent by a client.
    ///
    /// Accepts the canonical tags as well as the display labels shown in the
    /// poster style dropdown. Anything else yields `None`.
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector.trim() {
            "illustration" | "Illustration (Animated)" => Some(PosterStyle::Illustration),
            "realistic_photography" | "Realistic Photography" => {
                Some(PosterStyle::RealisticPhotography)
            }
            "3d_digital_art" | "3D Digital Art" => Some(PosterStyle::DigitalArt3d),
            _ => None,
        }
    }
}

impl Display for PosterStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Movie metadata as held in the `movie_details` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub imdb_id: String,
    pub title: Option<String>,
    pub director: Option<String>,
    pub genre: Vec<String>,
    pub poster_style: Option<PosterStyle>,
    pub release_date: Option<NaiveDate>,
}

/// Title and director projection used when rendering prompts
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: Option<String>,
    pub director: Option<String>,
}

impl From<&MovieRecord> for MovieSummary {
    fn from(record: &MovieRecord) -> Self {
        Self {
            imdb_id: record.imdb_id.clone(),
            title: record.title.clone(),
            director: record.director.clone(),
        }
    }
}

/// A row of the `movie_embeddings` table. A null vector counts as missing.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StoredEmbedding {
    pub imdb_id: String,
    pub embedding: Option<Vec<f32>>,
}
