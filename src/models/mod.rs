mod interaction;
mod movie;
mod query;

pub use interaction::InteractionLog;
pub use movie::{
    is_unavailable_genre, MovieRecord, MovieSummary, PosterStyle, StoredEmbedding,
    GENRE_UNAVAILABLE,
};
pub use query::{PromptQuery, PromptResponse};
