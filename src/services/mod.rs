pub mod embedding;
pub mod generation;
pub mod genres;
pub mod knn;
pub mod metadata_filter;
pub mod prompt;
pub mod recorder;
pub mod vector_fetch;

pub use embedding::{EmbeddingModel, HttpEmbeddingModel};
pub use generation::PromptService;
pub use genres::GenreCatalog;
pub use recorder::{InteractionRecorder, RecorderHandle};
