use std::collections::{HashMap, HashSet};

use crate::{
    db::MovieStore,
    error::{AppError, AppResult},
};

/// Embeddings resolved for a candidate set
///
/// `vectors[i]` belongs to `present_ids[i]`. Both follow the order the
/// identifiers were requested in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedVectors {
    pub vectors: Vec<Vec<f32>>,
    pub present_ids: Vec<String>,
    pub missing_ids: Vec<String>,
}

/// Resolves candidate identifiers to their stored embedding vectors
///
/// Identifiers with no stored vector are reported in `missing_ids` and logged.
/// Fails with [`AppError::NoEmbeddings`] when none of them has a vector.
pub async fn fetch_vectors(store: &dyn MovieStore, ids: &[String]) -> AppResult<FetchedVectors> {
    let rows = store.find_embeddings(ids).await?;

    let mut by_id: HashMap<String, Vec<f32>> = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(embedding) = row.embedding {
            // First row wins when the store holds duplicates
            by_id.entry(row.imdb_id).or_insert(embedding);
        }
    }

    let mut fetched = FetchedVectors::default();
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    for id in ids {
        // Duplicate candidate ids collapse to their first occurrence
        if !seen.insert(id.as_str()) {
            continue;
        }
        match by_id.remove(id) {
            Some(vector) => {
                fetched.vectors.push(vector);
                fetched.present_ids.push(id.clone());
            }
            None => fetched.missing_ids.push(id.clone()),
        }
    }

    if !fetched.missing_ids.is_empty() {
        tracing::warn!(
            missing_count = fetched.missing_ids.len(),
            missing_ids = ?fetched.missing_ids,
            "Missing embeddings for candidate movies"
        );
    }

    if fetched.vectors.is_empty() {
        return Err(AppError::NoEmbeddings);
    }

    Ok(fetched)
}
