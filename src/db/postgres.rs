use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{InteractionLog, MovieSummary, StoredEmbedding},
    services::metadata_filter::MovieFilter,
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Movie store backed by PostgreSQL
///
/// Expects these tables to exist:
/// - `movie_details(imdb_id, title, director, genre text[], poster_style, release_date date)`
/// - `movie_embeddings(imdb_id, embedding real[])`
/// - `user_inputs(id uuid, request_id uuid, title, plot, genre, style, is_retro,
///   similar_movies jsonb, generated_prompt, created_at timestamptz)`
#[derive(Clone)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds the candidate query for `filter`, one `AND` clause per active predicate
fn candidate_query(filter: &MovieFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT imdb_id FROM movie_details WHERE TRUE");

    if let Some(genre) = &filter.genre {
        builder.push(" AND ").push_bind(genre.clone()).push(" = ANY(genre)");
    }

    if let Some(style) = filter.poster_style {
        builder.push(" AND poster_style = ").push_bind(style.as_str());
    }

    if let Some((start, end)) = filter.release_range {
        builder
            .push(" AND release_date BETWEEN ")
            .push_bind(start)
            .push(" AND ")
            .push_bind(end);
    }

    builder
}

#[async_trait::async_trait]
impl MovieStore for PgMovieStore {
    async fn find_ids(&self, filter: &MovieFilter) -> AppResult<Vec<String>> {
        let mut builder = candidate_query(filter);
        let ids = builder
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn find_embeddings(&self, ids: &[String]) -> AppResult<Vec<StoredEmbedding>> {
        let rows = sqlx::query_as::<_, StoredEmbedding>(
            r#"
            SELECT imdb_id, embedding
            FROM movie_embeddings
            WHERE imdb_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_summaries(&self, ids: &[String]) -> AppResult<Vec<MovieSummary>> {
        let rows = sqlx::query_as::<_, MovieSummary>(
            r#"
            SELECT imdb_id, title, director
            FROM movie_details
            WHERE imdb_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn distinct_genres(&self) -> AppResult<Vec<String>> {
        let genres = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT unnest(genre)
            FROM movie_details
            WHERE genre IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    async fn insert_interaction(&self, log: &InteractionLog) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_inputs (
                id, request_id, title, plot, genre, style, is_retro,
                similar_movies, generated_prompt, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(log.id)
        .bind(log.request_id)
        .bind(&log.title)
        .bind(&log.plot)
        .bind(&log.genre)
        .bind(&log.style)
        .bind(log.is_retro)
        .bind(sqlx::types::Json(&log.similar_movies))
        .bind(&log.generated_prompt)
        .bind(log.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
