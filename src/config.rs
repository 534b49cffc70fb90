use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL
    pub database_url: String,

    /// Maximum size of the PostgreSQL connection pool
    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,

    /// Redis connection URL. Genre caching is disabled when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Time-to-live of the cached genre list, in seconds
    #[serde(default = "default_genre_cache_ttl")]
    pub genre_cache_ttl: u64,

    /// Base URL of an OpenAI-compatible embeddings API
    pub embedding_api_url: String,

    /// Bearer token for the embeddings API
    #[serde(default)]
    pub embedding_api_key: Option<String>,

    /// Embedding model name sent with each request
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Dimensionality of the vectors produced by the model and stored per movie
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// Embeddings API request timeout, in milliseconds
    #[serde(default = "default_embedding_timeout_ms")]
    pub embedding_timeout_ms: u64,

    /// Number of nearest movies used to build a prompt
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_max_db_connections() -> u32 {
    5
}

fn default_genre_cache_ttl() -> u64 {
    86400 // 24 hours
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

fn default_embedding_timeout_ms() -> u64 {
    10_000
}

fn default_top_k() -> usize {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.top_k == 0 {
            anyhow::bail!("TOP_K must be at least 1");
        }
        if self.embedding_dimensions == 0 {
            anyhow::bail!("EMBEDDING_DIMENSIONS must be at least 1");
        }
        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
