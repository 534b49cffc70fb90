pub mod cache;
pub mod memory;
pub mod postgres;
pub mod store;

pub use cache::{create_redis_client, Cache, CacheKey};
pub use memory::InMemoryStore;
pub use postgres::{create_pool, PgMovieStore};
pub use store::MovieStore;

#[cfg(test)]
pub use store::MockMovieStore;
