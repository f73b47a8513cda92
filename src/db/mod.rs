pub mod memory;
pub mod redis;
pub mod repository;

pub use self::memory::InMemoryStore;
pub use self::redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
pub use self::repository::{PreferencesRepository, WatchlistRepository};
