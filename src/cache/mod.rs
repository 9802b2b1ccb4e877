pub mod query_cache;

mod macros;

pub use query_cache::CacheKey;
pub use query_cache::QueryCache;
