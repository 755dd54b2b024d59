//! Shared constants for city-explorer.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Port the HTTP server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Per-request timeout for upstream provider calls, in seconds.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Prefix joined with TMDB `poster_path` to build a movie image URL.
pub const TMDB_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w200_and_h300_bestv2/";

/// Yelp search term used for the business lookup.
pub const YELP_SEARCH_TERM: &str = "restaurants";
