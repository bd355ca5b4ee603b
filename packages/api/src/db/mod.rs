//! PostgreSQL access for the server functions.
//!
//! Server builds only. [`get_pool`] opens the pool lazily from `DATABASE_URL`
//! with the sizes in the `[database]` section of `shelfmark.toml`, and every
//! later call returns the same pool.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
