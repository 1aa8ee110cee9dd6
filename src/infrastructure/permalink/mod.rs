//! Permalink storage backends

mod in_memory;
mod postgres;

pub use in_memory::InMemoryPermalinkRepository;
pub use postgres::PostgresPermalinkRepository;
