//! Cache domain - memoisation of model responses

mod key;
mod repository;

pub use key::{body_digest, CacheKeyParams, ResponseKeyGenerator};
pub use repository::{Cache, CacheExt};
