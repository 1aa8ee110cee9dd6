//! Permalink repository trait

use std::fmt::Debug;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{NewPermalink, Permalink};
use crate::domain::DomainError;

/// Storage for permalinks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PermalinkRepository: Send + Sync + Debug {
    /// Stores a new permalink and returns its id
    async fn insert(&self, permalink: NewPermalink) -> Result<u64, DomainError>;

    /// Finds a permalink by id
    async fn get(&self, id: u64) -> Result<Option<Permalink>, DomainError>;
}
