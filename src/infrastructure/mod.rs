//! Infrastructure layer - External service implementations

pub mod cache;
pub mod catalog;
pub mod client;
pub mod logging;
pub mod observability;
pub mod permalink;
pub mod services;
pub mod upstream;
