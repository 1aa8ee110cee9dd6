//! Upstream infrastructure - HTTP access to model servers

mod http_backend;
mod http_client;
mod resolver;

pub use http_backend::HttpModelBackend;
pub use http_client::{HttpClient, HttpClientTrait};
pub use resolver::UrlResolver;
