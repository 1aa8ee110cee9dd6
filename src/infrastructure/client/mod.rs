//! HTTP client for the demo API, used by the terminal client

mod demo_client;

pub use demo_client::DemoClient;
