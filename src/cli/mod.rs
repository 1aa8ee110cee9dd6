//! CLI module for the NLP demo gateway
//!
//! - `serve`: run the gateway
//! - `predict`: run a demo's model against a running gateway and print the result

pub mod predict;
pub mod render;
pub mod serve;

use clap::{Parser, Subcommand};

/// NLP demo gateway - model APIs, permalinks and a terminal demo client
#[derive(Parser)]
#[command(name = "nlp-demo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the gateway
    Serve,

    /// Run a demo model and render its output
    Predict(predict::PredictArgs),
}
