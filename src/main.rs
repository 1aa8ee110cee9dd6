use std::process::ExitCode;

use clap::Parser;
use nlp_demo_gateway::cli::{self, Cli, Command};
use nlp_demo_gateway::infrastructure::logging::init_cli_logging;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            cli::serve::run().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Predict(args) => {
            init_cli_logging();
            cli::predict::run(args).await
        }
    }
}
