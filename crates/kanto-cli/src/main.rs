mod bootstrap;
mod cli_args;
mod runtime;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap::init_tracing;
use crate::cli_args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    runtime::run(cli).await
}
