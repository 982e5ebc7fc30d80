use std::process::ExitCode;
use std::sync::Arc;

use api::{ApiConfig, HttpJobsApi, JobsApi};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{
    CliError, Output, cmd_create, cmd_delete, cmd_list, cmd_options, cmd_show, cmd_update,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable with --json.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    tracing::debug!(base_url = %config.base_url, "Using jobs backend");

    let api: Arc<dyn JobsApi> = Arc::new(HttpJobsApi::new(config)?);
    let out = Output { json: cli.json };

    match cli.command {
        Commands::List(args) => cmd_list(api, &args, out).await,
        Commands::Show { id } => cmd_show(api, &id, out).await,
        Commands::Create(args) => cmd_create(api, args, out).await,
        Commands::Update { id, fields } => cmd_update(api, &id, fields, out).await,
        Commands::Delete { id } => cmd_delete(api, &id, out).await,
        Commands::Options { search } => cmd_options(api, search.as_deref(), out).await,
    }
}
