use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use sentinelpay::adapter::inbound::cli::command::{Cli, Commands};
use sentinelpay::adapter::inbound::cli::output::{self, OutputConfig};
use sentinelpay::adapter::inbound::cli::{check, payment, provider};
use sentinelpay::infrastructure::bootstrap::Services;
use sentinelpay::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    config.init_logging();
    debug!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Providers => {
            provider::list();
            return Ok(());
        }
        Commands::Check => {
            check::execute(&cli.config, &config);
            return Ok(());
        }
        _ => {}
    }

    let services = Services::build(&config)
        .await
        .context("failed to start services")?;
    info!("sentinelpay started");

    let result = match cli.command {
        Commands::Pay(args) => payment::pay(services.orchestrator.as_ref(), args).await,
        Commands::Show(arg) => payment::show(services.orchestrator.as_ref(), &arg.id).await,
        Commands::List(args) => payment::list(services.orchestrator.as_ref(), args).await,
        Commands::Status(arg) => payment::status(services.orchestrator.as_ref(), &arg.id).await,
        Commands::Settle(args) => payment::settle(services.store.as_ref(), args).await,
        Commands::Providers | Commands::Check => Ok(()),
    };

    services.shutdown().await;
    result?;
    Ok(())
}
