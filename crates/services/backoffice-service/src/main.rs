//! Back-office admin CLI.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backoffice_service_lib::cli::{self, Cli};
use backoffice_service_lib::service::Services;
use backoffice_service_lib::BackofficeConfig;
use common::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = BackofficeConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.default_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<AppError>() {
                Some(app) if app.is_fatal() => {
                    tracing::error!(code = app.code(), "{}", app);
                    eprintln!("{}", app.user_message());
                }
                Some(app) => eprintln!("{}", app.user_message()),
                None => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &BackofficeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = backoffice_service_lib::init(config).await?;
    let services = Services::from_connection(db.get_connection());

    match cli::dispatch(cli.command, &services).await? {
        Some(output) => println!("{}", serde_json::to_string_pretty(&output)?),
        None => tracing::info!("Back office initialized"),
    }

    Ok(())
}
