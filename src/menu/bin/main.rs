use std::process::ExitCode;
use clap::Parser;
use tokio::io::{self, BufReader};
use tracing::error;
use shelf::catalog::factory::create_catalog_service;
use shelf::core::args::MenuArgs;
use shelf::menu::console::ConsoleMenu;
use shelf::utils::logging::{setup_tracing, LogFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let args = MenuArgs::parse();
    let config = args.catalog.to_configuration();
    setup_tracing(LogFormat::Text, config.log_level.as_str());

    let catalog = match create_catalog_service(&config) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("failed to start catalog: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut menu = ConsoleMenu::new(catalog, BufReader::new(io::stdin()), io::stdout());
    if let Err(err) = menu.run().await {
        error!("terminal error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
