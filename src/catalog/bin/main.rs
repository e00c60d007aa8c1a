use std::net::SocketAddr;
use std::process::ExitCode;
use clap::Parser;
use tracing::{error, info};
use shelf::catalog::controller::build_router;
use shelf::catalog::factory::create_catalog_service;
use shelf::core::args::ServerArgs;
use shelf::core::controller::AppState;
use shelf::utils::logging::{setup_tracing, LogFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();
    let config = args.to_configuration();
    setup_tracing(LogFormat::Json, config.log_level.as_str());

    let addr: SocketAddr = match config.bind_address.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!("invalid bind address {}: {}", config.bind_address, err);
            return ExitCode::FAILURE;
        }
    };
    let catalog = match create_catalog_service(&config) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("failed to start catalog: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let app = build_router(AppState::new(config, catalog));

    info!("catalog api listening on {}", addr);
    let server = match axum::Server::try_bind(&addr) {
        Ok(builder) => builder.serve(app.into_make_service()),
        Err(err) => {
            error!("failed to bind {}: {}", addr, err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = server.await {
        error!("server error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
