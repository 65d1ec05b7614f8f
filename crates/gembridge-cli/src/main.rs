//! CLI entry point - the composition root.

use clap::Parser;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use gembridge_cli::{Cli, CliError, bootstrap, init_tracing};
use gembridge_proxy::serve;

#[tokio::main]
async fn main() {
    // Load .env before parsing so env-backed flags see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let (state, server) = bootstrap(&cli)?;

    let addr = server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CliError::Io(format!("Failed to bind {addr}: {e}")))?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                cancel.cancel();
            }
        }
    });

    serve(listener, state, server.cors, cancel).await?;
    Ok(())
}
