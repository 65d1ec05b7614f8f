//! Wiring of configuration into the engine, the backend and the server.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gembridge_core::{
    CompletionEngine, DEFAULT_SYSTEM_PREAMBLE, EngineConfig, GenerationPort, IdStrategy,
    ModelRegistry,
};
use gembridge_gemini::{GeminiClient, GeminiClientConfig};
use gembridge_proxy::{AppState, CorsConfig, ServerConfig};

use crate::error::CliError;
use crate::parser::Cli;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` is honoured unless `verbose` forces debug output.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the application state and server settings from the parsed CLI.
///
/// A missing Gemini key is not fatal: the server starts and reports
/// `gemini_initialized: false`.
pub fn bootstrap(cli: &Cli) -> Result<(AppState, ServerConfig), CliError> {
    if cli.backend_model.trim().is_empty() {
        return Err(CliError::Arguments(
            "backend model must not be empty".to_string(),
        ));
    }

    let backend = gemini_backend(cli)?;
    let registry = ModelRegistry::new(cli.backend_model.clone());
    let engine = CompletionEngine::new(backend, registry, engine_config(cli));

    let server = server_config(cli);
    match server.access_secret.as_deref().filter(|s| !s.is_empty()) {
        Some(secret) => info!(
            secret_prefix = %secret.chars().take(4).collect::<String>(),
            "API key authentication enabled"
        ),
        None => info!("API key authentication disabled"),
    }

    let state = AppState::new(engine, server.guard());
    Ok((state, server))
}

fn gemini_backend(cli: &Cli) -> Result<Option<Arc<dyn GenerationPort>>, CliError> {
    let Some(api_key) = cli.gemini_api_key.as_deref().filter(|k| !k.is_empty()) else {
        warn!("GEMINI_API_KEY not set; chat completions will fail until it is configured");
        return Ok(None);
    };

    let config = GeminiClientConfig::new(api_key).with_base_url(&cli.gemini_base_url);
    let client = GeminiClient::new(config)?;
    info!(
        base_url = %cli.gemini_base_url,
        model = %cli.backend_model,
        "Gemini client initialized"
    );
    Ok(Some(Arc::new(client)))
}

fn engine_config(cli: &Cli) -> EngineConfig {
    EngineConfig {
        system_preamble: cli
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PREAMBLE.to_string()),
        id_strategy: if cli.unique_ids {
            IdStrategy::TimestampWithSuffix
        } else {
            IdStrategy::Timestamp
        },
    }
}

fn server_config(cli: &Cli) -> ServerConfig {
    ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        access_secret: cli.api_key.clone(),
        cors: CorsConfig::from_origins(cli.cors_origins.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["gembridge"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_backend_follows_gemini_key() {
        let (state, _) = tokio_test::assert_ok!(bootstrap(&parse(&[
            "--gemini-api-key",
            "",
            "--backend-model",
            "gemini-2.0-flash-exp",
        ])));
        assert!(!state.engine.is_backend_ready());

        let (state, _) = tokio_test::assert_ok!(bootstrap(&parse(&[
            "--gemini-api-key",
            "k",
            "--backend-model",
            "gemini-2.0-flash-exp",
        ])));
        assert!(state.engine.is_backend_ready());
        assert_eq!(state.engine.registry().resolve("gpt-4"), "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_backend_model_override() {
        let (state, _) = bootstrap(&parse(&["--backend-model", "gemini-1.5-pro"])).unwrap();
        assert_eq!(state.engine.registry().resolve("gpt-4o"), "gemini-1.5-pro");
    }

    #[test]
    fn test_empty_backend_model_rejected() {
        let err = tokio_test::assert_err!(bootstrap(&parse(&["--backend-model", " "])));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_engine_config() {
        let config = engine_config(&parse(&["--system-prompt", "Be brief."]));
        assert_eq!(config.system_preamble, "Be brief.");

        let config = engine_config(&parse(&["--unique-ids"]));
        assert_eq!(config.id_strategy, IdStrategy::TimestampWithSuffix);
    }

    #[test]
    fn test_server_config() {
        let (state, server) = bootstrap(&parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "8123",
            "--api-key",
            "s3cret",
            "--cors-origin",
            "*",
        ]))
        .unwrap();

        assert_eq!(server.bind_addr(), "127.0.0.1:8123");
        assert_eq!(server.cors, CorsConfig::AllowAll);
        assert!(state.guard.is_enabled());
    }
}
