//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through its environment variable.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use gembridge_core::DEFAULT_BACKEND_MODEL;
use gembridge_gemini::DEFAULT_BASE_URL;

/// OpenAI-compatible chat completions API backed by Gemini.
#[derive(Debug, Parser)]
#[command(name = "gembridge")]
#[command(about = "Serve an OpenAI-compatible chat completions API backed by Gemini")]
#[command(version)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "CUSTOM_AI_API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CUSTOM_AI_API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Bearer token required on /v1/chat/completions (unset disables auth)
    #[arg(long = "api-key", env = "CUSTOM_AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini API key
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini REST API root, up to the version segment
    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Gemini model every public alias maps to
    #[arg(long = "backend-model", env = "GEMINI_MODEL", default_value = DEFAULT_BACKEND_MODEL)]
    pub backend_model: String,

    /// Preamble placed ahead of every flattened conversation
    #[arg(long = "system-prompt", env = "SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    /// Append a random suffix to response ids
    #[arg(
        long = "unique-ids",
        env = "UNIQUE_RESPONSE_IDS",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub unique_ids: bool,

    /// Allowed CORS origin (repeatable or comma separated; `*` allows all)
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "gembridge",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--api-key",
            "s3cret",
            "--backend-model",
            "gemini-1.5-pro",
            "--unique-ids",
            "--cors-origin",
            "https://a.example,https://b.example",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 9000);
        assert_eq!(cli.api_key.as_deref(), Some("s3cret"));
        assert_eq!(cli.backend_model, "gemini-1.5-pro");
        assert!(cli.unique_ids);
        assert_eq!(cli.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["gembridge", "--port", "not-a-port"]).is_err());
        assert!(Cli::try_parse_from(["gembridge", "--port", "70000"]).is_err());
    }
}
