//! Composition root for the gembridge server.
//!
//! Parses configuration from flags, environment and `.env`, wires the Gemini
//! client into the completion engine and hands the result to the HTTP server.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs
use dotenvy as _;
use tokio as _;
use tokio_util as _;

pub mod bootstrap;
pub mod error;
pub mod parser;

pub use bootstrap::{bootstrap, init_tracing};
pub use error::CliError;
pub use parser::Cli;
