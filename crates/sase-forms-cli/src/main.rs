//! OpenSASE Forms CLI
//!
//! Inspect form schemas, validate values and drive an interactive form session.
//!
//! # Usage
//!
//! ```bash
//! opensase-forms schemas list
//! opensase-forms schemas show payment --format yaml
//! opensase-forms validate userInfo --set firstName=Jane --set email=jane@x.com
//! opensase-forms session --script demo.txt
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "opensase-forms")]
#[command(author = "OpenSASE")]
#[command(version)]
#[command(about = "OpenSASE dynamic forms", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.opensase/forms.toml)
    #[arg(long, short, env = "OPENSASE_FORMS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect form schemas
    Schemas {
        #[command(subcommand)]
        action: SchemaCommands,
    },
    /// Validate a set of values against a form
    Validate {
        form_type: String,
        /// Field value as name=value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
    },
    /// Run a line-oriented form session
    Session {
        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// List form types
    List,
    /// Show the fields of one form type
    Show { form_type: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match config::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Schemas { action } => commands::schemas::handle(action, &config, cli.format).await,
            Commands::Validate { form_type, values } => {
                commands::validate::handle(&form_type, &values, &config, cli.format).await
            }
            Commands::Session { script } => {
                commands::session::handle(script.as_deref(), &config, cli.format).await
            }
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
