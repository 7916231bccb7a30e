use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use mdocx::convert_with_limit;
use mdocx::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "mdocx")]
#[command(about = "Convert Markdown into Word documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP conversion service
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Convert a Markdown file to .docx
    Convert {
        /// Markdown input file
        input: PathBuf,
        /// Output path (defaults to the input with a .docx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(bind) = bind {
                config = config.with_bind_address(bind);
            }
            server::serve(config).await?;
        },
        Commands::Convert { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("docx"));
            let markdown = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let bytes = convert_with_limit(&markdown, config.max_chars)?;
            std::fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(
                input = %input.display(),
                output = %output.display(),
                bytes = bytes.len(),
                "Converted document"
            );
        },
    }

    Ok(())
}
