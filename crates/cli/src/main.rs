mod commands;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use commands::decode::DecodeArgs;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Decode heterogeneous JSON by discriminator property.
#[derive(Parser)]
#[command(
    name = "jsonunion",
    version,
    about = "Decode heterogeneous JSON by discriminator property"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the top-level property names of a JSON document
    Properties {
        /// Path to the JSON file, or - for stdin
        file: PathBuf,
    },

    /// Pick the first discriminator key present in a JSON document and decode it
    Decode {
        /// Path to the JSON file, or - for stdin
        file: PathBuf,
        /// Discriminator key; repeat to list candidates in priority order
        #[arg(long = "key", short = 'k', required = true)]
        keys: Vec<String>,
        /// Report malformed input as a decode error outcome instead of a failure
        #[arg(long)]
        lenient: bool,
        /// Lower-case every object key before mapping
        #[arg(long)]
        fold_keys: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Properties { file } => {
            commands::properties::cmd_properties(&file, cli.output, cli.quiet);
        }
        Commands::Decode {
            file,
            keys,
            lenient,
            fold_keys,
        } => {
            commands::decode::cmd_decode(
                DecodeArgs {
                    file: &file,
                    keys: &keys,
                    lenient,
                    fold_keys,
                },
                cli.output,
                cli.quiet,
            );
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read the document at `path`; `-` reads stdin.
pub(crate) fn read_input(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("error reading stdin: {}", e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| format!("error reading file '{}': {}", path.display(), e))
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
