use anyhow::Result;
use bencodec_cli::{commands, DecodeMode};
use bencodec_core::constants::DEFAULT_MAX_DEPTH;
use bencodec_core::TextEncoding;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bencodec")]
#[command(about = "Bencodec - Encode, decode and inspect bencode data", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON document as bencode
    Encode {
        /// Input JSON file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output file for the encoded value
        #[arg(short, long)]
        output: String,

        /// Encoding used for JSON strings
        #[arg(long, default_value = "utf-8")]
        encoding: TextEncoding,

        /// Emit dictionary keys in raw-byte order
        #[arg(long)]
        sort_keys: bool,
    },

    /// Decode one bencoded value to JSON
    Decode {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Rendering of byte strings
        #[arg(long, value_enum, default_value_t = DecodeMode::Raw)]
        mode: DecodeMode,

        /// Encoding for the torrent text view
        #[arg(long, default_value = "utf-8")]
        encoding: TextEncoding,

        /// Maximum container nesting
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Print statistics for every value in a stream
    Inspect {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Maximum container nesting
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Check well-formedness, trailing content and canonical form
    Validate {
        /// Input file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Print a JSON report instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Encode {
            input,
            output,
            encoding,
            sort_keys,
        } => commands::encode::execute(&input, &output, encoding, sort_keys),

        Commands::Decode {
            input,
            output,
            mode,
            encoding,
            max_depth,
        } => commands::decode::execute(&input, output.as_deref(), mode, encoding, max_depth),

        Commands::Inspect { input, max_depth } => commands::inspect::execute(&input, max_depth),

        Commands::Validate { input, json } => {
            if !commands::validate::execute(&input, json)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
