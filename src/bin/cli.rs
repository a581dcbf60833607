//! SCBF CLI
//!
//! Command-line interface for converting between CSV and SCBF files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scbf::format::{ColumnBlocks, ScbfReader};
use scbf::{Config, Result, ScbfError};
use tracing_subscriber::{fmt, EnvFilter};

/// SCBF columnar format tools
#[derive(Parser, Debug)]
#[command(name = "scbf")]
#[command(about = "Convert between CSV and the SCBF columnar binary format")]
#[command(version)]
struct Args {
    /// CSV field delimiter (single character)
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a CSV file to an SCBF file
    Encode {
        /// Input CSV file
        csv: PathBuf,

        /// Output SCBF file
        out: PathBuf,

        /// zlib compression level (0-9)
        #[arg(short, long, default_value = "6")]
        level: u32,
    },

    /// Convert an SCBF file to a CSV file
    Decode {
        /// Input SCBF file
        file: PathBuf,

        /// Output CSV file
        out: PathBuf,

        /// Optional subset of columns to decode, in output order
        #[arg(short, long, num_args = 1..)]
        columns: Option<Vec<String>>,
    },

    /// Print schema and block statistics of an SCBF file
    Info {
        /// SCBF file to inspect
        file: PathBuf,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let delimiter = parse_delimiter(&args.delimiter)?;

    match args.command {
        Commands::Encode { csv, out, level } => {
            let config = Config::builder()
                .delimiter(delimiter)
                .compression_level(level)
                .build();
            scbf::csv_to_scbf(&csv, &out, &config)?;
            println!("Converted CSV -> SCBF: {}", out.display());
        }

        Commands::Decode { file, out, columns } => {
            let config = Config::builder().delimiter(delimiter).build();
            scbf::scbf_to_csv(&file, &out, columns.as_deref(), &config)?;
            println!("Converted SCBF -> CSV: {}", out.display());
        }

        Commands::Info { file } => {
            print_info(&file)?;
        }
    }

    Ok(())
}

/// Print schema and per-column block statistics without decoding any data.
fn print_info(path: &std::path::Path) -> Result<()> {
    let reader = ScbfReader::open(path)?;

    println!("File:    {}", path.display());
    println!("Rows:    {}", reader.total_rows());
    println!("Columns: {}", reader.num_columns());
    println!();
    println!("{:<24} {:<8} {:>12} {:>12}", "name", "type", "compressed", "uncompressed");

    for meta in reader.column_metas() {
        let (compressed, uncompressed) = match meta.blocks {
            ColumnBlocks::Int32 { data } | ColumnBlocks::Float64 { data } => {
                (data.compressed_size, data.uncompressed_size)
            }
            ColumnBlocks::Utf8 { offsets, strings } => (
                offsets.compressed_size + strings.compressed_size,
                offsets.uncompressed_size + strings.uncompressed_size,
            ),
        };

        println!(
            "{:<24} {:<8} {:>12} {:>12}",
            meta.name,
            meta.column_type().to_string(),
            compressed,
            uncompressed
        );
    }

    Ok(())
}

fn parse_delimiter(s: &str) -> Result<u8> {
    let bytes = s.as_bytes();
    if bytes.len() != 1 {
        return Err(ScbfError::Config(format!(
            "delimiter must be a single ASCII character, got {:?}",
            s
        )));
    }
    Ok(bytes[0])
}
