//! cfdix CLI - CFDI invoice extraction tool
//!
//! A command-line tool for converting CFDI XML invoices to XLSX workbooks,
//! with an embedded upload server for browser use.

mod serve;

use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::PathBuf;

use cfdix::{extract_bytes, ExtractorService, ServiceConfig};

/// CFDI invoice extraction to multi-sheet XLSX
#[derive(Parser)]
#[command(
    name = "cfdix",
    version,
    about = "Extract CFDI invoices to XLSX",
    long_about = "cfdix - CFDI (Mexican tax invoice) extraction tool.\n\n\
                  Converts CFDI 3.3/4.0 XML documents into two-sheet XLSX workbooks,\n\
                  individually or batched."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or more CFDI XML files to an XLSX workbook
    Extract {
        /// Input XML files; one file uses the single-document path, several
        /// are aggregated as a batch
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file path (default: timestamped name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the extracted header fields and line-item count of a document
    Info {
        /// Input XML file
        input: PathBuf,
    },

    /// Run the HTTP upload server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Maximum combined upload size in MiB
        #[arg(long, default_value = "5")]
        max_payload_mb: usize,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { inputs, output } => run_extract(&inputs, output),
        Commands::Info { input } => run_info(&input),
        Commands::Serve {
            port,
            max_payload_mb,
        } => {
            let config = ServiceConfig {
                max_payload_bytes: max_payload_mb * 1024 * 1024,
            };
            serve::run(port, config).await
        }
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run_extract(inputs: &[PathBuf], output: Option<PathBuf>) -> Result<(), String> {
    let mut documents = Vec::with_capacity(inputs.len());
    for path in inputs {
        let data = fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        documents.push(data);
    }

    let service = ExtractorService::new(ServiceConfig::default());
    let export = if documents.len() == 1 {
        service
            .process_document(&documents[0])
            .map_err(|e| e.to_string())?
    } else {
        service.process_batch(&documents).map_err(|e| e.to_string())?
    };

    let out_path = output.unwrap_or_else(|| PathBuf::from(&export.filename));
    fs::write(&out_path, &export.data).map_err(|e| format!("{}: {}", out_path.display(), e))?;

    let count = format!("({} documents)", documents.len());
    println!(
        "{} {} {} {}",
        "✓".green().bold(),
        "wrote".green(),
        out_path.display(),
        count.as_str().dimmed()
    );
    Ok(())
}

fn run_info(input: &PathBuf) -> Result<(), String> {
    let data = fs::read(input).map_err(|e| format!("{}: {}", input.display(), e))?;
    let result = extract_bytes(&data).map_err(|e| e.to_string())?;

    let name = input.display().to_string();
    println!("{}", name.as_str().bold());
    println!("  Folio:    {}", result.header.folio);
    println!("  Fecha:    {}", result.header.fecha);
    println!("  Moneda:   {}", result.header.moneda);
    println!("  Subtotal: {}", result.header.subtotal);
    println!("  Total:    {}", result.header.total);
    println!(
        "  Emisor:   {} {}",
        result.header.rfc_emisor, result.header.nombre_emisor
    );
    println!(
        "  Receptor: {} {}",
        result.header.rfc_receptor, result.header.nombre_receptor
    );
    println!("  Conceptos: {}", result.concepts.len());
    Ok(())
}
