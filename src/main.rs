use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use sales_cleaner::constants::Marketplace;
use sales_cleaner::logging;
use sales_cleaner::pipeline::{self, master, output};

#[derive(Parser)]
#[command(name = "sales_cleaner")]
#[command(about = "Marketplace sales export cleaner and normalizer")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one export file into the canonical CSV shape
    Clean {
        /// Input export file (.csv, .xlsx or .xls)
        #[arg(long)]
        input: PathBuf,
        /// Marketplace the export came from: Noon, Amazon, Revibe, Talabat, Careem
        #[arg(long)]
        marketplace: String,
        /// Master product table for enrichment (skipped when absent)
        #[arg(long, default_value = "product.csv")]
        master: PathBuf,
        /// Where to write the cleaned CSV
        #[arg(long)]
        output: PathBuf,
    },
    /// Inspect the master product table and report what enrichment can use
    MasterCheck {
        /// Master product table path
        #[arg(long, default_value = "product.csv")]
        master: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Clean {
            input,
            marketplace,
            master,
            output: output_path,
        } => {
            let marketplace: Marketplace = marketplace.parse()?;
            match pipeline::clean_file(&input, marketplace, &master) {
                Ok(table) => {
                    output::write_csv_file(&table, &output_path)?;
                    println!("\n📊 Cleaning results for {}:", marketplace);
                    println!("   Rows: {}", table.len());
                    println!("   Columns: {}", table.columns().len());
                    println!("   Output file: {}", output_path.display());
                }
                Err(e) => {
                    error!("cleaning failed: {e}");
                    println!("❌ Cleaning failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::MasterCheck { master: path } => {
            let table = master::load_master(&path);
            println!("📦 Master table: {}", path.display());
            println!("   Records: {}", table.len());
            println!("   SKU column: {}", if table.has_sku() { "yes" } else { "no" });
            println!(
                "   Partner SKU column: {}",
                if table.has_partner_sku() { "yes" } else { "no" }
            );
            if table.is_empty() {
                println!("⚠️  Enrichment will be skipped (empty or missing master)");
            }
        }
    }
    Ok(())
}
