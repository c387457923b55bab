//! RASAR CLI - read-across structure-activity descriptors
//!
//! ```bash
//! rasar serve                                  # Start HTTP server (port 5000)
//! rasar calculate train.xlsx test.xlsx         # Write rasar_descriptors_output.xlsx
//! rasar calculate train.xlsx test.xlsx \
//!     --method "Laplacian Kernel" --output out.xlsx
//! ```

use clap::{Parser, Subcommand};
use rasar::{calculate_files, DescriptorType, Method, MetricTable, ServerConfig, OUTPUT_FILENAME};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rasar")]
#[command(about = "Compute RASAR descriptors from training and test workbooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (default: $PORT or 5000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Compute descriptors for two workbooks and write the result workbook
    Calculate {
        /// Training workbook (ID, descriptors..., response)
        train: PathBuf,

        /// Test workbook (ID, descriptors..., optional response)
        test: PathBuf,

        /// Similarity kernel
        #[arg(short, long, default_value = "Gaussian Kernel")]
        method: Method,

        /// Descriptor source
        #[arg(short, long, default_value = "User Defined Descriptors")]
        descriptor_type: DescriptorType,

        /// Output workbook
        #[arg(short, long, default_value = OUTPUT_FILENAME)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,

        Commands::Calculate {
            train,
            test,
            method,
            descriptor_type,
            output,
        } => cmd_calculate(&train, &test, method, descriptor_type, &output),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env();
    if let Some(port) = port {
        config = config.with_port(port);
    }
    rasar::server::start_server(config).await
}

fn cmd_calculate(
    train: &Path,
    test: &Path,
    method: Method,
    descriptor_type: DescriptorType,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Training set: {}", train.display());
    eprintln!("📄 Test set:     {}", test.display());
    eprintln!("   Method:       {}", method);
    eprintln!("   Descriptors:  {}", descriptor_type);

    let result = calculate_files(train, test, output, method, descriptor_type)?;

    print_summary("Train", &result.train);
    print_summary("Test", &result.test);
    eprintln!("💾 Output written to: {}", output.display());

    Ok(())
}

fn print_summary(sheet: &str, table: &MetricTable) {
    eprintln!(
        "✅ {}: {} rows x {} descriptors ({})",
        sheet,
        table.n_rows(),
        table.metrics.len(),
        table.headers().join(", ")
    );
}
