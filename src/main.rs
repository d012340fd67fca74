//! # Boleta CLI
//!
//! Command-line interface for the thermal receipt print server.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP server
//! boleta serve --listen 0.0.0.0:8080 --device /dev/usb/lp0
//!
//! # Print a one-shot text receipt
//! boleta print "hello from the command line"
//!
//! # Print an image file
//! boleta image photo.jpg --from ana
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use boleta::{
    BoletaError, PrinterConfig,
    device::{DEFAULT_DEVICE, SerialPrinter},
    jobs::{self, SharedDevice},
    render,
    server::{ServerConfig, serve},
};

/// Boleta - thermal receipt print server
#[derive(Parser, Debug)]
#[command(name = "boleta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP print server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,
    },

    /// Print a text receipt and exit
    Print {
        /// Receipt body text
        text: String,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Attribution line printed in the footer
        #[arg(long)]
        from: Option<String>,
    },

    /// Print an image file and exit
    Image {
        /// Path to the image (JPEG, PNG, ...)
        file: PathBuf,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Attribution line printed in the footer
        #[arg(long)]
        from: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoletaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, device } => {
            serve(ServerConfig {
                device_path: device,
                listen_addr: listen,
            })
            .await
        }

        // One-shot prints run the job directly so device failures reach
        // the exit code; the queue only matters when submissions compete.
        Commands::Print { text, device, from } => {
            jobs::text_job(one_shot(&device), text, from).run().await
        }

        Commands::Image { file, device, from } => {
            let bytes = std::fs::read(&file)?;
            let width = PrinterConfig::default().width_dots as u32;
            let raster = render::rasterize(&bytes, width)?;
            jobs::image_job(one_shot(&device), raster, from).run().await
        }
    }
}

/// Device handle for a single CLI print.
fn one_shot(device_path: &str) -> SharedDevice {
    Arc::new(Mutex::new(SerialPrinter::new(
        device_path,
        PrinterConfig::default(),
    )))
}
