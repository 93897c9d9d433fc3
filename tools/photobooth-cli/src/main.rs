//! Photobooth CLI: run the service or drive the pipeline from a shell.
//!
//! Usage:
//!   photobooth serve                       Run the HTTP service
//!   photobooth save <SESSION> <INDEX> <F>  Store a capture from a file
//!   photobooth list <SESSION>              Print a session's capture URLs
//!   photobooth compose <SESSION> <FRAME> <I0> <I1> <I2> <I3>
//!   photobooth qr <TEXT> --output <PNG>    Write a standalone QR code
//!   photobooth check                       Check configured assets and storage

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use photobooth_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "photobooth",
    about = "Four-up photobooth strips with a scannable download link",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $PHOTOBOOTH_CONFIG or the XDG location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Listen address, overriding the config
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store a capture for a session
    Save {
        /// Session id
        session: String,

        /// Capture index
        index: u32,

        /// Image file to store
        image: PathBuf,
    },

    /// List a session's captures
    List {
        /// Session id
        session: String,
    },

    /// Compose four captures under a frame and store the result
    Compose {
        /// Session id
        session: String,

        /// Frame file name under the frames directory
        frame: String,

        /// Capture indices in slot order
        #[arg(num_args = 4, required = true)]
        indices: Vec<u32>,
    },

    /// Write a QR code PNG
    Qr {
        /// Text to encode
        text: String,

        /// Output PNG path
        #[arg(short, long, default_value = "qr.png")]
        output: PathBuf,
    },

    /// Check configured assets and storage
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    photobooth_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(config, bind).await,
        Commands::Save {
            session,
            index,
            image,
        } => commands::save::run(&config, session, index, image),
        Commands::List { session } => commands::list::run(&config, session),
        Commands::Compose {
            session,
            frame,
            indices,
        } => commands::compose::run(&config, session, frame, indices),
        Commands::Qr { text, output } => commands::qr::run(text, output),
        Commands::Check => commands::check::run(&config),
    }
}
