mod config_cmd;
mod interactive;
mod status_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use snaptext_config::{
    check_report, config_dir, config_file_path, load_config, resolve, SnaptextConfig,
    ValidationReport,
};
use snaptext_logging::init_logger;
use snaptext_session::{OcrSession, Outcome};

use config_cmd::ConfigCommands;
use terminal_output::report_outcome;

#[derive(Parser)]
#[command(name = "snaptext")]
#[command(about = "snaptext: send a photo or an image file to an OCR service and keep the text")]
#[command(version)]
struct Cli {
    /// OCR service base URL (overrides the config file)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Config file to use instead of ~/.snaptext/config.yaml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize the text in an image file
    Upload {
        file: PathBuf,
        /// Also save the text as ocr_result.txt in the download directory
        #[arg(long)]
        save: bool,
    },
    /// Take a photo with the camera and recognize its text
    Capture {
        #[arg(long)]
        save: bool,
    },
    /// Pick files, capture, upload and save from a prompt
    Interactive,
    /// Check whether the OCR service is reachable
    Status,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = load(&config_path, cli.backend_url.as_deref()).await?;

    match cli.command {
        Commands::Upload { file, save } => {
            let mut session = OcrSession::from_config(&config, false).await?;
            session.select_file(&file).await?;
            recognize(&mut session, save).await?;
        }
        Commands::Capture { save } => {
            let mut session = OcrSession::from_config(&config, true).await?;
            let captured = session.on_capture().await?;
            report_outcome(&captured);
            recognize(&mut session, save).await?;
        }
        Commands::Interactive => {
            let session = OcrSession::from_config(&config, true).await?;
            interactive::run(session).await?;
        }
        Commands::Status => status_cmd::run(&config).await?,
        Commands::Config { command } => config_cmd::run(command, &config, &config_path).await?,
    }

    Ok(())
}

/// Read and resolve the config, start logging from the resolved settings,
/// then report validation results.
async fn load(path: &Path, backend_url: Option<&str>) -> Result<SnaptextConfig> {
    let (config, report) = resolve_config(path, backend_url).await?;

    init_logger(config.log_level(), config.log_dir().as_deref())
        .context("Failed to initialize logging")?;
    debug!(path = %path.display(), "Config file");

    check_report(&report)?;
    Ok(config)
}

async fn resolve_config(
    path: &Path,
    backend_url: Option<&str>,
) -> Result<(SnaptextConfig, ValidationReport)> {
    let mut raw = load_config(path).await?;
    if let Some(url) = backend_url {
        raw.set_backend_url(url);
    }
    resolve(raw)
}

/// Upload whatever the session holds, print the text, optionally save it.
async fn recognize(session: &mut OcrSession, save: bool) -> Result<()> {
    let outcome = session.on_upload().await?;
    report_outcome(&outcome);
    if let Outcome::Recognized(result) = &outcome {
        println!("{}", result.text);
    }

    if save {
        let exported = session.on_download().await?;
        report_outcome(&exported);
    }
    Ok(())
}
