use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use typeahead::app::{AppConfig, PickerApp};
use typeahead::source::FetchConfig;
use typeahead::{log_to_file, ProgramOptions};

/// Pick people from a simulated directory.
#[derive(Debug, Parser)]
#[command(name = "typeahead", version, about)]
struct Cli {
    /// Pick a single person instead of several.
    #[arg(long)]
    single: bool,

    /// How long the simulated fetch takes, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 3000)]
    delay_ms: u64,

    /// Make the simulated fetch fail.
    #[arg(long)]
    fail: bool,

    /// Write diagnostics here. Filter with RUST_LOG (default: info).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so logs only go to a file.
    if let Some(path) = &cli.log_file {
        let file = log_to_file(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = AppConfig {
        multiselect: !cli.single,
        fetch: FetchConfig {
            delay: Duration::from_millis(cli.delay_ms),
            fail: cli.fail,
        },
    };
    let options = ProgramOptions {
        title: Some("typeahead".into()),
        ..ProgramOptions::default()
    };

    let form = typeahead::run_with::<PickerApp>(config, options).await?;
    tracing::info!(value = ?form.value(), "exiting");
    Ok(())
}
