//! Kid Chat - terminal learning buddy for kids
//!
//! Onboarding (profile, confirmation, parent PIN), then a tabbed main screen
//! with chat, creatives, quests and games, plus a PIN-gated parent dashboard.

mod config;
mod content;
mod core;
mod data;
mod frontend;
mod theme;
mod tts;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::Frontend;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "kid-chat")]
#[command(about = "Kid-friendly learning buddy for the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.kid-chat)
    /// Can also be set via KID_CHAT_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Start with read-aloud turned off
    #[arg(long)]
    no_tts: bool,

    /// Seed for reply and suggestion picks (repeatable sessions)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    ValidateConfig {
        /// Config file to validate (default: the one in the data directory)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config::Config::base_dir()?,
    };
    std::fs::create_dir_all(&data_dir)
        .context(format!("Failed to create data directory: {:?}", data_dir))?;

    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::Config::log_path(&data_dir))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    if let Some(Commands::ValidateConfig { file }) = cli.command {
        let path = file.unwrap_or_else(|| config::Config::config_path(&data_dir));
        std::process::exit(validate_config(&path));
    }

    tracing::info!("Using data directory {:?}", data_dir);

    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load(&data_dir)?,
    };
    if cli.no_tts {
        config.tts.enabled = false;
    }

    let content = content::ContentPack::load(Some(&config::Config::content_dir(&data_dir)))
        .context("Failed to load content pack")?;

    run_tui(config, content, cli.seed)
}

/// Print what is wrong with a config file; returns the process exit code
fn validate_config(path: &Path) -> i32 {
    println!("Validating config file: {:?}", path);
    let config = match config::Config::load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load config: {:#}", e);
            return 1;
        }
    };
    println!("✓ Config loaded successfully");

    let issues = config.validate();
    if issues.is_empty() {
        println!("✓ Config is valid with no issues");
        return 0;
    }
    for issue in &issues {
        eprintln!("✗ {}", issue);
    }
    eprintln!("\n✗ Found {} issue(s)", issues.len());
    1
}

/// Run the terminal frontend until the child quits
fn run_tui(config: config::Config, content: content::ContentPack, seed: Option<u64>) -> Result<()> {
    use core::scheduler::SystemClock;
    use core::AppCore;
    use frontend::TuiFrontend;

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let weekday = chrono::Local::now().format("%A").to_string();
    let speech = tts::SpeechManager::new(config.tts.clone());

    let mut app_core = AppCore::new(config, content, speech, Box::new(SystemClock), rng, weekday)?;
    let mut frontend = TuiFrontend::new()?;
    tracing::info!("Kid Chat started");

    while app_core.running {
        for event in frontend.poll_events()? {
            app_core.handle_event(event);
        }
        app_core.tick();
        frontend.render(&app_core)?;
    }

    app_core.speech.stop();
    frontend.cleanup()?;
    tracing::info!(
        pending_tasks = app_core.pending_tasks(),
        "Kid Chat exited"
    );
    Ok(())
}
