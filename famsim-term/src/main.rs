use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use famsim_game::i18n::{is_supported, set_lang, t};
use famsim_game::{ActivityKind, ClientConfig, Orchestrator};
use famsim_term::{Console, HttpEngine};
use std::fs::File;
use std::io::{BufRead, BufReader, stdin, stdout};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "famsim-term", version = "0.1.0")]
#[command(about = "Terminal client for the famsim family life-simulation engine")]
struct Args {
    /// Base URL of the game engine (overrides config file and FAMSIM_ENGINE_URL)
    #[arg(long)]
    engine_url: Option<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// UI language (zh, en)
    #[arg(long)]
    locale: Option<String>,

    /// List all activities and exit
    #[arg(long)]
    list_activities: bool,

    /// Read console commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    if !set_lang(&config.locale) {
        eprintln!("⚠️  Unknown locale: {}", config.locale.yellow());
    }

    if args.list_activities {
        list_activities();
        return Ok(());
    }

    announce_banner(&config, args.verbose);

    let engine = HttpEngine::new(config.clone()).context("Failed to build HTTP client")?;
    let orchestrator =
        Orchestrator::new(engine).with_default_save_name(config.default_save_name.clone());

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(stdin().lock()),
    };
    let mut console = Console::new(orchestrator, input, stdout().lock());
    console.run().await.context("Console session failed")
}

/// Config file, then environment, then flags.
fn resolve_config(args: &Args) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    config = config.with_env(|key| std::env::var(key).ok());
    if let Some(url) = &args.engine_url {
        config = config.with_engine_url(url.clone());
    }
    if let Some(locale) = &args.locale {
        if !is_supported(locale) {
            anyhow::bail!("Unsupported locale '{locale}'");
        }
        config.locale.clone_from(locale);
    }
    Ok(config)
}

fn list_activities() {
    println!("Available activities:");
    for kind in ActivityKind::ALL {
        println!("  {:<16} {}", kind.as_str(), kind.label());
    }
}

fn announce_banner(config: &ClientConfig, verbose: bool) {
    println!("{}", format!("🏠 {}", t("app.title")).bright_cyan().bold());
    println!("{}", "================================".cyan());
    if verbose {
        println!("Engine: {}", config.engine_url.green());
        println!("Locale: {}", config.locale);
    }
}
