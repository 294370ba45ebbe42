//! Courtside CLI - momentum analysis from the command line.
//!
//! Wraps the `courtside` library: analyze a game, serve the HTTP endpoint,
//! list available models, or preview a transcript.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

mod config;
mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use courtside::prelude::*;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{CourtsideConfig, load_config};
use crate::error::Result;

/// Courtside - find the momentum-shifting three with a vision LLM
#[derive(Parser)]
#[command(name = "courtside")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "COURTSIDE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the model for the most momentum-shifting three-pointer
    Analyze(AnalyzeArgs),

    /// Run the HTTP endpoint
    Serve(ServeArgs),

    /// List models available to the configured key
    Models(ModelsArgs),

    /// Print the first lines of a transcript
    Preview(PreviewArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command
#[derive(Args)]
struct AnalyzeArgs {
    /// Play-by-play transcript file ('-' reads stdin)
    #[arg(short, long, default_value = "game1_playbyplay.txt")]
    transcript: PathBuf,

    /// Court diagram image
    #[arg(short, long, default_value = "court_diagram.png")]
    image: PathBuf,

    /// Quarter to analyze (Q1, Q2, Q3, Q4 or "Full Game")
    #[arg(short, long, default_value = "Full Game")]
    quarter: Selector,

    /// Model to use (overrides config)
    #[arg(short, long, env = "LLAMA_MODEL")]
    model: Option<String>,

    /// Maximum tokens in the answer (overrides config)
    #[arg(long)]
    max_tokens: Option<u32>,
}

/// Arguments for the serve command
#[derive(Args)]
struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

/// Arguments for the models command
#[derive(Args)]
struct ModelsArgs {
    /// Maximum number of models to list
    #[arg(short, long, default_value_t = 50)]
    limit: usize,
}

/// Arguments for the preview command
#[derive(Args)]
struct PreviewArgs {
    /// Play-by-play transcript file ('-' reads stdin)
    #[arg(short, long, default_value = "game1_playbyplay.txt")]
    transcript: PathBuf,

    /// Number of lines to print
    #[arg(short = 'n', long, default_value_t = 10)]
    lines: usize,
}

/// Arguments for the config command
#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show configuration file path
    Path,
    /// Show the resolved configuration with the API key masked
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "courtside={level},courtside_cli={level},tower_http={},{}",
            if verbosity >= 1 { "debug" } else { "info" },
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => cmd_analyze(args, cli.config).await,
        Commands::Serve(args) => cmd_serve(args, cli.config).await,
        Commands::Models(args) => cmd_models(args, cli.config).await,
        Commands::Preview(args) => cmd_preview(args).await,
        Commands::Config(args) => cmd_config(args, cli.config).await,
    }
}

/// Build the provider from configuration; fails without an API key.
fn create_provider(config: &CourtsideConfig) -> Result<SharedChatProvider> {
    let client = OpenAI::new(config.openai_config()?)?;
    tracing::info!(base_url = %client.base_url(), model = %client.model(), "using OpenAI-compatible backend");
    Ok(Arc::new(client))
}

async fn read_transcript(path: &Path) -> Result<String> {
    let text = if path == Path::new("-") {
        read_transcript_from(tokio::io::stdin()).await?
    } else {
        load_transcript(path).await?
    };
    Ok(text)
}

/// Run one analysis and print the answer.
async fn cmd_analyze(args: AnalyzeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref()).await?;
    let provider = create_provider(&config)?;
    let options = analyze_options(&args, config.cli_options());

    let answer = analyze_with(provider, &args, options).await?;

    println!("\n=== Coach's Visual Insight ===\n");
    println!("{answer}");
    Ok(())
}

/// Apply `--model` and `--max-tokens` on top of the configured options.
fn analyze_options(args: &AnalyzeArgs, mut options: AnalysisOptions) -> AnalysisOptions {
    if let Some(model) = &args.model {
        options = options.with_model(model.clone());
    }
    if let Some(max_tokens) = args.max_tokens {
        options = options.with_max_tokens(max_tokens);
    }
    options
}

/// Read the inputs named by `args` and ask `provider`.
///
/// `Full Game` sends the whole transcript; a quarter sends only its lines
/// and fails before any model call when it has none.
async fn analyze_with(
    provider: SharedChatProvider,
    args: &AnalyzeArgs,
    options: AnalysisOptions,
) -> Result<String> {
    let transcript = read_transcript(&args.transcript).await?;
    let image = encode_image_file(&args.image).await?;
    let analyst = Analyst::new(provider, options);

    let answer = match args.quarter {
        Selector::FullGame => analyst.analyze_full_game(&image, &transcript).await?,
        selector => {
            let filtered =
                select_period(&transcript, selector).map_err(courtside::Error::from)?;
            analyst.analyze_quarter(selector, &image, &filtered).await?
        }
    };
    Ok(answer)
}

/// Run the HTTP endpoint until Ctrl+C.
async fn cmd_serve(args: ServeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref()).await?;
    let provider = create_provider(&config)?;

    let mut serve_config = config.serve_config();
    if let Some(bind) = args.bind {
        serve_config.bind = bind;
    }
    if let Some(port) = args.port {
        serve_config.port = port;
    }

    let analyst = Analyst::new(provider, config.server_options());
    println!(
        "Serving on http://{}:{}. Press Ctrl+C to stop.\n",
        serve_config.bind, serve_config.port
    );

    serve(&serve_config, analyst, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutting down");
        }
    })
    .await?;
    Ok(())
}

/// Print the model ids visible to the configured key.
async fn cmd_models(args: ModelsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref()).await?;
    let provider = create_provider(&config)?;
    for id in provider.list_models(args.limit).await? {
        println!("{id}");
    }
    Ok(())
}

/// Print the first lines of a transcript.
async fn cmd_preview(args: PreviewArgs) -> Result<()> {
    let text = read_transcript(&args.transcript).await?;

    println!("=== First {} lines of the transcript ===\n", args.lines);
    for line in preview(&text, args.lines) {
        println!("{line}");
    }
    Ok(())
}

/// Configuration inspection.
async fn cmd_config(args: ConfigArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            let path = config_path.unwrap_or_else(config::config_path);
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            let config = load_config(config_path.as_deref()).await?;
            let rendered = toml::to_string_pretty(&config.masked())
                .map_err(config::ConfigError::from)?;
            println!("{rendered}");
        }
    }
    Ok(())
}
