//! Command line entry point for the Rift Matchmaker team generator
//!
//! Loads a roster export, picks ten players (plus any wildcards), runs the
//! generator and prints the selected matches as a text block or JSON.

use anyhow::{anyhow, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use rift_matchmaker::config::{AppConfig, OutputFormat};
use rift_matchmaker::engine::{generate_matches, PLAYERS_PER_MATCH};
use rift_matchmaker::export::{format_selection, MatchmakingResponse};
use rift_matchmaker::roster::{parse_wildcard, Roster};
use rift_matchmaker::sampling::{MatchSampler, SamplingStrategy};
use rift_matchmaker::types::Player;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// Rift Matchmaker - balanced 5v5 team generation
#[derive(Parser)]
#[command(
    name = "rift-matchmaker",
    version,
    about = "Generate balanced 5v5 League of Legends teams from a player roster",
    long_about = "Rift Matchmaker splits ten players into two teams with one player per lane, \
                 keeping every lane matchup within a rating tolerance and honoring preset lanes, \
                 avoid-role rules and player combos from the configuration file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        global = true,
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate balanced matches for ten players
    Generate(GenerateArgs),
    /// Validate the configuration and exit
    Validate,
}

#[derive(ClapArgs)]
struct GenerateArgs {
    /// Roster export (JSON array of players)
    #[arg(short, long, value_name = "FILE")]
    roster: PathBuf,

    /// Comma separated player ids; defaults to the whole roster
    #[arg(short, long, value_delimiter = ',')]
    players: Vec<String>,

    /// Ad hoc player, e.g. "Guest:5,4,6,3,7" (top,jungle,mid,adc,support)
    #[arg(short, long)]
    wildcard: Vec<String>,

    /// Maximum rating gap between lane opponents
    #[arg(short, long)]
    tolerance: Option<u8>,

    /// Number of matches to display
    #[arg(short = 'n', long)]
    match_options: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Always show the top ranked matches instead of shuffling ties
    #[arg(long)]
    ranked: bool,

    /// Output format (text or json)
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or environment and apply global CLI overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &cli.log_level {
        config.service.log_level = log_level.clone();
    }

    if cli.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

/// Apply `generate` flags on top of the loaded configuration
fn apply_generate_overrides(config: &mut AppConfig, args: &GenerateArgs) -> Result<()> {
    if let Some(tolerance) = args.tolerance {
        config.matchmaking.tolerance = tolerance;
    }
    if let Some(match_options) = args.match_options {
        config.matchmaking.match_options = match_options;
    }
    if let Some(seed) = args.seed {
        config.output.seed = Some(seed);
    }
    if args.ranked {
        config.output.shuffle_ties = false;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    config.matchmaking.validate()?;
    Ok(())
}

/// Roster players picked on the command line plus wildcards
fn select_players(args: &GenerateArgs) -> Result<Vec<Player>> {
    let roster = Roster::from_file(&args.roster)?;
    debug!("Roster ids: {:?}", roster.ids());

    let mut players = if args.players.is_empty() {
        roster.players().to_vec()
    } else {
        roster.select(&args.players)?
    };

    for spec in &args.wildcard {
        let wildcard = parse_wildcard(spec)?;
        debug!("Adding wildcard {} ({})", wildcard.name, wildcard.id);
        players.push(wildcard);
    }

    if players.len() != PLAYERS_PER_MATCH {
        warn!(
            "{} players selected, generation needs exactly {}",
            players.len(),
            PLAYERS_PER_MATCH
        );
    }

    Ok(players)
}

fn run_generate(mut config: AppConfig, args: &GenerateArgs) -> Result<()> {
    apply_generate_overrides(&mut config, args)?;
    let players = select_players(args)?;

    let strategy = if config.output.shuffle_ties {
        SamplingStrategy::ShuffleTies
    } else {
        SamplingStrategy::Ranked
    };
    let sampler = MatchSampler::new(strategy, config.output.seed);
    debug!(
        "Sampling with {:?} (seed {:?})",
        sampler.strategy(),
        config.output.seed
    );

    match generate_matches(&players, &config.matchmaking) {
        Ok(outcome) => {
            let selection = outcome.selection(&config.matchmaking, &sampler);
            match config.output.format {
                OutputFormat::Text => print!("{}", format_selection(&outcome, &selection)),
                OutputFormat::Json => println!(
                    "{}",
                    MatchmakingResponse::success(
                        &outcome,
                        &selection,
                        config.matchmaking.match_options
                    )
                    .to_json_pretty()?
                ),
            }
            Ok(())
        }
        Err(e) => {
            if config.output.format == OutputFormat::Json {
                println!("{}", MatchmakingResponse::failure(&e).to_json_pretty()?);
            }
            Err(e.into())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{} (tolerance {}, {} match options)",
        config.service.name,
        rift_matchmaker::VERSION,
        config.matchmaking.tolerance,
        config.matchmaking.match_options
    );

    match &cli.command {
        Commands::Validate => {
            info!("Configuration validation successful");
            Ok(())
        }
        Commands::Generate(args) => {
            if let Err(e) = run_generate(config, args) {
                error!("Generation failed: {:#}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
