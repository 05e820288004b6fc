use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use gridrank::catalogs::{self, Catalogs};
use gridrank::model::EntrantKind;
use gridrank::output;
use gridrank::standings::{Ranker, Season, TeamStatMode};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TeamMode {
    /// Every matching result
    Stats,
    /// Races where any seat matched
    Races,
    /// Races where two seats matched
    Doubles,
}

impl From<TeamMode> for TeamStatMode {
    fn from(mode: TeamMode) -> Self {
        match mode {
            TeamMode::Stats => TeamStatMode::Stats,
            TeamMode::Races => TeamStatMode::Races,
            TeamMode::Doubles => TeamStatMode::Doubles,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Points table of a season
    Standings {
        /// Season file (YAML)
        season: PathBuf,
        /// Rank teams instead of drivers
        #[arg(long)]
        team: bool,
        /// Score every result with this scheme instead of the season's
        #[arg(long)]
        punctuation: Option<String>,
        /// Only count rounds up to this one
        #[arg(long)]
        round: Option<u32>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Entrants ordered by wins, then 2nd places, and so on
    Olympic {
        season: PathBuf,
        #[arg(long)]
        team: bool,
        #[arg(long)]
        round: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Current run of consecutive results matching a record
    Streak {
        season: PathBuf,
        /// Record code, see `gridrank records`
        record: String,
        #[arg(long)]
        team: bool,
        /// Longest run instead of the current one
        #[arg(long)]
        max: bool,
        /// Leave out entrants without results in the latest season
        #[arg(long)]
        only_actives: bool,
        #[arg(long)]
        json: bool,
    },
    /// How many results match a record
    Stats {
        season: PathBuf,
        record: String,
        #[arg(long)]
        team: bool,
        /// How team results are counted
        #[arg(long, value_enum, default_value = "stats")]
        team_mode: TeamMode,
        #[arg(long)]
        json: bool,
    },
    /// Positions gained by drivers starting outside the top ten
    Comeback {
        season: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Who can still win the title
    Contenders {
        season: PathBuf,
        #[arg(long)]
        team: bool,
        /// Standings as of this round; later rounds count as pending
        #[arg(long)]
        round: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// List punctuation schemes
    Schemes,
    /// List record filters
    Records,
}

#[derive(Parser, Debug)]
#[command(name = "gridrank")]
#[command(about = "Motorsport standings, records and streaks", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gridrank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gridrank=debug" } else { "gridrank=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn kind(team: bool) -> EntrantKind {
    if team {
        EntrantKind::Team
    } else {
        EntrantKind::Driver
    }
}

fn load_season(path: &Path) -> Season {
    match gridrank::snapshot::load_season(path) {
        Ok(season) => season,
        Err(e) => {
            eprintln!("Season error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn exit_on_engine_error<T>(result: Result<T, gridrank::EngineError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match gridrank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = gridrank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalogs: &Catalogs = match Catalogs::from_config(&config).and_then(catalogs::install) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    tracing::debug!(
        schemes = catalogs.punctuation.len(),
        records = catalogs.records.len(),
        "catalogs installed"
    );

    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Standings {
            season,
            team,
            punctuation,
            round,
            json,
        } => {
            let season = load_season(&season);
            let rank = Ranker::new(&season, catalogs)
                .up_to_round(round)
                .points_rank(kind(team), punctuation.as_deref());
            if json {
                print_json(&rank);
            } else {
                println!("{}", output::format_standings_table(&rank, use_colors));
            }
        }
        Commands::Olympic {
            season,
            team,
            round,
            json,
        } => {
            let season = load_season(&season);
            let rank = Ranker::new(&season, catalogs)
                .up_to_round(round)
                .olympic_rank(kind(team));
            if json {
                print_json(&rank);
            } else {
                println!("{}", output::format_olympic_table(&rank, use_colors));
            }
        }
        Commands::Streak {
            season,
            record,
            team,
            max,
            only_actives,
            json,
        } => {
            let season = load_season(&season);
            let rank = exit_on_engine_error(Ranker::new(&season, catalogs).streak_rank(
                kind(team),
                &record,
                max,
                only_actives,
            ));
            if json {
                print_json(&rank);
            } else {
                println!("{}", output::format_stat_table(&rank, use_colors));
            }
        }
        Commands::Stats {
            season,
            record,
            team,
            team_mode,
            json,
        } => {
            let season = load_season(&season);
            let rank = exit_on_engine_error(Ranker::new(&season, catalogs).stats_rank(
                kind(team),
                &record,
                team_mode.into(),
            ));
            if json {
                print_json(&rank);
            } else {
                println!("{}", output::format_stat_table(&rank, use_colors));
            }
        }
        Commands::Comeback { season, json } => {
            let season = load_season(&season);
            let rank = exit_on_engine_error(Ranker::new(&season, catalogs).comeback_rank());
            if json {
                print_json(&rank);
            } else {
                println!("{}", output::format_stat_table(&rank, use_colors));
            }
        }
        Commands::Contenders {
            season,
            team,
            round,
            json,
        } => {
            let season = load_season(&season);
            let contention = Ranker::new(&season, catalogs)
                .up_to_round(round)
                .title_contention(kind(team), None);
            if json {
                print_json(&contention);
            } else {
                println!("{}", output::format_contention(&contention, use_colors));
            }
        }
        Commands::Schemes => {
            println!("{}", output::format_schemes(&catalogs.punctuation, use_colors));
        }
        Commands::Records => {
            println!("{}", output::format_records(&catalogs.records, use_colors));
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}
