//! # Gridcrawl Command Line
//!
//! Generates levels and runs path queries against them from the terminal.

use clap::{Parser, Subcommand};
use gridcrawl::{
    find_path, generation::utils::create_rng, render_level, DungeonGenerator, GenerationConfig,
    GridcrawlError, GridcrawlResult, Position,
};
use log::info;
use std::path::PathBuf;

/// Command line arguments for gridcrawl.
#[derive(Parser, Debug)]
#[command(name = "gridcrawl")]
#[command(about = "Procedural dungeon levels and grid pathfinding")]
#[command(version)]
struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand that builds a level.
#[derive(clap::Args, Debug)]
struct LevelArgs {
    /// Depth to generate
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Random seed; overrides the config file's seed, and a fresh one is drawn
    /// when neither is given
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON generation config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// The one-time egg unlock has already happened
    #[arg(long)]
    special_unlocked: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a level and print it
    Generate {
        #[command(flatten)]
        level: LevelArgs,

        /// Print the level as JSON instead of a text preview
        #[arg(long)]
        json: bool,
    },
    /// Find a path between two tiles of a generated level
    Path {
        #[command(flatten)]
        level: LevelArgs,

        /// Start tile as X,Y (defaults to the player start)
        #[arg(long)]
        from: Option<String>,

        /// Target tile as X,Y (defaults to the stairs)
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> GridcrawlResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting gridcrawl v{}", gridcrawl::VERSION);

    match args.command {
        Command::Generate { level, json } => run_generate(&level, json),
        Command::Path { level, from, to } => run_path(&level, from.as_deref(), to.as_deref()),
    }
}

fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn load_config(args: &LevelArgs) -> GridcrawlResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::new(rand::random()),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    info!("Using seed {}", config.seed);
    Ok(config)
}

fn run_generate(args: &LevelArgs, json: bool) -> GridcrawlResult<()> {
    let config = load_config(args)?;
    let mut rng = create_rng(&config);
    let seed = config.seed;
    let generator = DungeonGenerator::new(config);
    let (level, report) =
        generator.generate_with_report(args.level, args.special_unlocked, &mut rng);

    if json {
        let output = serde_json::json!({
            "seed": seed,
            "report": report,
            "level": level,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "level {} | seed {} | {} | {} layout | {:?}",
        level.level, seed, level.biome, report.layout, report.outcome
    );
    println!(
        "{} enemies, {} chests, {} potions, {} traps",
        level.enemies.len(),
        level.chests.len(),
        level.potions.len(),
        level.traps.len()
    );
    print!("{}", render_level(&level, None));
    Ok(())
}

fn run_path(args: &LevelArgs, from: Option<&str>, to: Option<&str>) -> GridcrawlResult<()> {
    let config = load_config(args)?;
    let mut rng = create_rng(&config);
    let level =
        DungeonGenerator::new(config).generate(args.level, args.special_unlocked, &mut rng);

    let start = from.map(parse_position).transpose()?.unwrap_or(level.player_start);
    let end = to.map(parse_position).transpose()?.unwrap_or(level.stairs);
    for pos in [start, end] {
        if !level.grid.is_valid_position(pos) {
            return Err(GridcrawlError::InvalidArgument(format!(
                "{pos} is outside the {}x{} grid",
                level.grid.width, level.grid.height
            )));
        }
    }

    match find_path(start, end, &level.grid, &level.enemies) {
        Some(path) => {
            println!("{} steps from {start} to {end}", path.len());
            print!("{}", render_level(&level, Some(&path)));
        }
        None => println!("no path from {start} to {end}"),
    }
    Ok(())
}

/// Parses `X,Y` into a position.
fn parse_position(text: &str) -> GridcrawlResult<Position> {
    let invalid = || GridcrawlError::InvalidArgument(format!("expected X,Y but got '{text}'"));
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(Position::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn level_args(seed: Option<u64>, config: Option<PathBuf>) -> LevelArgs {
        LevelArgs {
            level: 3,
            seed,
            config,
            special_unlocked: false,
        }
    }

    #[test]
    fn test_config_file_seed_is_kept() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 5}}"#).unwrap();
        let path = file.path().to_path_buf();

        let from_file = load_config(&level_args(None, Some(path.clone()))).unwrap();
        assert_eq!(from_file.seed, 5);
        assert_eq!(load_config(&level_args(None, Some(path.clone()))).unwrap(), from_file);

        let overridden = load_config(&level_args(Some(9), Some(path))).unwrap();
        assert_eq!(overridden.seed, 9);
        assert_eq!(load_config(&level_args(Some(11), None)).unwrap().seed, 11);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3,4").unwrap(), Position::new(3, 4));
        assert_eq!(parse_position(" 10 , 2 ").unwrap(), Position::new(10, 2));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,b").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let args = Args::parse_from([
            "gridcrawl", "path", "--level", "5", "--from", "1,2", "--seed", "9",
        ]);
        match args.command {
            Command::Path { level, from, to } => {
                assert_eq!(level.level, 5);
                assert_eq!(level.seed, Some(9));
                assert_eq!(from.as_deref(), Some("1,2"));
                assert!(to.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.log_level, "warn");
    }
}
