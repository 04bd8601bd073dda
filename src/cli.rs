use crate::config::{Config, load_config};
use crate::dump::{PlacementDump, write_placement_dump};
use crate::placement::{CancelFlag, Placer};
use crate::problem::{PlacementProblem, ProblemFile};
use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "wcl", version, about = "Collision-free word-cloud label placement")]
pub struct Args {
    /// Problem JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output JSON file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file with placement and logging settings
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Vertical compression of the search spiral
    #[arg(long = "eccentricity")]
    pub eccentricity: Option<f64>,

    /// Radius step (NaN selects the default)
    #[arg(long = "radiusStep")]
    pub radius_step: Option<f64>,

    /// Angle step in turns (NaN selects the default)
    #[arg(long = "angleStep")]
    pub angle_step: Option<f64>,

    /// Drop texts that cannot be placed instead of keeping their anchor
    #[arg(long = "removeOutside")]
    pub remove_outside: bool,

    /// Seed for the starting spiral angles
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Log filter, overrides the config file
    #[arg(long = "logLevel")]
    pub log_level: Option<String>,

    /// Pretty-print the output JSON
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    init_logging(&config.logging.level);

    let input = read_input(args.input.as_deref())?;
    let problem = parse_problem(&input)?;
    info!(
        texts = problem.text_count(),
        boxes = problem.box_count(),
        "placing texts"
    );

    let placer = Placer::new(config.placement)?;
    let mut rng = match config.placement.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let outcome = placer.place(&problem, &mut rng, &CancelFlag::new())?;
    let dump = PlacementDump::from_outcome(&outcome);
    write_placement_dump(args.output.as_deref(), &dump, args.pretty)
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(v) = args.eccentricity {
        config.placement.eccentricity = v;
    }
    if let Some(v) = args.radius_step {
        config.placement.radius_step = v;
    }
    if let Some(v) = args.angle_step {
        config.placement.angle_step = v;
    }
    if args.remove_outside {
        config.placement.remove_outside = true;
    }
    if args.seed.is_some() {
        config.placement.seed = args.seed;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries the result JSON
    let subscriber = fmt().with_env_filter(filter).with_writer(io::stderr);
    // a subscriber may already be installed
    let _ = subscriber.try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_problem(input: &str) -> Result<PlacementProblem> {
    let file: ProblemFile = serde_json::from_str(input).context("invalid problem JSON")?;
    Ok(file.into_problem()?)
}
