type Result<T> = std::result::Result<T, anyhow::Error>;

use anyhow::Context;
use clap::Parser;
use keep_away::{parse_monkeys, Part, ReliefMode, RunConfig};
use std::io::Read;
use std::path::PathBuf;

/// Monkey keep-away: prints the monkey business for each part.
#[derive(Parser, Debug)]
#[command(name = "dec11")]
struct Args {
    /// Puzzle input; read from stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Only solve this part (1 or 2)
    #[arg(long)]
    part: Option<Part>,

    /// Override the number of rounds for the selected part
    #[arg(long, requires = "part")]
    rounds: Option<usize>,

    /// Override the relief mode for the selected part (dampened or bounded)
    #[arg(long, requires = "part")]
    relief: Option<ReliefMode>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let buffer = read_input(args.input.as_ref())?;
    let monkeys = parse_monkeys(&buffer).context("parsing monkey notes")?;
    tracing::debug!(count = monkeys.len(), "parsed monkeys");

    let parts = match args.part {
        Some(part) => vec![part],
        None => vec![Part::One, Part::Two],
    };

    for part in parts {
        let mut config = RunConfig::for_part(part);
        if let Some(rounds) = args.rounds {
            config.rounds = rounds;
        }
        if let Some(relief) = args.relief {
            config.relief = relief;
        }

        let result = keep_away::run(&monkeys, &config)
            .with_context(|| format!("solving part {}", part.number()))?;
        println!("{}: {}", part, result);
    }

    Ok(())
}
