use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use taipan_core::{
    check_invariants, Captain, GameEvent, GreedyCaptain, RandomCaptain, Session, SessionConfig,
    StartingPosition,
};

/// Consecutive rejected commands before the driver gives up on a captain.
const MAX_REJECTIONS: u32 = 25;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Start {
    Cash,
    Guns,
}

impl From<Start> for StartingPosition {
    fn from(start: Start) -> Self {
        match start {
            Start::Cash => StartingPosition::CashAndDebt,
            Start::Guns => StartingPosition::Guns,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CaptainKind {
    Greedy,
    Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config (JSON). Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Firm name
    #[arg(long)]
    firm: Option<String>,

    /// Starting position
    #[arg(long, value_enum)]
    start: Option<Start>,

    /// Battle chance per arrival, in percent
    #[arg(long)]
    battle_probability: Option<u32>,

    /// Who gives the orders
    #[arg(long, value_enum, default_value_t = CaptainKind::Greedy)]
    captain: CaptainKind,

    /// Maximum number of commands to issue
    #[arg(short, long, default_value_t = 500)]
    turns: u32,

    /// Stream every event to stdout as a JSON line
    #[arg(long)]
    events: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(firm) = &args.firm {
        config.firm_name = firm.clone();
    }
    if let Some(start) = args.start {
        config.start = start.into();
    }
    if args.battle_probability.is_some() {
        config.battle_probability = args.battle_probability;
    }
    config.validate()?;
    Ok(config)
}

fn emit(out: &mut impl Write, events: &[GameEvent]) -> Result<()> {
    for event in events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    let config = load_config(&args)?;
    let mut session = Session::new(&config)?;
    let mut captain: Box<dyn Captain> = match args.captain {
        CaptainKind::Greedy => Box::new(GreedyCaptain::new()),
        CaptainKind::Random => Box::new(RandomCaptain::new(config.seed)),
    };

    log::info!("Starting voyage of {}...", config.firm_name);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut rejections = 0;

    for turn in 0..args.turns {
        if session.is_over() {
            break;
        }

        let command = captain.decide(session.state(), session.battle());
        match session.execute(command) {
            Ok(events) => {
                rejections = 0;
                if args.events {
                    emit(&mut out, &events)?;
                }
            }
            Err(_) => {
                rejections += 1;
                if rejections >= MAX_REJECTIONS && args.captain == CaptainKind::Greedy {
                    bail!("captain stuck after {turn} turns: {rejections} commands rejected in a row");
                }
            }
        }

        if cfg!(debug_assertions) {
            let violations = check_invariants(session.state());
            if !violations.is_empty() {
                bail!("invariants violated after {command:?}: {violations:?}");
            }
        }
    }

    let stats = session.final_stats();
    log::info!(
        "Voyage ended {}/{}: net worth {}, score {:.2} ({:?})",
        session.state().month,
        session.state().year,
        stats.net_worth,
        stats.score,
        stats.reason
    );

    if args.events {
        writeln!(out, "{}", serde_json::to_string(&stats)?)?;
    } else {
        let status = session.status();
        writeln!(out, "Firm:      {}", stats.firm_name)?;
        writeln!(out, "Date:      {}", status.date)?;
        writeln!(out, "Cash:      {}", status.cash)?;
        writeln!(out, "Bank:      {}", status.bank)?;
        writeln!(out, "Debt:      {}", status.debt)?;
        writeln!(out, "Net worth: {}", stats.net_worth)?;
        writeln!(out, "Score:     {:.2}", stats.score)?;
    }

    Ok(())
}
