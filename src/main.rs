//! delve - headless dungeon crawl

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use delve::builder::build_from_descriptor;
use delve::entity::Living;
use delve::{Config, Pacing, Runner, World};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "delve", version, about = "Run a headless dungeon crawl")]
struct Args {
    /// Configuration file (defaults to ./delve.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dice seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to play, overriding the configuration
    #[arg(long)]
    turns: Option<u32>,

    /// Skip every pacing delay
    #[arg(long)]
    no_pacing: bool,

    /// Print the party as JSON when the run ends
    #[arg(long)]
    dump: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delve=info".into()),
        )
        .with(args.json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!args.json_logs).then(tracing_subscriber::fmt::layer))
        .init();
    let mut config = Config::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(turns) = args.turns {
        config.max_turns = turns;
    }
    let pacing = if args.no_pacing {
        Pacing::NONE
    } else {
        config.pacing
    };

    let mut dice = config.dice();
    let level = config.level.generate(&mut dice, 1);
    let mut party = Vec::with_capacity(config.party.len());
    for descriptor in &config.party {
        let member: Living = build_from_descriptor(descriptor, 1, None, &mut dice)
            .with_context(|| format!("building party member {:?}", descriptor))?;
        info!("{} joins the party", member);
        party.push(member);
    }

    let mut world = World::new(level, dice).with_generator(config.level);
    for member in party {
        world.add_player(member);
    }

    let mut runner = Runner::new(world, pacing);
    let summary = runner.run(config.max_turns).await;

    if args.dump {
        let report = serde_json::json!({
            "summary": summary,
            "party": runner.world().players(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
