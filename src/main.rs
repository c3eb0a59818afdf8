//! Headless runner (default binary).
//!
//! Plays a one-letter action script against a fresh grid and prints the result,
//! either as the final grid or as one JSON event per line.
//!
//! ```text
//! piles-of-tiles --width 6 --height 8 --actions "LLD..CRR...."
//! RUST_LOG=debug piles-of-tiles --content shapes.json --json --actions "...."
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use piles_of_tiles::core::{CollisionPolicy, Content, GameEvent, ShapeTable};
use piles_of_tiles::effects::EffectState;
use piles_of_tiles::engine::{parse_script, Session, SessionConfig, Step};
use piles_of_tiles::types::{BrickAction, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Reject,
    Correct,
}

impl From<PolicyArg> for CollisionPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Reject => CollisionPolicy::Reject,
            PolicyArg::Correct => CollisionPolicy::Correct,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "piles-of-tiles", version, about = "Headless falling-block runner")]
struct Args {
    /// Session config JSON (width, height, spawn, gravityMs, policy, seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shape content JSON; its spawn anchor, if set, replaces the config's
    #[arg(long)]
    content: Option<PathBuf>,

    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    height: Option<u16>,

    /// Randomizer seed
    #[arg(long)]
    seed: Option<u32>,

    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Steps: L R D C A, `.` for one gravity interval
    #[arg(long, default_value = "")]
    actions: String,

    /// Print events as JSON lines instead of the final grid
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SessionConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    let shapes = match &args.content {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading content {}", path.display()))?;
            let content = Content::from_json(&json)
                .with_context(|| format!("loading content {}", path.display()))?;
            config.apply_content(&content);
            content.shape_table()?
        }
        None => ShapeTable::standard(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(policy) = args.policy {
        config.policy = policy.into();
    }

    let steps = parse_script(&args.actions).context("parsing --actions")?;
    let mut session = Session::from_config(&config, shapes).context("building session")?;
    let mut effects = EffectState::new(config.seed);

    let mut events = session.start();
    effects.load(&session.snapshot());

    for step in steps {
        if step == Step::Action(BrickAction::MoveDown) {
            effects.soft_drop_pressed();
        }
        events.extend(run_step(&mut session, &mut effects, step));
        if session.resolver().game_over() {
            break;
        }
    }

    if args.json {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
        return Ok(());
    }

    let snapshot = session.snapshot();
    for row in snapshot.rows_text() {
        println!("{row}");
    }
    println!(
        "bricks: {}  rows cleared: {}  level: {}  shakes: {}{}",
        snapshot.bricks_spawned,
        snapshot.rows_cleared,
        session.level(),
        effects.shakes(),
        if snapshot.game_over { "  GAME OVER" } else { "" }
    );
    Ok(())
}

fn run_step(session: &mut Session, effects: &mut EffectState, step: Step) -> Vec<GameEvent> {
    let events = session.step(step);
    let snapshot = session.snapshot();
    for event in &events {
        match event {
            GameEvent::GameOver { .. } => info!("game over"),
            GameEvent::BrickCollided { action, .. } => debug!("{} blocked", action.as_str()),
            _ => {}
        }
        effects.handle(event, &snapshot);
    }
    effects.update(TICK_MS);
    events
}
