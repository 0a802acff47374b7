//! Block battle referee (default binary).
//!
//! Adjudicates a scripted match: reads canned bot replies from a JSON
//! script, plays rounds until one side is eliminated (or the round limit
//! hits), and writes a JSON report with both players' histories.
//!
//! Logs go to stderr; set `RUST_LOG` (default `info`) to change verbosity.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blockbattle::core::{MoveSource, Outcome, RoundUpdate};
use blockbattle::engine::{MatchConfig, MatchRunner, ScriptedSource};
use blockbattle::protocol::{update_lines, MatchScript};
use blockbattle::types::PlayerId;

/// Referee for two-player block battle matches.
#[derive(Debug, Parser)]
#[command(
    name = "blockbattle",
    version,
    about = "Replay a scripted two-player block battle match and report the result."
)]
struct Args {
    /// Match script: JSON with one list of per-round move lines per player.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Seed for pieces and garbage holes (overrides the script and BLOCKBATTLE_SEED).
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Stop after this many rounds even if nobody lost.
    #[arg(long, value_name = "N")]
    max_rounds: Option<u32>,

    /// Field width in columns.
    #[arg(long, value_name = "COLS")]
    width: Option<usize>,

    /// Field height in rows.
    #[arg(long, value_name = "ROWS")]
    height: Option<usize>,

    /// Print the update lines each bot receives, followed by its reply, to stderr.
    #[arg(long)]
    updates: bool,

    /// Write the JSON report to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Args {
    /// Flags win over the script, which wins over the environment
    fn config(&self, script: &MatchScript) -> MatchConfig {
        let mut config = MatchConfig::from_env().merge_script(script);
        if let Some(width) = self.width {
            config.field_width = width;
        }
        if let Some(height) = self.height {
            config.field_height = height;
        }
        if self.max_rounds.is_some() {
            config.max_rounds = self.max_rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

/// Echoes every round update and reply to `out` (stderr in `main`), keeping
/// stdout for the report
struct PrintUpdates<'a, S: MoveSource, W: Write> {
    inner: &'a mut S,
    out: W,
}

impl<S: MoveSource, W: Write> MoveSource for PrintUpdates<'_, S, W> {
    fn request_moves(&mut self, player: PlayerId, update: &RoundUpdate) -> String {
        // Echo failures must not change the match
        let _ = writeln!(self.out, "# {player}");
        for line in update_lines(update) {
            let _ = writeln!(self.out, "{line}");
        }
        let reply = self.inner.request_moves(player, update);
        let _ = writeln!(self.out, "> {reply}");
        reply
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let json = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let script = MatchScript::from_json(&json)
        .with_context(|| format!("invalid script {}", args.script.display()))?;

    let config = args.config(&script);
    let mut runner = MatchRunner::new(config).context("invalid match settings")?;
    let mut source = ScriptedSource::new(script);

    let summary = if args.updates {
        runner.run(&mut PrintUpdates {
            inner: &mut source,
            out: io::stderr(),
        })
    } else {
        runner.run(&mut source)
    };

    match summary.outcome {
        Outcome::Decided(winner) => tracing::info!(%winner, rounds = summary.rounds, "winner"),
        Outcome::Draw => tracing::info!(rounds = summary.rounds, "draw"),
        Outcome::Undecided => tracing::info!(rounds = summary.rounds, "no result"),
    }
    for player in &summary.players {
        tracing::info!(
            player = %player.id,
            row_points = player.row_points,
            combo = player.combo,
            skips = player.skips,
            warnings = player.warnings,
            "final counters"
        );
    }

    let report = runner
        .report()
        .to_json_pretty()
        .context("failed to encode report")?;
    match &args.output {
        Some(path) => fs::write(path, report)
            .with_context(|| format!("failed to write report {}", path.display()))?,
        None => println!("{report}"),
    }

    Ok(())
}
