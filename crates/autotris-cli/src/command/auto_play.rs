use std::{path::PathBuf, time::Duration};

use autotris_ai::{
    auto_player::{AutoPlayer, AutoPlayerConfig},
    weights::EvaluationWeights,
};
use autotris_engine::GameSession;
use chrono::Utc;
use rand::Rng as _;

use crate::{schema::report::AutoPlayReport, util};

const PROGRESS_INTERVAL: usize = 100;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Player configuration file (JSON); missing fields use defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Evaluation weights as "hole,height,lines,bumpiness", overriding the config file
    #[clap(long, allow_hyphen_values = true)]
    weights: Option<EvaluationWeights>,
    /// Seed for the piece sequence (random if omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Stop after this many pieces have been locked
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    /// Simulated time per tick in milliseconds
    #[clap(long, default_value_t = 16)]
    tick_ms: u64,
    /// Output file path for the JSON report (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        config,
        weights,
        seed,
        max_pieces,
        tick_ms,
        output,
    } = arg;

    let mut config = match config {
        Some(path) => util::read_config_file(path)?,
        None => AutoPlayerConfig::default(),
    };
    if let Some(weights) = weights {
        config.weights = *weights;
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let tick = Duration::from_millis((*tick_ms).max(1));
    log::debug!("auto-play config: {config:?}");

    let mut session = GameSession::with_seed(seed);
    let mut player = AutoPlayer::new(config);
    let mut next_progress = PROGRESS_INTERVAL;

    eprintln!("Playing with seed {seed} (up to {max_pieces} pieces)...");
    while session.session_state().is_playing() && session.stats().completed_pieces() < *max_pieces
    {
        player.update(&mut session, tick);
        session.update(tick);

        let stats = session.stats();
        if stats.completed_pieces() >= next_progress {
            eprintln!(
                "  {} pieces, {} lines, score {}",
                stats.completed_pieces(),
                stats.total_cleared_lines(),
                stats.score()
            );
            next_progress += PROGRESS_INTERVAL;
        }
    }

    let stats = session.stats();
    let report = AutoPlayReport {
        finished_at: Utc::now(),
        seed,
        config,
        score: stats.score(),
        lines: stats.total_cleared_lines(),
        level: stats.level(),
        pieces: stats.completed_pieces(),
        game_over: session.session_state().is_game_over(),
    };
    eprintln!(
        "Finished: score {}, lines {}, pieces {}{}",
        report.score,
        report.lines,
        report.pieces,
        if report.game_over { " (game over)" } else { "" }
    );

    util::save_json(&report, output.as_deref())?;
    Ok(())
}
