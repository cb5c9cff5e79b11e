use std::path::PathBuf;

use autotris_ai::{action_plan::plan_actions, placement_search, weights::EvaluationWeights};
use autotris_engine::{Piece, PieceKind};

use crate::{schema::report::BestMoveReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    /// Board file: rows of `#` (filled) and `.` (empty), 10 per row, bottom-aligned
    #[clap(long)]
    board: PathBuf,
    /// Piece kind to place (one of I, O, T, S, Z, J, L)
    #[clap(long)]
    piece: PieceKind,
    /// Evaluation weights as "hole,height,lines,bumpiness"
    #[clap(long, allow_hyphen_values = true, default_value = "-5,-1,10,-2")]
    weights: EvaluationWeights,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let BestMoveArg {
        board,
        piece,
        weights,
        output,
    } = arg;

    let board = util::read_board_file(board)?;
    let piece = Piece::new(*piece);
    log::debug!("searching {} on board:\n{board}", piece.kind());

    let report = placement_search::best_move(&board, &piece, weights).map(|candidate| {
        let mut after = board.clone();
        after.lock(candidate.placement());
        after.clear_complete_rows();
        BestMoveReport {
            actions: plan_actions(&piece, &candidate).into(),
            board_after: after.to_string().lines().map(str::to_owned).collect(),
            candidate,
        }
    });
    if report.is_none() {
        eprintln!("No legal placement for {}", piece.kind());
    }

    util::save_json(&report, output.as_deref())?;
    Ok(())
}
