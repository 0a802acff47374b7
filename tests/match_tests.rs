//! Integration tests for whole rounds and matches

use rand::rngs::mock::StepRng;

use blockbattle::core::{EngineWarning, Field, Outcome, RoundProcessor, RoundUpdate};
use blockbattle::engine::{MatchConfig, MatchRunner, ScriptedSource};
use blockbattle::types::{Cell, PieceKind, PlayerId};

/// A constant stream that always draws T, with garbage holes at columns 7 and 4
const ALWAYS_T: u64 = 0xB6DB_6DB6_DB6D_B6DC;

fn t_processor() -> RoundProcessor<StepRng> {
    let processor = RoundProcessor::with_rng(10, 20, StepRng::new(ALWAYS_T, 0)).unwrap();
    assert_eq!(processor.next_piece(), PieceKind::T);
    processor
}

/// T-spin double slot:
///
/// ```text
/// row 17  X . . . . . . . . .
/// row 18  X X X . . . X X X X
/// row 19  X X X X . X X X X X
/// ```
fn build_t_slot(field: &mut Field) {
    for x in 0..10 {
        if x != 4 {
            field.set(x, 19, Cell::Block(PieceKind::Garbage));
        }
        if !(3..=5).contains(&x) {
            field.set(x, 18, Cell::Block(PieceKind::Garbage));
        }
    }
    field.set(3, 17, Cell::Block(PieceKind::Garbage));
}

/// Turn east at spawn, fall to the slot, turn south
fn t_spin_moves() -> String {
    let mut moves = vec!["turnright"];
    moves.extend(["down"; 18]);
    moves.push("turnright");
    moves.join(",")
}

fn row_blocks(field: &Field, y: i32) -> usize {
    (0..field.width() as i32)
        .filter(|&x| matches!(field.get(x, y), Some(cell) if cell.is_block()))
        .count()
}

#[test]
fn test_t_spin_double_scores_and_sends_garbage() {
    let mut referee = t_processor();
    build_t_slot(referee.player_mut(PlayerId::One).field_mut());

    let p1 = format!("{},down", t_spin_moves());
    let mut bots = |id: PlayerId, _: &RoundUpdate| match id {
        PlayerId::One => p1.clone(),
        PlayerId::Two => String::new(),
    };
    referee.play_round(&mut bots);

    let one = referee.player(PlayerId::One);
    assert!(one.t_spin());
    assert_eq!(one.rows_removed(), 2);
    assert_eq!(one.row_points(), 10);
    assert_eq!(one.combo(), 1);
    assert_eq!(one.skips(), 1);
    assert!(one.warnings().is_empty());
    // Only the overhang survives, two rows lower
    assert_eq!(one.field().block_count(), 1);
    assert_eq!(one.field().get(3, 19), Some(Cell::Block(PieceKind::Garbage)));

    // 10 points -> 3 rows; 10 / 3 = 3 is odd, so the first row has two holes
    let two = referee.player(PlayerId::Two);
    assert_eq!(row_blocks(two.field(), 19), 8);
    assert_eq!(row_blocks(two.field(), 18), 9);
    assert_eq!(row_blocks(two.field(), 17), 8);
    assert_eq!(two.field().get(7, 19), Some(Cell::Empty));
    assert_eq!(two.field().get(4, 19), Some(Cell::Empty));
    assert_eq!(two.field().get(7, 18), Some(Cell::Empty));
}

#[test]
fn test_final_turn_with_resting_piece_counts_as_t_spin() {
    let mut referee = t_processor();
    build_t_slot(referee.player_mut(PlayerId::One).field_mut());

    // The list ends on the turn; the forced drop does not move the piece
    let p1 = t_spin_moves();
    let mut bots = |id: PlayerId, _: &RoundUpdate| match id {
        PlayerId::One => p1.clone(),
        PlayerId::Two => "drop".to_string(),
    };
    referee.play_round(&mut bots);

    let one = referee.player(PlayerId::One);
    assert!(one.t_spin());
    assert_eq!(one.row_points(), 10);
    assert!(one.warnings().is_empty());
    assert_eq!(
        one.history().last().unwrap().move_description(),
        "turnright"
    );
}

#[test]
fn test_forced_drop_cancels_t_spin() {
    let mut referee = t_processor();
    build_t_slot(referee.player_mut(PlayerId::One).field_mut());

    // Stop one row early: the forced drop moves the piece
    let mut moves = vec!["turnright"];
    moves.extend(["down"; 17]);
    moves.push("turnright");
    let p1 = moves.join(",");
    let mut bots = |id: PlayerId, _: &RoundUpdate| match id {
        PlayerId::One => p1.clone(),
        PlayerId::Two => "drop".to_string(),
    };
    referee.play_round(&mut bots);

    let one = referee.player(PlayerId::One);
    assert!(!one.t_spin());
    assert_eq!(one.warnings(), &[EngineWarning::LoosePiece]);
}

#[test]
fn test_blocked_moves_are_noted_in_history() {
    let mut referee = RoundProcessor::with_rng(10, 20, StepRng::new(0, 0)).unwrap();
    let mut bots =
        |_: PlayerId, _: &RoundUpdate| "left,left,left,left,turnleft,drop".to_string();
    referee.play_round(&mut bots);

    let history = referee.player(PlayerId::One).history();
    let moves: Vec<String> = history
        .iter()
        .skip(2)
        .map(|record| record.move_description())
        .collect();

    assert_eq!(
        moves,
        vec![
            "left",
            "left",
            "left",
            "Can't perform left: Piece is on the field boundary. Action changed to 'down'.",
            "turnleft",
            "drop",
        ]
    );
}

#[test]
fn test_blocked_rotation_note() {
    let mut referee = RoundProcessor::with_rng(10, 20, StepRng::new(0, 0)).unwrap();
    referee
        .player_mut(PlayerId::Two)
        .field_mut()
        .set(4, 2, Cell::Block(PieceKind::Garbage));

    let mut bots = |_: PlayerId, _: &RoundUpdate| "turnleft,drop".to_string();
    referee.play_round(&mut bots);

    let history = referee.player(PlayerId::Two).history();
    assert_eq!(
        history[2].move_description(),
        "Can't perform turnleft: Other blocks are in the way. Move skipped."
    );
}

#[test]
fn test_history_counts_per_round() {
    let mut referee = RoundProcessor::with_rng(10, 20, StepRng::new(0, 0)).unwrap();
    let mut bots = |id: PlayerId, _: &RoundUpdate| match id {
        PlayerId::One => "left,right,drop".to_string(),
        PlayerId::Two => "left".to_string(),
    };
    referee.play_round(&mut bots);
    referee.play_round(&mut bots);

    // start + 2 x (round start + 3 moves)
    assert_eq!(referee.player(PlayerId::One).history().len(), 9);
    // start + 2 x (round start + left + forced drop)
    assert_eq!(referee.player(PlayerId::Two).history().len(), 7);

    let rounds: Vec<u32> = referee
        .player(PlayerId::Two)
        .history()
        .iter()
        .map(|record| record.round)
        .collect();
    assert_eq!(rounds, vec![0, 1, 1, 1, 2, 2, 2]);
}

#[test]
fn test_garbage_overflow_decides_for_scorer() {
    let mut referee = RoundProcessor::with_rng(10, 20, StepRng::new(0, 0)).unwrap();
    {
        let field = referee.player_mut(PlayerId::One).field_mut();
        for y in 16..20 {
            for x in 1..10 {
                field.set(x, y, Cell::Block(PieceKind::Garbage));
            }
        }
    }
    {
        // Player two's stack reaches row 3; six garbage rows push it off
        let field = referee.player_mut(PlayerId::Two).field_mut();
        for y in 3..20 {
            field.set(0, y, Cell::Block(PieceKind::Garbage));
        }
    }

    let mut bots = |id: PlayerId, _: &RoundUpdate| match id {
        PlayerId::One => "turnleft,left,left,left,left,drop".to_string(),
        PlayerId::Two => "drop".to_string(),
    };
    referee.play_round(&mut bots);

    assert_eq!(referee.outcome(), Outcome::Decided(PlayerId::One));
}

#[test]
fn test_scripted_match_through_runner() {
    let config = MatchConfig {
        seed: Some(5),
        max_rounds: Some(6),
        ..Default::default()
    };
    let mut runner = MatchRunner::new(config).unwrap();
    let mut source = ScriptedSource::from_replies(
        ["left,left,drop", "right,right,drop", "drop"],
        ["drop", "turnleft,drop", "skip"],
    );

    let summary = runner.run(&mut source);
    assert_eq!(summary.rounds, 6);
    assert!(!summary.finished);

    // Round 3 "skip" has no charge; rounds 4-6 have no script
    let report = runner.report();
    assert_eq!(report.rounds, 6);
    assert_eq!(report.players[1].warnings.len(), 4);
    assert_eq!(report.players[1].warnings[0], "No skips available");
    assert_eq!(
        report.players[1].warnings[3],
        "Piece was still loose, it was dropped"
    );
}
