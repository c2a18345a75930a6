//! Replay command - apply a turn log to a fresh board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_inputs(), replay_turns(), report_board()
//! - Level 3: apply_turn()
//! - Level 4: formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hive_core::{Board, PieceKind, RuleSet, Team, Turn};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON array of turns, in play order
    #[arg(value_name = "FILE")]
    pub turns: PathBuf,

    /// Ruleset JSON file (defaults to the base game)
    #[arg(long, value_name = "FILE")]
    pub ruleset: Option<PathBuf>,

    /// Add the expansion pieces to the ruleset
    #[arg(long)]
    pub expansions: bool,

    /// Trust the log like a peer's turns instead of checking legality
    #[arg(long)]
    pub remote: bool,

    /// Output the final board state as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
///
/// 1. Load ruleset and turn log
/// 2. Apply every turn to a fresh board
/// 3. Report the final board
pub fn run(args: ReplayArgs) -> Result<()> {
    let (rules, turns) = load_inputs(&args)?;

    tracing::info!(
        "Replaying {} turns on {} ({})",
        turns.len(),
        rules.name,
        if args.remote { "trusted" } else { "checked" }
    );

    let mut board = Board::offline(&rules);
    replay_turns(&mut board, &turns, args.remote)?;

    report_board(&board, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load the ruleset and the turn log
fn load_inputs(args: &ReplayArgs) -> Result<(RuleSet, Vec<Turn>)> {
    let rules = load_ruleset(args.ruleset.as_deref(), args.expansions)?;

    let content = std::fs::read_to_string(&args.turns)
        .with_context(|| format!("Failed to read turn log: {}", args.turns.display()))?;
    let turns: Vec<Turn> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse turn log: {}", args.turns.display()))?;

    Ok((rules, turns))
}

/// Apply turns in order, stopping at the first one that fails
pub(crate) fn replay_turns(board: &mut Board, turns: &[Turn], remote: bool) -> Result<()> {
    for (index, &turn) in turns.iter().enumerate() {
        apply_turn(board, turn, remote)
            .with_context(|| format!("Turn {} ({:?}) failed", index + 1, turn))?;
    }
    Ok(())
}

/// Print the board as JSON or text
fn report_board(board: &Board, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(board.state())?);
    } else {
        print_text_board(board);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn apply_turn(board: &mut Board, turn: Turn, remote: bool) -> Result<()> {
    if remote {
        board.apply_remote(turn)?;
    } else {
        board.play(turn)?;
    }
    Ok(())
}

/// Ruleset from file or the base game, optionally with expansions
pub(crate) fn load_ruleset(path: Option<&Path>, expansions: bool) -> Result<RuleSet> {
    let rules = match path {
        Some(path) => RuleSet::load(path)
            .with_context(|| format!("Failed to load ruleset: {}", path.display()))?,
        None => RuleSet::default(),
    };

    Ok(if expansions { rules.with_expansions() } else { rules })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_board(board: &Board) {
    let grid = board.grid();
    println!("\n=== Board after {} turns ===", board.turn_number());
    println!("Grid: {}x{}", grid.rows(), grid.cols());
    println!("{}", grid);

    for team in [Team::First, Team::Second] {
        println!("{:?} hand: {}", team, format_hand(board, team));
    }
    println!("To play: {:?}", board.active_team());
}

/// `Queen Bee 1, Spider 2, ...`, only kinds the ruleset uses
fn format_hand(board: &Board, team: Team) -> String {
    let hand = board.hand(team);
    let parts: Vec<String> = PieceKind::ALL
        .into_iter()
        .filter(|&kind| board.starting_count(kind) > 0)
        .map(|kind| format!("{} {}", kind, hand.count(kind)))
        .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hive_core::{Coord, HiveError, IllegalAction};

    fn opening() -> Vec<Turn> {
        vec![
            Turn::place(PieceKind::QueenBee, Coord::new(4, 4)),
            Turn::place(PieceKind::QueenBee, Coord::new(1, 2)),
        ]
    }

    #[test]
    fn test_replay_checked() {
        let mut board = Board::offline(&RuleSet::default());
        replay_turns(&mut board, &opening(), false).unwrap();
        assert_eq!(board.turn_number(), 2);
        assert_eq!(board.active_team(), Team::First);
    }

    #[test]
    fn test_replay_stops_at_illegal_turn() {
        let mut board = Board::offline(&RuleSet::default());
        let mut turns = opening();
        turns.push(Turn::place(PieceKind::QueenBee, Coord::new(0, 0)));

        let err = replay_turns(&mut board, &turns, false).unwrap_err();
        assert!(err.to_string().contains("Turn 3"));
        assert!(matches!(
            err.downcast_ref::<HiveError>(),
            Some(HiveError::Illegal(IllegalAction::HandExhausted(PieceKind::QueenBee)))
        ));
        assert_eq!(board.turn_number(), 2);
    }

    #[test]
    fn test_replay_remote_matches_checked() {
        let mut checked = Board::offline(&RuleSet::default());
        let mut trusted = Board::offline(&RuleSet::default());
        replay_turns(&mut checked, &opening(), false).unwrap();
        replay_turns(&mut trusted, &opening(), true).unwrap();
        assert_eq!(checked.state(), trusted.state());
    }

    #[test]
    fn test_format_hand_lists_ruleset_kinds() {
        let board = Board::offline(&RuleSet::default());
        let text = format_hand(&board, Team::First);
        assert!(text.starts_with("Queen Bee 1"));
        assert!(!text.contains("Mosquito"));
    }

    #[test]
    fn test_load_ruleset_default_with_expansions() {
        let rules = load_ruleset(None, true).unwrap();
        assert_eq!(rules.starting_count(PieceKind::Ladybug), 1);
    }
}
