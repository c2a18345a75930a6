//! Play command - random legal game, written out as a turn log
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_random_game(), write_log()
//! - Level 4: RNG setup

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hive_core::{Board, RuleSet, Turn};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Maximum number of turns to play
    #[arg(long, default_value = "30")]
    pub turns: usize,

    /// RNG seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ruleset JSON file (defaults to the base game)
    #[arg(long, value_name = "FILE")]
    pub ruleset: Option<PathBuf>,

    /// Add the expansion pieces to the ruleset
    #[arg(long)]
    pub expansions: bool,

    /// Write the turn log here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load ruleset
/// 2. Play random legal turns
/// 3. Write the turn log
pub fn run(args: PlayArgs) -> Result<()> {
    let rules = crate::replay::load_ruleset(args.ruleset.as_deref(), args.expansions)?;
    let mut rng = create_rng(args.seed);

    let (board, turns) = play_random_game(&rules, args.turns, &mut rng)?;

    tracing::info!(
        "Played {} turns on {}; final grid {}x{}",
        turns.len(),
        rules.name,
        board.grid().rows(),
        board.grid().cols()
    );

    write_log(&turns, args.output.as_ref())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Pick uniformly among legal turns until `max_turns` or no turn is left
pub(crate) fn play_random_game(
    rules: &RuleSet,
    max_turns: usize,
    rng: &mut ChaCha8Rng,
) -> Result<(Board, Vec<Turn>)> {
    let mut board = Board::offline(rules);
    let mut turns = Vec::with_capacity(max_turns);

    while turns.len() < max_turns {
        let Some(&turn) = board.legal_turns().choose(rng) else {
            tracing::info!("{:?} has no legal turn", board.active_team());
            break;
        };
        board.play(turn)?;
        turns.push(turn);
    }

    Ok((board, turns))
}

fn write_log(turns: &[Turn], output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(turns)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write turn log: {}", path.display()))?;
            tracing::info!("Turn log written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::replay_turns;

    #[test]
    fn test_same_seed_same_game() {
        let rules = RuleSet::default();
        let (_, a) = play_random_game(&rules, 16, &mut create_rng(Some(7))).unwrap();
        let (_, b) = play_random_game(&rules, 16, &mut create_rng(Some(7))).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_log_replays_to_same_board() {
        let rules = RuleSet::default();
        let (board, turns) = play_random_game(&rules, 24, &mut create_rng(Some(42))).unwrap();

        let mut replayed = Board::offline(&rules);
        replay_turns(&mut replayed, &turns, false).unwrap();
        assert_eq!(replayed.state(), board.state());
    }
}
