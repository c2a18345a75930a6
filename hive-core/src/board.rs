//! Board - turn state machine
//!
//! The board owns the grid, both hands and the active team. Every committed
//! turn, local or remote, runs the same sequence: mutate, flip the active
//! team, grow, shrink, then notify subscribers once.

use crate::coord::Coord;
use crate::error::{Desync, HiveError, IllegalAction};
use crate::grid::Grid;
use crate::moves::{self, MoveSet};
use crate::pieces::{Piece, PieceKind, Team};
use crate::relay::{NullRelay, TurnRelay};
use crate::ruleset::RuleSet;
use crate::turn::Turn;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

// ============================================================================
// HAND
// ============================================================================

/// Unplaced pieces per kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    counts: [u8; PieceKind::COUNT],
}

impl Hand {
    pub fn from_ruleset(rules: &RuleSet) -> Self {
        let mut counts = [0; PieceKind::COUNT];
        for kind in PieceKind::ALL {
            counts[kind.index()] = rules.starting_count(kind);
        }
        Self { counts }
    }

    pub fn count(&self, kind: PieceKind) -> u8 {
        self.counts[kind.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Kinds with at least one piece left
    pub fn available(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PieceKind::ALL.into_iter().filter(|&kind| self.count(kind) > 0)
    }

    /// Take one `kind` out of the hand; false if none are left
    fn take(&mut self, kind: PieceKind) -> bool {
        match self.counts[kind.index()].checked_sub(1) {
            Some(left) => {
                self.counts[kind.index()] = left;
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// Everything that two peers must agree on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub grid: Grid,
    pub active: Team,
    pub hands: [Hand; 2],
    /// Committed turns so far
    pub turn: u32,
}

/// Sent to subscribers once per committed turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    Changed,
}

/// A game in progress
pub struct Board {
    state: BoardState,
    starting: Hand,
    relay: Box<dyn TurnRelay>,
    listeners: Vec<Sender<BoardEvent>>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game: empty grid, full hands, first team to play
    pub fn new(rules: &RuleSet, relay: Box<dyn TurnRelay>) -> Self {
        let starting = Hand::from_ruleset(rules);
        Self {
            state: BoardState {
                grid: Grid::new(rules.rows, rules.cols),
                active: Team::First,
                hands: [starting.clone(), starting.clone()],
                turn: 0,
            },
            starting,
            relay,
            listeners: Vec::new(),
        }
    }

    /// Fresh game with no peer
    pub fn offline(rules: &RuleSet) -> Self {
        Self::new(rules, Box::new(NullRelay))
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn active_team(&self) -> Team {
        self.state.active
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn
    }

    pub fn hand(&self, team: Team) -> &Hand {
        &self.state.hands[team.index()]
    }

    pub fn starting_count(&self, kind: PieceKind) -> u8 {
        self.starting.count(kind)
    }

    /// Pieces of `kind` owned by `team` on the grid, buried ones included
    pub fn placed_count(&self, kind: PieceKind, team: Team) -> usize {
        self.state
            .grid
            .pieces()
            .filter(|piece| piece.kind == kind && piece.team == team)
            .count()
    }

    /// Receive a `BoardEvent::Changed` after every committed turn
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Cells a piece could be placed on right now
    ///
    /// Any non-edge cell on an empty grid; otherwise empty cells touching the hive.
    pub fn placeable_locations(&self) -> MoveSet {
        let grid = &self.state.grid;
        if grid.is_vacant() {
            let (rows, cols) = (grid.rows(), grid.cols());
            return grid.coords().filter(|coord| !coord.is_edge(rows, cols)).collect();
        }
        grid.coords()
            .filter(|&coord| !grid.is_occupied(coord) && grid.has_occupied_neighbor(coord, None))
            .collect()
    }

    /// Raw destinations for the top piece at `from`, before the one-hive filter
    pub fn available_moves(&self, from: Coord) -> Result<MoveSet, HiveError> {
        let grid = &self.state.grid;
        let cell = grid.cell(from)?;
        Ok(cell
            .top()
            .map(|piece| moves::available_moves(piece.kind, grid, from))
            .unwrap_or_default())
    }

    /// Destinations for the top piece at `from` that keep the hive connected
    pub fn legal_moves(&self, from: Coord) -> Result<MoveSet, HiveError> {
        self.state.grid.check(from)?;
        Ok(moves::legal_moves(&self.state.grid, from))
    }

    /// Every turn the active team could play
    pub fn legal_turns(&self) -> Vec<Turn> {
        let team = self.state.active;
        let grid = &self.state.grid;
        let mut turns = Vec::new();

        let hand = self.hand(team);
        if !hand.is_empty() {
            let targets = self.placeable_locations();
            for kind in hand.available() {
                turns.extend(targets.iter().map(|&to| Turn::place(kind, to)));
            }
        }

        for from in grid.occupied() {
            let Some(piece) = grid.top(from) else {
                continue;
            };
            if piece.team != team || !piece.kind.can_move() {
                continue;
            }
            turns.extend(
                moves::legal_moves(grid, from)
                    .into_iter()
                    .map(|to| Turn::movement(from, to)),
            );
        }

        turns
    }

    // ========================================================================
    // LOCAL TURNS
    // ========================================================================

    /// Validate and commit a turn for the active team, then send it to the peer
    ///
    /// An illegal turn leaves the board untouched: nothing is sent or notified.
    pub fn play(&mut self, turn: Turn) -> Result<(), HiveError> {
        let checked = match turn {
            Turn::Place { insect_type, to_coord } => self.check_place(insect_type, to_coord),
            Turn::Move { from_coord, to_coord } => self.check_move(from_coord, to_coord),
        };
        if let Err(err) = checked {
            tracing::debug!("rejected {:?}: {}", turn, err);
            return Err(err);
        }

        self.apply(turn)?;
        self.relay.send_turn(&turn);
        self.finish_turn(turn);
        Ok(())
    }

    fn check_place(&self, kind: PieceKind, to: Coord) -> Result<(), HiveError> {
        let grid = &self.state.grid;
        grid.check(to)?;

        if self.hand(self.state.active).count(kind) == 0 {
            return Err(IllegalAction::HandExhausted(kind).into());
        }
        if grid.is_occupied(to) {
            return Err(IllegalAction::Occupied(to).into());
        }
        if grid.is_vacant() {
            if to.is_edge(grid.rows(), grid.cols()) {
                return Err(IllegalAction::EdgeOpening(to).into());
            }
        } else if !grid.has_occupied_neighbor(to, None) {
            return Err(IllegalAction::Detached(to).into());
        }

        Ok(())
    }

    fn check_move(&self, from: Coord, to: Coord) -> Result<(), HiveError> {
        let grid = &self.state.grid;
        grid.check(from)?;
        grid.check(to)?;

        let piece = grid.top(from).ok_or(IllegalAction::EmptySource(from))?;
        if piece.team != self.state.active {
            return Err(IllegalAction::NotYourPiece(from).into());
        }
        if !moves::legal_moves(grid, from).contains(&to) {
            return Err(IllegalAction::UnreachableDestination { from, to }.into());
        }

        Ok(())
    }

    // ========================================================================
    // REMOTE TURNS
    // ========================================================================

    /// Replay a turn the peer already validated
    ///
    /// Legality is not re-checked. A turn that cannot apply at all is a
    /// `Desync`, and the board is left untouched.
    pub fn apply_remote(&mut self, turn: Turn) -> Result<(), HiveError> {
        let grid = &self.state.grid;
        let checked = match turn {
            Turn::Place { insect_type, to_coord } => grid.check(to_coord).and_then(|()| {
                let team = self.state.active;
                if self.hand(team).count(insect_type) == 0 {
                    return Err(Desync::HandExhausted { team, kind: insect_type }.into());
                }
                Ok(())
            }),
            Turn::Move { from_coord, to_coord } => grid
                .check(from_coord)
                .and_then(|()| grid.check(to_coord))
                .and_then(|()| {
                    if grid.is_occupied(from_coord) {
                        Ok(())
                    } else {
                        Err(Desync::EmptySource(from_coord).into())
                    }
                }),
        };
        if let Err(err) = checked {
            tracing::warn!("cannot replay remote {:?}: {}", turn, err);
            return Err(err);
        }

        self.apply(turn)?;
        self.finish_turn(turn);
        Ok(())
    }

    /// Replay every turn waiting on the relay; returns how many were applied
    ///
    /// Stops at the first turn that fails to replay.
    pub fn receive_remote(&mut self) -> Result<usize, HiveError> {
        let mut applied = 0;
        while let Some(turn) = self.relay.poll_turn() {
            self.apply_remote(turn)?;
            applied += 1;
        }
        Ok(applied)
    }

    // ========================================================================
    // COMMIT
    // ========================================================================

    /// Mutate the grid and hand; callers have checked the turn already
    fn apply(&mut self, turn: Turn) -> Result<(), HiveError> {
        let team = self.state.active;
        match turn {
            Turn::Place { insect_type, to_coord } => {
                self.state.grid.check(to_coord)?;
                if !self.state.hands[team.index()].take(insect_type) {
                    return Err(Desync::HandExhausted { team, kind: insect_type }.into());
                }
                self.state.grid.push(to_coord, Piece::new(insect_type, team))?;
            }
            Turn::Move { from_coord, to_coord } => {
                self.state.grid.check(to_coord)?;
                let piece = self
                    .state
                    .grid
                    .pop(from_coord)?
                    .ok_or(Desync::EmptySource(from_coord))?;
                self.state.grid.push(to_coord, piece)?;
            }
        }
        Ok(())
    }

    fn finish_turn(&mut self, turn: Turn) {
        tracing::debug!("turn {} by {:?}: {:?}", self.state.turn + 1, self.state.active, turn);

        self.state.active = self.state.active.opponent();
        self.state.turn += 1;
        self.state.grid.grow_if_touching();
        self.state.grid.shrink_if_clear();

        self.listeners
            .retain(|listener| listener.send(BoardEvent::Changed).is_ok());
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
