//! RuleSet - grid size and starting hand

use crate::pieces::PieceKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting count for one piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPiece {
    pub kind: PieceKind,
    pub count: u8,
}

/// Game setup shared by both teams
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub hand: Vec<HandPiece>,
}

impl RuleSet {
    /// Base game plus one Mosquito, Ladybug and Pillbug
    ///
    /// The extra kinds can be placed but have no movement rule.
    pub fn with_expansions(mut self) -> Self {
        for kind in [PieceKind::Mosquito, PieceKind::Ladybug, PieceKind::Pillbug] {
            if !self.hand.iter().any(|piece| piece.kind == kind) {
                self.hand.push(HandPiece { kind, count: 1 });
            }
        }
        self.name = format!("{}+expansions", self.name);
        self
    }

    /// Starting count for `kind` (0 if not listed)
    pub fn starting_count(&self, kind: PieceKind) -> u8 {
        self.hand
            .iter()
            .find(|piece| piece.kind == kind)
            .map_or(0, |piece| piece.count)
    }

    /// Reject grids too small to hold a piece inside an empty ring, and duplicate kinds
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rows < crate::grid::MIN_DIMENSION || self.cols < crate::grid::MIN_DIMENSION {
            anyhow::bail!(
                "Grid {}x{} is smaller than {}x{}",
                self.rows,
                self.cols,
                crate::grid::MIN_DIMENSION,
                crate::grid::MIN_DIMENSION
            );
        }

        for (i, piece) in self.hand.iter().enumerate() {
            if self.hand[..i].iter().any(|earlier| earlier.kind == piece.kind) {
                anyhow::bail!("Duplicate hand entry for {}", piece.kind);
            }
        }

        Ok(())
    }

    /// Parse and validate JSON
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let ruleset: RuleSet = serde_json::from_str(content)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            name: "base".to_string(),
            rows: 10,
            cols: 10,
            hand: PieceKind::ALL
                .into_iter()
                .filter(|kind| kind.starting_count() > 0)
                .map(|kind| HandPiece { kind, count: kind.starting_count() })
                .collect(),
        }
    }
}
