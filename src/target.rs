//! Selection of the odd cell.
//!
//! The target is drawn exactly once per puzzle and handed to both renders;
//! the renderer never touches a random source.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PuzzleError, Result};

/// Grid coordinate of the cell holding the target glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetPosition {
    pub row: u32,
    pub col: u32,
}

impl TargetPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn is(&self, row: u32, col: u32) -> bool {
        self.row == row && self.col == col
    }

    /// Whether the position lies inside a `rows` x `cols` grid.
    pub fn fits(&self, rows: u32, cols: u32) -> bool {
        self.row < rows && self.col < cols
    }
}

impl fmt::Display for TargetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, col {}", self.row, self.col)
    }
}

/// Pick a cell uniformly from a `rows` x `cols` grid.
pub fn select_target<R: Rng + ?Sized>(rng: &mut R, rows: u32, cols: u32) -> Result<TargetPosition> {
    if rows == 0 || cols == 0 {
        return Err(PuzzleError::InvalidLayout(format!(
            "cannot place a target in a {rows}x{cols} grid"
        )));
    }
    Ok(TargetPosition {
        row: rng.gen_range(0..rows),
        col: rng.gen_range(0..cols),
    })
}

/// Random source for a puzzle: reproducible with a seed, entropy otherwise.
pub fn puzzle_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
