//! Board generation and grid primitives: letter pools, weighted draws,
//! coordinates and adjacency.

pub mod dictionary;
pub mod path;
pub mod power;

use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Default grid shape.
pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLS: usize = 4;

const VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U'];
const COMMON_CONSONANTS: &[char] = &['R', 'S', 'T', 'L', 'N', 'M', 'B', 'D'];
const RARE_CONSONANTS: &[char] = &[
    'C', 'F', 'G', 'H', 'J', 'K', 'P', 'Q', 'V', 'W', 'X', 'Y', 'Z',
];

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// King-move adjacency: within one row and one column, but not the same
    /// cell. Diagonals count.
    pub fn is_adjacent_to(&self, other: &Position) -> bool {
        let row_diff = self.row.abs_diff(other.row);
        let col_diff = self.col.abs_diff(other.col);
        row_diff <= 1 && col_diff <= 1 && (row_diff != 0 || col_diff != 0)
    }
}

/// Relative draw weights for the three letter pools. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterWeights {
    vowel: f64,
    common: f64,
    rare: f64,
}

impl LetterWeights {
    /// Returns `None` unless the weights are non-negative and sum to 1.
    pub fn new(vowel: f64, common: f64, rare: f64) -> Option<Self> {
        let valid = vowel >= 0.0
            && common >= 0.0
            && rare >= 0.0
            && (vowel + common + rare - 1.0).abs() < 1e-9;
        valid.then_some(Self { vowel, common, rare })
    }
}

impl Default for LetterWeights {
    fn default() -> Self {
        Self {
            vowel: 0.35,
            common: 0.50,
            rare: 0.15,
        }
    }
}

/// Fixed-shape grid of uppercase letters. The shape never changes after
/// generation; cell contents change only through power effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Generate a grid with each cell drawn independently: pick a pool by
    /// weight, then a letter uniformly within it.
    pub fn generate(rows: usize, cols: usize, weights: LetterWeights) -> Self {
        Self::generate_with_rng(rows, cols, weights, &mut rand::rng())
    }

    /// Generate using a specific RNG (for testing/seeding).
    pub fn generate_with_rng<R: Rng>(
        rows: usize,
        cols: usize,
        weights: LetterWeights,
        rng: &mut R,
    ) -> Self {
        let dist = WeightedIndex::new([weights.vowel, weights.common, weights.rare])
            .expect("weights validated at construction");

        let cells = (0..rows * cols)
            .map(|_| {
                let pool = match dist.sample(rng) {
                    0 => VOWELS,
                    1 => COMMON_CONSONANTS,
                    _ => RARE_CONSONANTS,
                };
                pool[rng.random_range(0..pool.len())]
            })
            .collect();

        Self { rows, cols, cells }
    }

    /// Build a grid from explicit rows. Returns `None` if the rows are empty
    /// or ragged. Letters are normalized to uppercase.
    pub fn from_rows(rows: &[Vec<char>]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let cells = rows
            .iter()
            .flatten()
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.contains(pos)
            .then(|| self.cells[pos.row * self.cols + pos.col])
    }

    /// Overwrite one cell. Callers bounds-check first.
    pub(crate) fn set(&mut self, pos: Position, letter: char) {
        debug_assert!(self.contains(pos));
        self.cells[pos.row * self.cols + pos.col] = letter;
    }

    /// Exchange two cell contents. Callers bounds-check first.
    pub(crate) fn swap(&mut self, a: Position, b: Position) {
        debug_assert!(self.contains(a) && self.contains(b));
        self.cells
            .swap(a.row * self.cols + a.col, b.row * self.cols + b.col);
    }

    /// Row-major copy of the letters, for snapshots.
    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.to_vec())
            .collect()
    }
}
