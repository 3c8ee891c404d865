//! Power effects: one-shot board and clock mutations.
//!
//! Each seat holds exactly one power. An effect is a closed, parameter-carrying
//! variant so the session dispatches by pattern match instead of inspecting
//! loose parameter bags.

use super::{Grid, Position};
use serde::{Deserialize, Serialize};

/// The three powers, assigned by join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerKind {
    Swap,
    Transform,
    Freeze,
}

impl PowerKind {
    /// Power held by the player seated in `slot` (0-based join order).
    pub fn for_slot(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(Self::Swap),
            1 => Some(Self::Transform),
            2 => Some(Self::Freeze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swap => "SWAP",
            Self::Transform => "TRANSFORM",
            Self::Freeze => "FREEZE",
        }
    }

    /// UI copy describing what the power does.
    pub fn blurb(&self) -> &'static str {
        match self {
            Self::Swap => "Swap the positions of two letters on the grid",
            Self::Transform => "Change any letter on the grid to a different letter",
            Self::Freeze => "Pause the timer for 10 seconds",
        }
    }
}

/// Why an effect could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    /// A target cell is outside the grid.
    OutOfBounds,
    /// The replacement character is not a letter.
    NotALetter,
}

/// A requested effect with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerEffect {
    /// Exchange two cell contents.
    Swap { a: Position, b: Position },
    /// Overwrite one cell with a new letter.
    Transform { cell: Position, letter: char },
    /// Add bonus seconds to the countdown.
    Freeze,
}

impl PowerEffect {
    pub fn kind(&self) -> PowerKind {
        match self {
            Self::Swap { .. } => PowerKind::Swap,
            Self::Transform { .. } => PowerKind::Transform,
            Self::Freeze => PowerKind::Freeze,
        }
    }

    /// Mutate the board or clock, returning a display description. On error
    /// nothing changes.
    pub(crate) fn apply(
        &self,
        grid: &mut Grid,
        time_left: &mut u32,
        freeze_bonus: u32,
    ) -> Result<String, PowerError> {
        match *self {
            Self::Swap { a, b } => {
                if !grid.contains(a) || !grid.contains(b) {
                    return Err(PowerError::OutOfBounds);
                }
                if a != b {
                    grid.swap(a, b);
                }
                Ok("Letters swapped!".to_string())
            }
            Self::Transform { cell, letter } => {
                if !grid.contains(cell) {
                    return Err(PowerError::OutOfBounds);
                }
                if !letter.is_ascii_alphabetic() {
                    return Err(PowerError::NotALetter);
                }
                grid.set(cell, letter.to_ascii_uppercase());
                Ok("Letter transformed!".to_string())
            }
            Self::Freeze => {
                *time_left += freeze_bonus;
                Ok(format!("Time extended by {} seconds!", freeze_bonus))
            }
        }
    }
}
