//! Cell state enumeration

use serde::{Deserialize, Serialize};

/// State of a single lattice position.
///
/// Cells carry no other payload: no fuel level and no burn timer. A fire burns
/// out after exactly one step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    /// Unburned forest that can ignite
    Tree = 0,
    /// Burning this frame, empty next frame
    Fire = 1,
    /// Bare ground (never forested, or already burned)
    #[default]
    Empty = 2,
}

impl Cell {
    /// All states, in discriminant order.
    pub const ALL: [Cell; 3] = [Cell::Tree, Cell::Fire, Cell::Empty];

    /// Returns true if this cell is burning.
    #[inline]
    pub fn is_burning(self) -> bool {
        self == Cell::Fire
    }

    /// Returns true if this cell holds unburned forest.
    #[inline]
    pub fn is_tree(self) -> bool {
        self == Cell::Tree
    }

    /// Convert a raw discriminant back into a cell, if valid.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Tree),
            1 => Some(Cell::Fire),
            2 => Some(Cell::Empty),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_round_trip() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_u8(cell as u8), Some(cell));
        }
        assert_eq!(Cell::from_u8(3), None);
    }

    #[test]
    fn test_predicates() {
        assert!(Cell::Fire.is_burning());
        assert!(!Cell::Tree.is_burning());
        assert!(Cell::Tree.is_tree());
        assert!(!Cell::Empty.is_tree());
    }
}
