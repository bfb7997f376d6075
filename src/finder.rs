//! Finder pattern placement.
//!
//! A QR symbol has exactly three finder patterns: top-left, top-right and
//! bottom-left. There is never one in the bottom-right corner.

use std::fmt;

/// Edge length of a finder pattern in modules.
pub const FINDER_SIZE: usize = 7;

/// Which corner a finder pattern sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorId {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl AnchorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorId::TopLeft => "top-left",
            AnchorId::TopRight => "top-right",
            AnchorId::BottomLeft => "bottom-left",
        }
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finder pattern: its corner and the module coordinate of its top-left
/// module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinderAnchor {
    pub id: AnchorId,
    pub row: usize,
    pub col: usize,
}

impl FinderAnchor {
    /// `(row, col)` of the top-left module of the 7×7 footprint.
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Returns true if `(row, col)` falls inside the 7×7 footprint.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row..self.row + FINDER_SIZE).contains(&row)
            && (self.col..self.col + FINDER_SIZE).contains(&col)
    }
}

/// Whether a module belongs to a finder pattern or to the data area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleClass {
    Finder(FinderAnchor),
    Body,
}

impl ModuleClass {
    pub fn is_finder(&self) -> bool {
        matches!(self, ModuleClass::Finder(_))
    }
}

/// The three finder anchors of an `n`×`n` matrix, in top-left, top-right,
/// bottom-left order.
pub fn locate(n: usize) -> [FinderAnchor; 3] {
    let far = n.saturating_sub(FINDER_SIZE);
    [
        FinderAnchor {
            id: AnchorId::TopLeft,
            row: 0,
            col: 0,
        },
        FinderAnchor {
            id: AnchorId::TopRight,
            row: 0,
            col: far,
        },
        FinderAnchor {
            id: AnchorId::BottomLeft,
            row: far,
            col: 0,
        },
    ]
}

/// Classifies the module at `(row, col)` of an `n`×`n` matrix.
pub fn classify(row: usize, col: usize, n: usize) -> ModuleClass {
    locate(n)
        .into_iter()
        .find(|anchor| anchor.contains(row, col))
        .map_or(ModuleClass::Body, ModuleClass::Finder)
}
