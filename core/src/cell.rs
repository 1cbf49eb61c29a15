use serde::{Deserialize, Serialize};

/// State of one grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_opened: bool,
    pub is_mine: bool,
    pub is_flagged: bool,
}

impl Cell {
    pub const fn is_exploded(self) -> bool {
        self.is_opened && self.is_mine
    }
}

/// What a view layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Closed,
    Flagged,
    Open(u8),
    Exploded,
}

impl CellView {
    pub const fn as_char(self) -> char {
        match self {
            Self::Closed => '#',
            Self::Flagged => 'F',
            Self::Exploded => '*',
            Self::Open(0) => '.',
            // a real board never shows more than 8
            Self::Open(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Closed
    }
}
