use core::fmt;
use core::ops::Index;
use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One game of minesweeper, from a fresh grid until it is won or lost.
///
/// Game state is never cached: [`Board::state`] and the predicates built on it
/// are recomputed from the cells on every call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct BoardData {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let layout = MineLayout::from_mine_mask(data.cells.map(|cell| cell.is_mine))?;
        if layout.mine_count() != data.mine_count {
            return Err(GameError::MineCountMismatch {
                declared: data.mine_count,
                actual: layout.mine_count(),
            });
        }

        let board = Self {
            cells: data.cells,
            mine_count: data.mine_count,
        };
        if let Some(coords) = board.all_coords().find(|&coords| {
            let cell = board[coords];
            cell.is_opened && cell.is_flagged
        }) {
            return Err(GameError::OpenedAndFlagged { coords });
        }
        Ok(board)
    }
}

impl Board {
    /// Board with `mine_count` mines placed uniformly at random.
    pub fn new(width: Coord, height: Coord, mine_count: CellCount) -> Result<Self> {
        let config = GameConfig::new((width, height), mine_count)?;
        Self::generate(config, RandomMineGenerator::from_entropy())
    }

    pub fn generate(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_layout(&generator.generate(config)?))
    }

    /// Board with every cell closed and unflagged over a fixed mine layout.
    pub fn from_layout(layout: &MineLayout) -> Self {
        let cells = layout.mine_mask.map(|&is_mine| Cell {
            is_mine,
            ..Default::default()
        });
        Self {
            cells,
            mine_count: layout.mine_count(),
        }
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        types::array_size(&self.cells)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange { coords, size })
        }
    }

    /// Every coordinate of the grid, x outer and y inner.
    pub fn all_coords(&self) -> AllCoordsIter {
        AllCoordsIter::new(self.size())
    }

    /// In-grid neighbors of `coords`, the 3x3 block around it minus the center.
    pub fn coords_around(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn mines_around(&self, coords: Coord2) -> Result<impl Iterator<Item = Coord2> + '_> {
        let coords = self.validate_coords(coords)?;
        Ok(self
            .coords_around(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine))
    }

    pub fn number_of_mines_around(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.adjacent_mine_count(coords))
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.view_unchecked(coords))
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    /// How many mines have not been flagged yet, negative with too many flags
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count() as isize)
    }

    /// Flips the flag of a closed cell, opened cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.is_opened {
            return Ok(FlagOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        log::debug!("Toggled flag at {:?}, flagged: {}", coords, cell.is_flagged);
        Ok(FlagOutcome::Changed)
    }

    /// Opens a cell unless it is flagged, then auto-opens around every reached cell that has no
    /// adjacent mines.
    ///
    /// Flags block the open but not the cascade through the flagged cell. Each coordinate is
    /// visited at most once per call.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;

        let mut opened: CellCount = 0;
        let mut visited: Array2<bool> = Array2::default(self.cells.raw_dim());
        let mut to_visit = VecDeque::from([coords]);
        visited[coords.to_nd_index()] = true;

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.is_flagged && !cell.is_opened {
                cell.is_opened = true;
                opened += 1;
                log::trace!("Opened cell at {:?}", visit_coords);
            }

            if self.adjacent_mine_count(visit_coords) != 0 {
                continue;
            }

            for pos in self.coords_around(visit_coords) {
                let seen = &mut visited[pos.to_nd_index()];
                if !*seen && !self.cells[pos.to_nd_index()].is_opened {
                    *seen = true;
                    to_visit.push_back(pos);
                }
            }
        }

        log::debug!("Open at {:?} revealed {} cells", coords, opened);

        if opened == 0 {
            return Ok(OpenOutcome::NoChange);
        }

        Ok(match self.state() {
            GameState::InProgress => OpenOutcome::Opened,
            GameState::Won => OpenOutcome::Won,
            GameState::Lost => OpenOutcome::Exploded,
        })
    }

    /// First opened mine in `all_coords` order.
    pub fn explosion_coords(&self) -> Option<Coord2> {
        self.all_coords()
            .find(|&coords| self.cells[coords.to_nd_index()].is_exploded())
    }

    pub fn is_exploded(&self) -> bool {
        self.explosion_coords().is_some()
    }

    /// Every cell is a mine or opened, and no mine is opened.
    pub fn is_win(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_mine || cell.is_opened) && !self.is_exploded()
    }

    pub fn is_over(&self) -> bool {
        self.state().is_over()
    }

    pub fn state(&self) -> GameState {
        if self.is_exploded() {
            GameState::Lost
        } else if self.is_win() {
            GameState::Won
        } else {
            GameState::InProgress
        }
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.coords_around(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
            .count() as u8
    }

    fn view_unchecked(&self, coords: Coord2) -> CellView {
        let cell = self.cells[coords.to_nd_index()];
        if cell.is_exploded() {
            CellView::Exploded
        } else if cell.is_opened {
            CellView::Open(self.adjacent_mine_count(coords))
        } else if cell.is_flagged {
            CellView::Flagged
        } else {
            CellView::Closed
        }
    }
}

/// Panics when `coords` is outside the board, use [`Board::cell_at`] for a checked read.
impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// One text row per `y`, `#` closed, `F` flagged, `*` exploded, `.` or a digit when open.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                write!(f, "{}", self.view_unchecked((x, y)).as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
