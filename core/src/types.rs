use ndarray::Array2;

use crate::{GameConfig, GameError, Result};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Cell count of a `a` by `b` grid, `u8 * u8` always fits.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size of an array that was allocated from a `Coord2`.
pub(crate) fn array_size<T>(array: &Array2<T>) -> Coord2 {
    let (x, y) = array.dim();
    (x as Coord, y as Coord)
}

/// Size of a caller-provided array, which must fit a board on both axes.
pub(crate) fn checked_array_size<T>(array: &Array2<T>) -> Result<Coord2> {
    let (x, y) = array.dim();
    let (Ok(width), Ok(height)) = (Coord::try_from(x), Coord::try_from(y)) else {
        return Err(GameError::BoardTooLarge {
            width: x,
            height: y,
        });
    };
    GameConfig::new((width, height), 0)?;
    Ok((width, height))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self))
    }
}

/// Scan order: x offset first, then y offset.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// The up to eight in-bounds neighbors of a cell, in a fixed scan order.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Every coordinate of a grid, x outer and y inner.
#[derive(Clone, Debug)]
pub struct AllCoordsIter {
    bounds: Coord2,
    next: Option<Coord2>,
}

impl AllCoordsIter {
    pub(crate) fn new(bounds: Coord2) -> Self {
        let next = (bounds.0 > 0 && bounds.1 > 0).then_some((0, 0));
        Self { bounds, next }
    }
}

impl Iterator for AllCoordsIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (x, y) = current;
        self.next = if y + 1 < self.bounds.1 {
            Some((x, y + 1))
        } else if x + 1 < self.bounds.0 {
            Some((x + 1, 0))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some((x, y)) => {
                let (width, height) = (usize::from(self.bounds.0), usize::from(self.bounds.1));
                (width - usize::from(x)) * height - usize::from(y)
            }
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AllCoordsIter {}
