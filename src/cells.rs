use smallvec::SmallVec;

use crate::units::{ColumnIndex, RowIndex};

/// A cell of the maze addressed by row and column, (0, 0) being the top left cell.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn row_index(&self) -> RowIndex {
        RowIndex(self.row)
    }

    #[inline]
    pub fn column_index(&self) -> ColumnIndex {
        ColumnIndex(self.column)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// The four ways out of a square cell. North is "up" on screen, East is "right".
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Candidate order before any shuffling: up, right, down, left.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    /// Does moving this way keep the row and change the column?
    #[inline]
    pub fn is_horizontal_move(self) -> bool {
        match self {
            CompassPrimary::East | CompassPrimary::West => true,
            CompassPrimary::North | CompassPrimary::South => false,
        }
    }
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the coordinate would be negative; the upper bounds are the grid's business.
pub fn offset_coordinate(coord: GridCoordinate, dir: CompassPrimary) -> Option<GridCoordinate> {
    let GridCoordinate { row, column } = coord;
    match dir {
        CompassPrimary::North => {
            if row > 0 {
                Some(GridCoordinate::new(row - 1, column))
            } else {
                None
            }
        }
        CompassPrimary::South => Some(GridCoordinate::new(row + 1, column)),
        CompassPrimary::East => Some(GridCoordinate::new(row, column + 1)),
        CompassPrimary::West => {
            if column > 0 {
                Some(GridCoordinate::new(row, column - 1))
            } else {
                None
            }
        }
    }
}

/// Which direction leads from `a` to the adjacent cell `b`, if they are adjacent at all.
pub fn direction_between(a: GridCoordinate, b: GridCoordinate) -> Option<CompassPrimary> {
    CompassPrimary::ALL
        .iter()
        .cloned()
        .find(|dir| offset_coordinate(a, *dir) == Some(b))
}
