use crate::cells::{offset_coordinate, CompassPrimary, GridCoordinate};
use crate::errors::*;
use error_chain::bail;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// The validated size of a rectangular maze grid. Both counts are at least 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl GridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<GridDimensions> {
        if rows.0 == 0 || columns.0 == 0 {
            bail!(ErrorKind::InvalidDimensions(rows.0, columns.0));
        }
        Ok(GridDimensions { rows, columns })
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    /// Node count and the number of possible passages between orthogonal neighbours.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (rows, columns) = (self.rows.0, self.columns.0);
        let edges = rows * (columns - 1) + (rows - 1) * columns;
        (self.size(), EdgesCount(edges))
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows.0 && coord.column < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional row major index in the range 0...size.
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns.0 + coord.column)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> GridCoordinate {
        GridCoordinate::new(index / self.columns.0, index % self.columns.0)
    }

    /// The adjacent cell that way, if it is inside the grid. Passages are not considered.
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction).filter(|c| self.is_valid_coordinate(*c))
    }

    /// The far corner cell, where the goal sits.
    pub fn last_cell(&self) -> GridCoordinate {
        GridCoordinate::new(self.rows.0 - 1, self.columns.0 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn dims(rows: usize, columns: usize) -> GridDimensions {
        GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    #[test]
    fn zero_sized_dimensions_are_rejected() {
        for &(r, c) in &[(0, 0), (0, 3), (3, 0)] {
            match GridDimensions::new(RowsCount(r), ColumnsCount(c)) {
                Err(Error(ErrorKind::InvalidDimensions(er, ec), _)) => {
                    assert_eq!((er, ec), (r, c));
                }
                other => panic!("expected InvalidDimensions, got {:?}", other),
            }
        }
    }

    #[test]
    fn grid_size() {
        let d = dims(10, 7);
        assert_eq!(d.size(), NodesCount(70));
        assert_eq!(d.rows(), RowsCount(10));
        assert_eq!(d.columns(), ColumnsCount(7));
    }

    #[test]
    fn graph_size_counts_possible_passages() {
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
        assert_eq!(dims(2, 1).graph_size(), (NodesCount(2), EdgesCount(1)));
        assert_eq!(dims(3, 3).graph_size(), (NodesCount(9), EdgesCount(12)));
    }

    #[test]
    fn neighbour_cells() {
        let d = dims(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let found: Vec<GridCoordinate> = CompassPrimary::ALL
                .iter()
                .filter_map(|dir| d.neighbour_at_direction(coord, *dir))
                .sorted()
                .collect();
            let expected: Vec<GridCoordinate> =
                expected_neighbours.iter().cloned().sorted().collect();
            assert_eq!(found, expected);
        };
        let gc = |r, c| GridCoordinate::new(r, c);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbour_at_single_direction() {
        let d = dims(2, 2);
        let gc = |r, c| GridCoordinate::new(r, c);
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::North), None);
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::West), None);
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::East), Some(gc(0, 1)));
        assert_eq!(d.neighbour_at_direction(gc(0, 0), CompassPrimary::South), Some(gc(1, 0)));
        assert_eq!(d.neighbour_at_direction(gc(1, 1), CompassPrimary::South), None);
        assert_eq!(d.neighbour_at_direction(gc(1, 1), CompassPrimary::East), None);
    }

    #[test]
    fn coordinate_as_index() {
        let d = dims(2, 3);
        let gc = |r, c| GridCoordinate::new(r, c);
        let coords = [gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)];
        let indices: Vec<Option<usize>> =
            coords.iter().map(|coord| d.coordinate_to_index(*coord)).collect();
        let expected = (0..6).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        for (i, coord) in coords.iter().enumerate() {
            assert_eq!(d.index_to_coordinate(i), *coord);
        }

        assert_eq!(d.coordinate_to_index(gc(2, 0)), None);
        assert_eq!(d.coordinate_to_index(gc(0, 3)), None);
        assert_eq!(d.coordinate_to_index(gc(usize::MAX, usize::MAX)), None);
    }

    #[test]
    fn last_cell_is_far_corner() {
        assert_eq!(dims(1, 1).last_cell(), GridCoordinate::new(0, 0));
        assert_eq!(dims(4, 7).last_cell(), GridCoordinate::new(3, 6));
    }
}
