use crate::cells::GridCoordinate;
use crate::grid_dimensions::GridDimensions;

/// Row major iteration over every cell of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    dimensions: GridDimensions,
    cells_count: usize,
}

impl CellIter {
    pub fn new(dimensions: GridDimensions) -> CellIter {
        CellIter {
            current_cell_number: 0,
            dimensions,
            cells_count: dimensions.size().0,
        }
    }
}

impl Iterator for CellIter {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.index_to_coordinate(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

/// Iteration over whole rows of a grid at a time.
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_index: usize,
    dimensions: GridDimensions,
}

impl BatchIter {
    pub fn rows(dimensions: GridDimensions) -> BatchIter {
        BatchIter {
            current_index: 0,
            dimensions,
        }
    }
}

impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.dimensions.rows().0 {
            let row = self.current_index;
            self.current_index += 1;
            Some((0..self.dimensions.columns().0)
                .map(|column| GridCoordinate::new(row, column))
                .collect())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimensions.rows().0 - self.current_index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for BatchIter {}
