use std::fmt;

use bit_set::BitSet;
use petgraph::{Graph, Undirected};
use petgraph::graph::NodeIndex;

use crate::cells::{direction_between, CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::grid_dimensions::GridDimensions;
use crate::grid_displays::{BallGoalDisplay, GridDisplay};
use crate::grid_iterators::{BatchIter, CellIter};
use crate::units::{ColumnIndex, RowIndex};

/// Which cells the maze generator has stepped into.
#[derive(Debug, Clone)]
pub struct Grid {
    dimensions: GridDimensions,
    visited: BitSet,
}

impl Grid {
    /// An all unvisited grid.
    pub fn new(dimensions: GridDimensions) -> Grid {
        Grid {
            dimensions,
            visited: BitSet::with_capacity(dimensions.size().0),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    /// Cells outside of the grid count as never visited.
    #[inline]
    pub fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.dimensions
            .coordinate_to_index(coord)
            .map_or(false, |index| self.visited.contains(index))
    }

    /// Mark a cell as visited. Returns true if the cell was not visited before.
    pub fn visit(&mut self, coord: GridCoordinate) -> bool {
        match self.dimensions.coordinate_to_index(coord) {
            Some(index) => self.visited.insert(index),
            None => false,
        }
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn is_fully_visited(&self) -> bool {
        self.visited_count() == self.dimensions.size().0
    }
}

/// A rows x columns matrix of open (true) or walled (false) passages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageMatrix {
    rows: usize,
    columns: usize,
    open: BitSet,
}

impl PassageMatrix {
    /// An all walled matrix. Either side may be zero, e.g. the vertical passages of a one column grid.
    pub fn new(rows: usize, columns: usize) -> PassageMatrix {
        PassageMatrix {
            rows,
            columns,
            open: BitSet::with_capacity(rows * columns),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Entries outside of the matrix read as walled.
    pub fn is_open(&self, row: RowIndex, column: ColumnIndex) -> bool {
        self.index(row, column).map_or(false, |i| self.open.contains(i))
    }

    /// Remove the wall at the given entry.
    ///
    /// Panics if the entry is outside of the matrix.
    pub fn open(&mut self, row: RowIndex, column: ColumnIndex) {
        let index = self.index(row, column)
            .unwrap_or_else(|| {
                panic!("passage ({}, {}) outside of a {}x{} matrix",
                       row.0,
                       column.0,
                       self.rows,
                       self.columns)
            });
        self.open.insert(index);
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Every entry in row major order.
    pub fn iter(&self) -> PassageIter {
        PassageIter {
            matrix: self,
            next_index: 0,
        }
    }

    /// The matrix as nested rows, handy for comparing against literal fixtures.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.rows)
            .map(|r| (0..self.columns).map(|c| self.is_open(RowIndex(r), ColumnIndex(c))).collect())
            .collect()
    }

    fn index(&self, row: RowIndex, column: ColumnIndex) -> Option<usize> {
        if row.0 < self.rows && column.0 < self.columns {
            Some(row.0 * self.columns + column.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct PassageIter<'a> {
    matrix: &'a PassageMatrix,
    next_index: usize,
}

impl<'a> Iterator for PassageIter<'a> {
    type Item = (RowIndex, ColumnIndex, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index < self.matrix.rows * self.matrix.columns {
            let row = RowIndex(self.next_index / self.matrix.columns);
            let column = ColumnIndex(self.next_index % self.matrix.columns);
            self.next_index += 1;
            Some((row, column, self.matrix.is_open(row, column)))
        } else {
            None
        }
    }
}

/// The (vertical, horizontal) passage matrices for a grid, all walled.
///
/// Vertical passages are `rows x (columns - 1)`: entry (r, c) joins cell (r, c) to (r, c + 1).
/// Horizontal passages are `(rows - 1) x columns`: entry (r, c) joins cell (r, c) to (r + 1, c).
pub fn passage_matrices(dimensions: GridDimensions) -> (PassageMatrix, PassageMatrix) {
    let (rows, columns) = (dimensions.rows().0, dimensions.columns().0);
    (PassageMatrix::new(rows, columns - 1), PassageMatrix::new(rows - 1, columns))
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

/// A grid with its visited state and the passages carved through it.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    vertical: PassageMatrix,
    horizontal: PassageMatrix,
}

impl Maze {
    pub fn new(dimensions: GridDimensions) -> Maze {
        let (vertical, horizontal) = passage_matrices(dimensions);
        Maze {
            grid: Grid::new(dimensions),
            vertical,
            horizontal,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        self.grid.dimensions()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions().size().0
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn vertical_passages(&self) -> &PassageMatrix {
        &self.vertical
    }

    #[inline]
    pub fn horizontal_passages(&self) -> &PassageMatrix {
        &self.horizontal
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(*self.dimensions())
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(*self.dimensions())
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        self.dimensions().neighbour_at_direction(coord, direction)
    }

    /// Open the passage between two adjacent cells.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<(), CellLinkError> {
        if !self.dimensions().is_valid_coordinate(a) || !self.dimensions().is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        let direction = direction_between(a, b).ok_or(CellLinkError::NotAdjacent)?;
        let (matrix, row, column) = self.passage_entry(a, direction);
        matrix.open(row, column);
        Ok(())
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        direction_between(a, b).map_or(false, |dir| self.is_neighbour_linked(a, dir))
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        if self.neighbour_at_direction(coord, direction).is_none() {
            return false;
        }
        let (row, column) = passage_index(coord, direction);
        if direction.is_horizontal_move() {
            self.vertical.is_open(row, column)
        } else {
            self.horizontal.is_open(row, column)
        }
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// The number of open passages in both matrices.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.vertical.open_count() + self.horizontal.open_count()
    }

    /// Every open passage as the pair of cells it joins, vertical passages first.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        let verticals = self.vertical
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(row, column, _)| {
                (GridCoordinate::new(row.0, column.0), GridCoordinate::new(row.0, column.0 + 1))
            });
        let horizontals = self.horizontal
            .iter()
            .filter(|&(_, _, open)| open)
            .map(|(row, column, _)| {
                (GridCoordinate::new(row.0, column.0), GridCoordinate::new(row.0 + 1, column.0))
            });
        verticals.chain(horizontals)
    }

    /// The passage graph: one node per cell in row major order, one edge per open passage.
    pub fn to_graph(&self) -> Graph<(), (), Undirected, u32> {
        let dimensions = *self.dimensions();
        let mut graph = Graph::with_capacity(self.size(), self.links_count());
        for _ in 0..self.size() {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_links() {
            if let (Some(ai), Some(bi)) = (dimensions.coordinate_to_index(a),
                                           dimensions.coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(ai), NodeIndex::new(bi), ());
            }
        }
        graph
    }

    /// Text rendering of the maze, the cell bodies filled in by `display`.
    pub fn render_text(&self, display: &dyn GridDisplay) -> String {
        crate::grid_displays::render_text(self, display)
    }

    fn passage_entry(&mut self,
                     coord: GridCoordinate,
                     direction: CompassPrimary)
                     -> (&mut PassageMatrix, RowIndex, ColumnIndex) {
        let (row, column) = passage_index(coord, direction);
        if direction.is_horizontal_move() {
            (&mut self.vertical, row, column)
        } else {
            (&mut self.horizontal, row, column)
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let display = BallGoalDisplay::new(*self.dimensions());
        write!(f, "{}", self.render_text(&display))
    }
}

// left/right moves index the vertical passages at min(column, neighbour column),
// up/down moves index the horizontal passages at min(row, neighbour row).
fn passage_index(coord: GridCoordinate, direction: CompassPrimary) -> (RowIndex, ColumnIndex) {
    match direction {
        CompassPrimary::East | CompassPrimary::South => (coord.row_index(), coord.column_index()),
        CompassPrimary::West => (coord.row_index(), ColumnIndex(coord.column.wrapping_sub(1))),
        CompassPrimary::North => (RowIndex(coord.row.wrapping_sub(1)), coord.column_index()),
    }
}
