use log::debug;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Maze;
use crate::grid_dimensions::GridDimensions;
use crate::random::{shuffle, RandomIndex};

/// A cell on the carving path plus its shuffled candidate directions.
///
/// The cursor marks how far through the candidates the cell has got, which is all a
/// recursive `visit` call would keep on its own stack frame.
#[derive(Debug)]
struct Frame {
    cell: GridCoordinate,
    directions: [CompassPrimary; 4],
    cursor: usize,
}

impl Frame {
    fn new<R: RandomIndex + ?Sized>(cell: GridCoordinate, rng: &mut R) -> Frame {
        let mut directions = CompassPrimary::ALL;
        shuffle(&mut directions, rng);
        Frame {
            cell,
            directions,
            cursor: 0,
        }
    }

    fn next_direction(&mut self) -> Option<CompassPrimary> {
        let direction = self.directions.get(self.cursor).cloned();
        self.cursor += 1;
        direction
    }
}

/// Pick the cell carving starts from, uniformly over the whole grid. The row is drawn before the column.
pub fn random_start<R: RandomIndex + ?Sized>(dimensions: &GridDimensions, rng: &mut R) -> GridCoordinate {
    let row = rng.index_below(dimensions.rows().0);
    let column = rng.index_below(dimensions.columns().0);
    GridCoordinate::new(row, column)
}

/// Apply the recursive backtracker (randomised depth first search) maze generation algorithm,
/// starting from a random cell.
///
/// Carving walks away from the current cell in a random direction into any unvisited neighbour,
/// opening the passage as it goes. When a cell has no unvisited neighbours left the walk backs up
/// to the most recent cell that still has some. The result is a perfect maze with long winding
/// corridors and few dead ends.
pub fn recursive_backtracker<R: RandomIndex + ?Sized>(maze: &mut Maze, rng: &mut R) {
    let start = random_start(maze.dimensions(), rng);
    recursive_backtracker_from(maze, start, rng);
}

/// The recursive backtracker from a chosen start cell.
///
/// Cells already marked visited are treated as walls to carve around, and starting on a visited
/// (or invalid) cell carves nothing. Runs with an explicit stack so large grids cannot overflow
/// the thread's stack.
pub fn recursive_backtracker_from<R: RandomIndex + ?Sized>(maze: &mut Maze,
                                                           start: GridCoordinate,
                                                           rng: &mut R) {
    if !maze.dimensions().is_valid_coordinate(start) || !maze.grid_mut().visit(start) {
        return;
    }

    debug!("carving {}x{} maze from {:?}",
           maze.dimensions().rows().0,
           maze.dimensions().columns().0,
           start);

    let mut stack = Vec::with_capacity(maze.size());
    stack.push(Frame::new(start, rng));

    while !stack.is_empty() {
        let step = stack.last_mut()
            .and_then(|frame| frame.next_direction().map(|direction| (frame.cell, direction)));
        let (cell, direction) = match step {
            Some(step) => step,
            None => {
                let _ = stack.pop();
                continue;
            }
        };

        let next = match maze.neighbour_at_direction(cell, direction) {
            Some(next) if !maze.grid().is_visited(next) => next,
            _ => continue,
        };

        if maze.link(cell, next).is_ok() {
            let _ = maze.grid_mut().visit(next);
            stack.push(Frame::new(next, rng));
        }
    }

    debug!("carved {} passages", maze.links_count());
}

/// A freshly carved perfect maze: every cell reachable from every other by exactly one route.
pub fn new_perfect_maze<R: RandomIndex + ?Sized>(dimensions: GridDimensions, rng: &mut R) -> Maze {
    let mut maze = Maze::new(dimensions);
    recursive_backtracker(&mut maze, rng);
    maze
}

#[cfg(test)]
mod tests {
    use super::*;

    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use crate::random::scripted::ScriptedIndices;
    use crate::units::{ColumnsCount, RowsCount};

    fn dims(rows: usize, columns: usize) -> GridDimensions {
        GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    #[test]
    fn scripted_generation_from_the_centre() {
        // Every shuffle comes out as [West, North, South, East]
        let mut rng = ScriptedIndices::new(&[1, 2, 0, 0]);
        let mut maze = Maze::new(dims(3, 3));
        recursive_backtracker_from(&mut maze, GridCoordinate::new(1, 1), &mut rng);

        assert_eq!(maze.vertical_passages().to_rows(),
                   vec![vec![true, true], vec![true, false], vec![true, true]]);
        assert_eq!(maze.horizontal_passages().to_rows(),
                   vec![vec![true, false, true], vec![false, false, true]]);
        assert_eq!(maze.links_count(), 8);
        assert!(maze.grid().is_fully_visited());
    }

    #[test]
    fn scripted_generation_from_a_random_start() {
        // All zero draws start in the top left and shuffle to [East, South, West, North]
        let mut rng = ScriptedIndices::new(&[0]);
        let maze = new_perfect_maze(dims(3, 3), &mut rng);

        assert_eq!(maze.vertical_passages().to_rows(),
                   vec![vec![true, true], vec![true, false], vec![true, true]]);
        assert_eq!(maze.horizontal_passages().to_rows(),
                   vec![vec![false, false, true], vec![true, false, true]]);
        assert_eq!(maze.links_count(), 8);
    }

    #[test]
    fn random_start_draws_row_then_column() {
        let mut rng = ScriptedIndices::new(&[2, 5]);
        assert_eq!(random_start(&dims(4, 7), &mut rng), GridCoordinate::new(2, 5));
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn single_cell_maze() {
        let maze = new_perfect_maze(dims(1, 1), &mut XorShiftRng::seed_from_u64(1));
        assert_eq!(maze.links_count(), 0);
        assert!(maze.grid().is_fully_visited());
    }

    #[test]
    fn single_row_and_column_mazes_are_corridors() {
        let mut rng = XorShiftRng::seed_from_u64(3);
        let row = new_perfect_maze(dims(1, 9), &mut rng);
        assert_eq!(row.vertical_passages().open_count(), 8);
        let column = new_perfect_maze(dims(9, 1), &mut rng);
        assert_eq!(column.horizontal_passages().open_count(), 8);
    }

    #[test]
    fn visited_start_carves_nothing() {
        let mut maze = Maze::new(dims(3, 3));
        let start = GridCoordinate::new(0, 0);
        let _ = maze.grid_mut().visit(start);
        recursive_backtracker_from(&mut maze, start, &mut ScriptedIndices::new(&[0]));
        assert_eq!(maze.links_count(), 0);

        recursive_backtracker_from(&mut maze,
                                   GridCoordinate::new(7, 7),
                                   &mut ScriptedIndices::new(&[0]));
        assert_eq!(maze.links_count(), 0);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = new_perfect_maze(dims(12, 9), &mut XorShiftRng::seed_from_u64(99));
        let b = new_perfect_maze(dims(12, 9), &mut XorShiftRng::seed_from_u64(99));
        assert_eq!(a.vertical_passages(), b.vertical_passages());
        assert_eq!(a.horizontal_passages(), b.horizontal_passages());
    }

    #[test]
    fn quickcheck_generated_mazes_are_spanning_trees() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = ((rows % 24) as usize + 1, (columns % 24) as usize + 1);
            let maze = new_perfect_maze(dims(rows, columns), &mut XorShiftRng::seed_from_u64(seed));

            if maze.links_count() != rows * columns - 1 || !maze.grid().is_fully_visited() {
                return TestResult::failed();
            }

            let graph = maze.to_graph();
            TestResult::from_bool(connected_components(&graph) == 1 && !is_cyclic_undirected(&graph))
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
