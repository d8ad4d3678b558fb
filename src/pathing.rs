use fnv::FnvHashMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::Maze;

/// Steps through open passages from a start cell to every cell it can reach.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill out from `start`. None if `start` is not a cell of the maze.
    pub fn new(maze: &Maze, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !maze.dimensions().is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(maze.size(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every passage is one step, so the first time a cell is reached is along a shortest route
        // and the distances map doubles up as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for link_coordinate in maze.links(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells the flood fill reached, the start included.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    /// Every cell at the maximum distance, in row major order.
    pub fn furthest_points(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a linked
/// neighbour one closer to the start. None if `end_point` was never reached.
pub fn shortest_path(maze: &Maze,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let closer = maze.links(current_coord)
            .into_iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|distance| (coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closer {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // The distances were computed for some other maze.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The route the ball has to roll: from the top left cell to the goal in the far corner.
pub fn ball_to_goal_path(maze: &Maze) -> Option<Vec<GridCoordinate>> {
    let distances = Distances::new(maze, GridCoordinate::new(0, 0))?;
    shortest_path(maze, &distances, maze.dimensions().last_cell())
}

/// A perfect maze is a spanning tree: everything reachable and exactly one fewer passage than cells.
pub fn is_perfect(maze: &Maze) -> bool {
    Distances::new(maze, GridCoordinate::new(0, 0))
        .map_or(false, |d| d.reached_count() == maze.size() && maze.links_count() == maze.size() - 1)
}
