//! **mazeball** generates perfect mazes and turns them into a small physics game: roll the ball
//! from the top left cell to the goal in the far corner.
//!
//! The pipeline is generation (`generators`) over a `grid::Maze`, then `geometry::map_maze` to
//! lay the maze out as rectangles, then `physics::MazeWorld` to simulate it. `interaction` holds
//! the engine independent game rules.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod interaction;
pub mod pathing;
pub mod physics;
pub mod random;
#[cfg(feature = "gui")]
pub mod renderers;
pub mod units;
#[cfg(feature = "gui")]
mod sdl;
