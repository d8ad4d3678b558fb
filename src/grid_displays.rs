use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Maze;
use crate::grid_dimensions::GridDimensions;
use fnv::FnvHashSet;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks where the ball starts and where the goal sits.
#[derive(Debug, Copy, Clone)]
pub struct BallGoalDisplay {
    ball: GridCoordinate,
    goal: GridCoordinate,
}

impl BallGoalDisplay {
    pub fn new(dimensions: GridDimensions) -> BallGoalDisplay {
        BallGoalDisplay {
            ball: GridCoordinate::new(0, 0),
            goal: dimensions.last_cell(),
        }
    }
}

impl GridDisplay for BallGoalDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.ball {
            String::from(" B ")
        } else if coord == self.goal {
            String::from(" G ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks every cell along a path, with the ends drawn as the ball and the goal.
#[derive(Debug, Clone)]
pub struct PathDisplay {
    on_path: FnvHashSet<GridCoordinate>,
    ends: Option<(GridCoordinate, GridCoordinate)>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> PathDisplay {
        let mut on_path = FnvHashSet::with_capacity_and_hasher(path.len(), Default::default());
        on_path.extend(path.iter().cloned());
        let ends = match (path.first(), path.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };
        PathDisplay { on_path, ends }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        match self.ends {
            Some((start, _)) if start == coord => String::from(" B "),
            Some((_, end)) if end == coord => String::from(" G "),
            _ if self.on_path.contains(&coord) => String::from(" . "),
            _ => String::from("   "),
        }
    }
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// Box drawing rendering of a maze, one text row per cell row plus one for each row's south side.
pub fn render_text(maze: &Maze, display: &dyn GridDisplay) -> String {

    let columns_count = maze.dimensions().columns().0;
    let rows_count = maze.dimensions().rows().0;

    // Start by special case rendering the text for the north most boundary
    let mut output = String::from(WALL_RD);
    for column in 0..columns_count {
        let coord = GridCoordinate::new(0, column);
        output.push_str(WALL_LR_3);
        let is_east_open = maze.is_neighbour_linked(coord, CompassPrimary::East);
        if is_east_open {
            output.push_str(WALL_LR);
        } else if column == columns_count - 1 {
            output.push_str(WALL_LD);
        } else {
            output.push_str(WALL_LRD);
        }
    }
    output.push('\n');

    for (index_row, row) in maze.iter_row().enumerate() {

        let is_last_row = index_row == rows_count - 1;

        // The west most boundary of the row. The top section of the cell is done by the previous row.
        let mut row_middle_section_render = String::from(WALL_UD);
        let mut row_bottom_section_render = String::new();

        for (index_column, cell_coord) in row.into_iter().enumerate() {

            let is_first_column = index_column == 0;
            let is_last_column = index_column == columns_count - 1;
            let east_open = maze.is_neighbour_linked(cell_coord, CompassPrimary::East);
            let south_open = maze.is_neighbour_linked(cell_coord, CompassPrimary::South);

            // Each cell uses the southern wall of the cell above it as its own northern wall,
            // so we only draw the body, the eastern boundary and the southern boundary plus corner.
            row_middle_section_render.push_str(&display.render_cell_body(cell_coord));
            row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

            if is_first_column {
                row_bottom_section_render = if is_last_row {
                    String::from(WALL_RU)
                } else if south_open {
                    String::from(WALL_UD)
                } else {
                    String::from(WALL_RUD)
                };
            }
            row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

            let corner = match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                (false, false) => {
                    let access_se_from_east = maze
                        .neighbour_at_direction(cell_coord, CompassPrimary::East)
                        .map_or(false, |c| maze.is_neighbour_linked(c, CompassPrimary::South));
                    let access_se_from_south = maze
                        .neighbour_at_direction(cell_coord, CompassPrimary::South)
                        .map_or(false, |c| maze.is_neighbour_linked(c, CompassPrimary::East));
                    let show_right_section = !access_se_from_east;
                    let show_down_section = !access_se_from_south;
                    let show_up_section = !east_open;
                    let show_left_section = !south_open;

                    match (show_left_section,
                           show_right_section,
                           show_up_section,
                           show_down_section) {
                        (true, true, true, true) => WALL_LRUD,
                        (true, true, true, false) => WALL_LRU,
                        (true, true, false, true) => WALL_LRD,
                        (true, false, true, true) => WALL_LUD,
                        (false, true, true, true) => WALL_RUD,
                        (true, true, false, false) => WALL_LR,
                        (false, false, true, true) => WALL_UD,
                        (false, true, true, false) => WALL_RU,
                        (true, false, false, true) => WALL_LD,
                        (true, false, true, false) => WALL_LU,
                        (false, true, false, true) => WALL_RD,
                        (true, false, false, false) => WALL_L,
                        (false, true, false, false) => WALL_R,
                        (false, false, true, false) => WALL_U,
                        (false, false, false, true) => WALL_D,
                        _ => " ",
                    }
                }
            };
            row_bottom_section_render.push_str(corner);
        }

        output.push_str(&row_middle_section_render);
        output.push('\n');
        output.push_str(&row_bottom_section_render);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn maze(rows: usize, columns: usize) -> Maze {
        Maze::new(GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).unwrap())
    }

    #[test]
    fn single_cell() {
        let m = maze(1, 1);
        assert_eq!(format!("{}", m), "┌───┐\n│ B │\n└───┘\n");
    }

    #[test]
    fn open_row() {
        let mut m = maze(1, 2);
        m.link(GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)).unwrap();
        assert_eq!(format!("{}", m), "┌───────┐\n│ B   G │\n└───────┘\n");
    }

    #[test]
    fn two_by_two_u_shape() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let mut m = maze(2, 2);
        m.link(gc(0, 0), gc(1, 0)).unwrap();
        m.link(gc(1, 0), gc(1, 1)).unwrap();
        m.link(gc(1, 1), gc(0, 1)).unwrap();
        let expected = "┌───┬───┐\n\
                        │   │   │\n\
                        │   ╵   │\n\
                        │       │\n\
                        └───────┘\n";
        assert_eq!(m.render_text(&DefaultDisplay), expected);
    }

    #[test]
    fn path_marks() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let display = PathDisplay::new(&[gc(0, 0), gc(0, 1), gc(1, 1)]);
        assert_eq!(display.render_cell_body(gc(0, 0)), " B ");
        assert_eq!(display.render_cell_body(gc(0, 1)), " . ");
        assert_eq!(display.render_cell_body(gc(1, 1)), " G ");
        assert_eq!(display.render_cell_body(gc(1, 0)), "   ");
    }

    struct DefaultDisplay;
    impl GridDisplay for DefaultDisplay {}
}
