use std::fmt;

use error_chain::bail;
use log::debug;
use serde::{Serialize, Serializer};

use crate::errors::*;
use crate::grid::Maze;
use crate::units::{Height, Width};

/// What a physical body is, as far as the game rules care.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyLabel {
    Frame,
    Wall,
    Goal,
    Ball,
}

impl BodyLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyLabel::Frame => "frame",
            BodyLabel::Wall => "wall",
            BodyLabel::Goal => "goal",
            BodyLabel::Ball => "ball",
        }
    }
}

impl fmt::Display for BodyLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque RGB fill colour. Serializes as a `#RRGGBB` string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const fn new(red: u8, green: u8, blue: u8) -> Colour {
        Colour { red, green, blue }
    }

    /// Packed as 0xRRGGBB.
    pub fn to_rgb(self) -> u32 {
        (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }

    pub fn from_rgb(rgb: u32) -> Colour {
        Colour::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.to_rgb())
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
        where S: Serializer
    {
        serializer.serialize_str(&self.to_hex())
    }
}

/// An axis aligned rectangle, positioned by its centre.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSegment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_static: bool,
    pub label: BodyLabel,
    pub fill_color: Colour,
}

/// Where the ball starts out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallPlacement {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fill_color: Colour,
}

/// Everything needed to build the physical maze.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Top, bottom, left and right boundary of the play area.
    pub frame: Vec<WallSegment>,
    /// Interior walls, every horizontal one before every vertical one, each group in row major order.
    pub walls: Vec<WallSegment>,
    pub goal: WallSegment,
    pub ball: BallPlacement,
}

impl Layout {
    /// Every rectangle: frame first, then the interior walls, then the goal.
    pub fn rectangles(&self) -> impl Iterator<Item = &WallSegment> {
        self.frame.iter().chain(self.walls.iter()).chain(::std::iter::once(&self.goal))
    }
}

/// The pixel extent the maze is drawn into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayArea {
    width: Width,
    height: Height,
}

impl PlayArea {
    pub fn new(width: Width, height: Height) -> Result<PlayArea> {
        let is_valid = |v: f32| v.is_finite() && v > 0.0;
        if !is_valid(width.0) || !is_valid(height.0) {
            bail!(ErrorKind::InvalidPlayArea(width.0, height.0));
        }
        Ok(PlayArea { width, height })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }
}

/// Fixed sizes and colours of the generated bodies.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeometryConfig {
    pub frame_thickness: f32,
    pub wall_thickness: f32,
    pub frame_colour: Colour,
    pub wall_colour: Colour,
    pub goal_colour: Colour,
    pub ball_colour: Colour,
}

impl Default for GeometryConfig {
    fn default() -> GeometryConfig {
        GeometryConfig {
            frame_thickness: 10.0,
            wall_thickness: 4.0,
            frame_colour: Colour::new(0xFF, 0x00, 0x00),
            wall_colour: Colour::new(0x8F, 0xBD, 0xD3),
            goal_colour: Colour::new(0x5A, 0xA4, 0x69),
            ball_colour: Colour::new(0xFD, 0xFF, 0xBC),
        }
    }
}

/// Turn the closed passages of a maze into wall rectangles scaled to the play area,
/// plus the goal in the far corner cell and the ball in the top left cell.
///
/// Every walled passage produces exactly one segment, open passages produce none.
pub fn map_maze(maze: &Maze, area: &PlayArea, config: &GeometryConfig) -> Layout {
    let (width, height) = (area.width().0, area.height().0);
    let unit_width = width / maze.dimensions().columns().0 as f32;
    let unit_height = height / maze.dimensions().rows().0 as f32;

    let rectangle = |x, y, w, h, label, fill_color| {
        WallSegment {
            x,
            y,
            width: w,
            height: h,
            is_static: true,
            label,
            fill_color,
        }
    };

    let frame_thickness = config.frame_thickness;
    let frame = vec![
        rectangle(width / 2.0, 0.0, width, frame_thickness, BodyLabel::Frame, config.frame_colour),
        rectangle(width / 2.0, height, width, frame_thickness, BodyLabel::Frame, config.frame_colour),
        rectangle(0.0, height / 2.0, frame_thickness, height, BodyLabel::Frame, config.frame_colour),
        rectangle(width, height / 2.0, frame_thickness, height, BodyLabel::Frame, config.frame_colour),
    ];

    // A closed horizontal passage (r, c) is the wall under cell (r, c).
    let horizontal_walls = maze.horizontal_passages()
        .iter()
        .filter(|&(_, _, open)| !open)
        .map(|(row, column, _)| {
            rectangle(column.0 as f32 * unit_width + unit_width / 2.0,
                      row.0 as f32 * unit_height + unit_height,
                      unit_width,
                      config.wall_thickness,
                      BodyLabel::Wall,
                      config.wall_colour)
        });

    // A closed vertical passage (r, c) is the wall right of cell (r, c).
    let vertical_walls = maze.vertical_passages()
        .iter()
        .filter(|&(_, _, open)| !open)
        .map(|(row, column, _)| {
            rectangle(column.0 as f32 * unit_width + unit_width,
                      row.0 as f32 * unit_height + unit_height / 2.0,
                      config.wall_thickness,
                      unit_height,
                      BodyLabel::Wall,
                      config.wall_colour)
        });

    let walls: Vec<WallSegment> = horizontal_walls.chain(vertical_walls).collect();

    let goal = rectangle(width - unit_width / 2.0,
                         height - unit_height / 2.0,
                         unit_width * 0.5,
                         unit_height * 0.5,
                         BodyLabel::Goal,
                         config.goal_colour);

    let ball = BallPlacement {
        x: unit_width / 2.0,
        y: unit_height / 2.0,
        radius: unit_width.min(unit_height) / 4.0,
        fill_color: config.ball_colour,
    };

    debug!("mapped maze to {} interior walls over {}x{} px", walls.len(), width, height);

    Layout {
        frame,
        walls,
        goal,
        ball,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cells::GridCoordinate;
    use crate::generators::recursive_backtracker_from;
    use crate::grid_dimensions::GridDimensions;
    use crate::random::scripted::ScriptedIndices;
    use crate::units::{ColumnsCount, RowsCount};

    fn maze(rows: usize, columns: usize) -> Maze {
        Maze::new(GridDimensions::new(RowsCount(rows), ColumnsCount(columns)).unwrap())
    }

    fn area(width: f32, height: f32) -> PlayArea {
        PlayArea::new(Width(width), Height(height)).unwrap()
    }

    fn centres(walls: &[WallSegment]) -> Vec<(f32, f32)> {
        walls.iter().map(|w| (w.x, w.y)).collect()
    }

    #[test]
    fn play_area_must_be_positive_and_finite() {
        assert!(PlayArea::new(Width(800.0), Height(600.0)).is_ok());
        for &(w, h) in &[(0.0, 600.0), (800.0, -1.0), (::std::f32::NAN, 600.0),
                         (800.0, ::std::f32::INFINITY)] {
            match PlayArea::new(Width(w), Height(h)) {
                Err(Error(ErrorKind::InvalidPlayArea(..), _)) => {}
                other => panic!("expected InvalidPlayArea for {}x{}, got {:?}", w, h, other),
            }
        }
    }

    #[test]
    fn single_cell_has_only_the_frame() {
        let layout = map_maze(&maze(1, 1), &area(100.0, 80.0), &GeometryConfig::default());
        assert_eq!(layout.frame.len(), 4);
        assert!(layout.walls.is_empty());
        assert_eq!(centres(&layout.frame),
                   vec![(50.0, 0.0), (50.0, 80.0), (0.0, 40.0), (100.0, 40.0)]);
        assert_eq!((layout.frame[0].width, layout.frame[0].height), (100.0, 10.0));
        assert_eq!((layout.frame[2].width, layout.frame[2].height), (10.0, 80.0));
        assert!(layout.frame.iter().all(|f| f.label == BodyLabel::Frame && f.is_static));
        assert!(layout.frame.iter().all(|f| f.fill_color.to_hex() == "#FF0000"));
    }

    #[test]
    fn opened_column_has_no_interior_walls() {
        let mut m = maze(2, 1);
        m.link(GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)).unwrap();
        let layout = map_maze(&m, &area(100.0, 200.0), &GeometryConfig::default());
        assert_eq!(layout.frame.len(), 4);
        assert!(layout.walls.is_empty());
    }

    #[test]
    fn closed_column_has_one_horizontal_wall() {
        let layout = map_maze(&maze(2, 1), &area(100.0, 200.0), &GeometryConfig::default());
        assert_eq!(layout.walls,
                   vec![WallSegment {
                            x: 50.0,
                            y: 100.0,
                            width: 100.0,
                            height: 4.0,
                            is_static: true,
                            label: BodyLabel::Wall,
                            fill_color: Colour::new(0x8F, 0xBD, 0xD3),
                        }]);
    }

    #[test]
    fn closed_grid_walls_horizontal_then_vertical() {
        let layout = map_maze(&maze(2, 2), &area(200.0, 100.0), &GeometryConfig::default());
        assert_eq!(centres(&layout.walls),
                   vec![(50.0, 50.0), (150.0, 50.0), (100.0, 25.0), (100.0, 75.0)]);
        assert_eq!((layout.walls[0].width, layout.walls[0].height), (100.0, 4.0));
        assert_eq!((layout.walls[2].width, layout.walls[2].height), (4.0, 50.0));
    }

    #[test]
    fn walls_match_the_carved_fixture() {
        let mut m = maze(3, 3);
        recursive_backtracker_from(&mut m,
                                   GridCoordinate::new(1, 1),
                                   &mut ScriptedIndices::new(&[1, 2, 0, 0]));
        let layout = map_maze(&m, &area(300.0, 300.0), &GeometryConfig::default());

        // closed horizontals (0, 1), (1, 0), (1, 1) then the closed vertical (1, 1)
        assert_eq!(centres(&layout.walls),
                   vec![(150.0, 100.0), (50.0, 200.0), (150.0, 200.0), (200.0, 150.0)]);
        assert_eq!(layout.walls.len() + m.links_count(), 12);
    }

    #[test]
    fn goal_and_ball_placement() {
        let layout = map_maze(&maze(4, 5), &area(500.0, 200.0), &GeometryConfig::default());

        let goal = &layout.goal;
        assert_eq!((goal.x, goal.y, goal.width, goal.height), (450.0, 175.0, 50.0, 25.0));
        assert_eq!(goal.label, BodyLabel::Goal);
        assert!(goal.is_static);
        assert_eq!(goal.fill_color.to_hex(), "#5AA469");

        let ball = &layout.ball;
        assert_eq!((ball.x, ball.y, ball.radius), (50.0, 25.0, 12.5));
        assert_eq!(ball.fill_color.to_hex(), "#FDFFBC");

        assert_eq!(layout.rectangles().count(), 4 + layout.walls.len() + 1);
    }

    #[test]
    fn colour_packing() {
        let c = Colour::new(0x8F, 0xBD, 0xD3);
        assert_eq!(c.to_rgb(), 0x8FBDD3);
        assert_eq!(Colour::from_rgb(0x8FBDD3), c);
        assert_eq!(c.to_string(), "#8FBDD3");
    }

    #[test]
    fn json_field_names() {
        let layout = map_maze(&maze(1, 1), &area(100.0, 100.0), &GeometryConfig::default());
        let json = serde_json::to_value(&layout).unwrap();

        let goal = &json["goal"];
        assert_eq!(goal["isStatic"], serde_json::Value::Bool(true));
        assert_eq!(goal["label"], "goal");
        assert_eq!(goal["fillColor"], "#5AA469");
        assert_eq!(goal["x"].as_f64(), Some(50.0));
        assert_eq!(json["frame"][0]["label"], "frame");
        assert_eq!(json["ball"]["radius"].as_f64(), Some(25.0));
        assert_eq!(json["ball"]["fillColor"], "#FDFFBC");
        assert_eq!(json["walls"], serde_json::Value::Array(vec![]));
    }
}
