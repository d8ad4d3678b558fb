use std::{
    fs::File,
    io,
    io::prelude::*,
};

use docopt::Docopt;
use error_chain::bail;
use log::info;
use mazeball::{
    errors::*,
    generators,
    geometry::{self, GeometryConfig, PlayArea},
    grid::Maze,
    grid_dimensions::GridDimensions,
    grid_displays::PathDisplay,
    pathing,
    units::{ColumnsCount, Height, RowsCount, Width},
};
use rand::{Rng, RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;

const USAGE: &str = "Mazeball

Roll the ball from the top left corner of a random maze to the goal in the far corner.

Usage:
    mazeball -h | --help
    mazeball text [--rows=<r>] [--columns=<c>] [--seed=<s>] [--show-path] [--save-edges=<path>]
    mazeball layout [--rows=<r>] [--columns=<c>] [--width=<w>] [--height=<h>] [--seed=<s>]
    mazeball play [--rows=<r>] [--columns=<c>] [--seed=<s>]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of cell rows. Random in 5..15 if not given.
    --columns=<c>          Number of cell columns. Random in 5..15 if not given.
    --seed=<s>             Seed the random number generator so the same maze comes out every time.
    --show-path            Mark the route from the ball to the goal.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --width=<w>            Pixel width of the play area [default: 800].
    --height=<h>           Pixel height of the play area [default: 600].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_text: bool,
    cmd_layout: bool,
    cmd_play: bool,
    flag_rows: Option<usize>,
    flag_columns: Option<usize>,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_save_edges: String,
    flag_width: f32,
    flag_height: f32,
}

const MIN_CELLS: usize = 5;
const MAX_CELLS: usize = 15;

fn main() -> Result<()> {

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // --help is reported as an error by docopt, let it print the usage and exit cleanly
    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        Err(e) if e.fatal() => return Err(e.into()),
        Err(e) => e.exit(),
    };

    let mut rng: Box<dyn RngCore> = match args.flag_seed {
        Some(seed) => Box::new(XorShiftRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let rows = args.flag_rows.unwrap_or_else(|| rng.gen_range(MIN_CELLS..MAX_CELLS));
    let columns = args.flag_columns.unwrap_or_else(|| rng.gen_range(MIN_CELLS..MAX_CELLS));
    let dimensions = GridDimensions::new(RowsCount(rows), ColumnsCount(columns))?;

    info!("generating a {}x{} maze", rows, columns);
    let maze = generators::new_perfect_maze(dimensions, &mut rng);

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    if args.cmd_text {
        print_text(&maze, args.flag_show_path);
    } else if args.cmd_layout {
        let area = PlayArea::new(Width(args.flag_width), Height(args.flag_height))?;
        let layout = geometry::map_maze(&maze, &area, &GeometryConfig::default());
        info!("{} interior walls", layout.walls.len());
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else if args.cmd_play {
        play(&maze)?;
    }

    Ok(())
}

fn print_text(maze: &Maze, show_path: bool) {
    if show_path {
        // A perfect maze always has a route, fall back to the plain rendering just in case.
        if let Some(path) = pathing::ball_to_goal_path(maze) {
            println!("{}", maze.render_text(&PathDisplay::new(&path)));
            return;
        }
    }
    println!("{}", maze);
}

#[cfg(feature = "gui")]
fn play(maze: &Maze) -> Result<()> {
    mazeball::renderers::play(maze,
                              &GeometryConfig::default(),
                              &mazeball::physics::PhysicsConfig::default())
}

#[cfg(not(feature = "gui"))]
fn play(_: &Maze) -> Result<()> {
    bail!("the play command needs the gui feature: cargo run --features gui -- play")
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let graph_data = maze_graph_text(maze)?;

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}

/// Line 1 is `n m`, every following line one open passage as a pair of 1-based row major indices.
fn maze_graph_text(maze: &Maze) -> Result<String> {

    let mut graph_data = String::new();
    let vertices_count = maze.size();
    let edges_count = maze.links_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    let dimensions = maze.dimensions();
    for (src, dst) in maze.iter_links() {
        let (index_a, index_b) = match (dimensions.coordinate_to_index(src),
                                        dimensions.coordinate_to_index(dst)) {
            (Some(a), Some(b)) => (a, b),
            _ => bail!("link {:?} - {:?} outside of the maze", src, dst),
        };
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    Ok(graph_data)
}
