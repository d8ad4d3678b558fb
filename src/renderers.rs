use std::f32::consts::PI;

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::WindowCanvas;

use crate::errors::*;
use crate::geometry::{map_maze, Colour, GeometryConfig, PlayArea};
use crate::grid::Maze;
use crate::interaction::Command;
use crate::physics::{BodyView, FixedStep, MazeWorld, Outline, PhysicsConfig};
use crate::sdl;
use crate::units::{Height, Width};

const WINDOW_TITLE: &str = "Mazeball";
const CIRCLE_SEGMENTS: usize = 24;
// The window is the display size less this many pixels each way.
const DISPLAY_MARGIN: i32 = 20;
// Ticks caught up in one frame after a stall.
const MAX_TICKS_PER_FRAME: usize = 5;

/// Open a window, lay the maze out to fit it and run the game until the window is closed.
pub fn play(maze: &Maze, geometry: &GeometryConfig, physics: &PhysicsConfig) -> Result<()> {

    let sdl_setup = sdl::init()?;

    let display = sdl_setup.video_subsystem
        .current_display_mode(0)
        .map_err(Error::from)
        .chain_err(|| "failed to query the display size")?;
    let window_width = (display.w - DISPLAY_MARGIN).max(1) as u32;
    let window_height = (display.h - DISPLAY_MARGIN).max(1) as u32;

    let area = PlayArea::new(Width(window_width as f32), Height(window_height as f32))?;
    let layout = map_maze(maze, &area, geometry);
    let mut world = MazeWorld::new(&layout, physics);

    let window = sdl_setup.video_subsystem
        .window(WINDOW_TITLE, window_width, window_height)
        .position_centered()
        .build()
        .chain_err(|| "failed to create the game window")?;
    let mut canvas = window.into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .chain_err(|| "failed to create the window canvas")?;

    let start_ticks = sdl_setup.timer_subsystem.ticks();
    let mut last_ticks = start_ticks;
    let mut clock = FixedStep::new(physics.ticks_per_second, MAX_TICKS_PER_FRAME);
    let mut events = sdl_setup.sdl_context
        .event_pump()
        .map_err(Error::from)
        .chain_err(|| "failed to get the sdl event pump")?;

    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'event,
                Event::KeyDown { keycode: Some(keycode), .. } => {
                    if let Some(command) = Command::from_key_name(&key_name(keycode)) {
                        world.apply_command(command);
                    }
                }
                _ => continue,
            }
        }

        let now = sdl_setup.timer_subsystem.ticks();
        let ticks = clock.advance(now.wrapping_sub(last_ticks));
        last_ticks = now;

        for _ in 0..ticks {
            if world.step().is_some() {
                let seconds = now.wrapping_sub(start_ticks) as f32 / 1000.0;
                info!("solved in {:.1}s", seconds);
                canvas.window_mut()
                    .set_title(&format!("{} - solved in {:.1}s", WINDOW_TITLE, seconds))
                    .chain_err(|| "failed to retitle the window")?;
            }
        }

        draw_frame(&mut canvas, &world, window_width, window_height)?;
        canvas.present();
    }

    Ok(())
}

/// The key names a browser would report for the keys the game listens to.
fn key_name(keycode: Keycode) -> String {
    match keycode {
        Keycode::W => String::from("w"),
        Keycode::A => String::from("a"),
        Keycode::S => String::from("s"),
        Keycode::D => String::from("d"),
        Keycode::Up => String::from("ArrowUp"),
        Keycode::Down => String::from("ArrowDown"),
        Keycode::Left => String::from("ArrowLeft"),
        Keycode::Right => String::from("ArrowRight"),
        other => other.name(),
    }
}

fn draw_frame(canvas: &mut WindowCanvas,
              world: &MazeWorld,
              window_width: u32,
              window_height: u32)
              -> Result<()> {

    canvas.set_draw_color(Color::RGB(0x1B, 0x1B, 0x1B));
    canvas.clear();

    for body in world.bodies() {
        canvas.set_draw_color(sdl_colour(body.fill));
        canvas.draw_lines(&outline_points(&body)[..]).map_err(Error::from)?;
    }

    if world.victory_visible() {
        // A band across the middle of the window
        let banner_height = window_height / 5;
        let banner = Rect::new(0,
                               ((window_height - banner_height) / 2) as i32,
                               window_width,
                               banner_height);
        canvas.set_draw_color(Color::RGB(0x5A, 0xA4, 0x69));
        canvas.fill_rect(banner).map_err(Error::from)?;
    }

    Ok(())
}

/// A closed polygon around the body, the first point repeated at the end.
fn outline_points(body: &BodyView) -> Vec<Point> {
    let local: Vec<(f32, f32)> = match body.outline {
        Outline::Rectangle { half_width, half_height } => {
            vec![(-half_width, -half_height),
                 (half_width, -half_height),
                 (half_width, half_height),
                 (-half_width, half_height)]
        }
        Outline::Circle { radius } => {
            (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let theta = 2.0 * PI * i as f32 / CIRCLE_SEGMENTS as f32;
                    (radius * theta.cos(), radius * theta.sin())
                })
                .collect()
        }
    };

    let (sin, cos) = body.angle.sin_cos();
    let (cx, cy) = body.centre;
    let mut points: Vec<Point> = local.iter()
        .map(|&(x, y)| {
            Point::new((cx + x * cos - y * sin).round() as i32,
                       (cy + x * sin + y * cos).round() as i32)
        })
        .collect();
    if let Some(first) = points.first().cloned() {
        points.push(first);
    }
    points
}

fn sdl_colour(colour: Colour) -> Color {
    Color::RGB(colour.red, colour.green, colour.blue)
}
