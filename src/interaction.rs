//! Turning player input and physics collisions into game state changes.
//!
//! Nothing here touches a physics engine: key presses become velocity deltas and collision
//! reports become at most one `WinSignal`, which the caller is responsible for carrying out.

use log::{info, trace};

use crate::geometry::BodyLabel;

/// Velocity added to the ball per key press, in engine velocity units per tick.
pub const KEY_SPEED: f32 = 7.0;

/// A request to nudge the ball.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    /// Map a key name (as a browser or SDL reports it) to a command.
    /// Unrecognised keys are ignored.
    pub fn from_key_name(key: &str) -> Option<Command> {
        match key {
            "w" | "ArrowUp" => Some(Command::Up),
            "a" | "ArrowLeft" => Some(Command::Left),
            "s" | "ArrowDown" => Some(Command::Down),
            "d" | "ArrowRight" => Some(Command::Right),
            _ => {
                trace!("ignoring key {:?}", key);
                None
            }
        }
    }
}

/// A change to apply to the ball's current velocity. Screen y grows downwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VelocityDelta {
    pub dx: f32,
    pub dy: f32,
}

pub fn on_key_down(command: Command) -> VelocityDelta {
    velocity_delta(command, KEY_SPEED)
}

/// `on_key_down` with a configurable speed.
pub fn velocity_delta(command: Command, speed: f32) -> VelocityDelta {
    let (dx, dy) = match command {
        Command::Up => (0.0, -speed),
        Command::Down => (0.0, speed),
        Command::Left => (-speed, 0.0),
        Command::Right => (speed, 0.0),
    };
    VelocityDelta { dx, dy }
}

/// The labels of two bodies that started touching.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LabelPair(pub BodyLabel, pub BodyLabel);

impl LabelPair {
    /// Both bodies are the ball or the goal, in either order.
    pub fn is_ball_meeting_goal(&self) -> bool {
        let counts = |label: BodyLabel| label == BodyLabel::Ball || label == BodyLabel::Goal;
        counts(self.0) && counts(self.1)
    }
}

/// Global gravity in engine units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gravity {
    pub x: f32,
    pub y: f32,
}

/// The side effects of winning, for the caller to carry out.
#[derive(Debug, Clone, PartialEq)]
pub struct WinSignal {
    /// Non-zero and pointing down the screen.
    pub gravity: Gravity,
    /// Bodies with these labels stop being static.
    pub release: Vec<BodyLabel>,
    pub show_victory: bool,
}

impl WinSignal {
    pub fn new() -> WinSignal {
        WinSignal {
            gravity: Gravity { x: 0.0, y: 1.0 },
            release: vec![BodyLabel::Wall, BodyLabel::Goal],
            show_victory: true,
        }
    }

    pub fn releases(&self, label: BodyLabel) -> bool {
        self.release.contains(&label)
    }
}

impl Default for WinSignal {
    fn default() -> WinSignal {
        WinSignal::new()
    }
}

/// Latches the first contact between ball and goal.
#[derive(Debug, Clone, Default)]
pub struct WinCondition {
    won: bool,
}

impl WinCondition {
    pub fn new() -> WinCondition {
        WinCondition { won: false }
    }

    /// Some only for the first batch of collisions containing the ball meeting the goal,
    /// later batches are ignored.
    pub fn on_collision(&mut self, pairs: &[LabelPair]) -> Option<WinSignal> {
        if self.won || !pairs.iter().any(LabelPair::is_ball_meeting_goal) {
            return None;
        }
        self.won = true;
        info!("ball reached the goal");
        Some(WinSignal::new())
    }

    #[inline]
    pub fn has_won(&self) -> bool {
        self.won
    }
}
