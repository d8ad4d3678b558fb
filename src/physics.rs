//! The rigid body world the ball rolls around in.

use crossbeam::channel::Receiver;
use log::{debug, info};
use rapier2d::dynamics::{IntegrationParameters, RigidBodySet};
use rapier2d::geometry::{BroadPhase, NarrowPhase};
use rapier2d::na::Vector2;
use rapier2d::prelude::*;

use crate::geometry::{BodyLabel, Colour, Layout, WallSegment};
use crate::interaction::{velocity_delta, Command, Gravity, LabelPair, WinCondition, WinSignal,
                         KEY_SPEED};

/// Engine tuning. Key speeds and gravity are given per tick and scaled to rapier's per second units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub ticks_per_second: f32,
    /// Pixels per second squared for one unit of win gravity.
    pub gravity_scale: f32,
    pub key_speed: f32,
    /// Converts a per tick velocity delta to pixels per second.
    pub velocity_scale: f32,
    pub ball_linear_damping: f32,
    pub ball_friction: f32,
}

impl Default for PhysicsConfig {
    fn default() -> PhysicsConfig {
        PhysicsConfig {
            ticks_per_second: 60.0,
            gravity_scale: 600.0,
            key_speed: KEY_SPEED,
            velocity_scale: 60.0,
            ball_linear_damping: 0.6,
            ball_friction: 0.1,
        }
    }
}

/// Turns wall clock milliseconds into a whole number of fixed ticks, carrying the remainder over.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedStep {
    tick_millis: f32,
    lag_millis: f32,
    max_ticks: usize,
}

impl FixedStep {
    /// After a stall at most `max_ticks` are caught up at once and the rest of the backlog dropped.
    pub fn new(ticks_per_second: f32, max_ticks: usize) -> FixedStep {
        FixedStep {
            tick_millis: 1000.0 / ticks_per_second,
            lag_millis: 0.0,
            max_ticks,
        }
    }

    /// How many ticks to run for `elapsed_millis` more time.
    pub fn advance(&mut self, elapsed_millis: u32) -> usize {
        let limit = self.tick_millis * self.max_ticks as f32;
        self.lag_millis = (self.lag_millis + elapsed_millis as f32).min(limit);
        let ticks = (self.lag_millis / self.tick_millis).floor() as usize;
        self.lag_millis -= ticks as f32 * self.tick_millis;
        ticks
    }
}

/// The outline of a body relative to its centre, before rotation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outline {
    Rectangle { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

/// A snapshot of one body for drawing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyView {
    pub label: BodyLabel,
    pub centre: (f32, f32),
    /// Radians.
    pub angle: f32,
    pub outline: Outline,
    pub fill: Colour,
    pub is_static: bool,
}

/// Owns the whole rapier pipeline plus the game state layered over it.
pub struct MazeWorld {
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    event_handler: ChannelEventCollector,
    collision_events: Receiver<CollisionEvent>,
    contact_force_events: Receiver<ContactForceEvent>,

    gravity: Vector2<f32>,
    config: PhysicsConfig,
    ball: RigidBodyHandle,
    win_condition: WinCondition,
    victory_visible: bool,
}

impl MazeWorld {
    /// One fixed body per frame piece, wall and the goal, plus the dynamic ball. Gravity starts off.
    pub fn new(layout: &Layout, config: &PhysicsConfig) -> MazeWorld {
        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();

        for rectangle in layout.rectangles() {
            add_rectangle(&mut rigid_body_set, &mut collider_set, rectangle);
        }

        let placement = &layout.ball;
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(Vector2::new(placement.x, placement.y))
            .linear_damping(config.ball_linear_damping)
            .ccd_enabled(true)
            .build();
        let ball = rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::ball(placement.radius)
            .friction(config.ball_friction)
            .restitution(0.0)
            .user_data(encode_user_data(BodyLabel::Ball, placement.fill_color))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        collider_set.insert_with_parent(collider, ball, &mut rigid_body_set);

        let (collision_send, collision_events) = crossbeam::channel::unbounded();
        let (contact_force_send, contact_force_events) = crossbeam::channel::unbounded();

        debug!("physics world with {} bodies", rigid_body_set.len());

        MazeWorld {
            integration_parameters: IntegrationParameters {
                dt: 1.0 / config.ticks_per_second,
                ..IntegrationParameters::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),

            rigid_body_set,
            collider_set,

            event_handler: ChannelEventCollector::new(collision_send, contact_force_send),
            collision_events,
            contact_force_events,

            gravity: Vector2::new(0.0, 0.0),
            config: *config,
            ball,
            win_condition: WinCondition::new(),
            victory_visible: false,
        }
    }

    /// Nudge the ball. The delta adds to whatever velocity it already has.
    pub fn apply_command(&mut self, command: Command) {
        let delta = velocity_delta(command, self.config.key_speed);
        let scale = self.config.velocity_scale;
        if let Some(ball) = self.rigid_body_set.get_mut(self.ball) {
            let velocity = *ball.linvel() + Vector2::new(delta.dx, delta.dy) * scale;
            ball.set_linvel(velocity, true);
        }
    }

    /// Advance one tick. Returns the win signal on the tick the ball first touches the goal,
    /// by which point it has already been applied.
    pub fn step(&mut self) -> Option<WinSignal> {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.event_handler,
        );

        // Nothing asks for contact forces, keep the channel empty regardless.
        let _ = self.contact_force_events.try_iter().count();

        let pairs: Vec<LabelPair> = self.collision_events
            .try_iter()
            .filter(|event| event.started())
            .filter_map(|event| {
                let first = self.label_of(event.collider1())?;
                let second = self.label_of(event.collider2())?;
                Some(LabelPair(first, second))
            })
            .collect();

        let signal = self.win_condition.on_collision(&pairs);
        if let Some(ref win) = signal {
            self.apply_win(win);
        }
        signal
    }

    /// Switch on gravity, let the released bodies fall and show the victory message.
    /// Applying the same signal again leaves the world as it is.
    pub fn apply_win(&mut self, signal: &WinSignal) {
        self.gravity = Vector2::new(signal.gravity.x, signal.gravity.y) * self.config.gravity_scale;

        let released: Vec<RigidBodyHandle> = self.collider_set
            .iter()
            .filter(|(_, collider)| {
                decode_label(collider.user_data).map_or(false, |label| signal.releases(label))
            })
            .filter_map(|(_, collider)| collider.parent())
            .collect();

        let mut newly_released = 0;
        for handle in released {
            if let Some(body) = self.rigid_body_set.get_mut(handle) {
                if !body.is_dynamic() {
                    body.set_body_type(RigidBodyType::Dynamic, true);
                    newly_released += 1;
                }
            }
        }

        if newly_released > 0 {
            info!("released {} bodies", newly_released);
        }
        self.victory_visible |= signal.show_victory;
    }

    pub fn bodies(&self) -> Vec<BodyView> {
        self.collider_set
            .iter()
            .filter_map(|(_, collider)| {
                let label = decode_label(collider.user_data)?;
                let shape = collider.shape();
                let outline = if let Some(cuboid) = shape.as_cuboid() {
                    Outline::Rectangle {
                        half_width: cuboid.half_extents.x,
                        half_height: cuboid.half_extents.y,
                    }
                } else if let Some(ball) = shape.as_ball() {
                    Outline::Circle { radius: ball.radius }
                } else {
                    return None;
                };
                let is_static = collider.parent()
                    .and_then(|handle| self.rigid_body_set.get(handle))
                    .map_or(true, |body| !body.is_dynamic());
                let position = collider.position();
                Some(BodyView {
                    label,
                    centre: (position.translation.vector.x, position.translation.vector.y),
                    angle: position.rotation.angle(),
                    outline,
                    fill: decode_colour(collider.user_data),
                    is_static,
                })
            })
            .collect()
    }

    /// World gravity in pixels per second squared.
    pub fn gravity(&self) -> Gravity {
        Gravity {
            x: self.gravity.x,
            y: self.gravity.y,
        }
    }

    #[inline]
    pub fn victory_visible(&self) -> bool {
        self.victory_visible
    }

    #[inline]
    pub fn has_won(&self) -> bool {
        self.win_condition.has_won()
    }

    pub fn ball_position(&self) -> Option<(f32, f32)> {
        self.rigid_body_set.get(self.ball).map(|ball| {
            let t = ball.translation();
            (t.x, t.y)
        })
    }

    /// Pixels per second.
    pub fn ball_velocity(&self) -> Option<(f32, f32)> {
        self.rigid_body_set.get(self.ball).map(|ball| {
            let v = ball.linvel();
            (v.x, v.y)
        })
    }

    fn label_of(&self, handle: ColliderHandle) -> Option<BodyLabel> {
        self.collider_set.get(handle).and_then(|collider| decode_label(collider.user_data))
    }
}

fn add_rectangle(rigid_body_set: &mut RigidBodySet,
                 collider_set: &mut ColliderSet,
                 rectangle: &WallSegment) {
    let rigid_body = RigidBodyBuilder::fixed()
        .translation(Vector2::new(rectangle.x, rectangle.y))
        .build();
    let rigid_body_handle = rigid_body_set.insert(rigid_body);

    let mut collider = ColliderBuilder::cuboid(rectangle.width / 2.0, rectangle.height / 2.0)
        .user_data(encode_user_data(rectangle.label, rectangle.fill_color));
    if rectangle.label == BodyLabel::Goal {
        collider = collider.active_events(ActiveEvents::COLLISION_EVENTS);
    }

    collider_set.insert_with_parent(collider.build(), rigid_body_handle, rigid_body_set);
}

// The low byte holds the label, the 24 bits above it the fill colour.
fn encode_user_data(label: BodyLabel, fill: Colour) -> u128 {
    let code = match label {
        BodyLabel::Frame => 1,
        BodyLabel::Wall => 2,
        BodyLabel::Goal => 3,
        BodyLabel::Ball => 4,
    };
    code | (u128::from(fill.to_rgb()) << 8)
}

fn decode_label(user_data: u128) -> Option<BodyLabel> {
    match user_data & 0xFF {
        1 => Some(BodyLabel::Frame),
        2 => Some(BodyLabel::Wall),
        3 => Some(BodyLabel::Goal),
        4 => Some(BodyLabel::Ball),
        _ => None,
    }
}

fn decode_colour(user_data: u128) -> Colour {
    Colour::from_rgb(((user_data >> 8) & 0xFF_FFFF) as u32)
}
