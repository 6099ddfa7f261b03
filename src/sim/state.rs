//! Game state and core simulation types
//!
//! Entities are created once and mutated in place every tick. Nothing is
//! ever destroyed; Reset restores the initial values.

use glam::Vec2;

use super::geometry::Aabb;
use super::input::{Controls, Direction};
use super::lifecycle::ResetScheduler;
use crate::consts::MAX_BRICKS;
use crate::settings::{BrickSettings, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Grid cleared; ball and paddle hidden until the scheduled reset
    Celebrating,
}

/// Why a reset happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Player pressed "try again" (or any external trigger)
    Manual,
    /// Celebration delay elapsed after a full clear
    Scheduled,
}

/// Notable transitions, drained by the frame driver once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed { column: u32, row: u32, score: u32 },
    FullClear { score: u32 },
    /// Ball crossed the floor; `score` is what was lost
    BallLost { score: u32 },
    Reset { reason: ResetReason },
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    /// |dy| applied on every paddle bounce
    pub launch_speed: f32,
    pub visible: bool,
}

impl Ball {
    /// Ball at the field centre with its starting velocity
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.field.width / 2.0, settings.field.height / 2.0),
            vel: Vec2::new(settings.ball.start_dx, settings.ball.start_dy),
            radius: settings.ball.radius,
            launch_speed: settings.ball.launch_speed,
            visible: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity: -speed, 0 or +speed
    pub dx: f32,
    pub speed: f32,
    pub visible: bool,
}

impl Paddle {
    /// Paddle centred horizontally, `floor_gap` above the floor
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: Self::start_pos(settings),
            width: settings.paddle.width,
            height: settings.paddle.height,
            dx: 0.0,
            speed: settings.paddle.speed,
            visible: true,
        }
    }

    pub fn start_pos(settings: &Settings) -> Vec2 {
        Vec2::new(
            settings.field.width / 2.0 - settings.paddle.width / 2.0,
            settings.field.height - settings.paddle.floor_gap,
        )
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.width, self.height)
    }

    /// Translate a direction intent into velocity
    pub fn set_intent(&mut self, intent: Option<Direction>) {
        self.dx = intent.map_or(0.0, |d| d.sign() * self.speed);
    }

    /// Keep the paddle inside `[0, field_width - width]` without touching dx
    pub fn clamp_to_field(&mut self, field_width: f32) {
        if self.pos.x + self.width > field_width {
            self.pos.x = field_width - self.width;
        }
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
    }
}

/// A single brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub column: u32,
    pub row: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

impl Brick {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_rect(self.pos, self.width, self.height)
    }
}

/// Fixed rectangular grid of bricks. Layout never changes after construction;
/// only visibility does.
#[derive(Debug, Clone, PartialEq)]
pub struct BrickGrid {
    columns: u32,
    rows: u32,
    /// Column-major: all rows of column 0, then column 1, ...
    bricks: Vec<Brick>,
}

impl BrickGrid {
    pub fn new(layout: &BrickSettings) -> Self {
        let count = (layout.columns as usize).saturating_mul(layout.rows as usize);
        let mut bricks = Vec::with_capacity(count.min(MAX_BRICKS));
        for column in 0..layout.columns {
            for row in 0..layout.rows {
                let x = column as f32 * (layout.width + layout.padding) + layout.offset_x;
                let y = row as f32 * (layout.height + layout.padding) + layout.offset_y;
                bricks.push(Brick {
                    column,
                    row,
                    pos: Vec2::new(x, y),
                    width: layout.width,
                    height: layout.height,
                    visible: true,
                });
            }
        }
        Self {
            columns: layout.columns,
            rows: layout.rows,
            bricks,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, column: u32, row: u32) -> Option<&Brick> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.bricks
            .get(column as usize * self.rows as usize + row as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn visible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    /// Every brick hidden
    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.visible)
    }

    pub fn show_all(&mut self) {
        for brick in &mut self.bricks {
            brick.visible = true;
        }
    }
}

/// Complete game state, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: u32,
    pub phase: GamePhase,
    /// Whether the "try again" affordance should be shown
    pub try_again_visible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Driver clock at the current tick (ms)
    pub now_ms: f64,
    pub controls: Controls,
    pub(crate) scheduler: ResetScheduler,
    /// Ball was past the floor on the previous tick
    pub(crate) ball_below_floor: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game from validated settings
    pub fn new(settings: Settings) -> Self {
        log::debug!(
            "New game: {} bricks, key handling {}",
            settings.brick_count(),
            settings.key_handling.as_str()
        );
        let mut state = Self {
            ball: Ball::new(&settings),
            paddle: Paddle::new(&settings),
            bricks: BrickGrid::new(&settings.bricks),
            score: 0,
            phase: GamePhase::Playing,
            try_again_visible: false,
            time_ticks: 0,
            now_ms: 0.0,
            controls: Controls::new(settings.key_handling),
            scheduler: ResetScheduler::new(),
            ball_below_floor: false,
            events: Vec::new(),
            settings,
        };
        state.restore_initial();
        state
    }

    /// Bricks needed for a full clear
    pub fn total_bricks(&self) -> usize {
        self.bricks.len()
    }

    /// Key-down of a direction
    pub fn direction_pressed(&mut self, direction: Direction) {
        let intent = self.controls.press(direction);
        self.paddle.set_intent(intent);
    }

    /// Key-up of a direction
    pub fn direction_released(&mut self, direction: Direction) {
        let intent = self.controls.release(direction);
        self.paddle.set_intent(intent);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Pending events (oldest first)
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
