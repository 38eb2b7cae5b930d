//! Game state and core simulation types
//!
//! Everything the frame update mutates lives in [`GameState`]. The renderer
//! never touches it directly; it reads a [`crate::Snapshot`] instead.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{Settings, SettingsError};

/// Match configuration problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("target score must be at least 1, got {0}")]
    InvalidTargetScore(u32),
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Red, defends the bottom edge
    One,
    /// Blue, defends the top edge
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The paddle this player drags
    pub fn paddle_side(self) -> PaddleSide {
        match self {
            Player::One => PaddleSide::Bottom,
            Player::Two => PaddleSide::Top,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

/// Which screen edge a paddle guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddleSide {
    Bottom,
    Top,
}

impl PaddleSide {
    pub fn owner(self) -> Player {
        match self {
            PaddleSide::Bottom => Player::One,
            PaddleSide::Top => Player::Two,
        }
    }

    /// Index into [`GameState::paddles`]
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PaddleSide::Bottom => 0,
            PaddleSide::Top => 1,
        }
    }

    /// Sign of the vertical velocity that leaves this paddle
    #[inline]
    pub fn away_sign(self) -> f32 {
        match self {
            PaddleSide::Bottom => 1.0,
            PaddleSide::Top => -1.0,
        }
    }
}

/// Winning score for a match, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetScore(u32);

impl TargetScore {
    pub fn new(points: u32) -> Result<Self, MatchError> {
        if points == 0 {
            return Err(MatchError::InvalidTargetScore(points));
        }
        Ok(Self(points))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for TargetScore {
    fn default() -> Self {
        Self(10)
    }
}

/// Current phase of the match state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Choosing a winning score
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen by the pause button
    Paused,
    /// Ball parked at centre between a point and the next serve
    RoundTransition { ticks_left: u32 },
    /// Match over, ball frozen
    Won(Player),
}

impl GamePhase {
    /// Paddles respond to drags in these phases
    pub fn accepts_paddle_input(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::RoundTransition { .. })
    }
}

/// Scores, target and phase of the running match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub score1: u32,
    pub score2: u32,
    pub target: TargetScore,
    pub phase: GamePhase,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            score1: 0,
            score2: 0,
            target: TargetScore::default(),
            phase: GamePhase::Menu,
        }
    }
}

impl MatchState {
    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.score1,
            Player::Two => self.score2,
        }
    }

    /// Add a point and return the player's new total
    pub fn add_point(&mut self, player: Player) -> u32 {
        let score = match player {
            Player::One => &mut self.score1,
            Player::Two => &mut self.score2,
        };
        *score += 1;
        *score
    }

    pub fn reset_scores(&mut self) {
        self.score1 = 0;
        self.score2 = 0;
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            GamePhase::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Moved by the physics step only while set
    pub dynamic: bool,
    /// Velocity captured when pausing, restored on resume
    pub stored_vel: Option<Vec2>,
    /// Paddle the ball is currently in contact with; a paddle boosts once per contact
    #[serde(default)]
    pub touching: Option<PaddleSide>,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            dynamic: false,
            stored_vel: None,
            touching: None,
        }
    }

    /// Stop the ball in place and take it out of the simulation
    pub fn freeze(&mut self) {
        self.vel = Vec2::ZERO;
        self.dynamic = false;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A player's paddle
///
/// Only `x` and `width` ever change. The collision shape is derived from the
/// current width whenever it is queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: PaddleSide,
    /// Centre x
    pub x: f32,
    /// Centre y (fixed for the paddle's lifetime)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

impl Paddle {
    pub fn new(side: PaddleSide, settings: &Settings) -> Self {
        let y = match side {
            PaddleSide::Bottom => settings.bottom_paddle_y(),
            PaddleSide::Top => settings.top_paddle_y(),
        };
        Self {
            side,
            x: settings.screen_width / 2.0,
            y,
            width: settings.paddle_width.min(settings.max_paddle_width()),
            height: settings.paddle_height,
            corner_radius: settings.paddle_corner_radius,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Move horizontally, keeping the whole paddle on screen
    pub fn set_x(&mut self, x: f32, screen_width: f32) {
        let half = self.width / 2.0;
        // A paddle wider than the screen just centres
        self.x = if half * 2.0 >= screen_width {
            screen_width / 2.0
        } else {
            x.clamp(half, screen_width - half)
        };
    }

    /// Widen by `amount`, capped at `max_width`, and re-clamp the position
    pub fn grow(&mut self, amount: f32, max_width: f32, screen_width: f32) {
        self.width = (self.width + amount).min(max_width);
        self.set_x(self.x, screen_width);
    }

    /// Back to the default width for a fresh match
    pub fn reset_width(&mut self, settings: &Settings) {
        self.width = settings.paddle_width.min(settings.max_paddle_width());
        self.set_x(self.x, settings.screen_width);
    }
}

/// A static hexagonal obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub center: Vec2,
    /// Circumradius, also used for spacing checks
    pub radius: f32,
    /// Vertices relative to `center`, counter-clockwise
    pub points: Vec<Vec2>,
}

/// Things that happened during a tick, for sound/vfx hooks in the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    MatchStarted { target: u32 },
    Served { velocity: Vec2 },
    PaddleHit { side: PaddleSide, speed: f32 },
    WallHit,
    ObstacleHit { id: u32 },
    PointScored { scorer: Player, score1: u32, score2: u32 },
    PaddleWidened { side: PaddleSide, width: f32 },
    ObstacleSpawned { id: u32 },
    ObstaclePlacementFailed,
    Paused,
    Resumed,
    MatchWon { winner: Player },
    ReturnedToMenu,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    /// Frames simulated while playing
    pub time_ticks: u64,
    pub match_state: MatchState,
    pub ball: Ball,
    /// Indexed by [`PaddleSide::index`]
    pub paddles: [Paddle; 2],
    pub obstacles: Vec<Obstacle>,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Default settings, sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self::build(Settings::default(), seed)
    }

    /// Custom settings, validated first
    pub fn with_settings(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: Settings, seed: u64) -> Self {
        let ball = Ball::new(settings.center(), settings.ball_radius);
        let paddles = [
            Paddle::new(PaddleSide::Bottom, &settings),
            Paddle::new(PaddleSide::Top, &settings),
        ];
        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            match_state: MatchState::default(),
            ball,
            paddles,
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.match_state.phase
    }

    pub fn paddle(&self, side: PaddleSide) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: PaddleSide) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }
}
