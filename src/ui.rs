//! On-screen button regions
//!
//! The renderer draws the buttons; this module only knows where they are so
//! the input mapper can hit-test a press against them.

use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::GamePhase;

/// Menu score button size and gap
const SCORE_BUTTON_SIZE: Vec2 = Vec2::new(120.0, 60.0);
const SCORE_BUTTON_SPACING: f32 = 20.0;
/// Winner screen button size
const END_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 60.0);
/// Pause button edge length and inset of its centre from the top-right corner
const PAUSE_BUTTON_SIZE: f32 = 40.0;
const PAUSE_BUTTON_INSET: f32 = 30.0;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Something pressable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    Score(u32),
    Pause,
    PlayAgain,
    NewGame,
}

impl ButtonId {
    /// Stable name the renderer attaches to the button node
    pub fn name(&self) -> String {
        match self {
            ButtonId::Score(points) => format!("score_{points}"),
            ButtonId::Pause => "pause".to_string(),
            ButtonId::PlayAgain => "playAgain".to_string(),
            ButtonId::NewGame => "newGame".to_string(),
        }
    }
}

/// A named button and its bounds
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub id: ButtonId,
    pub rect: Rect,
}

/// Button positions for one screen size
#[derive(Debug, Clone)]
pub struct Layout {
    pub score_buttons: Vec<HitRegion>,
    pub pause: HitRegion,
    pub play_again: HitRegion,
    pub new_game: HitRegion,
}

impl Layout {
    pub fn new(settings: &Settings) -> Self {
        let w = settings.screen_width;
        let h = settings.screen_height;

        // Score buttons in one centred row
        let options = &settings.target_score_options;
        let count = options.len() as f32;
        let total = count * SCORE_BUTTON_SIZE.x + (count - 1.0).max(0.0) * SCORE_BUTTON_SPACING;
        let first_x = (w - total) / 2.0 + SCORE_BUTTON_SIZE.x / 2.0;
        let score_buttons = options
            .iter()
            .enumerate()
            .map(|(i, &points)| HitRegion {
                id: ButtonId::Score(points),
                rect: Rect::from_center(
                    Vec2::new(
                        first_x + i as f32 * (SCORE_BUTTON_SIZE.x + SCORE_BUTTON_SPACING),
                        h * 0.45,
                    ),
                    SCORE_BUTTON_SIZE,
                ),
            })
            .collect();

        Self {
            score_buttons,
            pause: HitRegion {
                id: ButtonId::Pause,
                rect: Rect::from_center(
                    Vec2::new(w - PAUSE_BUTTON_INSET, h - PAUSE_BUTTON_INSET),
                    Vec2::splat(PAUSE_BUTTON_SIZE),
                ),
            },
            play_again: HitRegion {
                id: ButtonId::PlayAgain,
                rect: Rect::from_center(Vec2::new(w / 2.0, h * 0.35), END_BUTTON_SIZE),
            },
            new_game: HitRegion {
                id: ButtonId::NewGame,
                rect: Rect::from_center(Vec2::new(w / 2.0, h * 0.25), END_BUTTON_SIZE),
            },
        }
    }

    /// Buttons that are on screen (and pressable) in `phase`
    pub fn active_regions(&self, phase: GamePhase) -> Vec<&HitRegion> {
        match phase {
            GamePhase::Menu => self.score_buttons.iter().collect(),
            GamePhase::Playing | GamePhase::Paused => vec![&self.pause],
            GamePhase::Won(_) => vec![&self.play_again, &self.new_game],
            GamePhase::RoundTransition { .. } => Vec::new(),
        }
    }

    /// Button under `pos`, if any
    pub fn hit_test(&self, phase: GamePhase, pos: Vec2) -> Option<ButtonId> {
        self.active_regions(phase)
            .into_iter()
            .find(|region| region.rect.contains(pos))
            .map(|region| region.id)
    }
}
