//! Read-only frame view for the renderer
//!
//! Built after each tick. Carries everything needed to draw the frame and
//! nothing the renderer could use to reach back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Body, BodyKind, GamePhase, GameState, PaddleSide, Player, Shape};
use crate::ui::{Layout, Rect};

const MENU_TITLE: &str = "SHUFFLEBOARD";
const MENU_SUBTITLE: &str = "Select winning score";
const PAUSE_TEXT: &str = "PAUSED";

/// RGBA colour, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const CLEAR: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Player {
    /// Colour of the player's paddle, score and banner
    pub fn color(self) -> Color {
        match self {
            Player::One => Color::RED,
            Player::Two => Color::BLUE,
        }
    }
}

/// A body ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub kind: BodyKind,
    pub position: Vec2,
    pub shape: Shape,
    pub fill: Color,
    pub stroke: Color,
}

impl Sprite {
    fn from_body(body: Body, fill: Color, stroke: Color) -> Self {
        Self {
            kind: body.kind,
            position: body.position,
            shape: body.shape,
            fill,
            stroke,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreLabel {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
}

/// A named button region, in the renderer's terms
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub name: String,
    pub rect: Rect,
}

/// Everything the renderer reads for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub screen: Vec2,
    /// Ball, paddles and obstacles (hidden outside gameplay)
    pub gameplay_visible: bool,
    pub ball: Sprite,
    pub paddles: [Sprite; 2],
    pub obstacles: Vec<Sprite>,
    pub scores: [ScoreLabel; 2],
    pub menu_visible: bool,
    /// Title and subtitle while the menu is up
    pub menu_text: Option<(String, String)>,
    pub pause_overlay_visible: bool,
    pub pause_text: Option<String>,
    pub game_over_visible: bool,
    /// "RED WINS!" / "BLUE WINS!"
    pub winner_text: Option<String>,
    pub winner_color: Option<Color>,
    /// Buttons currently pressable
    pub buttons: Vec<ButtonView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let phase = state.phase();
        let settings = &state.settings;
        let center = settings.center();
        let winner = state.match_state.winner();

        let paddle_sprite = |side: PaddleSide| {
            Sprite::from_body(
                Body::paddle(state.paddle(side)),
                side.owner().color(),
                Color::CLEAR,
            )
        };

        let score_label = |player: Player, dx: f32| ScoreLabel {
            text: state.match_state.score(player).to_string(),
            position: center + Vec2::new(dx, 0.0),
            color: player.color(),
        };

        let layout = Layout::new(settings);
        let buttons = layout
            .active_regions(phase)
            .into_iter()
            .map(|region| ButtonView {
                name: region.id.name(),
                rect: region.rect,
            })
            .collect();

        Self {
            phase,
            screen: Vec2::new(settings.screen_width, settings.screen_height),
            gameplay_visible: phase != GamePhase::Menu,
            ball: Sprite::from_body(Body::ball(&state.ball), Color::WHITE, Color::CLEAR),
            paddles: [
                paddle_sprite(PaddleSide::Bottom),
                paddle_sprite(PaddleSide::Top),
            ],
            obstacles: state
                .obstacles
                .iter()
                .map(|o| Sprite::from_body(Body::obstacle(o), Color::CYAN, Color::WHITE))
                .collect(),
            scores: [score_label(Player::One, -50.0), score_label(Player::Two, 50.0)],
            menu_visible: phase == GamePhase::Menu,
            menu_text: (phase == GamePhase::Menu)
                .then(|| (MENU_TITLE.to_string(), MENU_SUBTITLE.to_string())),
            pause_overlay_visible: phase == GamePhase::Paused,
            pause_text: (phase == GamePhase::Paused).then(|| PAUSE_TEXT.to_string()),
            game_over_visible: winner.is_some(),
            winner_text: winner.map(|p| match p {
                Player::One => "RED WINS!".to_string(),
                Player::Two => "BLUE WINS!".to_string(),
            }),
            winner_color: winner.map(Player::color),
            buttons,
        }
    }

    /// JSON for hosts that render out of process
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
