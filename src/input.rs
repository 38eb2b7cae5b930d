//! Pointer/touch input mapping
//!
//! Raw pointer events come in already resolved to screen coordinates. A press
//! either hits a button or, during play or the rest before a serve, grabs the
//! paddle on that half of the screen for as long as the pointer stays down.
//! Several pointers can drag at once, even the same paddle; their moves are
//! applied in order.

use std::collections::HashMap;

use glam::Vec2;

use crate::sim::{Command, GameState, PaddleSide};
use crate::ui::{ButtonId, Layout};

/// Host-assigned identity of a touch or mouse pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Raw pointer event in screen coordinates (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { id: PointerId, pos: Vec2 },
    Move { id: PointerId, pos: Vec2 },
    Up { id: PointerId },
    Cancel { id: PointerId },
}

/// Tracks which pointer drags which paddle
#[derive(Debug, Default)]
pub struct InputMapper {
    pointers: HashMap<PointerId, PaddleSide>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one event into a command for the next tick, if it makes one
    pub fn handle(&mut self, event: PointerEvent, state: &GameState) -> Option<Command> {
        match event {
            PointerEvent::Down { id, pos } => self.pointer_down(id, pos, state),
            PointerEvent::Move { id, pos } => {
                if !state.phase().accepts_paddle_input() {
                    return None;
                }
                self.pointers
                    .get(&id)
                    .map(|&side| Command::MovePaddle { side, x: pos.x })
            }
            PointerEvent::Up { id } | PointerEvent::Cancel { id } => {
                self.pointers.remove(&id);
                None
            }
        }
    }

    fn pointer_down(&mut self, id: PointerId, pos: Vec2, state: &GameState) -> Option<Command> {
        let phase = state.phase();
        let layout = Layout::new(&state.settings);

        if let Some(button) = layout.hit_test(phase, pos) {
            log::debug!("Pressed {}", button.name());
            return Some(match button {
                ButtonId::Score(points) => Command::SelectTargetScore(points),
                ButtonId::Pause => Command::TogglePause,
                ButtonId::PlayAgain => Command::PlayAgain,
                ButtonId::NewGame => Command::NewGame,
            });
        }

        if phase.accepts_paddle_input() {
            let side = if pos.y < state.settings.screen_height / 2.0 {
                PaddleSide::Bottom
            } else {
                PaddleSide::Top
            };
            self.pointers.insert(id, side);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{GamePhase, Player, TickInput, tick};

    fn playing() -> GameState {
        let mut state = GameState::new(5);
        tick(
            &mut state,
            &TickInput {
                commands: vec![Command::SelectTargetScore(3)],
            },
        );
        state
    }

    fn down(mapper: &mut InputMapper, state: &GameState, id: u64, pos: Vec2) -> Option<Command> {
        mapper.handle(
            PointerEvent::Down {
                id: PointerId(id),
                pos,
            },
            state,
        )
    }

    fn drag(mapper: &mut InputMapper, state: &GameState, id: u64, x: f32) -> Option<Command> {
        mapper.handle(
            PointerEvent::Move {
                id: PointerId(id),
                pos: Vec2::new(x, 100.0),
            },
            state,
        )
    }

    #[test]
    fn test_menu_press_selects_score() {
        let state = GameState::new(5);
        let layout = Layout::new(&state.settings);
        let mut mapper = InputMapper::new();
        let pos = layout.score_buttons[2].rect.center();
        assert_eq!(
            down(&mut mapper, &state, 1, pos),
            Some(Command::SelectTargetScore(10))
        );
        // A button press never grabs a paddle
        assert!(mapper.pointers.is_empty());
    }

    #[test]
    fn test_press_in_menu_outside_buttons_does_nothing() {
        let state = GameState::new(5);
        let mut mapper = InputMapper::new();
        assert_eq!(down(&mut mapper, &state, 1, Vec2::new(10.0, 10.0)), None);
        assert_eq!(drag(&mut mapper, &state, 1, 200.0), None);
        assert!(mapper.pointers.is_empty());
    }

    #[test]
    fn test_halves_select_paddles() {
        let state = playing();
        let mut mapper = InputMapper::new();
        down(&mut mapper, &state, 1, Vec2::new(100.0, 100.0));
        down(&mut mapper, &state, 2, Vec2::new(100.0, 700.0));

        assert_eq!(
            drag(&mut mapper, &state, 1, 150.0),
            Some(Command::MovePaddle {
                side: PaddleSide::Bottom,
                x: 150.0
            })
        );
        assert_eq!(
            drag(&mut mapper, &state, 2, 250.0),
            Some(Command::MovePaddle {
                side: PaddleSide::Top,
                x: 250.0
            })
        );

        mapper.handle(PointerEvent::Up { id: PointerId(2) }, &state);
        mapper.handle(PointerEvent::Cancel { id: PointerId(1) }, &state);
        assert_eq!(drag(&mut mapper, &state, 1, 150.0), None);
        assert_eq!(drag(&mut mapper, &state, 2, 250.0), None);
    }

    #[test]
    fn test_unknown_pointer_is_ignored() {
        let state = playing();
        let mut mapper = InputMapper::new();
        assert_eq!(drag(&mut mapper, &state, 42, 1.0), None);
        assert_eq!(mapper.handle(PointerEvent::Up { id: PointerId(42) }, &state), None);
    }

    #[test]
    fn test_pause_button_wins_over_paddle_grab() {
        let state = playing();
        let layout = Layout::new(&state.settings);
        let mut mapper = InputMapper::new();
        let pos = layout.pause.rect.center();
        assert_eq!(down(&mut mapper, &state, 1, pos), Some(Command::TogglePause));
        assert_eq!(drag(&mut mapper, &state, 1, 100.0), None);
    }

    #[test]
    fn test_moves_ignored_while_paused() {
        let mut state = playing();
        let mut mapper = InputMapper::new();
        down(&mut mapper, &state, 1, Vec2::new(100.0, 100.0));
        tick(
            &mut state,
            &TickInput {
                commands: vec![Command::TogglePause],
            },
        );
        assert_eq!(drag(&mut mapper, &state, 1, 300.0), None);
    }

    #[test]
    fn test_grab_during_serve_delay() {
        let settings = Settings {
            serve_delay_ticks: 30,
            ..Settings::default()
        };
        let mut state = GameState::with_settings(settings, 5).unwrap();
        crate::sim::start_match(&mut state, 3).unwrap();
        crate::sim::tick::score_point(&mut state, Player::One);
        assert!(matches!(state.phase(), GamePhase::RoundTransition { .. }));

        let mut mapper = InputMapper::new();
        assert_eq!(down(&mut mapper, &state, 1, Vec2::new(100.0, 100.0)), None);
        assert_eq!(
            drag(&mut mapper, &state, 1, 300.0),
            Some(Command::MovePaddle {
                side: PaddleSide::Bottom,
                x: 300.0
            })
        );
    }
}
