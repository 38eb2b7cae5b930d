//! Frame update and match state machine
//!
//! `tick` runs once per rendered frame. It applies queued commands first (in
//! arrival order, so the last drag of a paddle wins), then advances the ball
//! and watches for points while the match is playing.

use glam::Vec2;
use rand::Rng;

use super::geometry::{place_obstacle, static_bodies};
use super::physics::{Contact, step_ball};
use super::state::{GameEvent, GamePhase, GameState, MatchError, PaddleSide, Player, TargetScore};
use crate::direction_from_angle;

/// A request from the input layer, applied at the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Menu button: start a match to this many points
    SelectTargetScore(u32),
    /// Pause button
    TogglePause,
    /// Winner screen: "PLAY AGAIN"
    PlayAgain,
    /// Winner screen: "NEW GAME"
    NewGame,
    /// Drag a paddle's centre to `x` (clamped on apply)
    MovePaddle { side: PaddleSide, x: f32 },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for command in &input.commands {
        apply_command(state, *command);
    }

    match state.match_state.phase {
        GamePhase::Playing => {
            state.time_ticks += 1;
            step_playing(state);
        }
        GamePhase::RoundTransition { ticks_left } => {
            state.time_ticks += 1;
            if ticks_left <= 1 {
                serve(state);
                state.match_state.phase = GamePhase::Playing;
            } else {
                state.match_state.phase = GamePhase::RoundTransition {
                    ticks_left: ticks_left - 1,
                };
            }
        }
        GamePhase::Menu | GamePhase::Paused | GamePhase::Won(_) => {}
    }
}

fn apply_command(state: &mut GameState, command: Command) {
    let phase = state.match_state.phase;
    match command {
        Command::SelectTargetScore(points) => {
            if phase != GamePhase::Menu {
                return;
            }
            if !state.settings.target_score_options.contains(&points) {
                log::warn!("Ignoring unlisted target score {}", points);
                return;
            }
            if let Err(e) = start_match(state, points) {
                log::warn!("Cannot start match: {}", e);
            }
        }
        Command::TogglePause => toggle_pause(state),
        Command::PlayAgain | Command::NewGame => {
            if matches!(phase, GamePhase::Won(_)) {
                return_to_menu(state);
            }
        }
        Command::MovePaddle { side, x } => {
            if phase.accepts_paddle_input() {
                let screen_width = state.settings.screen_width;
                state.paddle_mut(side).set_x(x, screen_width);
            }
        }
    }
}

/// Start a fresh match: scores to zero, obstacles cleared, paddles back to
/// default width, ball served.
pub fn start_match(state: &mut GameState, target: u32) -> Result<(), MatchError> {
    let target = TargetScore::new(target)?;

    state.match_state.target = target;
    state.match_state.reset_scores();
    state.obstacles.clear();
    for paddle in &mut state.paddles {
        paddle.reset_width(&state.settings);
    }
    state.ball.stored_vel = None;
    state.match_state.phase = GamePhase::Playing;

    log::info!("Match started, first to {}", target.get());
    state.events.push(GameEvent::MatchStarted {
        target: target.get(),
    });

    serve(state);
    Ok(())
}

/// Put the ball back at the centre and launch it steeply toward a random paddle
pub fn serve(state: &mut GameState) {
    use crate::consts::{SERVE_MAX_ANGLE_DEG, SERVE_MIN_ANGLE_DEG};
    use std::f32::consts::PI;

    let steep = state
        .rng
        .random_range(SERVE_MIN_ANGLE_DEG..=SERVE_MAX_ANGLE_DEG)
        .to_radians();
    let toward_bottom = state.rng.random_bool(0.5);
    let leftward = state.rng.random_bool(0.5);

    // Quadrant I/II aims at the top paddle, III/IV at the bottom
    let angle = match (toward_bottom, leftward) {
        (false, false) => steep,
        (false, true) => PI - steep,
        (true, true) => PI + steep,
        (true, false) => 2.0 * PI - steep,
    };

    let velocity = direction_from_angle(angle) * state.settings.serve_speed;

    let ball = &mut state.ball;
    ball.pos = state.settings.center();
    ball.vel = Vec2::ZERO;
    ball.vel += velocity;
    ball.dynamic = true;
    ball.touching = None;

    log::debug!(
        "Serve at {:.1} deg, velocity ({:.2}, {:.2})",
        angle.to_degrees(),
        velocity.x,
        velocity.y
    );
    state.events.push(GameEvent::Served { velocity });
}

fn step_playing(state: &mut GameState) {
    let bodies = static_bodies(state);
    let contacts = step_ball(&mut state.ball, &bodies, &state.paddles, &state.settings);

    for contact in contacts {
        state.events.push(match contact {
            Contact::Paddle { side, speed } => GameEvent::PaddleHit { side, speed },
            Contact::Wall => GameEvent::WallHit,
            Contact::Obstacle { id } => GameEvent::ObstacleHit { id },
        });
    }

    // Past the bottom edge is player 2's point, past the top is player 1's
    if state.ball.pos.y < 0.0 {
        score_point(state, Player::Two);
    } else if state.ball.pos.y > state.settings.screen_height {
        score_point(state, Player::One);
    }
}

/// Award a point; either end the match or escalate and serve again
pub fn score_point(state: &mut GameState, scorer: Player) {
    let total = state.match_state.add_point(scorer);
    let (score1, score2) = (state.match_state.score1, state.match_state.score2);
    log::info!("Player {} scores ({} - {})", scorer.number(), score1, score2);
    state.events.push(GameEvent::PointScored {
        scorer,
        score1,
        score2,
    });

    if total >= state.match_state.target.get() {
        declare_winner(state, scorer);
        return;
    }

    widen_paddle(state, scorer.opponent().paddle_side());
    spawn_obstacle(state);

    let delay = state.settings.serve_delay_ticks;
    if delay == 0 {
        serve(state);
    } else {
        state.ball.pos = state.settings.center();
        state.ball.freeze();
        state.match_state.phase = GamePhase::RoundTransition { ticks_left: delay };
    }
}

fn widen_paddle(state: &mut GameState, side: PaddleSide) {
    let growth = state.settings.paddle_growth;
    let max_width = state.settings.max_paddle_width();
    let screen_width = state.settings.screen_width;

    let paddle = state.paddle_mut(side);
    paddle.grow(growth, max_width, screen_width);
    let width = paddle.width;
    state.events.push(GameEvent::PaddleWidened { side, width });
}

fn spawn_obstacle(state: &mut GameState) {
    if state.obstacles.len() >= state.settings.max_obstacles {
        return;
    }

    let id = state.next_entity_id();
    match place_obstacle(&mut state.rng, &state.obstacles, &state.settings, id) {
        Some(obstacle) => {
            log::debug!(
                "Obstacle {} at ({:.0}, {:.0}) r={:.1}",
                obstacle.id,
                obstacle.center.x,
                obstacle.center.y,
                obstacle.radius
            );
            state.obstacles.push(obstacle);
            state.events.push(GameEvent::ObstacleSpawned { id });
        }
        None => state.events.push(GameEvent::ObstaclePlacementFailed),
    }
}

fn declare_winner(state: &mut GameState, winner: Player) {
    state.ball.freeze();
    state.ball.stored_vel = None;
    state.match_state.phase = GamePhase::Won(winner);

    log::info!("Player {} wins", winner.number());
    state.events.push(GameEvent::MatchWon { winner });
}

/// Freeze or resume play, keeping the ball's velocity across the pause
pub fn toggle_pause(state: &mut GameState) {
    match state.match_state.phase {
        GamePhase::Playing => {
            state.ball.stored_vel = Some(state.ball.vel);
            state.ball.freeze();
            state.match_state.phase = GamePhase::Paused;
            state.events.push(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.ball.dynamic = true;
            if let Some(vel) = state.ball.stored_vel.take() {
                state.ball.vel = vel;
            }
            state.match_state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Resumed);
        }
        _ => {}
    }
}

/// Leave the winner screen for the score menu
pub fn return_to_menu(state: &mut GameState) {
    state.match_state.reset_scores();
    state.match_state.phase = GamePhase::Menu;
    state.ball.pos = state.settings.center();
    state.ball.freeze();
    state.ball.stored_vel = None;

    log::info!("Back to menu");
    state.events.push(GameEvent::ReturnedToMenu);
}
