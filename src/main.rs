//! Shuffleboard headless driver
//!
//! Runs one match without a window: presses a score button through the input
//! mapper, lets the players drag toward the ball now and then, and ticks until
//! someone wins. Prints the final frame snapshot as JSON.

use glam::Vec2;

use shuffleboard::sim::{GamePhase, GameState, TickInput, tick};
use shuffleboard::ui::Layout;
use shuffleboard::{InputMapper, PointerEvent, PointerId, Snapshot};

/// Give up after this many frames (about half an hour at 60 Hz)
const MAX_FRAMES: u64 = 60 * 60 * 30;

fn main() {
    env_logger::init();
    log::info!("Shuffleboard (headless) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    let mut mapper = InputMapper::new();
    let layout = Layout::new(&state.settings);

    // Press "3" on the menu
    let mut input = TickInput::default();
    if let Some(button) = layout.score_buttons.first() {
        let press = PointerEvent::Down {
            id: PointerId(0),
            pos: button.rect.center(),
        };
        if let Some(command) = mapper.handle(press, &state) {
            input.push(command);
        }
    }
    tick(&mut state, &input);

    // One finger per half of the screen
    let bottom = PointerId(1);
    let top = PointerId(2);
    for (id, y) in [(bottom, 100.0), (top, state.settings.screen_height - 100.0)] {
        let x = state.settings.screen_width / 2.0;
        mapper.handle(PointerEvent::Down { id, pos: Vec2::new(x, y) }, &state);
    }

    let mut frame = 0;
    while !matches!(state.phase(), GamePhase::Won(_)) && frame < MAX_FRAMES {
        let mut input = TickInput::default();

        // Players react every few frames and only to a ball coming their way
        if frame % 4 == 0 {
            let ball = &state.ball;
            let finger = if ball.vel.y < 0.0 { bottom } else { top };
            let event = PointerEvent::Move {
                id: finger,
                pos: Vec2::new(ball.pos.x, 0.0),
            };
            input.commands.extend(mapper.handle(event, &state));
        }

        tick(&mut state, &input);
        frame += 1;
    }

    log::info!(
        "Finished after {} frames (seed {}): {} - {}",
        frame,
        state.seed,
        state.match_state.score1,
        state.match_state.score2
    );

    match Snapshot::capture(&state).to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
