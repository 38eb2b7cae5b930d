use glam::Vec2;
use shuffleboard::sim::{
    Command, GameEvent, GamePhase, GameState, PaddleSide, Player, TickInput, tick,
};
use shuffleboard::ui::Layout;
use shuffleboard::{InputMapper, PointerEvent, PointerId, Snapshot};

fn press(mapper: &mut InputMapper, state: &GameState, pos: Vec2) -> TickInput {
    let mut input = TickInput::default();
    input.commands.extend(mapper.handle(
        PointerEvent::Down {
            id: PointerId(99),
            pos,
        },
        state,
    ));
    mapper.handle(PointerEvent::Up { id: PointerId(99) }, state);
    input
}

/// Drop the ball just under the bottom paddle, well clear of it
fn drop_past_bottom(state: &mut GameState) {
    let paddle_x = state.paddle(PaddleSide::Bottom).x;
    let x = if paddle_x > state.settings.screen_width / 2.0 {
        30.0
    } else {
        state.settings.screen_width - 30.0
    };
    state.ball.pos = Vec2::new(x, 5.0);
    state.ball.vel = Vec2::new(0.0, -10.0);
}

#[test]
fn test_player_two_wins_to_three() {
    let mut state = GameState::new(2024);
    let mut mapper = InputMapper::new();
    let layout = Layout::new(&state.settings);

    // Menu: press "3"
    let three = layout.score_buttons[0].rect.center();
    let input = press(&mut mapper, &state, three);
    assert_eq!(input.commands, vec![Command::SelectTargetScore(3)]);
    tick(&mut state, &input);
    assert_eq!(state.phase(), GamePhase::Playing);

    let default_width = state.paddle(PaddleSide::Bottom).width;
    let top_width = state.paddle(PaddleSide::Top).width;

    for point in 1..=2u32 {
        drop_past_bottom(&mut state);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.match_state.score2, point);
        assert_eq!(state.match_state.score1, 0);
        let expected = (default_width + 30.0 * point as f32).min(state.settings.max_paddle_width());
        assert_eq!(state.paddle(PaddleSide::Bottom).width, expected);
        assert_eq!(state.paddle(PaddleSide::Top).width, top_width);
        assert!(state.obstacles.len() <= 5);
        // Re-served from the centre
        assert!((state.ball.speed() - 12.0).abs() < 0.001);
    }

    drop_past_bottom(&mut state);
    tick(&mut state, &TickInput::default());

    assert_eq!(state.phase(), GamePhase::Won(Player::Two));
    assert_eq!(state.match_state.score2, 3);
    assert_eq!(state.ball.vel, Vec2::ZERO);
    assert!(!state.ball.dynamic);
    assert!(state.events.contains(&GameEvent::MatchWon {
        winner: Player::Two
    }));

    let snap = Snapshot::capture(&state);
    assert_eq!(snap.winner_text.as_deref(), Some("BLUE WINS!"));

    // "PLAY AGAIN" goes back to the menu with fresh scores
    let input = press(&mut mapper, &state, layout.play_again.rect.center());
    tick(&mut state, &input);
    assert_eq!(state.phase(), GamePhase::Menu);
    assert_eq!((state.match_state.score1, state.match_state.score2), (0, 0));

    // A new match starts clean
    let five = layout.score_buttons[1].rect.center();
    let input = press(&mut mapper, &state, five);
    tick(&mut state, &input);
    assert_eq!(state.phase(), GamePhase::Playing);
    assert_eq!(state.match_state.target.get(), 5);
    assert!(state.obstacles.is_empty());
    assert_eq!(state.paddle(PaddleSide::Bottom).width, default_width);
}

#[test]
fn test_drag_and_pause_through_mapper() {
    let mut state = GameState::new(77);
    let mut mapper = InputMapper::new();
    let layout = Layout::new(&state.settings);

    let input = press(&mut mapper, &state, layout.score_buttons[2].rect.center());
    tick(&mut state, &input);
    assert_eq!(state.match_state.target.get(), 10);

    // Two fingers on the bottom half race for the same paddle
    let a = PointerId(1);
    let b = PointerId(2);
    for id in [a, b] {
        mapper.handle(
            PointerEvent::Down {
                id,
                pos: Vec2::new(200.0, 120.0),
            },
            &state,
        );
    }
    let mut input = TickInput::default();
    input.commands.extend(mapper.handle(
        PointerEvent::Move {
            id: a,
            pos: Vec2::new(0.0, 120.0),
        },
        &state,
    ));
    input.commands.extend(mapper.handle(
        PointerEvent::Move {
            id: b,
            pos: Vec2::new(1000.0, 120.0),
        },
        &state,
    ));
    tick(&mut state, &input);

    let paddle = state.paddle(PaddleSide::Bottom);
    assert!((paddle.x - (state.settings.screen_width - paddle.width / 2.0)).abs() < 0.001);

    // Pause freezes, resume restores
    let input = press(&mut mapper, &state, layout.pause.rect.center());
    tick(&mut state, &input);
    assert_eq!(state.phase(), GamePhase::Paused);
    assert!(state.events.contains(&GameEvent::Paused));
    let snap = Snapshot::capture(&state);
    assert!(snap.pause_overlay_visible);
    assert_eq!(snap.pause_text.as_deref(), Some("PAUSED"));

    let input = press(&mut mapper, &state, layout.pause.rect.center());
    tick(&mut state, &input);
    assert!(state.events.contains(&GameEvent::Resumed));
    assert!(state.ball.dynamic);
}

#[test]
fn test_long_match_always_finishes_or_keeps_invariants() {
    let mut state = GameState::new(31337);
    shuffleboard::sim::start_match(&mut state, 10).unwrap();

    for _ in 0..20_000 {
        tick(&mut state, &TickInput::default());
        if matches!(state.phase(), GamePhase::Won(_)) {
            break;
        }
        let speed = state.ball.speed();
        assert!((5.0 - 1e-3..=10_000.0 + 1e-3).contains(&speed));
        assert!(state.obstacles.len() <= 5);
        for paddle in &state.paddles {
            assert!(paddle.width <= state.settings.max_paddle_width() + 1e-3);
        }
    }
}
