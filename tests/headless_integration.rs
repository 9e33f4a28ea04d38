use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glide::game::Game;
use glide::input::InputId;
use glide::physics::{Bounds, Vec2, MAX_SPEED, MOTION_PERIOD};
use glide::runtime::{FixedTicker, GameEvent, Runner, TestEventSource};
use glide::session::SessionConfig;

fn game() -> Game {
    Game::new(SessionConfig {
        bounds: Bounds::new(800.0, 600.0),
        key_hold: None,
    })
}

// Headless flow: events come through Runner/TestEventSource and every Tick
// advances the game by one motion period of virtual time.
fn drive(game: &mut Game, runner: &Runner<TestEventSource, FixedTicker>, ticks: u32) {
    let mut seen = 0;
    while seen < ticks {
        match runner.step() {
            GameEvent::Tick => {
                game.advance(MOTION_PERIOD);
                seen += 1;
            }
            GameEvent::Key(key) => {
                if let Some(id) = InputId::from_key_code(key.code) {
                    match key.kind {
                        KeyEventKind::Release => game.on_key_up(id),
                        _ => game.on_key_down(id),
                    }
                }
            }
            GameEvent::Mouse(_) | GameEvent::Resize => {}
        }
    }
}

#[test]
fn headless_session_moves_right_and_records_trail() {
    let mut game = game();
    game.start();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    tx.send(GameEvent::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)))
        .unwrap();
    drive(&mut game, &runner, 30);

    // 30 periodic ticks plus the immediate step on the fresh press
    assert_eq!(game.session_state.trail.len(), 31);
    assert!(game.position().x > 400.0);
    assert_eq!(game.position().y, 300.0);
    assert!(game.velocity().x > 0.0 && game.velocity().x <= MAX_SPEED);
    assert!(game.session_state.timer_started());

    tx.send(GameEvent::Key(KeyEvent::new_with_kind(
        KeyCode::Right,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    )))
    .unwrap();
    let before = game.velocity().x;
    drive(&mut game, &runner, 10);
    assert!(game.velocity().x < before);
}

#[test]
fn headless_timer_runs_one_second_per_fifty_ticks() {
    let mut game = game();
    game.start();
    game.on_key_down(InputId::S);

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    drive(&mut game, &runner, 150);

    assert_eq!(game.elapsed_secs(), 3);
}

#[test]
fn headless_reset_then_restart() {
    let mut game = game();
    game.start();
    game.on_touch_start(Vec2::new(0.0, 0.0));
    game.advance(Duration::from_millis(1500));
    assert!(game.position().x < 400.0);
    assert_eq!(game.elapsed_secs(), 1);

    game.reset();
    assert_eq!(game.position(), Vec2::new(400.0, 300.0));
    assert!(game.session_state.trail.is_empty());

    assert!(game.start());
    game.advance(Duration::from_millis(1500));
    assert_eq!(game.session_state.trail.len(), 75);
    assert_eq!(game.elapsed_secs(), 0);
    assert_eq!(game.position(), Vec2::new(400.0, 300.0));
}
