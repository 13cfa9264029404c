//! Integration tests for the game engine: lifecycle, commands, scoring and
//! game over, driven only through the public API.

use std::time::{Duration, Instant};

use blockfall::core::{Engine, SequenceSource};
use blockfall::types::{Command, GameStatus, LockEvent, ShapeKind, SPAWN_X, SPAWN_Y};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn playing(kind: ShapeKind) -> Engine<SequenceSource> {
    init_logger();
    let mut engine = Engine::with_source(SequenceSource::repeat(kind));
    assert!(engine.start());
    engine
}

/// Shift the active piece horizontally by `dx` columns.
fn shift(engine: &mut Engine<SequenceSource>, dx: i8) {
    for _ in 0..dx.unsigned_abs() {
        let moved = if dx < 0 {
            engine.move_left()
        } else {
            engine.move_right()
        };
        assert!(moved);
    }
}

#[test]
fn test_game_lifecycle() {
    init_logger();
    let mut engine = Engine::with_seed(12345);
    assert_eq!(engine.status(), GameStatus::Ready);
    assert!(engine.active().is_some());

    assert!(engine.start());
    assert_eq!(engine.status(), GameStatus::Playing);
    // Already playing.
    assert!(!engine.start());

    assert!(engine.pause());
    assert_eq!(engine.status(), GameStatus::Paused);
    assert!(engine.resume());
    assert_eq!(engine.status(), GameStatus::Playing);

    assert!(engine.reset());
    assert_eq!(engine.status(), GameStatus::Ready);
}

#[test]
fn test_pause_twice_same_as_once() {
    let mut engine = playing(ShapeKind::T);

    assert!(engine.pause());
    let once = engine.snapshot();
    assert!(!engine.pause());
    assert_eq!(engine.snapshot(), once);
    assert_eq!(engine.status(), GameStatus::Paused);

    // Nothing moves while paused.
    assert!(!engine.move_left());
    assert!(!engine.hard_drop());
    assert_eq!(engine.snapshot(), once);
}

#[test]
fn test_move_left_against_wall_is_stable() {
    let mut engine = playing(ShapeKind::O);

    // O spawns at column 4, so four moves reach the wall.
    for _ in 0..4 {
        assert!(engine.move_left());
    }
    let at_wall = engine.active();
    for _ in 0..10 {
        assert!(!engine.move_left());
        assert_eq!(engine.active(), at_wall);
    }
    assert_eq!(at_wall.unwrap().x(), 0);
}

#[test]
fn test_move_down_then_lock() {
    let mut engine = playing(ShapeKind::O);
    assert_eq!(engine.active().unwrap().position(), (SPAWN_X, SPAWN_Y));

    // O occupies rows y and y+1; the floor is row 23.
    for y in SPAWN_Y..22 {
        assert_eq!(engine.active().unwrap().y(), y);
        assert!(engine.move_down());
    }
    assert_eq!(engine.active().unwrap().y(), 22);
    assert!(engine.take_last_lock().is_none());

    // Blocked: locks and spawns the next piece.
    assert!(engine.move_down());
    assert_eq!(engine.active().unwrap().position(), (SPAWN_X, SPAWN_Y));
    assert_eq!(
        engine.take_last_lock(),
        Some(LockEvent {
            lines_cleared: 0,
            points: 0,
            game_over: false
        })
    );
    assert!(engine.board().is_occupied(4, 23));
    assert!(engine.board().is_occupied(5, 22));
}

#[test]
fn test_o_pieces_clear_two_lines() {
    let mut engine = playing(ShapeKind::O);

    for (i, dx) in [-4, -2, 0, 2, 4].into_iter().enumerate() {
        assert_eq!(engine.score(), 0, "no clear before drop {}", i);
        shift(&mut engine, dx);
        assert!(engine.hard_drop());
    }

    assert_eq!(engine.score(), 100);
    assert_eq!(engine.lines_cleared(), 2);
    assert_eq!(engine.level(), 1);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
    assert_eq!(engine.last_lock().unwrap().lines_cleared, 2);
}

#[test]
fn test_vertical_i_pieces_clear_four_lines() {
    let mut engine = playing(ShapeKind::I);

    for column in 0..10i8 {
        assert!(engine.rotate_clockwise());
        // Vertical I sits in the third column of its matrix.
        shift(&mut engine, column - (SPAWN_X + 2));
        assert!(engine.hard_drop());
        if column < 9 {
            assert_eq!(engine.lines_cleared(), 0);
        }
    }

    assert_eq!(engine.lines_cleared(), 4);
    assert_eq!(engine.score(), 1200);
    assert_eq!(engine.status(), GameStatus::Playing);
}

#[test]
fn test_zero_line_lock_scores_nothing() {
    let mut engine = playing(ShapeKind::S);
    assert!(engine.hard_drop());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.last_lock().unwrap().points, 0);
}

#[test]
fn test_stacking_i_pieces_until_overflow() {
    let mut engine = playing(ShapeKind::I);

    // Each vertical I fills four rows of column 6, bottom up.
    for drop in 1..=4 {
        assert!(engine.rotate_clockwise());
        assert!(engine.hard_drop());
        assert_eq!(engine.status(), GameStatus::Playing, "drop {}", drop);
        assert!(!engine.board().is_game_over());
    }

    // The fifth one reaches the spawn row, so the next spawn is blocked.
    assert!(engine.rotate_clockwise());
    assert!(engine.hard_drop());

    assert_eq!(engine.status(), GameStatus::GameOver);
    assert!(engine.active().is_none());
    assert!(engine.last_lock().unwrap().game_over);
    // Hidden rows were never reached.
    assert!(!engine.board().is_game_over());
    for y in SPAWN_Y..24 {
        assert!(engine.board().is_occupied(SPAWN_X + 2, y));
    }

    // Game over ignores movement, start begins a fresh game.
    assert!(!engine.move_left());
    assert!(!engine.toggle_pause());
    assert!(engine.start());
    assert_eq!(engine.status(), GameStatus::Playing);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_timed_fall_reaches_floor_and_locks() {
    let mut engine = playing(ShapeKind::T);
    let t0 = Instant::now();

    assert!(!engine.advance(t0));
    // T spans rows y and y+1; 18 falls reach the floor, the 19th locks.
    for step in 1..=19u64 {
        assert!(engine.advance(t0 + Duration::from_secs(step)));
    }

    assert!(engine.board().is_occupied(SPAWN_X + 1, 22));
    assert_eq!(engine.active().unwrap().position(), (SPAWN_X, SPAWN_Y));
    assert!(engine.last_lock().is_some());
}

#[test]
fn test_fine_ticks_accumulate() {
    let mut engine = playing(ShapeKind::J);
    let t0 = Instant::now();
    let y0 = engine.active().unwrap().y();

    engine.advance(t0);
    let mut falls = 0;
    for ms in (16..=3000).step_by(16) {
        if engine.advance(t0 + Duration::from_millis(ms)) {
            falls += 1;
        }
    }

    // Falls at 1008ms and 2016ms; the next would need 3024ms.
    assert_eq!(falls, 2);
    assert_eq!(engine.active().unwrap().y(), y0 + 2);
}

#[test]
fn test_commands_by_name() {
    let mut engine = Engine::with_source(SequenceSource::repeat(ShapeKind::O));

    for name in ["start", "moveLeft", "moveLeft", "rotateClockwise", "hardDrop"] {
        let command: Command = name.parse().unwrap();
        engine.apply(command);
    }
    assert!(engine.board().is_occupied(2, 23));
    assert!(engine.board().is_occupied(3, 22));

    assert!(engine.apply(Command::TogglePause));
    assert_eq!(engine.status(), GameStatus::Paused);
    assert!(!engine.apply(Command::MoveDown));
    assert!(engine.apply(Command::Start));
    assert_eq!(engine.status(), GameStatus::Playing);
    assert!(engine.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Engine::with_seed(42);
    let mut b = Engine::with_seed(42);
    a.start();
    b.start();

    for command in [
        Command::MoveLeft,
        Command::HardDrop,
        Command::RotateClockwise,
        Command::MoveRight,
        Command::HardDrop,
        Command::HardDrop,
    ] {
        assert_eq!(a.apply(command), b.apply(command));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
