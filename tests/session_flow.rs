use std::time::Instant;

use grid_snake::config::{GameConfig, SpeedSetting};
use grid_snake::direction::Direction;
use grid_snake::food::Food;
use grid_snake::game::{Game, GameEnding, TickOutcome};
use grid_snake::grid::Cell;
use grid_snake::input::GameInput;
use grid_snake::score::MemoryHighScoreStore;
use grid_snake::session::{Session, SessionEvent, SessionPhase};

#[test]
fn growth_law_holds_for_consecutive_meals() {
    let config = GameConfig {
        initial_head: Cell::new(7, 0),
        ..GameConfig::default()
    };
    let mut game = Game::new_with_seed(&config, 42);

    for eaten in 1..=6u32 {
        game.food = Some(Food::new(game.snake.head().step(Direction::Right)));

        assert_eq!(game.tick(), TickOutcome::Ate { score: eaten });
        assert_eq!(game.score, eaten);
        assert_eq!(game.snake.len(), eaten as usize + 1);

        let food = game.food_cell().expect("board has free cells");
        assert!(!game.snake.occupies(food));
    }
}

/// Heading that walks a closed tour of an even-sized board: across row 0,
/// serpentine through columns 1.. on the remaining rows, back up column 0.
fn tour_heading(cell: Cell, size: i32) -> Direction {
    let last = size - 1;
    match (cell.row, cell.col) {
        (0, 0) => Direction::Right,
        (_, 0) => Direction::Up,
        (0, col) if col < last => Direction::Right,
        (0, _) => Direction::Down,
        (row, 1) if row % 2 == 1 && row == last => Direction::Left,
        (row, 1) if row % 2 == 1 => Direction::Down,
        (row, _) if row % 2 == 1 => Direction::Left,
        (_, col) if col < last => Direction::Right,
        _ => Direction::Down,
    }
}

#[test]
fn food_never_lands_on_the_snake_until_the_board_fills() {
    let size = 6;
    let config = GameConfig {
        board_size: size,
        initial_head: Cell::new(0, 0),
        initial_food: Cell::new(3, 2),
        ..GameConfig::default()
    };
    let mut game = Game::new_with_seed(&config, 7);
    let mut meals = 0;
    let mut ending = None;

    for _ in 0..5_000 {
        game.request_direction(tour_heading(game.snake.head(), i32::from(size)));

        match game.tick() {
            TickOutcome::Moved => {}
            TickOutcome::Ate { score } => {
                meals += 1;
                assert_eq!(score, meals);
            }
            TickOutcome::Ended(end) => {
                ending = Some(end);
                break;
            }
        }

        let food = game.food_cell().expect("food exists until the board fills");
        assert!(!game.snake.occupies(food), "food spawned on the snake at {food:?}");
    }

    let cells = u32::from(size) * u32::from(size);
    assert_eq!(ending, Some(GameEnding::BoardFilled));
    assert_eq!(game.score, cells - 1);
    assert_eq!(game.snake.len(), cells as usize);
    assert_eq!(game.food_cell(), None);
}

#[test]
fn scripted_session_from_start_to_restart() {
    let start = Instant::now();
    let period = SpeedSetting::Slow.tick_period();
    let mut session = Session::new(
        GameConfig::default(),
        MemoryHighScoreStore::with_value(0),
        "ann",
    )
    .with_seed(3);

    // Input before play is ignored.
    session.handle_input(GameInput::Direction(Direction::Down), start);
    session.handle_input(GameInput::Pause, start);
    assert_eq!(session.phase(), SessionPhase::SelectSpeed);

    session.handle_input(GameInput::SelectSpeed(SpeedSetting::Slow), start);
    session.handle_input(GameInput::Confirm, start);
    assert_eq!(session.phase(), SessionPhase::Running);

    // Reversal is rejected, the snake keeps heading right.
    session.handle_input(GameInput::Direction(Direction::Left), start);
    let mut now = start + period;
    assert_eq!(session.update(now), Some(TickOutcome::Moved));
    assert_eq!(session.snapshot().snake, vec![Cell::new(7, 8)]);

    // Turn down and run into the bottom wall.
    session.handle_input(GameInput::Direction(Direction::Down), now);
    let mut ended = None;
    for _ in 0..20 {
        now += period;
        if let Some(TickOutcome::Ended(ending)) = session.update(now) {
            ended = Some(ending);
            break;
        }
    }
    assert_eq!(ended, Some(GameEnding::WallCollision));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::GameOver);
    assert_eq!(snapshot.snake, vec![Cell::new(14, 8)]);

    let submissions: Vec<_> = session
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            SessionEvent::GameOver { submission, .. } => Some(submission),
            _ => None,
        })
        .collect();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].player, "ann");

    session.handle_input(GameInput::Reset, now);
    assert_eq!(session.phase(), SessionPhase::SelectSpeed);
    assert_eq!(session.snapshot().snake, vec![Cell::new(7, 7)]);
    assert!(!session.scheduler().is_active());
}
