use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::direction::{Direction, DirectionController};
use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Why a game stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEnding {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell; treated as a win.
    BoardFilled,
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Moved,
    Ate { score: u32 },
    Ended(GameEnding),
}

/// Mutable board state for one game: snake, food, heading and score.
#[derive(Debug, Clone)]
pub struct Game {
    pub snake: Snake,
    pub food: Option<Food>,
    pub score: u32,
    pub tick_count: u64,
    controller: DirectionController,
    grid: Grid,
    rng: StdRng,
}

impl Game {
    /// Creates a game seeded from OS entropy.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            snake: Snake::new(config.initial_head),
            food: Some(Food::new(config.initial_food)),
            score: 0,
            tick_count: 0,
            controller: DirectionController::new(config.initial_direction),
            grid: config.grid(),
            rng,
        }
    }

    /// Buffers a heading change for the next tick. Reversals are ignored.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.controller.request(direction)
    }

    /// Advances the simulation by one step.
    ///
    /// A terminal step leaves snake and food untouched.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_count += 1;

        let direction = self.controller.commit();
        let new_head = self.snake.head().step(direction);

        if !self.grid.is_in_bounds(new_head) {
            return TickOutcome::Ended(GameEnding::WallCollision);
        }

        let grow = self.food.is_some_and(|food| food.position == new_head);
        if self.snake.collides_with_self(new_head, grow) {
            return TickOutcome::Ended(GameEnding::SelfCollision);
        }

        self.snake.advance(new_head, grow);
        if !grow {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.food = Food::spawn(&mut self.rng, self.grid, &self.snake.occupancy());
        if self.food.is_none() {
            return TickOutcome::Ended(GameEnding::BoardFilled);
        }

        TickOutcome::Ate { score: self.score }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.controller.current()
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn food_cell(&self) -> Option<Cell> {
        self.food.map(|food| food.position)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::direction::Direction;
    use crate::food::Food;
    use crate::grid::Cell;
    use crate::snake::Snake;

    use super::{Game, GameEnding, TickOutcome};

    fn game_at(head: Cell, direction: Direction, board_size: u16) -> Game {
        let config = GameConfig {
            board_size,
            initial_head: head,
            initial_food: Cell::new(0, 0),
            initial_direction: direction,
        };
        Game::new_with_seed(&config, 1)
    }

    #[test]
    fn first_tick_moves_right_from_classic_start() {
        let mut game = Game::new_with_seed(&GameConfig::default(), 5);

        assert_eq!(game.tick(), TickOutcome::Moved);

        assert_eq!(game.snake.segments().copied().collect::<Vec<_>>(), vec![Cell::new(7, 8)]);
        assert_eq!(game.score, 0);
        assert_eq!(game.food_cell(), Some(Cell::new(5, 5)));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut game = game_at(Cell::new(1, 1), Direction::Right, 10);
        game.food = Some(Food::new(Cell::new(1, 3)));

        game.tick();
        assert_eq!(game.snake.len(), 1);

        assert_eq!(game.tick(), TickOutcome::Ate { score: 1 });
        assert_eq!(game.snake.len(), 2);

        let food = game.food_cell().expect("board has free cells");
        assert!(!game.snake.occupies(food));
    }

    #[test]
    fn wall_collision_leaves_board_untouched() {
        for (head, direction) in [
            (Cell::new(0, 2), Direction::Up),
            (Cell::new(3, 2), Direction::Down),
            (Cell::new(2, 0), Direction::Left),
            (Cell::new(2, 3), Direction::Right),
        ] {
            let mut game = game_at(head, direction, 4);
            let snake_before = game.snake.clone();
            let food_before = game.food;

            assert_eq!(game.tick(), TickOutcome::Ended(GameEnding::WallCollision));
            assert_eq!(game.snake, snake_before);
            assert_eq!(game.food, food_before);
        }
    }

    #[test]
    fn self_collision_leaves_snake_untouched() {
        let mut game = game_at(Cell::new(2, 2), Direction::Down, 6);
        game.snake = Snake::from_segments(vec![
            Cell::new(2, 2),
            Cell::new(2, 1),
            Cell::new(3, 1),
            Cell::new(3, 2),
            Cell::new(3, 3),
        ])
        .expect("segments are non-empty");
        let snake_before = game.snake.clone();

        assert_eq!(game.tick(), TickOutcome::Ended(GameEnding::SelfCollision));
        assert_eq!(game.snake, snake_before);
    }

    #[test]
    fn chasing_the_vacating_tail_is_legal() {
        let mut game = game_at(Cell::new(2, 2), Direction::Right, 6);
        game.food = Some(Food::new(Cell::new(5, 5)));
        game.snake = Snake::from_segments(vec![
            Cell::new(2, 2),
            Cell::new(3, 2),
            Cell::new(3, 3),
            Cell::new(2, 3),
        ])
        .expect("segments are non-empty");

        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.snake.head(), Cell::new(2, 3));
        assert_eq!(game.snake.len(), 4);
    }

    #[test]
    fn reversal_request_keeps_heading() {
        let mut game = Game::new_with_seed(&GameConfig::default(), 9);

        assert!(!game.request_direction(Direction::Left));
        game.tick();

        assert_eq!(game.direction(), Direction::Right);
        assert_eq!(game.snake.head(), Cell::new(7, 8));
    }

    #[test]
    fn perpendicular_request_turns_on_next_tick() {
        let mut game = Game::new_with_seed(&GameConfig::default(), 9);

        assert!(game.request_direction(Direction::Down));
        game.tick();

        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.snake.head(), Cell::new(8, 7));
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut game = game_at(Cell::new(0, 0), Direction::Right, 2);
        game.snake = Snake::from_segments(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)])
            .expect("segments are non-empty");
        game.food = Some(Food::new(Cell::new(0, 1)));

        assert_eq!(game.tick(), TickOutcome::Ended(GameEnding::BoardFilled));
        assert_eq!(game.score, 1);
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.food, None);
    }
}
