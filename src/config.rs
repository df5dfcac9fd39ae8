use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;

use crate::direction::Direction;
use crate::grid::{Cell, Grid};

/// Side length of the square board.
pub const BOARD_SIZE: u16 = 15;

/// Starting head cell for every new game.
pub const INITIAL_SNAKE_HEAD: Cell = Cell::new(7, 7);

/// Starting food cell for every new game.
pub const INITIAL_FOOD: Cell = Cell::new(5, 5);

/// Heading committed before the first tick.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Number of leaderboard rows requested from the score store.
pub const LEADERBOARD_SIZE: usize = 10;

/// Name used when the player does not supply one.
pub const DEFAULT_PLAYER_NAME: &str = "Guest";

/// Directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "grid-snake";

/// Host loop sleep between input polls.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Tick-period presets offered on the start screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, ValueEnum)]
pub enum SpeedSetting {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedSetting {
    /// All presets in menu order.
    pub const ALL: [Self; 3] = [Self::Slow, Self::Medium, Self::Fast];

    /// Milliseconds between simulation ticks.
    #[must_use]
    pub fn tick_period_ms(self) -> u64 {
        match self {
            Self::Slow => 200,
            Self::Medium => 130,
            Self::Fast => 80,
        }
    }

    #[must_use]
    pub fn tick_period(self) -> Duration {
        Duration::from_millis(self.tick_period_ms())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "SLOW",
            Self::Medium => "MEDIUM",
            Self::Fast => "FAST",
        }
    }
}

impl fmt::Display for SpeedSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Starting layout of a game. Every reset rebuilds the game from this.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    pub board_size: u16,
    pub initial_head: Cell,
    pub initial_food: Cell,
    pub initial_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            initial_head: INITIAL_SNAKE_HEAD,
            initial_food: INITIAL_FOOD,
            initial_direction: INITIAL_DIRECTION,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.board_size)
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Palette {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub board_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_muted: Color,
    pub highlight: Color,
    pub menu_title: Color,
}

pub const PALETTE: Palette = Palette {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    board_bg: Color::Black,
    border_fg: Color::White,
    hud_value: Color::White,
    hud_muted: Color::DarkGray,
    highlight: Color::Yellow,
    menu_title: Color::Green,
};

/// Glyph pair drawn for one board cell; two columns keep cells square.
pub const GLYPH_CELL: &str = "██";

/// Glyph pair drawn for food.
pub const GLYPH_FOOD: &str = "()";
