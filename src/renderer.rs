use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GLYPH_CELL, GLYPH_FOOD, PALETTE};
use crate::grid::{Cell, Grid};
use crate::leaderboard::LeaderboardEntry;
use crate::session::{SessionPhase, Snapshot};
use crate::ui::hud::{render_hud, render_leaderboard};
use crate::ui::menu::{
    render_game_over_menu, render_pause_menu, render_ready_menu, render_speed_menu,
};

/// Terminal columns used per board cell.
const CELL_WIDTH: u16 = 2;

const LEADERBOARD_WIDTH: u16 = 28;

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, leaderboard: &[LeaderboardEntry]) {
    let board_width = snapshot.board_size * CELL_WIDTH + 2;
    let board_height = snapshot.board_size + 2;

    let [main_row, hud_row] =
        Layout::vertical([Constraint::Length(board_height), Constraint::Length(1)])
            .areas(frame.area());
    let [board_area, side_area] = Layout::horizontal([
        Constraint::Length(board_width),
        Constraint::Length(LEADERBOARD_WIDTH),
    ])
    .areas(main_row);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(PALETTE.border_fg))
        .style(Style::new().bg(PALETTE.board_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let grid = Grid::new(snapshot.board_size);
    render_food(frame, inner, grid, snapshot.food);
    render_snake(frame, inner, grid, &snapshot.snake);

    render_hud(frame, hud_row, snapshot);
    if snapshot.show_leaderboard {
        render_leaderboard(frame, side_area, leaderboard);
    }

    match snapshot.phase {
        SessionPhase::SelectSpeed => render_speed_menu(frame, board_area, snapshot.speed),
        SessionPhase::Ready => render_ready_menu(frame, board_area, snapshot.speed),
        SessionPhase::Paused => render_pause_menu(frame, board_area),
        SessionPhase::GameOver => render_game_over_menu(frame, board_area, snapshot),
        SessionPhase::Running => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, grid: Grid, food: Option<Cell>) {
    let Some((x, y)) = food.and_then(|cell| cell_to_terminal(inner, grid, cell)) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(PALETTE.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, grid: Grid, snake: &[Cell]) {
    let buffer = frame.buffer_mut();
    for (index, segment) in snake.iter().enumerate() {
        let Some((x, y)) = cell_to_terminal(inner, grid, *segment) else {
            continue;
        };

        let style = if index == 0 {
            Style::new()
                .fg(PALETTE.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(PALETTE.snake_body)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn cell_to_terminal(inner: Rect, grid: Grid, cell: Cell) -> Option<(u16, u16)> {
    if !grid.is_in_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x + CELL_WIDTH > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
