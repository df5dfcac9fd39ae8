use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::{PALETTE, SpeedSetting};
use crate::game::GameEnding;
use crate::session::Snapshot;

/// Draws the speed picker shown before each game.
pub fn render_speed_menu(frame: &mut Frame<'_>, area: Rect, selected: SpeedSetting) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::styled(
            "CHOOSE YOUR SPEED",
            Style::new()
                .fg(PALETTE.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    for (index, speed) in SpeedSetting::ALL.iter().enumerate() {
        let style = if *speed == selected {
            Style::new().fg(PALETTE.highlight)
        } else {
            Style::new().fg(PALETTE.hud_value)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("[{}] ", index + 1)),
            Span::styled(speed.label(), style),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        popup,
    );
}

/// Draws the confirmation prompt once a speed is chosen.
pub fn render_ready_menu(frame: &mut Frame<'_>, area: Rect, speed: SpeedSetting) {
    let popup = centered_popup(area, 80, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(format!("Speed: {speed}")),
        Line::from(""),
        Line::from("[Enter] Start"),
        Line::from("[1-3] Change speed"),
        Line::styled("Arrows/WASD/hjkl to move", Style::new().fg(PALETTE.hud_muted)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" ready ")),
        popup,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let is_new_high = snapshot.score > 0 && snapshot.score == snapshot.high_score;
    let title = if snapshot.ending == Some(GameEnding::BoardFilled) {
        "YOU WIN"
    } else {
        "GAME OVER"
    };
    let lines = vec![
        Line::styled(title, Style::new().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(format!("Final score: {}", snapshot.score)),
        Line::from(ending_text(snapshot.ending)),
        Line::styled(
            if is_new_high { "New high score!" } else { "" },
            Style::new().fg(PALETTE.highlight),
        ),
        Line::from(""),
        Line::from("[Enter]/[R] New game"),
        Line::from("[Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn ending_text(ending: Option<GameEnding>) -> &'static str {
    match ending {
        Some(GameEnding::WallCollision) => "Cause: hit wall",
        Some(GameEnding::SelfCollision) => "Cause: hit yourself",
        Some(GameEnding::BoardFilled) => "The board is full",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
