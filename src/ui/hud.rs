use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::PALETTE;
use crate::leaderboard::LeaderboardEntry;
use crate::session::Snapshot;

const SEPARATOR: &str = " │ ";

/// Draws the single status line under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    frame.render_widget(
        Paragraph::new(status_line(snapshot)).alignment(Alignment::Left),
        area,
    );
}

fn status_line(snapshot: &Snapshot) -> Line<'static> {
    let value = Style::new().fg(PALETTE.hud_value);
    let muted = Style::new().fg(PALETTE.hud_muted);
    let high_style = if snapshot.score > 0 && snapshot.score >= snapshot.high_score {
        Style::new()
            .fg(PALETTE.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled("Score: ", muted),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled(SEPARATOR, muted),
        Span::styled("Hi: ", muted),
        Span::styled(snapshot.high_score.max(snapshot.score).to_string(), high_style),
        Span::styled(SEPARATOR, muted),
        Span::styled("Speed: ", muted),
        Span::styled(snapshot.speed.label(), value),
        Span::styled(SEPARATOR, muted),
        Span::styled(snapshot.player.clone(), muted),
        Span::styled(SEPARATOR, muted),
        Span::styled(leaderboard_hint(snapshot.show_leaderboard), muted),
    ])
}

fn leaderboard_hint(shown: bool) -> &'static str {
    if shown { "[b] top ▲" } else { "[b] top ▼" }
}

/// Draws the ranked leaderboard panel next to the board.
pub fn render_leaderboard(frame: &mut Frame<'_>, area: Rect, entries: &[LeaderboardEntry]) {
    let name_width = usize::from(area.width.saturating_sub(12));
    let lines: Vec<Line<'_>> = if entries.is_empty() {
        vec![Line::styled("no scores yet", Style::new().fg(PALETTE.hud_muted))]
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| leaderboard_line(index + 1, entry, name_width))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" leaderboard ")),
        area,
    );
}

fn leaderboard_line(rank: usize, entry: &LeaderboardEntry, name_width: usize) -> Line<'static> {
    let name = truncate_to_width(&entry.player, name_width);
    let padding = name_width.saturating_sub(name.width());

    Line::from(vec![
        Span::styled(format!("{rank:>2}. "), Style::new().fg(PALETTE.hud_muted)),
        Span::raw(format!("{name}{}", " ".repeat(padding))),
        Span::styled(
            format!(" {:>4}", entry.score),
            Style::new().fg(PALETTE.highlight),
        ),
    ])
}

/// Cuts `text` to at most `max_width` terminal columns.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut truncated = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated
}
