use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, error};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::leaderboard::LeaderboardEntry;
use crate::renderer;
use crate::session::Snapshot;

static PANIC_HOOK: Once = Once::new();

/// The screen a game is played on.
///
/// Entering puts the terminal in raw mode on the alternate screen and makes
/// sure a panic leaves it usable again. Dropping gives the screen back and
/// flushes the log file.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(chain_panic_hook);
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        let terminal = execute!(stdout, EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)));
        match terminal {
            Ok(terminal) => {
                debug!("terminal in raw mode");
                Ok(Self { terminal })
            }
            Err(error) => {
                leave_screen();
                Err(error)
            }
        }
    }

    /// Draws one frame of the game.
    pub fn draw(
        &mut self,
        snapshot: &Snapshot,
        leaderboard: &[LeaderboardEntry],
    ) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, snapshot, leaderboard))?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        leave_screen();
        debug!("terminal restored");
        log::logger().flush();
    }
}

fn chain_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        leave_screen();
        error!("panic: {info}");
        log::logger().flush();
        default_hook(info);
    }));
}

fn leave_screen() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
