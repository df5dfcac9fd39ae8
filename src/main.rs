use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{
    DEFAULT_PLAYER_NAME, FRAME_INTERVAL_MS, GameConfig, LEADERBOARD_SIZE, SpeedSetting,
};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::leaderboard::{JsonScoreBoard, LeaderboardClient, validate_player};
use grid_snake::score::{HighScoreStore, JsonHighScoreStore, default_data_dir};
use grid_snake::session::{Session, SessionEvent, SessionPhase};
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::logging;
use log::{debug, error, info, warn};

const LOG_FILE_NAME: &str = "grid-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Name recorded on the leaderboard.
    #[arg(long, default_value = DEFAULT_PLAYER_NAME)]
    player: String,

    /// Speed highlighted on the start screen.
    #[arg(long, value_enum, default_value_t = SpeedSetting::Medium)]
    speed: SpeedSetting,

    /// Directory for the high score and leaderboard files.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Log file path. Defaults to a file inside the data directory.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Play without reading or submitting leaderboard scores.
    #[arg(long = "no-leaderboard")]
    no_leaderboard: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));

    if let Err(error) = logging::init(&log_path) {
        eprintln!("Logging disabled ({}): {error}", log_path.display());
    }

    let player = match validate_player(&cli.player) {
        Ok(name) => name.to_owned(),
        Err(error) => {
            warn!("{error}; playing as {DEFAULT_PLAYER_NAME}");
            DEFAULT_PLAYER_NAME.to_owned()
        }
    };

    let high_scores = JsonHighScoreStore::in_dir(&data_dir);
    let mut session =
        Session::new(GameConfig::default(), high_scores, player).with_speed(cli.speed);
    if let Some(seed) = cli.seed {
        session = session.with_seed(seed);
    }

    let mut leaderboard = if cli.no_leaderboard {
        None
    } else {
        let board = JsonScoreBoard::in_dir(&data_dir);
        match LeaderboardClient::spawn(Box::new(board), LEADERBOARD_SIZE) {
            Ok(client) => Some(client),
            Err(error) => {
                error!("leaderboard unavailable: {error}");
                None
            }
        }
    };

    info!("starting in {}", data_dir.display());
    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, &mut session, leaderboard.as_mut())?;
    drop(terminal);

    info!("exiting with high score {}", session.high_score());
    Ok(())
}

fn run<S: HighScoreStore>(
    terminal: &mut TerminalSession,
    session: &mut Session<S>,
    mut leaderboard: Option<&mut LeaderboardClient>,
) -> io::Result<()> {
    let mut input = InputHandler::new(Duration::ZERO);

    loop {
        if let Some(client) = leaderboard.as_deref_mut() {
            client.poll();
        }

        let snapshot = session.snapshot();
        let entries = leaderboard
            .as_deref()
            .map(LeaderboardClient::entries)
            .unwrap_or_default();
        terminal.draw(&snapshot, entries)?;

        let now = Instant::now();
        if let Some(game_input) = input.poll_input()? {
            if game_input == GameInput::Quit {
                break;
            }
            handle_input(session, game_input, now);
        }

        session.update(Instant::now());

        for event in session.drain_events() {
            match event {
                SessionEvent::GameOver { submission, .. } => {
                    if let Some(client) = leaderboard.as_deref() {
                        client.submit(submission);
                    }
                }
                other => debug!("{other:?}"),
            }
        }

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    Ok(())
}

fn handle_input<S: HighScoreStore>(session: &mut Session<S>, input: GameInput, now: Instant) {
    match input {
        GameInput::Confirm if session.phase() == SessionPhase::GameOver => session.reset(now),
        GameInput::Confirm if session.phase() == SessionPhase::SelectSpeed => {
            let speed = session.speed();
            session.select_speed(speed, now);
        }
        other => session.handle_input(other, now),
    }
}
