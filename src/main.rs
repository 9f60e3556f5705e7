//! Word chain - each word must start with the symbol the previous one ended on.
//!
//! Play against the computer in the terminal, or use the dictionary tools.

mod app;
mod cli;
mod config;
mod error;
mod game;
mod logging;
mod tui;

use app::{AppCoordinator, Screen};
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use error::{Error, Result};
use game::foresight::dead_end_words;
use game::{Dictionary, RuleConfiguration};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tui::Tui;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.rules.apply(AppConfig::load(cli.config.as_deref())?);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let log_path = match cli.log_file {
                Some(path) => path,
                None => logging::default_log_path()?,
            };
            logging::init_file(&log_path)?;
            info!(rules = ?config.rules, "wordchain starting");
            run_tui(AppCoordinator::new(config, cli.db_dir))
        }
        Command::BuildDb { raw, prefix, out } => {
            logging::init_stderr()?;
            let text = std::fs::read_to_string(&raw).map_err(|e| Error::file("read", &raw, e))?;
            let (plain, digit_edged) = game::dictionary::export_partitions(&text, &prefix, &out)?;
            println!(
                "{}: {} words without digit edges, {} with, written to {}",
                prefix,
                plain,
                digit_edged,
                out.display()
            );
            Ok(())
        }
        Command::Search { keyword, suffix } => {
            logging::init_stderr()?;
            let everything = RuleConfiguration {
                include_platformer: true,
                allow_digit_edged_words: true,
                ..config.rules
            };
            let dictionary = load_dictionary(cli.db_dir.as_deref(), &everything)?;
            let mode = if suffix {
                game::SearchMode::Suffix
            } else {
                game::SearchMode::Prefix
            };
            for word in dictionary.search(&keyword, mode) {
                println!("{}", word);
            }
            Ok(())
        }
        Command::DeadEnds => {
            logging::init_stderr()?;
            let dictionary = load_dictionary(cli.db_dir.as_deref(), &config.rules)?;
            for word in dead_end_words(&dictionary, &config.rules) {
                println!("{}", word);
            }
            Ok(())
        }
    }
}

fn load_dictionary(db_dir: Option<&Path>, rules: &RuleConfiguration) -> Result<Dictionary> {
    let dictionary = match db_dir {
        Some(dir) => Dictionary::from_partition_dir(dir, rules)?,
        None => Dictionary::for_rules(rules),
    };
    if dictionary.is_empty() {
        warn!("dictionary is empty under the selected rules");
    }
    Ok(dictionary)
}

fn run_tui(mut coordinator: AppCoordinator) -> Result<()> {
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    // Short tick so the computer's delayed reply shows up promptly
    let tick_rate = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut coordinator, key);
                }
            }
        }

        coordinator.tick(Instant::now());

        if coordinator.should_quit {
            break;
        }
    }

    info!("wordchain exiting");
    terminal.exit()
}

fn handle_key(coordinator: &mut AppCoordinator, key: KeyEvent) {
    match &coordinator.screen {
        Screen::Options { .. } => match key.code {
            KeyCode::Up => coordinator.menu_up(),
            KeyCode::Down => coordinator.menu_down(),
            KeyCode::Enter => coordinator.menu_select(),
            KeyCode::Tab => coordinator.menu_tab(),
            KeyCode::Backspace => coordinator.menu_backspace(),
            KeyCode::Esc => coordinator.menu_escape(),
            KeyCode::Char(c) => coordinator.menu_char(c),
            _ => {}
        },
        Screen::Playing { .. } => match key.code {
            KeyCode::Esc => coordinator.game_escape(),
            KeyCode::Enter => coordinator.game_submit(Instant::now()),
            KeyCode::Backspace => coordinator.game_backspace(),
            KeyCode::Char(c) => coordinator.game_char(c),
            _ => {}
        },
        Screen::Error { .. } => {
            if key.code == KeyCode::Esc {
                coordinator.go_to_options();
            }
        }
    }
}
