//! UI rendering using ratatui
//!
//! Screens:
//! - Options: rules, dictionary search and the dead-end list
//! - Playing: chain history, required symbol, input (and the result once ended)
//! - Error: error message display

use crate::app::screen::{SearchResults, SidePanel};
use crate::app::state::Feedback;
use crate::app::{App, AppCoordinator, MenuOption, Screen};
use crate::game::{EndReason, GameOutcome, Phase, RuleConfiguration, SearchMode, TurnOwner};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    match &coordinator.screen {
        Screen::Options {
            selected,
            search_input,
            search_mode,
            editing_search,
            panel,
        } => {
            let results = coordinator.search_results();
            render_options(
                frame,
                &coordinator.config.rules,
                *selected,
                SearchView {
                    input: search_input,
                    mode: *search_mode,
                    editing: *editing_search,
                    results: &results,
                },
                panel,
            );
        }
        Screen::Playing { app } => render_game(frame, app),
        Screen::Error { message } => render_error(frame, message),
    }
}

struct SearchView<'a> {
    input: &'a str,
    mode: SearchMode,
    editing: bool,
    results: &'a SearchResults<'a>,
}

/// Render the options screen
fn render_options(
    frame: &mut Frame,
    rules: &RuleConfiguration,
    selected: usize,
    search: SearchView<'_>,
    panel: &SidePanel,
) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Options | side panel
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let title = Paragraph::new("WORD CHAIN")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(36)])
        .split(layout[1]);

    let items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if !opt.enabled(rules) {
                Style::default().fg(Color::DarkGray)
            } else if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            let line = match opt.value(rules) {
                Some(value) => format!("{}{} {}", prefix, value, opt.label()),
                None => format!("{}{}", prefix, opt.label()),
            };
            ListItem::new(line).style(style)
        })
        .collect();
    let menu = List::new(items).block(Block::default().borders(Borders::ALL).title("Rules"));
    frame.render_widget(menu, columns[0]);

    match panel {
        SidePanel::Search => render_search(frame, columns[1], &search),
        SidePanel::DeadEnds(words) => render_dead_ends(frame, columns[1], words),
    }

    let footer_text = if search.editing {
        "Type to search  Tab Starts/ends with  Enter/Esc Done"
    } else {
        "↑↓ Navigate  Enter Toggle  / Search  d Dead ends  q Quit"
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

fn render_search(frame: &mut Frame, area: Rect, search: &SearchView<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Search ({})", search.mode.label()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let (prompt, style) = if search.editing {
        (format!("[{}]_", search.input), Style::default().fg(Color::Cyan))
    } else if search.input.is_empty() {
        ("Press / to search".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (search.input.to_string(), Style::default().fg(Color::White))
    };
    frame.render_widget(Paragraph::new(prompt).style(style), layout[0]);

    let mut items: Vec<ListItem> = search
        .results
        .words
        .iter()
        .map(|word| ListItem::new(*word))
        .collect();
    if search.results.truncated {
        items.push(ListItem::new("…").style(Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(List::new(items), layout[1]);
}

fn render_dead_ends(frame: &mut Frame, area: Rect, words: &[String]) {
    let title = format!("Dead ends ({})", words.len());
    let text = if words.is_empty() {
        "None".to_string()
    } else {
        words.join(", ")
    };
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// Render the game screen
fn render_game(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // History
            Constraint::Length(6), // Input / result
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    render_header(frame, layout[0], app);
    render_history(frame, layout[1], app);
    match app.outcome() {
        Some(outcome) => render_outcome(frame, layout[2], app, outcome),
        None => render_input_area(frame, layout[2], app),
    }

    let footer_text = if app.session.phase() == Phase::Ended {
        "r Play again  Esc Options"
    } else {
        "Enter Submit  Esc Finish game"
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);
}

/// Render the header: title, required symbol, whose turn
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14), // Title
            Constraint::Min(20),    // Required symbol
            Constraint::Length(14), // Turn
        ])
        .split(inner);

    let title = Paragraph::new("WORD CHAIN")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let required = match (app.session.move_history().is_empty(), app.session.required_start_symbol()) {
        (true, _) => "[ any word ]".to_string(),
        (false, Some(symbol)) => format!("[ starts with {} ]", symbol.to_ascii_uppercase()),
        (false, None) => "[ no continuation ]".to_string(),
    };
    let required = Paragraph::new(required)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(required, header_layout[1]);

    if app.session.phase() == Phase::InProgress {
        let turn = Paragraph::new(turn_label(app, app.session.turn_owner()))
            .style(Style::default().fg(Color::Green).bold())
            .alignment(Alignment::Right);
        frame.render_widget(turn, header_layout[2]);
    }
}

/// Render the chain so far
fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.session.move_history().is_empty() {
        "No words yet".to_string()
    } else {
        app.history_line()
    };
    let history = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(
                    "Chain ({}) of {} words",
                    app.session.move_history().len(),
                    app.session.dictionary().len()
                )),
        );
    frame.render_widget(history, area);
}

/// Render the input/feedback area
fn render_input_area(frame: &mut Frame, area: Rect, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Input line
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Feedback line
            Constraint::Min(0),
        ])
        .split(area);

    let input_display = if app.accepts_input() {
        format!("> {}_", app.input)
    } else if app.opponent_scheduled() {
        "> (computer is thinking)".to_string()
    } else {
        "> ".to_string()
    };
    let input = Paragraph::new(input_display).style(Style::default().fg(Color::White));
    frame.render_widget(input, main_layout[0]);

    let (feedback_text, feedback_color) = format_feedback(app, &app.feedback);
    let feedback = Paragraph::new(feedback_text).style(Style::default().fg(feedback_color));
    frame.render_widget(feedback, main_layout[2]);
}

/// Render the result of a finished game
fn render_outcome(frame: &mut Frame, area: Rect, app: &App, outcome: GameOutcome) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Reason
            Constraint::Min(0),
        ])
        .split(area);

    let (title, color) = match outcome.winner {
        Some(winner) => (format!("{} WINS!", turn_label(app, winner).to_uppercase()), Color::Yellow),
        None => ("GAME OVER".to_string(), Color::Red),
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(color).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, main_layout[0]);

    let reason = Paragraph::new(reason_text(outcome.reason))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(reason, main_layout[2]);
}

/// Render error screen
fn render_error(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(40),
        ])
        .split(area);

    let error = Paragraph::new(format!("Error: {}", message))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(error, layout[1]);

    let hint = Paragraph::new("Press Esc to go back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

/// Display name for a side. Without the computer both sides are people.
fn turn_label(app: &App, owner: TurnOwner) -> &'static str {
    match (app.session.config().opponent_enabled, owner) {
        (false, TurnOwner::Human) => "Player 1",
        (false, TurnOwner::Opponent) => "Player 2",
        (true, owner) => owner.label(),
    }
}

fn reason_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::OneShot => "One-shot: no reply was possible",
        EndReason::NoContinuation => "No safe word left to play",
        EndReason::ForfeitedOneShot => "Computer was forced into a dead end",
        EndReason::Finished => "Game finished",
    }
}

/// Format feedback with appropriate color
fn format_feedback(app: &App, feedback: &Feedback) -> (String, Color) {
    match feedback {
        Feedback::None => (String::new(), Color::White),
        Feedback::Played { by, word } => (format!("{}: {}", turn_label(app, *by), word), Color::Green),
        Feedback::Rejected(reason) => (reason.message(), Color::Red),
        Feedback::Notice(text) => (text.clone(), Color::Yellow),
    }
}
