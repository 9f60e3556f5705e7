//! Application screen state management
//!
//! Handles transitions between different application screens:
//! - Options (rules, dictionary search, dead-end list)
//! - Playing (including the finished game)
//! - Error

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use super::state::App;
use crate::config::AppConfig;
use crate::error::Result;
use crate::game::foresight::dead_end_words;
use crate::game::{Dictionary, ExhaustedPolicy, Phase, RuleConfiguration, SearchMode};

/// Maximum number of search results kept for display
pub const MAX_SEARCH_RESULTS: usize = 200;

/// Row on the options screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Platformer,
    DigitEdged,
    IgnoreTrailingDigit,
    ForbidOneShot,
    Opponent,
    OpponentPolicy,
    StartGame,
    Quit,
}

impl MenuOption {
    /// Get all menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[
            MenuOption::Platformer,
            MenuOption::DigitEdged,
            MenuOption::IgnoreTrailingDigit,
            MenuOption::ForbidOneShot,
            MenuOption::Opponent,
            MenuOption::OpponentPolicy,
            MenuOption::StartGame,
            MenuOption::Quit,
        ]
    }

    /// Get the display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Platformer => "Include platformer words",
            MenuOption::DigitEdged => "Allow words starting/ending with a digit",
            MenuOption::IgnoreTrailingDigit => "Chain on last letter, ignore trailing digit",
            MenuOption::ForbidOneShot => "Forbid one-shot words",
            MenuOption::Opponent => "Play against the computer",
            MenuOption::OpponentPolicy => "Computer without a safe move",
            MenuOption::StartGame => "Start Game",
            MenuOption::Quit => "Quit",
        }
    }

    /// Current value shown next to the label, if the row is a setting
    pub fn value(&self, rules: &RuleConfiguration) -> Option<String> {
        let flag = |on: bool| String::from(if on { "[x]" } else { "[ ]" });
        match self {
            MenuOption::Platformer => Some(flag(rules.include_platformer)),
            MenuOption::DigitEdged => Some(flag(rules.allow_digit_edged_words)),
            MenuOption::IgnoreTrailingDigit => Some(flag(rules.ignore_trailing_digit)),
            MenuOption::ForbidOneShot => Some(flag(rules.forbid_one_shot)),
            MenuOption::Opponent => Some(flag(rules.opponent_enabled)),
            MenuOption::OpponentPolicy => Some(
                match rules.opponent_policy {
                    ExhaustedPolicy::Concede => "concede",
                    ExhaustedPolicy::FallBack => "play anyway",
                }
                .to_string(),
            ),
            MenuOption::StartGame | MenuOption::Quit => None,
        }
    }

    /// Whether the row can be changed under the current rules
    pub fn enabled(&self, rules: &RuleConfiguration) -> bool {
        match self {
            MenuOption::IgnoreTrailingDigit => rules.allow_digit_edged_words,
            MenuOption::OpponentPolicy => rules.opponent_enabled && rules.forbid_one_shot,
            _ => true,
        }
    }
}

/// Which side panel of the options screen is shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidePanel {
    Search,
    DeadEnds(Vec<String>),
}

/// The current application screen
pub enum Screen {
    /// Rules and dictionary tools before a game
    Options {
        selected: usize,
        search_input: String,
        search_mode: SearchMode,
        editing_search: bool,
        panel: SidePanel,
    },
    /// Playing a game, or looking at the one that just ended
    Playing { app: App },
    /// Loading error
    Error { message: String },
}

impl Screen {
    fn options() -> Self {
        Screen::Options {
            selected: 0,
            search_input: String::new(),
            search_mode: SearchMode::Prefix,
            editing_search: false,
            panel: SidePanel::Search,
        }
    }
}

/// Search results for the options screen, capped at `MAX_SEARCH_RESULTS`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchResults<'a> {
    pub words: Vec<&'a str>,
    /// More words matched than are kept
    pub truncated: bool,
}

/// Main application coordinator
pub struct AppCoordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Rules and pacing chosen on the options screen
    pub config: AppConfig,
    /// External dictionary directory, if any
    db_dir: Option<PathBuf>,
    /// Every word, regardless of rules, for the search panel
    lookup: Dictionary,
}

impl AppCoordinator {
    /// Create a new app coordinator starting at the options screen
    pub fn new(config: AppConfig, db_dir: Option<PathBuf>) -> Self {
        let lookup = match &db_dir {
            Some(dir) => {
                let everything = RuleConfiguration {
                    include_platformer: true,
                    allow_digit_edged_words: true,
                    ..config.rules
                };
                Dictionary::from_partition_dir(dir, &everything).unwrap_or_else(|e| {
                    warn!(error = %e, "dictionary search unavailable");
                    Dictionary::default()
                })
            }
            None => Dictionary::full(),
        };

        Self {
            screen: Screen::options(),
            should_quit: false,
            config,
            db_dir,
            lookup,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Go back to the options screen
    pub fn go_to_options(&mut self) {
        self.screen = Screen::options();
    }

    /// Dictionary for a game under the current rules
    pub fn load_dictionary(&self) -> Result<Dictionary> {
        match &self.db_dir {
            Some(dir) => Dictionary::from_partition_dir(dir, &self.config.rules),
            None => Ok(Dictionary::for_rules(&self.config.rules)),
        }
    }

    /// Start a game with the current rules
    pub fn start_game(&mut self) {
        self.config = self.config.clone().normalized();
        match self.load_dictionary() {
            Ok(dictionary) => {
                info!(words = dictionary.len(), "starting game");
                let app = App::new(
                    self.config.rules,
                    dictionary,
                    self.config.opponent_delay(),
                    StdRng::from_os_rng(),
                );
                self.screen = Screen::Playing { app };
            }
            Err(e) => {
                self.screen = Screen::Error {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Handle menu navigation (up)
    pub fn menu_up(&mut self) {
        if let Screen::Options { selected, editing_search, .. } = &mut self.screen {
            if !*editing_search && *selected > 0 {
                *selected -= 1;
            }
        }
    }

    /// Handle menu navigation (down)
    pub fn menu_down(&mut self) {
        if let Screen::Options { selected, editing_search, .. } = &mut self.screen {
            if !*editing_search && *selected < MenuOption::all().len() - 1 {
                *selected += 1;
            }
        }
    }

    /// Handle character input on the options screen
    pub fn menu_char(&mut self, c: char) {
        let Screen::Options { search_input, editing_search, panel, .. } = &mut self.screen else {
            return;
        };
        if *editing_search {
            if !c.is_control() && search_input.len() < 40 {
                search_input.push(c);
            }
            return;
        }
        match c {
            '/' => {
                *editing_search = true;
                *panel = SidePanel::Search;
            }
            'd' | 'D' => self.show_dead_ends(),
            'q' | 'Q' => self.quit(),
            _ => {}
        }
    }

    /// Handle backspace on the options screen (search editing)
    pub fn menu_backspace(&mut self) {
        if let Screen::Options { search_input, editing_search, .. } = &mut self.screen {
            if *editing_search {
                search_input.pop();
            }
        }
    }

    /// Handle Tab: switch between prefix and suffix search
    pub fn menu_tab(&mut self) {
        if let Screen::Options { search_mode, panel, .. } = &mut self.screen {
            *search_mode = search_mode.toggled();
            *panel = SidePanel::Search;
        }
    }

    /// Handle Esc on the options screen: leave search editing, or quit
    pub fn menu_escape(&mut self) {
        if let Screen::Options { editing_search, .. } = &mut self.screen {
            if *editing_search {
                *editing_search = false;
                return;
            }
        }
        self.quit();
    }

    /// Handle menu selection (Enter or Space)
    pub fn menu_select(&mut self) {
        let selected = match &mut self.screen {
            Screen::Options { editing_search, .. } if *editing_search => {
                *editing_search = false;
                return;
            }
            Screen::Options { selected, .. } => *selected,
            _ => return,
        };

        let option = MenuOption::all()[selected];
        if !option.enabled(&self.config.rules) {
            return;
        }

        let rules = &mut self.config.rules;
        match option {
            MenuOption::Platformer => rules.include_platformer = !rules.include_platformer,
            MenuOption::DigitEdged => rules.allow_digit_edged_words = !rules.allow_digit_edged_words,
            MenuOption::IgnoreTrailingDigit => {
                rules.ignore_trailing_digit = !rules.ignore_trailing_digit
            }
            MenuOption::ForbidOneShot => rules.forbid_one_shot = !rules.forbid_one_shot,
            MenuOption::Opponent => rules.opponent_enabled = !rules.opponent_enabled,
            MenuOption::OpponentPolicy => {
                rules.opponent_policy = match rules.opponent_policy {
                    ExhaustedPolicy::Concede => ExhaustedPolicy::FallBack,
                    ExhaustedPolicy::FallBack => ExhaustedPolicy::Concede,
                }
            }
            MenuOption::StartGame => {
                self.start_game();
                return;
            }
            MenuOption::Quit => {
                self.quit();
                return;
            }
        }
        *rules = rules.normalized();

        // A dead-end list computed under the old rules is stale now
        if let Screen::Options { panel, .. } = &mut self.screen {
            *panel = SidePanel::Search;
        }
    }

    /// Compute the dead-end list for the current rules
    pub fn show_dead_ends(&mut self) {
        let dictionary = match self.load_dictionary() {
            Ok(d) => d,
            Err(e) => {
                self.screen = Screen::Error {
                    message: e.to_string(),
                };
                return;
            }
        };
        let words: Vec<String> = dead_end_words(&dictionary, &self.config.rules)
            .into_iter()
            .map(str::to_string)
            .collect();
        if let Screen::Options { panel, editing_search, .. } = &mut self.screen {
            *editing_search = false;
            *panel = SidePanel::DeadEnds(words);
        }
    }

    /// Search results for the options screen
    pub fn search_results(&self) -> SearchResults<'_> {
        match &self.screen {
            Screen::Options { search_input, search_mode, .. } => {
                let mut words = self.lookup.search(search_input, *search_mode);
                let truncated = words.len() > MAX_SEARCH_RESULTS;
                words.truncate(MAX_SEARCH_RESULTS);
                SearchResults { words, truncated }
            }
            _ => SearchResults::default(),
        }
    }

    /// Handle character input while playing; `r` restarts a finished game
    pub fn game_char(&mut self, c: char) {
        let Screen::Playing { app } = &mut self.screen else {
            return;
        };
        if app.session.phase() == Phase::Ended {
            if c == 'r' || c == 'R' {
                self.start_game();
            }
            return;
        }
        app.on_char(c);
    }

    pub fn game_backspace(&mut self) {
        if let Screen::Playing { app } = &mut self.screen {
            app.on_backspace();
        }
    }

    pub fn game_submit(&mut self, now: Instant) {
        if let Screen::Playing { app } = &mut self.screen {
            app.on_submit(now);
        }
    }

    /// Esc while playing: finish the game, or leave a finished one
    pub fn game_escape(&mut self) {
        let Screen::Playing { app } = &mut self.screen else {
            return;
        };
        if app.session.phase() == Phase::Ended {
            self.go_to_options();
        } else {
            app.finish();
        }
    }

    /// Advance timers
    pub fn tick(&mut self, now: Instant) {
        if let Screen::Playing { app } = &mut self.screen {
            app.tick(now);
        }
    }
}
