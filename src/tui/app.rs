use crate::catalog::Criterion;
use crate::config::Config;
use crate::scoring::{compute_quote, FeeSchedule, Quote, RatingSet, DEFAULT_RATING};
use crate::tui::theme::ThemeColors;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

const MAX_UNDO: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

/// One reversible rating change.
#[derive(Debug, Clone)]
pub struct UndoAction {
    pub key: &'static str,
    pub previous: u8,
}

pub struct App {
    pub catalog: &'static [Criterion],
    pub ratings: RatingSet,
    pub quote: Quote,
    pub schedule: FeeSchedule,
    pub table_state: ratatui::widgets::TableState,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub undo_stack: VecDeque<UndoAction>,
    pub ratings_path: PathBuf,
    pub dirty: bool,
    pub should_quit: bool,
    pub config: Config,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(
        catalog: &'static [Criterion],
        ratings: RatingSet,
        ratings_path: PathBuf,
        config: Config,
        theme: ThemeColors,
    ) -> Self {
        let schedule = config.fee_schedule();
        // The catalog and ratings are validated before the TUI launches, so
        // the initial quote cannot fail
        let quote = compute_quote(catalog, &schedule, &ratings)
            .expect("catalog validated at startup");

        let mut table_state = ratatui::widgets::TableState::default();
        if !catalog.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            catalog,
            ratings,
            quote,
            schedule,
            table_state,
            input_mode: InputMode::Normal,
            flash_message: None,
            undo_stack: VecDeque::new(),
            ratings_path,
            dirty: false,
            should_quit: false,
            config,
            theme,
        }
    }

    pub fn next_row(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= self.catalog.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.catalog.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_criterion(&self) -> Option<&'static Criterion> {
        self.table_state
            .selected()
            .and_then(|i| self.catalog.get(i))
    }

    /// Current rating of the selected criterion.
    pub fn selected_rating(&self) -> Option<u8> {
        self.selected_criterion()
            .and_then(|c| self.ratings.get(c.key))
    }

    /// Adjust the selected criterion's rating by delta, saturating at the
    /// slider bounds. Records an undo entry when the value actually changes.
    pub fn adjust_selected(&mut self, delta: i8) {
        let Some(criterion) = self.selected_criterion() else {
            return;
        };
        let key = criterion.key;
        let Some(previous) = self.ratings.get(key) else {
            return;
        };

        if let Some(next) = self.ratings.bump(key, delta) {
            if next != previous {
                self.push_undo(UndoAction { key, previous });
                self.recompute();
            }
        }
    }

    /// Set the selected criterion's rating directly (the 1-5 number keys).
    pub fn set_selected(&mut self, rating: u8) {
        let Some(criterion) = self.selected_criterion() else {
            return;
        };
        let key = criterion.key;
        let Some(previous) = self.ratings.get(key) else {
            return;
        };

        if rating != previous {
            self.ratings.set(key, rating);
            self.push_undo(UndoAction { key, previous });
            self.recompute();
        }
    }

    /// Reset every criterion to the default rating.
    pub fn reset_to_defaults(&mut self) {
        // Record per-key undo entries so a reset unwinds one key at a time,
        // same as any other edit
        for criterion in self.catalog {
            if let Some(previous) = self.ratings.get(criterion.key) {
                if previous != DEFAULT_RATING {
                    self.push_undo(UndoAction {
                        key: criterion.key,
                        previous,
                    });
                    self.ratings.set(criterion.key, DEFAULT_RATING);
                }
            }
        }
        self.recompute();
        self.show_flash("Reset all criteria to defaults".to_string());
    }

    /// Undo the last rating change.
    pub fn undo_last(&mut self) {
        let action = match self.undo_stack.pop_front() {
            Some(action) => action,
            None => {
                self.show_flash("Nothing to undo".to_string());
                return;
            }
        };

        self.ratings.set(action.key, action.previous);
        self.recompute();
        self.show_flash(format!("Undid change to '{}'", action.key));
    }

    /// Save the current ratings to disk.
    pub fn save(&mut self) {
        match crate::storage::save_ratings(&self.ratings_path, &self.ratings) {
            Ok(()) => {
                self.dirty = false;
                self.show_flash(format!("Saved ratings to {}", self.ratings_path.display()));
            }
            Err(e) => self.show_flash(format!("Failed to save ratings: {}", e)),
        }
    }

    fn recompute(&mut self) {
        // Ratings only change through clamped setters, so this cannot fail
        // for the built-in catalog
        if let Ok(quote) = compute_quote(self.catalog, &self.schedule, &self.ratings) {
            self.quote = quote;
        }
        self.dirty = true;
    }

    fn push_undo(&mut self, action: UndoAction) {
        self.undo_stack.push_front(action);
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.pop_back();
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show score breakdown overlay
    pub fn show_breakdown(&mut self) {
        self.input_mode = InputMode::Breakdown;
    }

    /// Dismiss score breakdown overlay
    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::tui::theme::ThemeColors;
    use std::env;

    fn test_app() -> App {
        App::new(
            catalog(),
            RatingSet::default_for(catalog()),
            env::temp_dir().join("quote_builder_app_test.json"),
            Config::default(),
            ThemeColors::dark(),
        )
    }

    #[test]
    fn test_new_app_starts_at_defaults() {
        let app = test_app();
        assert_eq!(app.table_state.selected(), Some(0));
        assert!((app.quote.total_score - 60.0).abs() < 1e-9);
        assert_eq!(app.quote.fee, 5750);
        assert!(!app.dirty);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = test_app();
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(catalog().len() - 1));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_adjust_recomputes_quote() {
        let mut app = test_app();
        // First row is "sector" (weight 2.5): 3 -> 4 adds 0.2 * 2.5 = 0.5
        app.adjust_selected(1);
        assert!((app.quote.total_score - 60.5).abs() < 1e-9);
        assert!(app.dirty);
        assert_eq!(app.undo_stack.len(), 1);
    }

    #[test]
    fn test_adjust_at_bound_records_no_undo() {
        let mut app = test_app();
        app.set_selected(5);
        assert_eq!(app.undo_stack.len(), 1);
        // Already at max: no change, no extra undo entry
        app.adjust_selected(1);
        assert_eq!(app.undo_stack.len(), 1);
    }

    #[test]
    fn test_undo_restores_previous_rating() {
        let mut app = test_app();
        app.set_selected(5);
        assert_eq!(app.selected_rating(), Some(5));
        app.undo_last();
        assert_eq!(app.selected_rating(), Some(3));
        assert!((app.quote.total_score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_then_undo_unwinds_per_key() {
        let mut app = test_app();
        app.set_selected(1);
        app.next_row();
        app.set_selected(5);
        app.reset_to_defaults();
        assert!((app.quote.total_score - 60.0).abs() < 1e-9);

        // Two reset entries plus the two edits
        assert_eq!(app.undo_stack.len(), 4);
        app.undo_last();
        app.undo_last();
        assert_eq!(app.ratings.get("sector"), Some(1));
        assert_eq!(app.ratings.get("size"), Some(5));
    }

    #[test]
    fn test_number_key_sets_rating() {
        let mut app = test_app();
        app.set_selected(1);
        assert_eq!(app.selected_rating(), Some(1));
        assert!((app.quote.total_score - 59.0).abs() < 1e-9);
    }
}
