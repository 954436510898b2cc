pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick for flash expiry

    // Main loop
    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal before any further output
    ratatui::restore();

    // Persist unsaved edits so the next session resumes where this one ended
    if app.dirty {
        crate::storage::save_ratings(&app.ratings_path, &app.ratings)?;
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Slider adjustment
                KeyCode::Char('h') | KeyCode::Left => app.adjust_selected(-1),
                KeyCode::Char('l') | KeyCode::Right => app.adjust_selected(1),

                // Direct rating
                KeyCode::Char(c @ '1'..='5') => {
                    app.set_selected(c as u8 - b'0');
                }

                // Reset to defaults
                KeyCode::Char('d') => app.reset_to_defaults(),

                // Undo
                KeyCode::Char('z') => app.undo_last(),

                // Save
                KeyCode::Char('w') => app.save(),

                // Score breakdown
                KeyCode::Char('b') => app.show_breakdown(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_breakdown(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
