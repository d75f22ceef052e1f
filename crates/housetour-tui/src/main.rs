//! housetour-tui — Walk a panoramic house tour in the terminal.
//! Uses Ratatui + Crossterm for rendering.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::{info, warn};

use housetour_core::config::Config;
use housetour_core::discovery::ImageDirectory;
use housetour_core::tour::Tour;

use app::App;

/// Discover photos and build the tour, or explain why the house is unusable.
fn start_tour(config: &Config) -> io::Result<(Tour, ImageDirectory)> {
    let images = ImageDirectory::from_config(config);
    match Tour::from_config(config, &images) {
        Ok(tour) => Ok((tour, images)),
        Err(e) => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Cannot start the tour from {}: {}", images.root().display(), e),
        )),
    }
}

fn main() -> io::Result<()> {
    // Initialize tracing to a file (not stdout, since we own the terminal)
    let _guard = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(|| -> Box<dyn io::Write> {
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open("housetour-tui.log")
            {
                Ok(file) => Box::new(file),
                Err(_) => Box::new(io::sink()),
            }
        })
        .try_init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match Config::load_from_dir(&project_root) {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default config: {:#}", e);
            Config::default()
        }
    };

    let (tour, images) = start_tour(&config)?;
    let tick = tour.tick_interval();
    let mut app = App::new(tour, images);

    info!("Starting TUI at {}", app.view().location);

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    // Without release events every press would look held forever
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        io::stdout().execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    loop {
        // Draw
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let size = terminal.size()?;
        let panes = ui::layout(Rect::new(0, 0, size.width, size.height));
        let compass = ui::Compass::new(panes.compass);

        // Handle terminal events
        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) => match (key.code, key.modifiers) {
                    (KeyCode::Esc, _)
                    | (KeyCode::Char('c'), KeyModifiers::CONTROL)
                    | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    (KeyCode::PageUp, _) if key.kind == KeyEventKind::Press => app.scroll_up(),
                    (KeyCode::PageDown, _) if key.kind == KeyEventKind::Press => {
                        app.scroll_down()
                    }
                    _ => {
                        app.handle_key(key);
                        // Terminals without release events: treat each
                        // press as a tap
                        if !enhanced && key.kind == KeyEventKind::Press {
                            app.tour.tick();
                            if let Some(id) = app::key_id(key.code) {
                                app.tour.release(&id);
                            }
                        }
                    }
                },
                Event::Mouse(mouse) => app.handle_mouse(mouse, &compass),
                _ => {}
            }
        }

        app.tour.tick();
        app.drain_events();

        if app.should_quit {
            break;
        }
    }

    // Cleanup
    if enhanced {
        io::stdout().execute(PopKeyboardEnhancementFlags)?;
    }
    io::stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    info!(
        "Left the tour at {} after {} tick(s)",
        app.view().location,
        app.tour.tick_count()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_tour_fails_without_photos() {
        let config = Config {
            images_dir: PathBuf::from("/nonexistent/housetour/Images"),
            ..Config::default()
        };
        let err = start_tour(&config).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("/nonexistent/housetour/Images"));
    }
}
