use anyhow::Result;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reelscore_config::Config;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

mod app;
mod ui;

pub use app::{Action, App, Field, InputMode, Tab};

/// Run the dashboard until the user quits.
///
/// `input` overrides the configured datasets with an explicit record file.
pub fn run_tui(config: Config, input: Option<PathBuf>) -> Result<()> {
    // Load before touching the terminal so dataset errors print normally.
    let mut app = App::new(config, input)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Some(Event::Key(key)) = App::poll_event(Duration::from_millis(100))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.on_key(key.code) {
            Some(Action::Quit) => return Ok(()),
            Some(action @ (Action::GenerateTrends | Action::RegenerateTrends)) => {
                app.status_message = "Generating trend summary...".to_string();
                terminal.draw(|f| ui::draw(f, app))?;
                app.run_trends(action);
            }
            None => {}
        }
    }
}
