use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};

use crate::app::App;
use crate::ui;

/// Dashboard loop: draw, poll input, refresh on the interval. Every refresh
/// rebuilds the report from scratch.
pub async fn run(mut app: App, interval: Duration) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let mut last_refresh = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Char('r') => {
                        app.refresh().await;
                        last_refresh = Instant::now();
                    }
                    _ => {}
                }
            }
        }

        if last_refresh.elapsed() >= interval {
            app.refresh().await;
            last_refresh = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}
