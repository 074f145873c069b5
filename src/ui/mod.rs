pub mod app;
pub mod form;
pub mod notice;
pub mod theme;
pub mod view;

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};

use crate::domain::persistence::PersistenceSink;

use app::App;

const TICK_RATE: Duration = Duration::from_millis(200);

/// Draw/poll loop until the user quits.
pub fn run<B: Backend, S: PersistenceSink>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()> {
    let mut last_tick = Instant::now();
    while !app.should_quit {
        terminal.draw(|f| view::draw(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        if last_tick.elapsed() >= TICK_RATE {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}
