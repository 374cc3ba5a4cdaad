use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::Mutex;

use parley::app::App;
use parley::chat_view::{draw_chat, submit_message};
use parley::constants::TYPEWRITER_TICK_MS;
use parley::key_handlers::handle_chat_input;
use parley::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = logging::init_logging()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new()));
    log::info!("widget mounted, session {}", app.lock().await.session_id);

    let result = run_app(&mut terminal, app).await;

    // restore the terminal even when the loop errored
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: Arc<Mutex<App>>) -> Result<()> {
    loop {
        {
            let mut guard = app.lock().await;
            guard.typewriter.poll();
            guard.status_indicator.tick();
            terminal.draw(|f| draw_chat(f, &guard))?;
            if guard.should_quit {
                // the typewriter dies with App; a late reply is dropped
                // by the teardown check in the send pipeline
                guard.typewriter.cancel();
                return Ok(());
            }
        }

        // short poll so typewriter ticks keep flowing between key events
        if event::poll(Duration::from_millis(TYPEWRITER_TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let outgoing = {
                        let mut guard = app.lock().await;
                        handle_chat_input(key, &mut guard)
                    };
                    if let Some(text) = outgoing {
                        tokio::spawn(submit_message(app.clone(), text));
                    }
                }
            }
        }
    }
}
