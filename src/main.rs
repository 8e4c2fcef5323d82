use libdesk::adapters::ReqwestHttpClient;
use libdesk::api::LibraryApi;
use libdesk::app::{App, Route};
use libdesk::cli::Args;
use libdesk::logging;
use libdesk::store::Store;
use libdesk::terminal::{setup_panic_hook, TerminalManager};
use libdesk::ui;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Redraw and toast-expiry cadence.
const TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Parse before anything touches the terminal so --help prints normally
    let args = Args::parse();

    color_eyre::install()?;
    setup_panic_hook();

    let config = args.config()?;
    logging::init(&config.log_path()?)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        policy = ?config.stale_policy,
        "libdesk starting"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let http = ReqwestHttpClient::new(config.timeout)?;
    let api = LibraryApi::new(Arc::new(http), config.base_url.clone());

    let route = match args.reset_token {
        Some(token) => Route::ResetPassword { token },
        None => Route::home(),
    };

    let result = runtime.block_on(async {
        let store = Store::new(api).with_policy(config.stale_policy);
        let mut app = App::new(store, config.toast_ttl, route);

        let mut manager = TerminalManager::new()?;
        app.start();
        let result = run_app(manager.terminal(), &mut app).await;
        manager.restore()?;
        result
    });

    if let Err(err) = &result {
        error!(error = %err, "libdesk exited with an error");
    }
    info!("libdesk stopped");
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    loop {
        if app.take_redraw() {
            terminal.draw(|f| ui::render(f, app))?;
        }

        tokio::select! {
            _ = tokio::time::sleep(TICK) => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => {
                        app.handle_key(key);
                        app.sync();
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    // Input closed
                    None => break,
                }
            }

            changed = app.store.next_action() => {
                if changed {
                    app.mark_dirty();
                }
                app.sync();
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
