//! Terminal application around one hero card.
//!
//! Keys: `g` generate, `e` toggle edit/read mode, `q` / `Esc` quit.
//! Generation runs on a spawned task and reports back over a channel, so the
//! view keeps drawing while records are fetched.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;

use super::views::hero::{self, HeroViewState, StatusLevel};
use crate::core::hero::{DisplayMode, GenerateOutcome, HeroCard, HeroError, HeroProperties, SkipReason};
use crate::core::power_store::PowerStore;

/// Events pushed from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Regenerated(Result<GenerateOutcome, HeroError>),
}

/// Central application state.
pub struct AppState<S> {
    /// Whether the app is still running.
    pub running: bool,
    card: Arc<HeroCard<S>>,
    /// Snapshot of the card's property bag, refreshed after each generation.
    properties: HeroProperties,
    mode: DisplayMode,
    view: HeroViewState,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl<S: PowerStore + 'static> AppState<S> {
    pub async fn new(card: Arc<HeroCard<S>>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let properties = card.properties().await;
        let mode = card.mode().await;
        Self {
            running: true,
            card,
            properties,
            mode,
            view: HeroViewState::new(),
            event_tx,
        }
    }

    pub fn properties(&self) -> &HeroProperties {
        &self.properties
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn view(&self) -> &HeroViewState {
        &self.view
    }

    pub fn draw(&self, frame: &mut ratatui::Frame) {
        hero::render(frame, frame.area(), &self.properties, self.mode, &self.view);
    }

    /// Handle a terminal event.
    pub async fn handle_event(&mut self, event: Event) {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('e') => {
                    self.mode = self.card.toggle_mode().await;
                    self.view.clear_status();
                }
                KeyCode::Char('g') => self.request_generate(),
                _ => {}
            }
        }
    }

    /// Spawn a regenerate on the card; the result arrives as an [`AppEvent`].
    pub fn request_generate(&mut self) {
        if self.mode == DisplayMode::Edit {
            self.view.loading = true;
        }
        let card = Arc::clone(&self.card);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = card.regenerate().await;
            let _ = tx.send(AppEvent::Regenerated(result));
        });
    }

    /// Handle an event from a background task.
    pub async fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Regenerated(result) => {
                self.view.loading = self.card.is_fetching();
                match result {
                    Ok(GenerateOutcome::Generated(_)) => {
                        self.properties = self.card.properties().await;
                        self.view.clear_status();
                    }
                    Ok(GenerateOutcome::Skipped(SkipReason::FetchInFlight)) => {
                        self.view.set_status(StatusLevel::Info, "Still summoning a hero...");
                    }
                    Ok(GenerateOutcome::Skipped(SkipReason::ReadMode)) => {
                        self.view
                            .set_status(StatusLevel::Info, "Press [e] to edit, then [g] to generate");
                    }
                    Err(e) => {
                        let level = if e.is_recoverable() {
                            StatusLevel::Warning
                        } else {
                            StatusLevel::Error
                        };
                        self.view.set_status(level, e.to_string());
                    }
                }
            }
        }
    }
}

/// Run the event loop until the user quits.
pub async fn run<B, S>(
    terminal: &mut Terminal<B>,
    card: Arc<HeroCard<S>>,
    tick_rate: Duration,
) -> io::Result<()>
where
    B: Backend,
    S: PowerStore + 'static,
{
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(card, event_tx).await;
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(tick_rate);

    while app.running {
        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => app.handle_event(event).await,
                Some(Err(e)) => return Err(e),
                None => app.running = false,
            },
            Some(app_event) = event_rx.recv() => app.handle_app_event(app_event).await,
            _ = tick.tick() => {}
        }
    }

    Ok(())
}
