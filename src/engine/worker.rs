//! The engine task that owns the authoritative [`GameState`].
//!
//! Receives commands from [`EngineHandle`], applies events through
//! [`reduce`], publishes every new state on a watch channel, and runs the
//! timers and the catalog load as side tasks that report back as events.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use super::handle::EngineHandle;
use crate::catalog::CatalogProvider;
use crate::core::{GameConfig, GameEvent, GameState, LoadStatus};
use crate::rules::reduce;

const COMMAND_BUFFER: usize = 64;

/// Commands sent by [`EngineHandle`].
pub(crate) enum Command {
    /// Apply a player-facing event and reply with the resulting state.
    Dispatch {
        event: GameEvent,
        reply: oneshot::Sender<GameState>,
    },
    /// Reload the catalog after a failure.
    RetryLoad { reply: oneshot::Sender<GameState> },
    /// Stop the engine.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Pending side tasks. Aborted on drop.
#[derive(Default)]
struct Timers {
    resolution: Option<JoinHandle<()>>,
    ticker: Option<JoinHandle<()>>,
}

impl Timers {
    fn cancel_resolution(&mut self) {
        if let Some(task) = self.resolution.take() {
            task.abort();
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(task) = self.ticker.take() {
            task.abort();
        }
    }

    fn cancel_all(&mut self) {
        self.cancel_resolution();
        self.cancel_ticker();
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Background task that serializes every state transition.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    provider: CatalogProvider,
    command_rx: mpsc::Receiver<Command>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    event_rx: mpsc::UnboundedReceiver<GameEvent>,
    state_tx: watch::Sender<GameState>,
    timers: Timers,
    load_task: Option<JoinHandle<()>>,
}

impl GameEngine {
    /// Start an engine on the current tokio runtime and return its handle.
    ///
    /// The catalog load begins immediately.
    pub fn spawn(config: GameConfig, provider: CatalogProvider) -> EngineHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let state = GameState::new(&config);
        let (state_tx, state_rx) = watch::channel(state.clone());
        let breakpoint = config.mobile_breakpoint;

        let engine = Self {
            config,
            state,
            provider,
            command_rx,
            event_tx,
            event_rx,
            state_tx,
            timers: Timers::default(),
            load_task: None,
        };
        tokio::spawn(engine.run());

        EngineHandle::new(command_tx, state_rx, breakpoint)
    }

    async fn run(mut self) {
        info!(
            "Game engine started (difficulty {}, seed {})",
            self.state.difficulty,
            self.config.seed
        );
        self.start_load();

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => {
                        if !self.handle_command(command) {
                            break;
                        }
                    }
                    None => break,
                },
                Some(event) = self.event_rx.recv() => self.apply(event),
            }
        }

        self.timers.cancel_all();
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        info!("Game engine stopped");
    }

    /// Returns false when the engine should stop.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Dispatch { event, reply } => {
                self.apply(event);
                if reply.send(self.state.clone()).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::RetryLoad { reply } => {
                if self.state.load_status == LoadStatus::Ready {
                    debug!("Catalog already loaded; ignoring retry");
                } else {
                    self.start_load();
                }
                if reply.send(self.state.clone()).is_err() {
                    debug!("RetryLoad reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                if reply.send(()).is_err() {
                    debug!("Shutdown reply channel closed (caller dropped)");
                }
                return false;
            }
        }
        true
    }

    /// Apply one event, publish the result, and reschedule timers.
    fn apply(&mut self, event: GameEvent) {
        debug!(
            event = event.kind(),
            generation = self.state.generation,
            "Applying event"
        );

        let next = reduce(&self.state, &event);
        if next == self.state {
            return;
        }

        let previous = std::mem::replace(&mut self.state, next);
        self.sync_timers(&previous, &event);
        self.state_tx.send_replace(self.state.clone());
    }

    fn sync_timers(&mut self, previous: &GameState, event: &GameEvent) {
        if previous.generation != self.state.generation || previous.deal != self.state.deal {
            debug!(
                event = event.kind(),
                deal = self.state.deal,
                "Board redealt; cancelling timers"
            );
            self.timers.cancel_all();
        }

        if self.state.awaiting_resolution() && !previous.awaiting_resolution() {
            self.schedule_resolution();
        } else if !self.state.awaiting_resolution() {
            self.timers.resolution = None;
        }

        match (self.state.timer_running, self.timers.ticker.is_some()) {
            (true, false) => self.start_ticker(),
            (false, true) => self.timers.cancel_ticker(),
            _ => {}
        }
    }

    fn schedule_resolution(&mut self) {
        let resolve = GameEvent::resolve_for(&self.state);
        let delay = self.config.settle_delay();
        let events = self.event_tx.clone();
        debug!(
            generation = self.state.generation,
            deal = self.state.deal,
            "Scheduling match resolution in {:?}",
            delay
        );

        self.timers.resolution = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(resolve).is_err() {
                debug!("Engine gone before match resolution");
            }
        }));
    }

    fn start_ticker(&mut self) {
        let tick = GameEvent::tick_for(&self.state);
        let period = self.config.tick_interval();
        let events = self.event_tx.clone();
        debug!(
            generation = self.state.generation,
            deal = self.state.deal,
            "Starting timer"
        );

        self.timers.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events.send(tick.clone()).is_err() {
                    break;
                }
            }
        }));
    }

    fn start_load(&mut self) {
        if self.load_task.as_ref().is_some_and(|task| !task.is_finished()) {
            debug!("Catalog load already in progress");
            return;
        }

        self.apply(GameEvent::LoadCatalogRequested);

        let provider = self.provider.clone();
        let events = self.event_tx.clone();
        self.load_task = Some(tokio::spawn(async move {
            let event = match provider.fetch_catalog().await {
                Ok(entries) => GameEvent::LoadCatalogSucceeded(entries),
                Err(err) => GameEvent::LoadCatalogFailed {
                    reason: err.to_string(),
                },
            };
            if events.send(event).is_err() {
                debug!("Engine gone before catalog load finished");
            }
        }));
    }
}
