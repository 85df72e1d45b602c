use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use log::debug;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq)]
pub enum TrainerEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
    Tick,
    /// The event source hung up; nothing more will arrive
    Closed,
}

/// Source of terminal events (keyboard, paste, resize)
pub trait TrainerEventSource: Send + 'static {
    /// Block until an event arrives or the source disconnects
    fn recv(&self) -> Option<TrainerEvent>;

    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TrainerEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                // key releases show up on some platforms; only presses type
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    TrainerEvent::Key(key)
                }
                Ok(CtEvent::Paste(text)) => TrainerEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => TrainerEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    debug!("terminal event reader stopped: {e}");
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainerEventSource for CrosstermEventSource {
    fn recv(&self) -> Option<TrainerEvent> {
        self.rx.recv().ok()
    }

    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TrainerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TrainerEvent>) -> Self {
        Self { rx }
    }
}

impl TrainerEventSource for TestEventSource {
    fn recv(&self) -> Option<TrainerEvent> {
        self.rx.recv().ok()
    }

    fn recv_timeout(&self, timeout: Duration) -> Result<TrainerEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: TrainerEventSource> {
    event_source: E,
}

impl<E: TrainerEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Returns the next event. With a tick deadline, waits at most until it
    /// and yields Tick on expiry; without one, blocks until input arrives.
    pub fn step(&self, deadline: Option<Instant>) -> TrainerEvent {
        let Some(deadline) = deadline else {
            return self.event_source.recv().unwrap_or(TrainerEvent::Closed);
        };

        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TrainerEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => TrainerEvent::Closed,
        }
    }
}
