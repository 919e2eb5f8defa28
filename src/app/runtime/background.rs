use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::AppMessage;

/// Poll interval of the event thread.
const EVENT_POLL: Duration = Duration::from_millis(50);

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - Terminal events arrive from the reader thread on `event_rx`.
/// - Every background task reports through `msg_tx`.
pub struct Channels {
    /// Terminal event sender (reader thread).
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Terminal event receiver (event loop).
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Task result sender, cloned into workers.
    pub msg_tx: mpsc::UnboundedSender<AppMessage>,
    /// Task result receiver (event loop).
    pub msg_rx: mpsc::UnboundedReceiver<AppMessage>,
    /// Tells the reader thread to exit.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Tells the reader thread to stop reading while a child owns the terminal.
    pub event_thread_paused: Arc<AtomicBool>,
}

impl Channels {
    /// Create every channel and flag.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
        let (msg_tx, msg_rx) = mpsc::unbounded_channel::<AppMessage>();
        Self {
            event_tx,
            event_rx,
            msg_tx,
            msg_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            event_thread_paused: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

/// What: Spawn the blocking terminal event reader.
///
/// Inputs:
/// - `headless`: When `true`, no reader is started
/// - `event_tx`: Destination of terminal events
/// - `cancelled`: Exit flag
/// - `paused`: While set, the thread does not touch stdin
///
/// Details:
/// - Polls with a short timeout so both flags are honoured promptly.
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    cancelled: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if paused.load(Ordering::Relaxed) {
                std::thread::sleep(EVENT_POLL);
                continue;
            }
            match crossterm::event::poll(EVENT_POLL) {
                Ok(true) => {
                    let Ok(ev) = crossterm::event::read() else {
                        continue;
                    };
                    if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                        break;
                    }
                }
                Ok(false) | Err(_) => {}
            }
        }
        tracing::debug!("event thread exited");
    });
}
