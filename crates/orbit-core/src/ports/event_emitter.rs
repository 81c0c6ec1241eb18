//! Event emitter trait for display updates.
//!
//! Implementations handle transport details (terminal, channels, ...).

use tokio::sync::mpsc;

use crate::events::AppEvent;

/// Trait for emitting display events.
///
/// # Implementations
///
/// - [`NoopEmitter`] - for contexts without a display
/// - [`ChannelEmitter`] - forwards into an unbounded channel (tests, UIs on
///   another task)
/// - Front-end specific implementations (terminal printer, ...)
pub trait AppEventEmitter: Send + Sync {
    /// Emit an event. Must not block.
    fn emit(&self, event: AppEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn AppEventEmitter>;
}

/// A no-op event emitter.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    pub const fn new() -> Self {
        Self
    }
}

impl AppEventEmitter for NoopEmitter {
    fn emit(&self, _event: AppEvent) {}

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

/// Emitter that forwards every event into an unbounded channel.
///
/// Events emitted after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl ChannelEmitter {
    /// Create an emitter together with the receiving end.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AppEventEmitter for ChannelEmitter {
    fn emit(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Event receiver dropped; discarding event");
        }
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}
