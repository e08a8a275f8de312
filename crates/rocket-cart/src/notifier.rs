//! User-facing error reporting.

use std::sync::{Arc, Mutex};

/// Surfaces a human-readable error message to the shopper.
///
/// Fire-and-forget: the store never inspects what happens to the message.
pub trait Notifier: Send + Sync {
    /// Show an error message.
    fn error(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn error(&self, message: &str) {
        self(message)
    }
}

/// Writes messages to the `tracing` log at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "rocket_cart::notify", "{}", message);
    }
}

/// Keeps every message in memory (for development/testing).
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_buffer() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();

        notifier.error("first");
        notifier.error("second");

        assert_eq!(handle.take(), vec!["first", "second"]);
        assert!(handle.messages().is_empty());
    }

    #[test]
    fn test_closure_notifier() {
        let seen = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&seen);
        let notifier = move |message: &str| sink.lock().unwrap().push_str(message);

        notifier.error("boom");
        assert_eq!(*seen.lock().unwrap(), "boom");
    }
}
