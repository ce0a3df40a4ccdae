//! Real-time log streaming via Server-Sent Events (SSE).
//!
//! Pipeline progress and results go through one process-wide broadcaster:
//! every entry is echoed to stderr and fanned out to SSE clients.

use once_cell::sync::Lazy;
use tokio::sync::broadcast;

use crate::models::{LogEntry, LogKind};

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Broadcasts log entries to all connected SSE clients
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Send a log entry to all subscribers
    pub fn log(&self, entry: LogEntry) {
        // stdout may carry the corrected file
        let prefix = match entry.kind {
            LogKind::Info => "   ",
            LogKind::Corrected => "   ✎",
            LogKind::Error => "   ❌",
        };
        match (entry.row, entry.column) {
            (Some(row), Some(column)) => eprintln!("{} [row {}, col {}] {}", prefix, row, column, entry.message),
            (Some(row), None) => eprintln!("{} [row {}] {}", prefix, row, entry.message),
            _ => eprintln!("{} {}", prefix, entry.message),
        }

        // no receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

/// Info entry for a step that completed cleanly.
pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(format!("✓ {}", msg.into())));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::error(msg));
}

/// Forward already-built entries (row errors, corrections).
pub fn log_entries<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) {
    for entry in entries {
        LOG_BROADCASTER.log(entry.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_entries() {
        let broadcaster = LogBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.log(LogEntry::error("bad amount").at(3, 10));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.kind, LogKind::Error);
        assert_eq!(received.row, Some(3));
        assert_eq!(received.message, "bad amount");
    }

    #[test]
    fn test_log_without_subscribers_does_not_fail() {
        let broadcaster = LogBroadcaster::default();
        broadcaster.log(LogEntry::info("nobody listening"));
    }
}
