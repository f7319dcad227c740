//! Observability and Metrics
//!
//! Counters for the stream-framing layer: frames and bytes in each
//! direction, keep-alives, and rejected input.
//!
//! Uses atomic counters for thread-safe metrics collection, so one
//! `WireMetrics` can be shared behind an `Arc` by every codec of a process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Metrics collector for framing operations
#[derive(Debug)]
pub struct WireMetrics {
    /// Handshakes successfully decoded
    pub handshakes_received: AtomicU64,
    /// Handshakes encoded
    pub handshakes_sent: AtomicU64,
    /// Handshakes that failed validation
    pub handshakes_rejected: AtomicU64,
    /// Messages decoded, keep-alives included
    pub messages_received: AtomicU64,
    /// Messages encoded, keep-alives included
    pub messages_sent: AtomicU64,
    /// Keep-alives decoded
    pub keep_alives_received: AtomicU64,
    /// Message frames that failed validation
    pub frames_rejected: AtomicU64,
    /// Total bytes decoded
    pub bytes_received: AtomicU64,
    /// Total bytes encoded
    pub bytes_sent: AtomicU64,
    start_time: Instant,
}

impl WireMetrics {
    pub fn new() -> Self {
        Self {
            handshakes_received: AtomicU64::new(0),
            handshakes_sent: AtomicU64::new(0),
            handshakes_rejected: AtomicU64::new(0),
            messages_received: AtomicU64::new(0),
            messages_sent: AtomicU64::new(0),
            keep_alives_received: AtomicU64::new(0),
            frames_rejected: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn handshake_received(&self) {
        self.handshakes_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received
            .fetch_add(crate::config::HANDSHAKE_LEN as u64, Ordering::Relaxed);
    }

    pub fn handshake_sent(&self) {
        self.handshakes_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent
            .fetch_add(crate::config::HANDSHAKE_LEN as u64, Ordering::Relaxed);
    }

    pub fn handshake_rejected(&self) {
        self.handshakes_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a decoded message frame of `byte_count` bytes
    pub fn message_received(&self, byte_count: u64, keep_alive: bool) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
        if keep_alive {
            self.keep_alives_received.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an encoded message frame of `byte_count` bytes
    pub fn message_sent(&self, byte_count: u64) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn frame_rejected(&self) {
        self.frames_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            handshakes_received: self.handshakes_received.load(Ordering::Relaxed),
            handshakes_sent: self.handshakes_sent.load(Ordering::Relaxed),
            handshakes_rejected: self.handshakes_rejected.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            keep_alives_received: self.keep_alives_received.load(Ordering::Relaxed),
            frames_rejected: self.frames_rejected.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            handshakes_received = snapshot.handshakes_received,
            handshakes_sent = snapshot.handshakes_sent,
            handshakes_rejected = snapshot.handshakes_rejected,
            messages_received = snapshot.messages_received,
            messages_sent = snapshot.messages_sent,
            keep_alives_received = snapshot.keep_alives_received,
            frames_rejected = snapshot.frames_rejected,
            bytes_received = snapshot.bytes_received,
            bytes_sent = snapshot.bytes_sent,
            uptime_seconds = snapshot.uptime_seconds,
            "Peer-wire metrics snapshot"
        );
    }
}

impl Default for WireMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub handshakes_received: u64,
    pub handshakes_sent: u64,
    pub handshakes_rejected: u64,
    pub messages_received: u64,
    pub messages_sent: u64,
    pub keep_alives_received: u64,
    pub frames_rejected: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub uptime_seconds: u64,
}
