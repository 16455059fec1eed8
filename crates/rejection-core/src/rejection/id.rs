//! Timestamps and ids for submitted rejections.

use chrono::Utc;

/// Source of "now" for new records.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Issues `"{timestamp}-{sequence}"` ids.
///
/// The sequence never repeats within one generator, so two submits landing
/// in the same millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next_seq: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, timestamp: i64) -> String {
        let seq = self.next_seq;
        self.next_seq += 1;
        format!("{timestamp}-{seq}")
    }
}
