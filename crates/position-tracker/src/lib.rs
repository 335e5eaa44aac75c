//! Decodes `POSITION` replies into signed motor coordinates and holds the
//! logical position mirror. The device's own position state is
//! authoritative; this is a cached shadow for host-side scheduling and test
//! assertions, updated only by `read_position`.

use scan_core::{Observable, Value};

/// Reinterpret a `POSITION` reply word as a signed motor coordinate. The
/// wire carries the device's two's-complement fixed-point word unchanged.
#[must_use]
pub const fn decode_position_word(word: u64) -> i64 {
    word as i64
}

/// Cached `[i64; motors]` shadow, one entry per motor index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTracker {
    positions: Vec<i64>,
}

impl PositionTracker {
    #[must_use]
    pub fn new(motors: usize) -> Self {
        Self {
            positions: vec![0; motors],
        }
    }

    #[must_use]
    pub fn motors(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn get(&self, motor: usize) -> Option<i64> {
        self.positions.get(motor).copied()
    }

    #[must_use]
    pub fn all(&self) -> &[i64] {
        &self.positions
    }

    /// Record one motor's decoded `POSITION` reply, as read by the
    /// dispatcher's per-motor `read_position` loop. Out-of-range motor
    /// indices are ignored: the tracker's shape is fixed at construction.
    pub fn record(&mut self, motor: usize, word: u64) {
        if let Some(slot) = self.positions.get_mut(motor) {
            *slot = decode_position_word(word);
        }
    }

    /// Overwrite every motor at once, for a device that returns all
    /// coordinates in a single `POSITION` burst.
    pub fn record_all(&mut self, words: &[u64]) {
        for (slot, word) in self.positions.iter_mut().zip(words) {
            *slot = decode_position_word(*word);
        }
    }
}

impl Observable for PositionTracker {
    fn query(&self, path: &str) -> Option<Value> {
        let index: usize = path.strip_prefix("motor.")?.parse().ok()?;
        self.get(index).map(Value::from)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &["motor.<index>"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tracker_starts_at_zero() {
        let tracker = PositionTracker::new(3);
        assert_eq!(tracker.all(), &[0, 0, 0]);
    }

    #[test]
    fn record_updates_one_motor() {
        let mut tracker = PositionTracker::new(2);
        tracker.record(1, u64::MAX);
        assert_eq!(tracker.get(0), Some(0));
        assert_eq!(tracker.get(1), Some(-1));
    }

    #[test]
    fn record_out_of_range_is_ignored() {
        let mut tracker = PositionTracker::new(1);
        tracker.record(5, 42);
        assert_eq!(tracker.all(), &[0]);
    }

    #[test]
    fn record_all_overwrites_every_motor() {
        let mut tracker = PositionTracker::new(3);
        tracker.record_all(&[1, u64::MAX, 100]);
        assert_eq!(tracker.all(), &[1, -1, 100]);
    }

    #[test]
    fn observable_query_by_dotted_path() {
        let mut tracker = PositionTracker::new(2);
        tracker.record(0, 7);
        assert_eq!(tracker.query("motor.0"), Some(Value::I64(7)));
        assert_eq!(tracker.query("motor.9"), None);
        assert_eq!(tracker.query("bogus"), None);
    }
}
