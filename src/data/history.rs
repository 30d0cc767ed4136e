//! Historical tracking of message totals for the trend sparkline.

use std::collections::VecDeque;
use std::time::Instant;

/// Maximum number of summary samples to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Rolling window of `total_messages` readings.
///
/// Only successful summary fetches are recorded, so a failing endpoint
/// simply stops adding samples.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Total message count at each sample.
    pub totals: VecDeque<u64>,
    /// When each sample was taken.
    pub timestamps: VecDeque<Instant>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new total message count.
    pub fn record(&mut self, total_messages: u64, at: Instant) {
        self.totals.push_back(total_messages);
        if self.totals.len() > MAX_HISTORY_SIZE {
            self.totals.pop_front();
        }

        self.timestamps.push_back(at);
        if self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
    }

    /// Sparkline levels (0-7) for the growth between consecutive samples.
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline(&self) -> Vec<u8> {
        if self.totals.len() < 2 {
            return Vec::new();
        }

        let deltas: Vec<i64> = self
            .totals
            .iter()
            .zip(self.totals.iter().skip(1))
            .map(|(a, b)| *b as i64 - *a as i64)
            .collect();

        let max = deltas.iter().copied().max().unwrap_or(1).max(1);
        let min = deltas.iter().copied().min().unwrap_or(0).min(0);
        let range = (max - min).max(1) as f64;

        deltas
            .iter()
            .map(|&v| {
                let normalized = ((v - min) as f64 / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }

    /// New messages per second between the last two samples.
    ///
    /// Returns None if there's not enough history to calculate a rate.
    pub fn rate(&self) -> Option<f64> {
        if self.totals.len() < 2 || self.timestamps.len() < 2 {
            return None;
        }

        let current = *self.totals.back()?;
        let previous = *self.totals.get(self.totals.len() - 2)?;
        let delta = current as i64 - previous as i64;

        let current_time = self.timestamps.back()?;
        let previous_time = self.timestamps.get(self.timestamps.len() - 2)?;
        let elapsed = current_time.duration_since(*previous_time).as_secs_f64();

        if elapsed > 0.0 {
            Some(delta as f64 / elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sparkline_needs_two_samples() {
        let mut history = History::new();
        assert!(history.sparkline().is_empty());
        history.record(10, Instant::now());
        assert!(history.sparkline().is_empty());
    }

    #[test]
    fn test_sparkline_levels() {
        let mut history = History::new();
        let start = Instant::now();
        for (i, total) in [0u64, 0, 7, 14].iter().enumerate() {
            history.record(*total, start + Duration::from_secs(i as u64));
        }
        assert_eq!(history.sparkline(), vec![0, 7, 7]);
    }

    #[test]
    fn test_rate() {
        let mut history = History::new();
        let start = Instant::now();
        history.record(100, start);
        history.record(110, start + Duration::from_secs(2));
        assert_eq!(history.rate(), Some(5.0));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        let start = Instant::now();
        for i in 0..(MAX_HISTORY_SIZE as u64 + 10) {
            history.record(i, start + Duration::from_millis(i));
        }
        assert_eq!(history.totals.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.timestamps.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.totals.front(), Some(&10));
    }
}
