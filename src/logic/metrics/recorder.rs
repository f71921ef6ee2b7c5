//! Metrics Recorder
//!
//! Running correctness counters plus an in-memory buffer of records that
//! have not reached the durable log yet.

use super::record::PredictionRecord;

/// `correct / total * 100`, 0 when nothing has been counted
pub fn accuracy_percent(correct: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 * 100.0) / total as f64
}

#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder {
    total: u64,
    correct: u64,
    pending: Vec<PredictionRecord>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from persisted counters (buffer starts empty)
    pub fn from_counters(total: u64, correct: u64) -> Self {
        Self {
            total,
            correct: correct.min(total),
            pending: Vec::new(),
        }
    }

    /// Count one outcome, returns accuracy after counting
    pub fn count(&mut self, is_correct: bool) -> f64 {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
        self.accuracy()
    }

    pub fn push(&mut self, record: PredictionRecord) {
        self.pending.push(record);
    }

    pub fn accuracy(&self) -> f64 {
        accuracy_percent(self.correct, self.total)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    /// Records not yet written to the durable log
    pub fn pending(&self) -> &[PredictionRecord] {
        &self.pending
    }

    /// Drop the first `n` pending records (they reached the log)
    pub fn mark_flushed(&mut self, n: usize) {
        let n = n.min(self.pending.len());
        self.pending.drain(..n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_division_guard() {
        let recorder = MetricsRecorder::new();
        assert_eq!(recorder.accuracy(), 0.0);
        assert_eq!(recorder.total(), 0);
    }

    #[test]
    fn test_accuracy_is_exact() {
        let mut recorder = MetricsRecorder::new();
        for is_correct in [true, false, true, false, true] {
            recorder.count(is_correct);
        }
        assert_eq!(recorder.total(), 5);
        assert_eq!(recorder.correct(), 3);
        assert_eq!(recorder.accuracy(), 60.0);
    }

    #[test]
    fn test_count_returns_running_accuracy() {
        let mut recorder = MetricsRecorder::new();
        assert_eq!(recorder.count(true), 100.0);
        assert_eq!(recorder.count(false), 50.0);
        assert_eq!(recorder.count(false), 100.0 / 3.0);
    }

    #[test]
    fn test_from_counters_clamps_correct() {
        let recorder = MetricsRecorder::from_counters(4, 9);
        assert_eq!(recorder.correct(), 4);
        assert_eq!(recorder.accuracy(), 100.0);
    }
}
