use chrono::{DateTime, Local};
use itertools::Itertools;

use crate::session::CompletedAttempt;

/// A finished attempt as recorded in the session history
#[derive(Clone, Debug, PartialEq)]
pub struct AttemptResult {
    pub sequence_number: usize,
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: f64,
    pub reference_text: String,
    pub completed_at: DateTime<Local>,
}

/// Live figures shown next to the prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub current_wpm: u32,
    pub current_accuracy: u32,
    pub streak: u32,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self {
            current_wpm: 0,
            current_accuracy: 100,
            streak: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryStats {
    pub attempts: usize,
    pub mean_wpm: f64,
    pub mean_accuracy: f64,
    pub best_wpm: u32,
    pub wpm_std_dev: f64,
}

/// Append-only ledger of completed attempts, in completion order
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<AttemptResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        completed: CompletedAttempt,
        completed_at: DateTime<Local>,
    ) -> &AttemptResult {
        let result = AttemptResult {
            sequence_number: self.entries.len() + 1,
            wpm: completed.wpm,
            accuracy: completed.accuracy,
            elapsed_secs: completed.elapsed_secs,
            reference_text: completed.reference_text,
            completed_at,
        };
        self.entries.push(result);
        &self.entries[self.entries.len() - 1]
    }

    pub fn snapshot(&self) -> &[AttemptResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&AttemptResult> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> Option<HistoryStats> {
        let wpms = self
            .entries
            .iter()
            .map(|r| r.wpm as f64)
            .collect::<Vec<f64>>();
        let accuracies = self
            .entries
            .iter()
            .map(|r| r.accuracy as f64)
            .collect::<Vec<f64>>();

        let mean_wpm = mean(&wpms)?;
        let variance =
            wpms.iter().map(|w| (w - mean_wpm).powi(2)).sum::<f64>() / wpms.len() as f64;

        Some(HistoryStats {
            attempts: self.entries.len(),
            mean_wpm,
            mean_accuracy: mean(&accuracies)?,
            best_wpm: self.entries.iter().map(|r| r.wpm).max()?,
            wpm_std_dev: variance.sqrt(),
        })
    }

    /// Lowest and highest wpm recorded, used to scale the history chart
    pub fn wpm_range(&self) -> Option<(u32, u32)> {
        self.entries.iter().map(|r| r.wpm).minmax().into_option()
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(wpm: u32, accuracy: u32) -> CompletedAttempt {
        CompletedAttempt {
            wpm,
            accuracy,
            elapsed_secs: 10.0,
            reference_text: "the quick fox".to_string(),
        }
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = History::new();

        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
        assert!(history.stats().is_none());
        assert!(history.wpm_range().is_none());
    }

    #[test]
    fn test_append_assigns_sequence_numbers() {
        let mut history = History::new();

        for i in 0..5 {
            let result = history.append(completed(30 + i, 90), Local::now());
            assert_eq!(result.sequence_number, i as usize + 1);
        }

        let numbers: Vec<usize> = history
            .snapshot()
            .iter()
            .map(|r| r.sequence_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_append_preserves_earlier_entries() {
        let mut history = History::new();
        history.append(completed(40, 95), Local::now());
        let first = history.snapshot()[0].clone();

        history.append(completed(10, 50), Local::now());
        history.append(completed(20, 60), Local::now());

        assert_eq!(history.snapshot()[0], first);
        assert_eq!(history.latest().map(|r| r.wpm), Some(20));
    }

    #[test]
    fn test_append_allows_duplicates() {
        let mut history = History::new();
        history.append(completed(30, 100), Local::now());
        history.append(completed(30, 100), Local::now());

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_stats() {
        let mut history = History::new();
        history.append(completed(20, 80), Local::now());
        history.append(completed(40, 100), Local::now());

        let stats = history.stats().unwrap();
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.mean_wpm, 30.0);
        assert_eq!(stats.mean_accuracy, 90.0);
        assert_eq!(stats.best_wpm, 40);
        assert_eq!(stats.wpm_std_dev, 10.0);
    }

    #[test]
    fn test_wpm_range() {
        let mut history = History::new();
        history.append(completed(35, 80), Local::now());
        assert_eq!(history.wpm_range(), Some((35, 35)));

        history.append(completed(12, 80), Local::now());
        history.append(completed(50, 80), Local::now());
        assert_eq!(history.wpm_range(), Some((12, 50)));
    }

    #[test]
    fn test_summary_defaults() {
        let summary = SessionSummary::default();
        assert_eq!(summary.current_wpm, 0);
        assert_eq!(summary.current_accuracy, 100);
        assert_eq!(summary.streak, 0);
    }
}
