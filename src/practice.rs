use std::time::{Duration, Instant};

use chrono::Local;
use log::{debug, info};

use crate::history::{AttemptResult, History, SessionSummary};
use crate::language::{Difficulty, TextProvider, DEFAULT_CHALLENGE_COUNT};
use crate::scoring::CharCell;
use crate::session::{Attempt, InputOutcome};
use crate::timer::TICK_RATE_MS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PracticeSettings {
    pub difficulty: Difficulty,
    pub challenge_count: usize,
    pub tick_interval: Duration,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            challenge_count: DEFAULT_CHALLENGE_COUNT,
            tick_interval: Duration::from_millis(TICK_RATE_MS),
        }
    }
}

/// The round-robin practice loop: challenge texts, the attempt in progress,
/// the history of finished attempts and the streak.
pub struct Practice {
    provider: Box<dyn TextProvider>,
    difficulty: Difficulty,
    challenge_count: usize,
    challenges: Vec<String>,
    index: usize,
    attempt: Attempt,
    history: History,
    streak: u32,
}

impl Practice {
    pub fn new(mut provider: Box<dyn TextProvider>, settings: PracticeSettings) -> Self {
        let challenges = provider.generate(settings.difficulty, settings.challenge_count);
        let first = challenges.first().cloned().unwrap_or_default();

        Self {
            provider,
            difficulty: settings.difficulty,
            challenge_count: settings.challenge_count,
            challenges,
            index: 0,
            attempt: Attempt::new(first, settings.tick_interval),
            history: History::new(),
            streak: 0,
        }
    }

    /// Feed the full current input value. Returns the history entry when this
    /// input completed the attempt.
    pub fn input_changed(&mut self, value: &str, now: Instant) -> Option<AttemptResult> {
        let InputOutcome::Completed(completed) = self.attempt.input(value, now) else {
            return None;
        };

        let result = self.history.append(completed, Local::now()).clone();
        self.streak += 1;
        info!(
            "attempt {} complete: {} wpm, {}% acc, streak {}",
            result.sequence_number, result.wpm, result.accuracy, self.streak
        );

        self.advance();
        Some(result)
    }

    /// Refresh the elapsed reading; a no-op unless an attempt is running
    pub fn tick(&mut self, now: Instant) -> bool {
        self.attempt.on_tick(now)
    }

    /// When the next tick is due, if an attempt is running at all
    pub fn next_tick_deadline(&self) -> Option<Instant> {
        self.attempt.next_tick_deadline()
    }

    /// Back to the first challenge with a clean slate. History is kept.
    pub fn restart(&mut self) {
        debug!("restart");
        self.rewind();
        self.streak = 0;
    }

    /// Regenerate the challenge texts for `difficulty` and start over from
    /// the first one. History and streak are kept.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        debug!("difficulty {} -> {}", self.difficulty, difficulty);
        self.difficulty = difficulty;
        self.challenges = self.provider.generate(difficulty, self.challenge_count);
        self.rewind();
    }

    pub fn change_difficulty_by_name(&mut self, name: &str) {
        self.change_difficulty(Difficulty::from_name(name));
    }

    fn advance(&mut self) {
        self.index = match self.challenges.len() {
            0 => 0,
            len => (self.index + 1) % len,
        };
        let next = self.current_challenge();
        self.attempt.load(next);
    }

    fn rewind(&mut self) {
        self.index = 0;
        let first = self.current_challenge();
        self.attempt.load(first);
    }

    fn current_challenge(&self) -> String {
        self.challenges.get(self.index).cloned().unwrap_or_default()
    }

    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary {
            streak: self.streak,
            ..SessionSummary::default()
        };
        if let Some(latest) = self.history.latest() {
            summary.current_wpm = latest.wpm;
            summary.current_accuracy = latest.accuracy;
        }
        summary
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_text(&self) -> &str {
        self.attempt.reference()
    }

    pub fn typed_input(&self) -> &str {
        self.attempt.typed()
    }

    pub fn is_active(&self) -> bool {
        self.attempt.is_active()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.attempt.elapsed_secs()
    }

    pub fn error_count(&self) -> usize {
        self.attempt.error_count()
    }

    pub fn characters(&self) -> Vec<CharCell> {
        self.attempt.characters()
    }

    pub fn progress(&self) -> f64 {
        self.attempt.progress()
    }

    /// Words per minute of the attempt in progress; 0 when idle
    pub fn live_wpm(&self) -> u32 {
        self.attempt.live_score().wpm
    }

    /// Accuracy of the attempt in progress; 100 when idle
    pub fn live_accuracy(&self) -> u32 {
        self.attempt.live_score().accuracy
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn challenge_index(&self) -> usize {
        self.index
    }

    pub fn challenges(&self) -> &[String] {
        &self.challenges
    }

    /// Number of texts requested per round; fixed prompts may differ
    pub fn challenge_count(&self) -> usize {
        self.challenge_count
    }
}
