//! Arcade variant: single words against a per-level countdown, scored by
//! word length and accuracy, with a persisted high score.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::highscore::HighScoreStore;
use crate::language::ArcadeLevel;
use crate::timer::ActiveTimer;

/// Extra seconds granted on reaching a new level
pub const LEVEL_UP_BONUS_SECS: u32 = 5;
const POINTS_PER_CHAR: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum ArcadePhase {
    Ready,
    Playing(ActiveTimer),
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

pub struct Arcade<R: Rng = ThreadRng> {
    levels: Vec<ArcadeLevel>,
    level: usize,
    phase: ArcadePhase,
    current_word: String,
    input: String,
    score: u32,
    high_score: u32,
    high_score_at_start: u32,
    time_left: u32,
    words_typed: u32,
    level_words: usize,
    mistakes: u32,
    accuracy: u32,
    feedback: Option<Feedback>,
    store: Box<dyn HighScoreStore>,
    rng: R,
}

impl Arcade<ThreadRng> {
    pub fn new(levels: Vec<ArcadeLevel>, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_rng(levels, store, rand::thread_rng())
    }
}

impl<R: Rng> Arcade<R> {
    pub fn with_rng(levels: Vec<ArcadeLevel>, store: Box<dyn HighScoreStore>, rng: R) -> Self {
        let high_score = store.read().unwrap_or(0);
        let mut arcade = Self {
            levels,
            level: 0,
            phase: ArcadePhase::Ready,
            current_word: String::new(),
            input: String::new(),
            score: 0,
            high_score,
            high_score_at_start: high_score,
            time_left: 0,
            words_typed: 0,
            level_words: 0,
            mistakes: 0,
            accuracy: 100,
            feedback: None,
            store,
            rng,
        };
        arcade.time_left = arcade.level_time();
        arcade.next_word();
        arcade
    }

    pub fn start(&mut self, now: Instant) {
        debug!("arcade round started at level {}", self.level + 1);
        self.phase = ArcadePhase::Playing(ActiveTimer::start(now, Duration::from_secs(1)));
        self.time_left = self.level_time();
        self.score = 0;
        self.words_typed = 0;
        self.level_words = 0;
        self.mistakes = 0;
        self.accuracy = 100;
        self.input.clear();
        self.feedback = None;
        self.high_score_at_start = self.high_score;
    }

    /// Apply the full input value. Ignored unless a round is being played.
    pub fn input_changed(&mut self, value: &str) {
        if !self.is_playing() {
            return;
        }
        self.input = value.to_string();

        if !value.is_empty() && !self.current_word.starts_with(value) {
            self.mistakes += 1;
            self.accuracy = self.words_typed * 100 / (self.words_typed + self.mistakes);
            self.feedback = Some(Feedback::Incorrect);
        }

        if value.trim().to_lowercase() == self.current_word.to_lowercase() {
            self.word_completed();
        }
    }

    fn word_completed(&mut self) {
        let points = (self.current_word.chars().count() as u32 * POINTS_PER_CHAR * self.accuracy)
            .div_ceil(100);
        self.score += points;
        self.words_typed += 1;
        self.level_words += 1;
        self.input.clear();
        self.feedback = Some(Feedback::Correct);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.write(self.score);
        }

        let level_size = self.levels.get(self.level).map_or(0, |l| l.words.len());
        if self.level_words >= level_size && self.level + 1 < self.levels.len() {
            self.level += 1;
            self.level_words = 0;
            self.time_left = self.level_time() + LEVEL_UP_BONUS_SECS;
            info!("arcade level {} reached", self.level + 1);
        }

        self.next_word();
    }

    /// Count down one second per elapsed tick; ends the round at zero
    pub fn tick(&mut self, now: Instant) -> bool {
        let ArcadePhase::Playing(timer) = &mut self.phase else {
            return false;
        };

        let due = timer.poll(now);
        if due == 0 {
            return false;
        }

        self.time_left = self.time_left.saturating_sub(due);
        if self.time_left == 0 {
            info!("arcade round over: score {}", self.score);
            self.phase = ArcadePhase::Over;
        }
        true
    }

    pub fn next_tick_deadline(&self) -> Option<Instant> {
        match &self.phase {
            ArcadePhase::Playing(timer) => Some(timer.next_deadline()),
            _ => None,
        }
    }

    pub fn restart(&mut self) {
        self.level = 0;
        self.score = 0;
        self.phase = ArcadePhase::Ready;
        self.input.clear();
        self.feedback = None;
        self.time_left = self.level_time();
        self.next_word();
    }

    fn level_time(&self) -> u32 {
        self.levels.get(self.level).map_or(0, |l| l.time_secs)
    }

    fn next_word(&mut self) {
        self.current_word = self
            .levels
            .get(self.level)
            .and_then(|l| l.words.choose(&mut self.rng))
            .cloned()
            .unwrap_or_default();
    }

    pub fn phase(&self) -> &ArcadePhase {
        &self.phase
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, ArcadePhase::Playing(_))
    }

    /// Zero-based index of the current level
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn current_level(&self) -> Option<&ArcadeLevel> {
        self.levels.get(self.level)
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the score of this round beat the best known when it started
    pub fn is_new_high_score(&self) -> bool {
        self.score > self.high_score_at_start
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn words_typed(&self) -> u32 {
        self.words_typed
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Share of the current level's words typed, capped at 100
    pub fn level_progress(&self) -> f64 {
        match self.current_level() {
            Some(level) if !level.words.is_empty() => {
                (self.level_words as f64 / level.words.len() as f64 * 100.0).min(100.0)
            }
            _ => 0.0,
        }
    }
}
