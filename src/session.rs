use std::time::{Duration, Instant};

use log::debug;

use crate::scoring::{self, CharCell};
use crate::timer::ActiveTimer;

/// Lifecycle of one attempt. The start instant and tick schedule only exist
/// inside `Active`, so an idle attempt cannot carry a running timer.
#[derive(Clone, Debug, PartialEq)]
pub enum AttemptPhase {
    Idle,
    Active(ActiveTimer),
}

/// Scored outcome of an attempt that reached the reference length
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedAttempt {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: f64,
    pub reference_text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputOutcome {
    InProgress,
    Completed(CompletedAttempt),
}

/// represents the text currently being typed and how far the user got
#[derive(Clone, Debug)]
pub struct Attempt {
    reference: String,
    reference_len: usize,
    typed: String,
    phase: AttemptPhase,
    tick_interval: Duration,
}

impl Attempt {
    pub fn new(reference: impl Into<String>, tick_interval: Duration) -> Self {
        let reference = reference.into();
        Self {
            reference_len: reference.chars().count(),
            reference,
            typed: String::new(),
            phase: AttemptPhase::Idle,
            tick_interval,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, AttemptPhase::Active(_))
    }

    pub fn started_at(&self) -> Option<Instant> {
        match &self.phase {
            AttemptPhase::Active(timer) => Some(timer.started_at()),
            AttemptPhase::Idle => None,
        }
    }

    /// Elapsed seconds as of the last tick, zero when idle
    pub fn elapsed_secs(&self) -> f64 {
        match &self.phase {
            AttemptPhase::Active(timer) => timer.elapsed_secs(),
            AttemptPhase::Idle => 0.0,
        }
    }

    /// Score of the input so far, over the elapsed time of the last tick
    pub fn live_score(&self) -> scoring::Score {
        scoring::live_score(&self.typed, &self.reference, self.elapsed_secs())
    }

    pub fn next_tick_deadline(&self) -> Option<Instant> {
        match &self.phase {
            AttemptPhase::Active(timer) => Some(timer.next_deadline()),
            AttemptPhase::Idle => None,
        }
    }

    /// Apply a full input value. The first event of an attempt starts it; an
    /// input whose length equals the reference length completes it and folds
    /// the attempt back to idle with the input cleared.
    pub fn input(&mut self, value: &str, now: Instant) -> InputOutcome {
        if let AttemptPhase::Idle = self.phase {
            debug!("attempt started");
            self.phase = AttemptPhase::Active(ActiveTimer::start(now, self.tick_interval));
        }

        self.typed.clear();
        self.typed.push_str(value);

        if self.typed.chars().count() != self.reference_len {
            return InputOutcome::InProgress;
        }

        let elapsed_secs = match &self.phase {
            AttemptPhase::Active(timer) => timer.elapsed_at(now).as_secs_f64(),
            AttemptPhase::Idle => 0.0,
        };
        let score = scoring::score(&self.typed, &self.reference, elapsed_secs);

        self.reset();

        InputOutcome::Completed(CompletedAttempt {
            wpm: score.wpm,
            accuracy: score.accuracy,
            elapsed_secs,
            reference_text: self.reference.clone(),
        })
    }

    /// Refresh the elapsed reading. Returns false when idle or not yet due.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match &mut self.phase {
            AttemptPhase::Active(timer) => timer.poll(now) > 0,
            AttemptPhase::Idle => false,
        }
    }

    /// Drop any progress and the running timer, keeping the reference
    pub fn reset(&mut self) {
        self.typed.clear();
        self.phase = AttemptPhase::Idle;
    }

    /// Swap in a new reference text and reset
    pub fn load(&mut self, reference: impl Into<String>) {
        let reference = reference.into();
        self.reference_len = reference.chars().count();
        self.reference = reference;
        self.reset();
    }

    pub fn error_count(&self) -> usize {
        scoring::error_count(&self.typed, &self.reference)
    }

    pub fn characters(&self) -> Vec<CharCell> {
        scoring::classify(&self.typed, &self.reference)
    }

    pub fn progress(&self) -> f64 {
        scoring::progress(&self.typed, &self.reference)
    }
}
