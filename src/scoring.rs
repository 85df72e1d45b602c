//! Pure scoring functions. Every position and length here is counted in
//! `char`s, and nothing reads the clock: elapsed time is always passed in.

/// Shortest interval (in minutes) a WPM figure is computed over.
/// Anything faster than six seconds is treated as six seconds.
pub const MIN_ELAPSED_MINUTES: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Untyped,
    Correct,
    Incorrect,
}

/// One reference character as the view layer should draw it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharCell {
    pub expected: char,
    pub state: CharState,
    pub caret: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub wpm: u32,
    pub accuracy: u32,
}

fn correct_chars(typed: &str, reference: &str) -> usize {
    typed
        .chars()
        .zip(reference.chars())
        .filter(|(t, r)| t == r)
        .count()
}

/// Percentage of reference characters matched position by position.
/// An empty reference scores 0.
pub fn accuracy(typed: &str, reference: &str) -> u32 {
    let reference_len = reference.chars().count();
    if reference_len == 0 {
        return 0;
    }

    let correct = correct_chars(typed, reference);
    (100.0 * correct as f64 / reference_len as f64).round() as u32
}

pub fn word_count(reference: &str) -> usize {
    reference.split_whitespace().count()
}

/// Accuracy-weighted words per minute over the whole reference text
pub fn wpm(reference: &str, accuracy: u32, elapsed_secs: f64) -> u32 {
    let minutes = (elapsed_secs / 60.0).max(MIN_ELAPSED_MINUTES);
    let raw = word_count(reference) as f64 / minutes * (accuracy as f64 / 100.0);

    raw.round().max(0.0) as u32
}

pub fn score(typed: &str, reference: &str, elapsed_secs: f64) -> Score {
    let accuracy = accuracy(typed, reference);
    Score {
        wpm: wpm(reference, accuracy, elapsed_secs),
        accuracy,
    }
}

/// Running score of an unfinished attempt: accuracy over the typed prefix
/// and words per minute over the words typed so far. Nothing typed yet
/// reads as 0 wpm at 100%.
pub fn live_score(typed: &str, reference: &str, elapsed_secs: f64) -> Score {
    let typed_len = typed.chars().count();
    if typed_len == 0 {
        return Score {
            wpm: 0,
            accuracy: 100,
        };
    }

    let prefix: String = reference.chars().take(typed_len).collect();
    let accuracy = accuracy(typed, &prefix);
    Score {
        wpm: wpm(typed, accuracy, elapsed_secs),
        accuracy,
    }
}

/// Mismatched positions among those typed so far
pub fn error_count(typed: &str, reference: &str) -> usize {
    typed
        .chars()
        .zip(reference.chars())
        .filter(|(t, r)| t != r)
        .count()
}

pub fn classify(typed: &str, reference: &str) -> Vec<CharCell> {
    let typed: Vec<char> = typed.chars().collect();

    reference
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let state = match typed.get(idx) {
                None => CharState::Untyped,
                Some(&c) if c == expected => CharState::Correct,
                Some(_) => CharState::Incorrect,
            };

            CharCell {
                expected,
                state,
                caret: idx == typed.len(),
            }
        })
        .collect()
}

/// How far through the reference the input reaches, capped at 100
pub fn progress(typed: &str, reference: &str) -> f64 {
    let reference_len = reference.chars().count();
    if reference_len == 0 {
        return 0.0;
    }

    (typed.chars().count() as f64 / reference_len as f64 * 100.0).min(100.0)
}
