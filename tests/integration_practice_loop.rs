use std::time::{Duration, Instant};

use keystreak::language::{Difficulty, FixedTexts, WordPool, WordPoolProvider};
use keystreak::practice::{Practice, PracticeSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// End-to-end behaviour of the practice loop: several attempts, the
/// history they leave behind and the streak around restarts.

fn type_text(practice: &mut Practice, text: &str, start: Instant, secs: u64) {
    let first: String = text.chars().take(1).collect();
    practice.input_changed(&first, start);
    practice.input_changed(text, start + Duration::from_secs(secs));
}

#[test]
fn practice_session_records_history_in_order() {
    let mut practice = Practice::new(
        Box::new(FixedTexts::new(["the quick fox", "the lazy dog"])),
        PracticeSettings::default(),
    );
    let start = Instant::now();

    type_text(&mut practice, "the quick fox", start, 6);
    type_text(&mut practice, "the lazy dox", start, 12);
    let text = practice.current_text().to_string();
    type_text(&mut practice, &text, start, 60);

    let history = practice.history().snapshot();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.iter().map(|r| r.sequence_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(history[0].wpm, 30);
    assert_eq!(history[0].accuracy, 100);
    assert_eq!(history[1].accuracy, 92);
    assert_eq!(history[2].reference_text, "the quick fox");

    let summary = practice.summary();
    assert_eq!(summary.streak, 3);
    assert_eq!(summary.current_wpm, history[2].wpm);

    let stats = practice.history().stats().unwrap();
    assert_eq!(stats.attempts, 3);
    assert_eq!(stats.best_wpm, 30);
}

#[test]
fn restart_resets_streak_but_keeps_history() {
    let mut practice = Practice::new(
        Box::new(FixedTexts::new(["abc", "def"])),
        PracticeSettings::default(),
    );
    let start = Instant::now();

    type_text(&mut practice, "abc", start, 5);
    practice.input_changed("d", start);
    practice.restart();

    assert_eq!(practice.summary().streak, 0);
    assert_eq!(practice.history().len(), 1);
    assert_eq!(practice.current_text(), "abc");
    assert!(!practice.is_active());
}

#[test]
fn difficulty_cycle_regenerates_banded_texts() {
    let pool = WordPool::load().unwrap();
    let provider = WordPoolProvider::with_rng(&pool, StdRng::seed_from_u64(42));
    let mut practice = Practice::new(Box::new(provider), PracticeSettings::default());
    let start = Instant::now();

    let first = practice.current_text().to_string();
    type_text(&mut practice, &first, start, 10);

    for difficulty in Difficulty::ALL {
        practice.change_difficulty(difficulty);
        let band = difficulty.length_band();
        assert_eq!(practice.challenges().len(), practice.challenge_count());
        assert!(practice
            .challenges()
            .iter()
            .all(|t| band.contains(&t.chars().count())));
        assert_eq!(practice.challenge_index(), 0);
    }

    assert_eq!(practice.summary().streak, 1);
    assert_eq!(practice.history().len(), 1);

    practice.change_difficulty_by_name("unheard-of");
    assert_eq!(practice.difficulty(), Difficulty::Medium);
}
