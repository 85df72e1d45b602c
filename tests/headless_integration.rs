use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keystreak::language::FixedTexts;
use keystreak::practice::{Practice, PracticeSettings};
use keystreak::runtime::{Runner, TestEventSource, TrainerEvent};

fn key(c: char) -> TrainerEvent {
    TrainerEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn practice(texts: &[&str], tick_ms: u64) -> Practice {
    Practice::new(
        Box::new(FixedTexts::new(texts.iter().copied())),
        PracticeSettings {
            tick_interval: Duration::from_millis(tick_ms),
            ..PracticeSettings::default()
        },
    )
}

// Headless integration using the runtime + Practice without a TTY.
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut practice = practice(&["hi", "yo"], 5);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));

    tx.send(key('h')).unwrap();
    tx.send(key('i')).unwrap();

    let mut completed = None;
    for _ in 0..100u32 {
        match runner.step(practice.next_tick_deadline()) {
            TrainerEvent::Tick => {
                practice.tick(Instant::now());
            }
            TrainerEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    let value = format!("{}{c}", practice.typed_input());
                    completed = practice.input_changed(&value, Instant::now());
                    if completed.is_some() {
                        break;
                    }
                }
            }
            TrainerEvent::Paste(_) | TrainerEvent::Resize => {}
            TrainerEvent::Closed => break,
        }
    }

    let result = completed.expect("attempt should have completed");
    assert_eq!(result.sequence_number, 1);
    assert_eq!(result.accuracy, 100);
    assert_eq!(practice.current_text(), "yo");
    assert_eq!(practice.next_tick_deadline(), None);
}

#[test]
fn headless_ticks_advance_elapsed_while_active() {
    let mut practice = practice(&["hello"], 10);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));

    practice.input_changed("h", Instant::now());
    let mut ticks = 0;
    for _ in 0..5u32 {
        if let TrainerEvent::Tick = runner.step(practice.next_tick_deadline()) {
            if practice.tick(Instant::now()) {
                ticks += 1;
            }
        }
    }

    assert!(ticks > 0, "active attempt should receive ticks");
    assert!(practice.elapsed_secs() > 0.0);

    // once idle there is no deadline, so the runner only waits for input
    practice.restart();
    assert_eq!(practice.next_tick_deadline(), None);
    tx.send(TrainerEvent::Resize).unwrap();
    assert_eq!(runner.step(practice.next_tick_deadline()), TrainerEvent::Resize);
    assert!(!practice.tick(Instant::now()));
}

#[test]
fn headless_closed_source_ends_loop() {
    let practice = practice(&["hello"], 10);
    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx));
    drop(tx);

    assert_eq!(runner.step(practice.next_tick_deadline()), TrainerEvent::Closed);
}
