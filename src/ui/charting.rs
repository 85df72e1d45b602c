use keystreak::history::History;

/// Attempt number against wpm
pub fn wpm_points(history: &History) -> Vec<(f64, f64)> {
    history
        .snapshot()
        .iter()
        .map(|r| (r.sequence_number as f64, r.wpm as f64))
        .collect()
}

/// Attempt number against accuracy percentage
pub fn accuracy_points(history: &History) -> Vec<(f64, f64)> {
    history
        .snapshot()
        .iter()
        .map(|r| (r.sequence_number as f64, r.accuracy as f64))
        .collect()
}

/// Compute X (attempt) and Y (WPM and accuracy) upper bounds for the
/// history chart. The x axis spans at least two attempts so a single point
/// still has room; the y axis always fits a 100% accuracy line and leaves a
/// little headroom above the best wpm.
pub fn compute_chart_params(history: &History) -> (f64, f64) {
    let attempts = (history.len() as f64).max(2.0);
    let highest_wpm = match history.wpm_range() {
        Some((_, max)) => ((max as f64 * 1.1) / 10.0).ceil() * 10.0,
        None => 0.0,
    };

    (attempts, highest_wpm.max(100.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use keystreak::session::CompletedAttempt;

    fn history_with(wpms: &[u32]) -> History {
        let mut history = History::new();
        for &wpm in wpms {
            history.append(
                CompletedAttempt {
                    wpm,
                    accuracy: 100 - wpm % 10,
                    elapsed_secs: 10.0,
                    reference_text: "text".into(),
                },
                Local::now(),
            );
        }
        history
    }

    #[test]
    fn test_compute_chart_params_empty() {
        let (x, y) = compute_chart_params(&History::new());
        assert_eq!(x, 2.0);
        assert_eq!(y, 100.0);
    }

    #[test]
    fn test_compute_chart_params_fits_accuracy_line() {
        let history = history_with(&[30, 72, 45]);
        let (x, y) = compute_chart_params(&history);
        assert_eq!(x, 3.0);
        assert_eq!(y, 100.0);
    }

    #[test]
    fn test_compute_chart_params_scales_to_fast_attempts() {
        let history = history_with(&[120, 150]);
        let (_, y) = compute_chart_params(&history);
        assert_eq!(y, 170.0);
    }

    #[test]
    fn test_wpm_points() {
        let history = history_with(&[30, 40]);
        assert_eq!(wpm_points(&history), vec![(1.0, 30.0), (2.0, 40.0)]);
    }

    #[test]
    fn test_accuracy_points() {
        let history = history_with(&[30, 47]);
        assert_eq!(accuracy_points(&history), vec![(1.0, 100.0), (2.0, 93.0)]);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
