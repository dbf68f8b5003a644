// Integration test: Command history navigation
//
// Checks the cursor invariants under random sequences of submissions and arrow
// presses, plus the documented truncation behaviour.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stepline::CommandHistory;

#[test]
fn test_navigation_walkthrough() {
    let mut history = CommandHistory::new();
    assert_eq!(history.previous(), None);
    assert_eq!(history.next(), None);

    history.add_command("a");
    history.add_command("b");
    history.add_command("c");
    assert_eq!(history.current_index(), 3);

    assert_eq!(history.previous().as_deref(), Some("c"));
    assert_eq!(history.previous().as_deref(), Some("b"));
    assert_eq!(history.previous().as_deref(), Some("a"));
    // Clamped at the oldest entry
    assert_eq!(history.previous().as_deref(), Some("a"));

    assert_eq!(history.next().as_deref(), Some("b"));
    assert_eq!(history.next().as_deref(), Some("c"));
    assert_eq!(history.next(), None);
    assert_eq!(history.next(), None);
    assert_eq!(history.get_command(), None);
}

#[test]
fn test_submission_after_navigation_truncates() {
    let mut history = CommandHistory::new();
    for command in ["a", "b", "c"] {
        history.add_command(command);
    }

    history.previous();
    history.previous();
    assert_eq!(history.get_command().as_deref(), Some("b"));

    history.add_command("d");
    assert_eq!(history.entries(), ["a", "d"]);
    assert_eq!(history.current_index(), 2);
}

#[test]
fn test_adjacent_duplicates_dropped() {
    let mut history = CommandHistory::new();
    history.add_command("play");
    history.add_command("play");
    history.add_command("stop");
    history.add_command("play");
    assert_eq!(history.entries(), ["play", "stop", "play"]);
}

#[test]
fn test_round_trip_returns_to_live_position() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let mut history = CommandHistory::new();
        for _ in 0..rng.gen_range(0..20) {
            history.add_command(&format!("tempo {}", rng.gen_range(60..64)));
        }

        while history.current_index() > 0 {
            history.previous();
        }
        while history.next().is_some() {}

        assert_eq!(history.get_command(), None);
        assert_eq!(history.current_index(), history.len());
    }
}

#[test]
fn test_random_operations_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let words = ["play", "stop", "tempo 90", "step on 1"];
    let mut history = CommandHistory::new();

    for _ in 0..5_000 {
        match rng.gen_range(0..3) {
            0 => history.add_command(words[rng.gen_range(0..words.len())]),
            1 => {
                let before = history.current_index();
                let entry = history.previous();
                assert_eq!(entry.is_some(), !history.is_empty());
                assert!(history.current_index() <= before);
            }
            _ => {
                let entry = history.next();
                assert_eq!(entry.is_none(), history.current_index() == history.len());
            }
        }

        assert!(history.current_index() <= history.len());
        let entries = history.entries();
        assert!(entries.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
