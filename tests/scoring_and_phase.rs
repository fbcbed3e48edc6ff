//! Integration tests for the pure rules: battle scoring and bracket phases.

use startup_rush::logic::first_round;
use startup_rush::{resolve_phase, score, EngineError, EventFlags, Round};

#[test]
fn phase_for_supported_counts() {
    assert_eq!(resolve_phase(1), Ok(Round::Final));
    assert_eq!(resolve_phase(2), Ok(Round::Final));
    assert_eq!(resolve_phase(3), Ok(Round::Semifinal));
    assert_eq!(resolve_phase(4), Ok(Round::Semifinal));
    assert_eq!(resolve_phase(6), Ok(Round::Quarterfinal));
    assert_eq!(resolve_phase(8), Ok(Round::Quarterfinal));
}

#[test]
fn phase_rejects_every_other_count() {
    for n in (0..=20).filter(|n| ![1, 2, 3, 4, 6, 8].contains(n)) {
        assert_eq!(resolve_phase(n), Err(EngineError::InvalidBracketSize(n)), "count {n}");
    }
}

#[test]
fn rounds_are_ordered() {
    assert!(Round::Quarterfinal < Round::Semifinal);
    assert!(Round::Semifinal < Round::Final);
}

#[test]
fn opening_round_depends_only_on_entrants() {
    assert_eq!(first_round(4), Round::Semifinal);
    assert_eq!(first_round(6), Round::Quarterfinal);
    assert_eq!(first_round(8), Round::Quarterfinal);
}

#[test]
fn score_matches_weighted_sum_for_all_combinations() {
    for bits in 0u8..32 {
        let flags = EventFlags {
            persuasive_pitch: bits & 1 != 0,
            buggy_product: bits & 2 != 0,
            user_traction: bits & 4 != 0,
            investor_upset: bits & 8 != 0,
            fake_news: bits & 16 != 0,
        };
        let expected = [6, -4, 3, -6, -8]
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, w)| w)
            .sum::<i32>();
        assert_eq!(score(&flags), expected, "flags {flags:?}");
    }
}

#[test]
fn score_extremes() {
    assert_eq!(score(&EventFlags::default()), 0);
    let all = EventFlags {
        persuasive_pitch: true,
        buggy_product: true,
        user_traction: true,
        investor_upset: true,
        fake_news: true,
    };
    assert_eq!(score(&all), -9);
}
