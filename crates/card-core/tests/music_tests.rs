// Host-side tests for the fallback tune and its one-shot gate.

use card_core::*;

#[test]
fn phrase_is_the_opening_of_happy_birthday() {
    let freqs: Vec<f32> = BIRTHDAY_PHRASE.iter().map(|n| n.frequency_hz).collect();
    assert_eq!(freqs, vec![523.25, 523.25, 587.33, 523.25, 698.46, 659.25]);
    assert_eq!(phrase_length_sec(&BIRTHDAY_PHRASE), 3.5);
    assert_eq!(phrase_length_sec(&[]), 0.0);
    // notes are laid end to end
    for pair in BIRTHDAY_PHRASE.windows(2) {
        assert_eq!(pair[0].start_sec + pair[0].duration_sec, pair[1].start_sec);
    }
}

#[test]
fn phrase_fits_inside_the_repeat_interval() {
    let loop_ms = MusicConfig::default().fallback_loop_ms as f64;
    assert!(phrase_length_sec(&BIRTHDAY_PHRASE) * 1000.0 < loop_ms);
}

#[test]
fn envelope_rises_then_decays_within_the_note() {
    let last = BIRTHDAY_PHRASE[5];
    let e = envelope(&last, 10.0);
    assert_eq!(e.start, 12.5);
    assert!((e.peak_at - 12.6).abs() < 1e-9);
    assert_eq!(e.end, 13.5);
    assert_eq!(e.peak_gain, 0.1);
    assert!(e.floor_gain > 0.0 && e.floor_gain < e.peak_gain);
    assert!(e.start < e.peak_at && e.peak_at < e.end);
}

#[test]
fn fallback_engages_once_for_many_failure_signals() {
    let mut gate = FallbackGate::default();
    assert!(!gate.is_engaged());
    assert!(gate.engage(FallbackReason::PlayRejected));
    assert!(!gate.engage(FallbackReason::MediaError));
    assert!(!gate.engage(FallbackReason::NotLoaded));
    assert_eq!(gate.reason(), Some(FallbackReason::PlayRejected));
}

#[test]
fn released_gate_can_engage_again() {
    let mut gate = FallbackGate::default();
    gate.engage(FallbackReason::NotLoaded);
    gate.release();
    assert!(!gate.is_engaged());
    assert_eq!(gate.reason(), None);
    assert!(gate.engage(FallbackReason::MediaError));
    assert_eq!(gate.reason(), Some(FallbackReason::MediaError));
}

#[test]
fn watchers_arm_once_and_survive_release() {
    let mut gate = FallbackGate::default();
    assert!(!gate.is_watching());
    assert!(gate.arm_watch());
    assert!(!gate.arm_watch());
    gate.engage(FallbackReason::MediaError);
    gate.release();
    assert!(gate.is_watching());
    assert!(!gate.arm_watch());
}

#[test]
fn load_probe_only_flags_a_silent_track_without_duration() {
    assert!(track_missing(f64::NAN, false));
    assert!(track_missing(0.0, false));
    assert!(!track_missing(31.5, false));
    // a track that is already playing is never replaced
    assert!(!track_missing(f64::NAN, true));
}
