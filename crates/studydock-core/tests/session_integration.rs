//! Integration tests for full study sessions.

use std::rc::Rc;

use studydock_core::audio::{AudioCueKind, RecordingOutput};
use studydock_core::{
    Event, Phase, PhaseEngine, PhaseState, SessionConfig, SessionStatus, ToneScheduler,
};

fn run(engine: &mut PhaseEngine, ticks: u32) -> Vec<Event> {
    (0..ticks).filter_map(|_| engine.tick()).collect()
}

fn started(config: SessionConfig) -> (PhaseEngine, Rc<RecordingOutput>) {
    let rec = Rc::new(RecordingOutput::new());
    let mut engine = PhaseEngine::with_tones(config, false, ToneScheduler::with_output(rec.clone()));
    engine.toggle_running();
    (engine, rec)
}

#[test]
fn test_standard_session_timeline() {
    let (mut engine, _) = started(SessionConfig::new(25, 5, 4));

    run(&mut engine, 1500);
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.round(), 1);
    assert_eq!(engine.remaining_secs(), 300);

    run(&mut engine, 300);
    assert_eq!(engine.phase(), Phase::Study);
    assert_eq!(engine.round(), 2);

    // Through the fourth study phase: the final break is still to come.
    run(&mut engine, 6900 - 1800);
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.round(), 4);
    assert!(engine.is_running());

    let events = run(&mut engine, 300);
    assert!(matches!(
        events.last(),
        Some(Event::SessionCompleted { total_rounds: 4, .. })
    ));
    assert_eq!(engine.status(), SessionStatus::Complete);
}

#[test]
fn test_skip_final_break_completes_at_6900() {
    let config = SessionConfig::new(25, 5, 4).with_skip_final_break(true);
    let (mut engine, _) = started(config);
    run(&mut engine, 6899);
    assert!(!engine.is_complete());
    let events = run(&mut engine, 1);
    assert!(matches!(events[..], [Event::SessionCompleted { .. }]));
    assert!(engine.is_complete());
    assert!(!engine.is_running());
}

#[test]
fn test_study_phase_length_for_various_configs() {
    for (study, brk, rounds) in [(1, 1, 1), (3, 2, 5), (25, 5, 4), (50, 10, 2)] {
        for round in 1..=rounds.min(3) {
            let config = SessionConfig::new(study, brk, rounds);
            let (mut engine, _) = started(config);
            // Fast-forward to the start of `round`.
            run(&mut engine, (round - 1) * (study + brk) * 60);
            assert_eq!(engine.round(), round);
            assert_eq!(engine.phase(), Phase::Study);

            run(&mut engine, study * 60);
            assert_eq!(engine.phase(), Phase::Break, "{study}/{brk}/{rounds} r{round}");
            assert_eq!(engine.round(), round);
            assert_eq!(engine.remaining_secs(), brk * 60);

            if round < rounds {
                run(&mut engine, brk * 60);
                assert_eq!(engine.phase(), Phase::Study);
                assert_eq!(engine.round(), round + 1);
            }
        }
    }
}

#[test]
fn test_terminal_state_is_idempotent() {
    let (mut engine, rec) = started(SessionConfig::new(1, 1, 2));
    run(&mut engine, 240);
    assert!(engine.is_complete());
    let frozen = engine.state();
    let tones_at_end = rec.tones().len();

    let events = run(&mut engine, 500);
    assert!(events.is_empty());
    assert_eq!(engine.state(), frozen);
    assert_eq!(rec.tones().len(), tones_at_end);
}

#[test]
fn test_reset_from_anywhere_restores_initial_state() {
    let config = SessionConfig::new(2, 1, 3);
    for ticks in [0, 1, 119, 120, 179, 180, 400, 540, 1000] {
        let (mut engine, _) = started(config);
        run(&mut engine, ticks);
        engine.reset();
        assert_eq!(engine.state(), PhaseState::create(&config), "after {ticks} ticks");
        assert_eq!(engine.remaining_secs(), 120);
        assert_eq!(engine.phase(), Phase::Study);
        assert_eq!(engine.round(), 1);
    }
}

#[test]
fn test_round_never_exceeds_total_and_remaining_stays_below_duration() {
    let config = SessionConfig::new(1, 2, 3);
    let (mut engine, _) = started(config);
    let mut last_round = 1;
    for _ in 0..2000 {
        engine.tick();
        let state = engine.state();
        assert!(state.round >= last_round && state.round <= 3);
        last_round = state.round;
        if !state.complete {
            assert!(state.remaining_secs <= config.duration_secs(state.phase));
        }
    }
}

#[test]
fn test_cue_sequence_for_one_round() {
    let (mut engine, rec) = started(SessionConfig::new(2, 2, 2));
    run(&mut engine, 240);
    let tones = rec.tones();
    let tick = AudioCueKind::Tick.tones()[0];
    let warnings = tones.iter().filter(|t| **t == tick).count();
    // 60 warnings per phase, two phases
    assert_eq!(warnings, 120);
    assert_eq!(&tones[60..63], AudioCueKind::StudyEnd.tones());
    assert_eq!(&tones[tones.len() - 3..], AudioCueKind::BreakEnd.tones());
}
