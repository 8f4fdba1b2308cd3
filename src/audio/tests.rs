use super::thread::{PlayDecision, play_decision};
use super::*;
use crate::config::AudioSettings;
use std::path::Path;
use std::time::Duration;

#[test]
fn generations_are_monotonic() {
    let g0 = Generation::default();
    let g1 = g0.next();
    let g2 = g1.next();
    assert!(g0 < g1 && g1 < g2);
    assert_ne!(g1, g2);
}

#[test]
fn every_event_reports_its_generation() {
    let g = Generation::default().next().next();
    let events = [
        DeviceEvent::Ready {
            generation: g,
            duration: None,
        },
        DeviceEvent::LoadFailed {
            generation: g,
            reason: "x".into(),
        },
        DeviceEvent::PlayStarted { generation: g },
        DeviceEvent::PlayFailed {
            generation: g,
            reason: "x".into(),
        },
        DeviceEvent::TimeUpdate {
            generation: g,
            position: Duration::ZERO,
            duration: Some(Duration::from_secs(1)),
        },
        DeviceEvent::Ended { generation: g },
    ];
    assert!(events.iter().all(|e| e.generation() == g));
}

// With or without a sound card, a missing file must come back as `LoadFailed`
// for the generation that asked for it.
#[test]
fn loading_a_missing_file_reports_load_failed() {
    let (mut player, events) = AudioPlayer::spawn(AudioSettings::default());
    let g = Generation::default().next();

    player.load(Path::new("/definitely/not/here.mp3"), g);
    let event = events.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!(matches!(event, DeviceEvent::LoadFailed { generation, .. } if generation == g));

    player.play(g);
    let event = events.recv_timeout(Duration::from_secs(10)).unwrap();
    assert!(matches!(event, DeviceEvent::PlayFailed { generation, .. } if generation == g));

    player.quit_softly(Duration::ZERO);
}

#[test]
fn play_for_the_loaded_generation_starts() {
    let g = Generation::default().next();
    assert_eq!(play_decision(Some((g, false)), g), PlayDecision::Start);
}

#[test]
fn play_for_a_superseded_generation_is_ignored() {
    let old = Generation::default().next();
    let new = old.next();
    assert_eq!(
        play_decision(Some((new, false)), old),
        PlayDecision::Stale { loaded: new }
    );
    // Stale wins over "ended": an old request never gets an answer.
    assert_eq!(
        play_decision(Some((new, true)), old),
        PlayDecision::Stale { loaded: new }
    );
}

#[test]
fn play_is_rejected_when_nothing_can_start() {
    let g = Generation::default().next();
    assert_eq!(
        play_decision(Some((g, true)), g),
        PlayDecision::Reject("track already ended")
    );
    assert_eq!(play_decision(None, g), PlayDecision::Reject("nothing loaded"));
}

#[test]
fn quit_passes_the_fade_duration_through() {
    let (player, _events) = AudioPlayer::spawn(AudioSettings::default());
    let fade_out = Duration::from_secs(u64::MAX);
    assert!(matches!(
        AudioCmd::Quit { fade_out },
        AudioCmd::Quit { fade_out: f } if f == fade_out
    ));
    // Nothing is playing, so no fade runs and the thread exits right away.
    player.quit_softly(fade_out);
}
