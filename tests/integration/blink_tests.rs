//! Blink timer controller driven through its command and expiry paths.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use blinkctl::TimerError;
use blinkctl::app::blink::{BLINK_TIMER_ID, BlinkController, TimerState};
use blinkctl::app::commands::BlinkCommand;
use blinkctl::app::nibble::Nibble;
use blinkctl::app::ports::BlinkPort;
use blinkctl::config::BlinkerConfig;
use blinkctl::drivers::hw_timer::service_once;
use blinkctl::drivers::soft_timer::TimerId;

use super::mock_hw::{ManualClock, RecordingLeds, TickingClock};

fn make_blinker() -> (BlinkController<RecordingLeds, ManualClock>, RecordingLeds, ManualClock) {
    let leds = RecordingLeds::new();
    let clock = ManualClock::new();
    let blinker = BlinkController::new(BLINK_TIMER_ID, &BlinkerConfig::default(), leds.clone(), clock.clone());
    (blinker, leds, clock)
}

#[test]
fn alternates_pattern_across_two_expiries() {
    let (blinker, leds, clock) = make_blinker();
    assert_eq!(blinker.state(), TimerState::Stopped);
    assert_eq!(blinker.pattern(), Nibble::new(0b1100));

    blinker.submit(BlinkCommand::Start);
    assert!(leds.writes().is_empty(), "start has no visible effect");

    clock.set(5_000);
    assert!(service_once(&blinker));
    assert_eq!(leds.last(), Some(Nibble::new(0b1100)));
    assert_eq!(blinker.pattern(), Nibble::new(0b0011));

    clock.set(10_000);
    assert!(service_once(&blinker));
    assert_eq!(leds.writes(), vec![Nibble::new(0b1100), Nibble::new(0b0011)]);
    assert_eq!(blinker.pattern(), Nibble::new(0b1100));
    assert_eq!(blinker.snapshot().blinks, 2);
}

#[test]
fn reset_schedules_one_full_period_from_now() {
    let (blinker, _, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);

    for now in [1, 2_500, 4_999] {
        clock.set(now);
        blinker.submit(BlinkCommand::Reset);
        assert_eq!(blinker.snapshot().next_expiry_ms, Some(now + 5_000));
    }
}

#[test]
fn repeated_stop_writes_nothing() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Stop);
    blinker.submit(BlinkCommand::Stop);
    clock.set(60_000);
    assert!(!service_once(&blinker));
    assert_eq!(blinker.state(), TimerState::Stopped);
    assert_eq!(leds.count(), 0);
}

#[test]
fn stop_cancels_pending_expiry() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(4_000);
    blinker.submit(BlinkCommand::Stop);
    clock.set(6_000);
    assert!(!service_once(&blinker));
    assert_eq!(leds.count(), 0);
}

#[test]
fn change_period_restarts_count() {
    let (blinker, _, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(3_000);
    blinker.submit(BlinkCommand::ChangePeriod(Duration::from_secs(10)));

    let snap = blinker.snapshot();
    assert_eq!(snap.period, Duration::from_secs(10));
    assert_eq!(snap.next_expiry_ms, Some(13_000));
    assert_eq!(snap.state, TimerState::Armed);
}

#[test]
fn clear_while_armed_blanks_leds_and_stops() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(5_000);
    service_once(&blinker);
    assert_eq!(blinker.pattern(), Nibble::new(0b0011));

    blinker.submit(BlinkCommand::Clear);
    assert_eq!(blinker.state(), TimerState::Stopped);
    assert_eq!(leds.last(), Some(Nibble::OFF));
    assert_eq!(blinker.pattern(), Nibble::new(0b0011), "stored pattern untouched");
}

#[test]
fn reinit_while_stopped_resyncs_pattern_and_arms() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(5_000);
    service_once(&blinker);
    blinker.submit(BlinkCommand::ChangePeriod(Duration::from_secs(10)));
    blinker.submit(BlinkCommand::Stop);

    clock.set(7_000);
    blinker.submit(BlinkCommand::Reinit {
        period: Duration::from_secs(5),
        pattern: Nibble::new(0b1100),
    });

    let snap = blinker.snapshot();
    assert_eq!(snap.state, TimerState::Armed);
    assert_eq!(snap.period, Duration::from_secs(5));
    assert_eq!(snap.next_expiry_ms, Some(12_000));
    assert_eq!(snap.pattern, Nibble::new(0b1100));
    assert_eq!(leds.last(), Some(Nibble::new(0b1100)));

    // Next expiry shows the resynced pattern, not the stale complement.
    clock.set(12_000);
    service_once(&blinker);
    assert_eq!(leds.last(), Some(Nibble::new(0b1100)));
    assert_eq!(blinker.pattern(), Nibble::new(0b0011));
}

#[test]
fn foreign_expiry_is_a_no_op() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(2_000);
    let before = blinker.snapshot();

    let err = blinker.on_expire(TimerId(7)).unwrap_err();
    assert_eq!(
        err,
        TimerError::UnexpectedTimer {
            expected: BLINK_TIMER_ID,
            got: TimerId(7),
        }
    );
    assert_eq!(blinker.snapshot(), before);
    assert_eq!(leds.count(), 0);
}

#[test]
fn matching_expiry_via_callback_path() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(1_234);
    assert_eq!(blinker.on_expire(BLINK_TIMER_ID), Ok(Nibble::new(0b1100)));
    assert_eq!(leds.last(), Some(Nibble::new(0b1100)));
    assert_eq!(blinker.snapshot().next_expiry_ms, Some(6_234));
}

#[test]
fn late_expiry_after_stop_is_ignored() {
    let (blinker, leds, clock) = make_blinker();
    blinker.submit(BlinkCommand::Start);
    clock.set(4_000);
    blinker.submit(BlinkCommand::Stop);
    let before = blinker.snapshot();

    clock.set(5_000);
    assert_eq!(blinker.on_expire(BLINK_TIMER_ID), Err(TimerError::Dormant(BLINK_TIMER_ID)));
    assert_eq!(blinker.state(), TimerState::Stopped);
    assert_eq!(blinker.snapshot(), before);
    assert_eq!(blinker.pattern(), Nibble::new(0b1100));
    assert_eq!(leds.count(), 0);

    clock.set(60_000);
    assert!(!service_once(&blinker), "a late expiry must not re-arm the timer");
}

#[test]
fn foreign_id_wins_over_stopped_state() {
    let (blinker, leds, _) = make_blinker();
    let err = blinker.on_expire(TimerId(3)).unwrap_err();
    assert!(matches!(err, TimerError::UnexpectedTimer { .. }));
    assert_eq!(leds.count(), 0);
}

#[test]
fn concurrent_resets_never_move_the_deadline_backwards() {
    let blinker = Arc::new(BlinkController::new(
        BLINK_TIMER_ID,
        &BlinkerConfig::default(),
        RecordingLeds::new(),
        TickingClock::new(),
    ));
    blinker.submit(BlinkCommand::Start);

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let blinker = Arc::clone(&blinker);
            thread::spawn(move || {
                for _ in 0..500 {
                    blinker.submit(BlinkCommand::Reset);
                }
            })
        })
        .collect();

    let mut last = 0;
    for _ in 0..2_000 {
        let deadline = blinker.snapshot().next_expiry_ms.unwrap();
        assert!(deadline >= last, "deadline went from {last} to {deadline}");
        last = deadline;
    }
    for w in writers {
        w.join().unwrap();
    }
    assert_eq!(blinker.snapshot().next_expiry_ms, Some(2_001 + 5_000));
}
