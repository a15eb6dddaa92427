use super::*;

#[test]
fn countdown_reaches_exactly_zero_then_expires_once() {
    let mut countdown = Countdown::new(3);
    assert_eq!(countdown.tick(), TickOutcome::Running(2));
    assert_eq!(countdown.tick(), TickOutcome::Running(1));
    assert_eq!(countdown.tick(), TickOutcome::Expired);
    assert_eq!(countdown.remaining(), 0);
    assert!(countdown.is_stopped());
}

#[test]
fn ticks_after_expiry_do_not_decrement() {
    let mut countdown = Countdown::new(1);
    assert_eq!(countdown.tick(), TickOutcome::Expired);
    for _ in 0..5 {
        assert_eq!(countdown.tick(), TickOutcome::Stopped);
    }
    assert_eq!(countdown.remaining(), 0);
}

#[test]
fn stopped_countdown_keeps_remaining_time() {
    let mut countdown = Countdown::new(90);
    countdown.tick();
    countdown.stop();
    assert_eq!(countdown.tick(), TickOutcome::Stopped);
    assert_eq!(countdown.remaining(), 89);
}

#[test]
fn zero_duration_expires_on_first_tick() {
    let mut countdown = Countdown::new(0);
    assert_eq!(countdown.tick(), TickOutcome::Expired);
    assert_eq!(countdown.tick(), TickOutcome::Stopped);
}

#[test]
fn running_low_below_one_minute() {
    assert!(!Countdown::new(61).is_running_low());
    assert!(Countdown::new(60).is_running_low());
    let mut stopped = Countdown::new(10);
    stopped.stop();
    assert!(!stopped.is_running_low());
}

#[test]
fn format_clock_pads_minutes_and_seconds() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(65), "01:05");
    assert_eq!(format_clock(59 * 60 + 59), "59:59");
    assert_eq!(format_clock(3600 + 2 * 60 + 3), "1:02:03");
}
