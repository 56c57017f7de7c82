//! Look-ahead scheduler - precise audio timing from an imprecise timer
//!
//! The host timer that drives [`LookaheadScheduler::collect_due`] can fire
//! late by an arbitrary amount. The audio clock cannot: it is monotonic and
//! the audio engine accepts start times in the future with sample accuracy.
//! So every tick commits all beats whose target time falls inside the next
//! `schedule_ahead` seconds, however late the tick itself is. As long as a
//! tick arrives at least once per window no beat is ever late or skipped.
//!
//! ```text
//!   audio clock ──────┬──────────────────────┬──────────────────▶
//!                    now            now + schedule_ahead
//!                     │◀──── committed this tick ────▶│
//!              beat n ●        beat n+1 ●            │  beat n+2 ○ (next tick)
//! ```
//!
//! Catch-up is natural: if several beats fall in the window, all of them are
//! emitted in order, each exactly one beat after the previous.

use std::time::Duration;

use super::transport::Transport;
use crate::runtime::timer::TimerHandle;

/// Nominal period of the scheduler tick
pub const LOOKAHEAD: Duration = Duration::from_millis(25);
/// Audio-clock window committed by each tick (seconds)
pub const SCHEDULE_AHEAD: f64 = 0.1;

/// One committed beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatEvent {
    /// Beat index within the measure
    pub beat: u32,
    /// Audio-clock time the click must sound
    pub time: f64,
}

impl BeatEvent {
    /// Beat 0 of the measure carries the accent.
    pub fn is_downbeat(&self) -> bool {
        self.beat == 0
    }
}

pub struct LookaheadScheduler {
    lookahead: Duration,
    schedule_ahead: f64,
    /// Handle of the armed next tick, if any
    tick: Option<TimerHandle>,
}

impl LookaheadScheduler {
    pub fn new(lookahead: Duration, schedule_ahead: f64) -> Self {
        Self {
            lookahead,
            schedule_ahead,
            tick: None,
        }
    }

    pub fn lookahead(&self) -> Duration {
        self.lookahead
    }

    pub fn schedule_ahead(&self) -> f64 {
        self.schedule_ahead
    }

    /// Commit every beat due before `now + schedule_ahead`, advancing the
    /// transport past each one. Events come out in strictly increasing time.
    pub fn collect_due(&self, transport: &mut Transport, now: f64) -> Vec<BeatEvent> {
        let mut events = Vec::new();
        if !transport.is_running() {
            return events;
        }

        let horizon = now + self.schedule_ahead;
        while transport.next_event_time() < horizon {
            events.push(BeatEvent {
                beat: transport.current_beat(),
                time: transport.next_event_time(),
            });
            transport.advance();
        }

        if events.len() > 1 {
            log::debug!(
                "scheduler caught up {} beats at {:.3}s ({} bpm)",
                events.len(),
                now,
                transport.tempo_bpm()
            );
        }
        events
    }

    /// Remember the handle of the next armed tick.
    pub fn arm(&mut self, handle: TimerHandle) {
        self.tick = Some(handle);
    }

    /// Hand back the armed tick so the caller can cancel it.
    pub fn disarm(&mut self) -> Option<TimerHandle> {
        self.tick.take()
    }

    pub fn is_armed(&self) -> bool {
        self.tick.is_some()
    }
}

impl Default for LookaheadScheduler {
    fn default() -> Self {
        Self::new(LOOKAHEAD, SCHEDULE_AHEAD)
    }
}

/// Wall-clock delay until an event at audio time `event_time` is audible,
/// never negative.
pub fn visual_delay(event_time: f64, now: f64) -> Duration {
    Duration::from_secs_f64((event_time - now).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn first_tick_commits_window() {
        let scheduler = LookaheadScheduler::default();
        let mut transport = Transport::new(120, 4);
        transport.start(10.0);

        let events = scheduler.collect_due(&mut transport, 10.0);
        assert_eq!(events, vec![BeatEvent { beat: 0, time: 10.0 }]);
        assert!(events[0].is_downbeat());
        assert!((transport.next_event_time() - 10.5).abs() < EPS);
    }

    #[test]
    fn stopped_transport_emits_nothing() {
        let scheduler = LookaheadScheduler::default();
        let mut transport = Transport::default();
        assert!(scheduler.collect_due(&mut transport, 5.0).is_empty());
        assert_eq!(transport.current_beat(), 0);
    }

    #[test]
    fn regular_ticks_space_events_exactly() {
        let scheduler = LookaheadScheduler::default();
        let mut transport = Transport::new(137, 4);
        transport.start(0.0);

        let mut events = Vec::new();
        // 25 ms ticks with a little jitter for 20 seconds
        let mut now = 0.0;
        for i in 0..800 {
            events.extend(scheduler.collect_due(&mut transport, now));
            now += 0.025 + if i % 7 == 0 { 0.004 } else { 0.0 };
        }

        let spacing = 60.0 / 137.0;
        assert!(events.len() > 40);
        for pair in events.windows(2) {
            assert!((pair[1].time - pair[0].time - spacing).abs() < EPS);
        }
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.beat, i as u32 % 4);
        }
    }

    #[test]
    fn events_never_emitted_late() {
        let scheduler = LookaheadScheduler::default();
        let mut transport = Transport::new(600, 3);
        transport.start(0.0);

        let mut now = 0.0;
        for _ in 0..200 {
            for event in scheduler.collect_due(&mut transport, now) {
                assert!(event.time >= now - EPS, "event at {} emitted at {now}", event.time);
            }
            // ticks as late as 90 ms stay inside the window
            now += 0.09;
        }
    }

    #[test]
    fn delayed_tick_catches_up_with_two_events() {
        let scheduler = LookaheadScheduler::default();
        let mut transport = Transport::new(120, 4);
        transport.start(0.0);
        assert_eq!(scheduler.collect_due(&mut transport, 0.0).len(), 1);

        // two full beat intervals pass before the next tick
        let t = transport.next_event_time();
        let events = scheduler.collect_due(&mut transport, 0.95);
        assert_eq!(events.len(), 2);
        assert!((events[0].time - t).abs() < EPS);
        assert!((events[1].time - (t + 0.5)).abs() < EPS);
        assert_eq!((events[0].beat, events[1].beat), (1, 2));
    }

    #[test]
    fn handle_round_trip() {
        let mut scheduler = LookaheadScheduler::default();
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.disarm(), None);
    }

    #[test]
    fn visual_delay_is_clamped() {
        assert_eq!(visual_delay(1.0, 2.0), Duration::ZERO);
        assert_eq!(visual_delay(2.5, 2.0), Duration::from_millis(500));
    }
}
