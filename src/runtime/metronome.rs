//! Metronome - the single owner of transport, scheduler and timers
//!
//! Every callback the event loop runs is a [`Task`] popped from one
//! [`TimerQueue`]. Tasks run to completion one at a time, so the transport
//! needs no locking. Each task re-checks `running` on entry: a timer that
//! slips past a stop is a no-op, never a resurrection.

use std::time::{Duration, Instant};

use super::{
    host::{HostEvent, WakeLock, WakeLockGuard},
    timer::{TimerHandle, TimerQueue},
    visual::{pendulum_angle, BeatDisplay},
};
use crate::{
    config::MetronomeConfig,
    engine::{AudioClock, AudioEngine, Tone},
    sequencing::{
        parse_bpm_input, tempo_marking, visual_delay, LookaheadScheduler, TempoMarking, Transport,
    },
};

/// Shortest period a self-rearming task may use.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Work items the event loop dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Commit due beats, then re-arm after `lookahead`
    SchedulerTick,
    /// A committed beat became audible
    BeatVisual { beat: u32 },
    /// Push the pendulum angle, then re-arm after `frame_interval`
    AnimationFrame,
}

pub struct Metronome<E, D, W> {
    config: MetronomeConfig,
    transport: Transport,
    scheduler: LookaheadScheduler,
    engine: E,
    display: D,
    wake_lock: WakeLockGuard<W>,
    timers: TimerQueue<Task>,
    animation: Option<TimerHandle>,
    /// Beat visuals armed but not yet fired
    visuals: Vec<TimerHandle>,
    visible: bool,
    /// Set while the engine keeps rejecting tones, so only the first drop warns
    dropping: bool,
}

impl<E, D, W> Metronome<E, D, W>
where
    E: AudioEngine,
    D: BeatDisplay,
    W: WakeLock,
{
    pub fn new(config: MetronomeConfig, engine: E, display: D, wake_lock: W) -> Self {
        let transport = Transport::new(config.bpm as i64, config.beats_per_measure as i64);
        let scheduler =
            LookaheadScheduler::new(config.lookahead.max(MIN_PERIOD), config.schedule_ahead);
        Self {
            config,
            transport,
            scheduler,
            engine,
            display,
            wake_lock: WakeLockGuard::new(wake_lock),
            timers: TimerQueue::new(),
            animation: None,
            visuals: Vec::new(),
            visible: true,
            dropping: false,
        }
    }

    pub fn config(&self) -> &MetronomeConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn wake_lock(&self) -> &W {
        self.wake_lock.lock()
    }

    pub fn is_running(&self) -> bool {
        self.transport.is_running()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn holds_wake_lock(&self) -> bool {
        self.wake_lock.is_held()
    }

    pub fn tempo_marking(&self) -> TempoMarking {
        tempo_marking(self.transport.tempo_bpm())
    }

    /// Seconds since beat 0 of the current session, on the audio clock.
    pub fn elapsed(&self) -> f64 {
        self.transport.elapsed(self.engine.now())
    }

    /// Start playback with beat 0 sounding now. Does nothing when running.
    pub fn start(&mut self, now: Instant) {
        if self.transport.is_running() {
            return;
        }
        if let Err(err) = self.engine.resume() {
            log::warn!("audio engine unavailable, clicks will be dropped: {err}");
        }

        self.transport.start(self.engine.now());
        log::info!(
            "started at {} bpm, {} beats per measure",
            self.transport.tempo_bpm(),
            self.transport.beats_per_measure()
        );

        self.wake_lock.request();
        if self.visible {
            self.arm_animation(now);
        }
        self.tick(now);
    }

    /// Stop playback and cancel every pending task. Safe to call repeatedly.
    ///
    /// Tones already handed to the engine are not retracted.
    pub fn stop(&mut self) {
        let was_running = self.halt();
        self.wake_lock.release();
        if was_running {
            log::info!("stopped");
        }
    }

    /// Stop the transport and cancel its tasks, keeping the wake lock.
    /// Returns whether it was running.
    fn halt(&mut self) -> bool {
        let was_running = self.transport.is_running();
        self.transport.stop();

        if let Some(handle) = self.scheduler.disarm() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.animation.take() {
            self.timers.cancel(handle);
        }
        for handle in self.visuals.drain(..) {
            self.timers.cancel(handle);
        }

        self.display.on_reset(self.transport.beats_per_measure());
        was_running
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.transport.is_running() {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Set the tempo, clamped. While running this is a full stop/start
    /// cycle: the new tempo begins on a fresh downbeat.
    pub fn set_tempo(&mut self, bpm: i64, now: Instant) -> u32 {
        self.restarting(now, |transport, audio_now| transport.set_tempo(bpm, audio_now))
    }

    /// Step the tempo by `delta`, restarting like [`Self::set_tempo`].
    pub fn nudge_tempo(&mut self, delta: i64, now: Instant) -> u32 {
        self.restarting(now, |transport, audio_now| {
            transport.nudge_tempo(delta, audio_now)
        })
    }

    /// Apply typed BPM text. Invalid text leaves the tempo untouched and
    /// returns `None` so the caller can revert its field.
    pub fn commit_tempo_input(&mut self, input: &str, now: Instant) -> Option<u32> {
        match parse_bpm_input(input) {
            Some(bpm) => Some(self.set_tempo(bpm as i64, now)),
            None => {
                log::debug!(
                    "rejected tempo input {input:?}, keeping {} bpm",
                    self.transport.tempo_bpm()
                );
                None
            }
        }
    }

    /// Set the meter, clamped. Never restarts.
    pub fn set_beats_per_measure(&mut self, beats: i64) -> u32 {
        let beats = self.transport.set_beats_per_measure(beats);
        self.meter_changed(beats);
        beats
    }

    pub fn nudge_beats(&mut self, delta: i64) -> u32 {
        let beats = self.transport.nudge_beats(delta);
        self.meter_changed(beats);
        beats
    }

    /// React to a host notification. Never blocks.
    pub fn notify(&mut self, event: HostEvent, now: Instant) {
        let running = self.transport.is_running();
        match event {
            HostEvent::VisibilityChanged { visible } => {
                if visible == self.visible {
                    return;
                }
                self.visible = visible;
                log::debug!("visibility changed: {}", if visible { "visible" } else { "hidden" });
                if !visible {
                    if let Some(handle) = self.animation.take() {
                        self.timers.cancel(handle);
                    }
                } else if running {
                    self.arm_animation(now);
                    self.wake_lock.request();
                }
            }
            HostEvent::WakeLockReleased => {
                self.wake_lock.revoked(running && self.visible);
            }
        }
    }

    /// Check the wake lock for a host-side release.
    pub fn poll_host(&mut self, now: Instant) {
        if self.wake_lock.poll_released() {
            self.notify(HostEvent::WakeLockReleased, now);
        }
    }

    /// Earliest instant a task is due.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Run every task due at or before `now`. Returns how many ran.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let mut ran = 0;
        while let Some(task) = self.timers.pop_due(now) {
            self.dispatch(task, now);
            ran += 1;
        }
        ran
    }

    fn dispatch(&mut self, task: Task, now: Instant) {
        match task {
            Task::SchedulerTick => {
                self.scheduler.disarm();
                self.tick(now);
            }
            Task::BeatVisual { beat } => {
                if self.transport.is_running() {
                    self.display
                        .on_beat(beat, self.transport.beats_per_measure());
                }
            }
            Task::AnimationFrame => {
                self.animation = None;
                if !self.transport.is_running() || !self.visible {
                    return;
                }
                let angle = pendulum_angle(self.elapsed(), self.transport.tempo_bpm());
                self.display.on_phase(angle);
                self.arm_animation(now);
            }
        }
    }

    /// One scheduler pass: commit due beats, arm their visuals, re-arm.
    fn tick(&mut self, now: Instant) {
        if !self.transport.is_running() {
            return;
        }

        let audio_now = self.engine.now();
        let events = self.scheduler.collect_due(&mut self.transport, audio_now);
        for event in events {
            let tone = Tone {
                frequency: self.config.click.frequency_for(event.beat),
                start_time: event.time,
                duration: self.config.click.duration,
            };
            match self.engine.schedule_tone(tone) {
                Ok(()) => self.dropping = false,
                Err(err) if !self.dropping => {
                    log::warn!("dropped beat {} at {:.3}s: {err}", event.beat, event.time);
                    self.dropping = true;
                }
                Err(err) => {
                    log::trace!("dropped beat {} at {:.3}s: {err}", event.beat, event.time);
                }
            }

            let delay = visual_delay(event.time, audio_now);
            let handle = self
                .timers
                .after(now, delay, Task::BeatVisual { beat: event.beat });
            self.visuals.retain(|h| self.timers.is_pending(*h));
            self.visuals.push(handle);
        }

        let handle = self
            .timers
            .after(now, self.scheduler.lookahead(), Task::SchedulerTick);
        self.scheduler.arm(handle);
    }

    fn arm_animation(&mut self, now: Instant) {
        if self.animation.is_some() {
            return;
        }
        let period = self.config.frame_interval.max(MIN_PERIOD);
        self.animation = Some(self.timers.after(now, period, Task::AnimationFrame));
    }

    fn restarting(&mut self, now: Instant, change: impl FnOnce(&mut Transport, f64) -> u32) -> u32 {
        let running = self.halt();
        let bpm = change(&mut self.transport, self.engine.now());
        log::debug!("tempo set to {bpm} bpm ({})", tempo_marking(bpm));
        if running {
            self.start(now);
        }
        bpm
    }

    fn meter_changed(&mut self, beats: u32) {
        log::debug!("meter set to {beats} beats per measure");
        self.display.on_meter(beats);
        if !self.transport.is_running() {
            self.display.on_reset(beats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::EngineError, runtime::host::WakeLockError};

    #[derive(Default)]
    struct TestEngine {
        now: f64,
        tones: Vec<Tone>,
        fail: bool,
        resumed: usize,
    }

    impl AudioClock for TestEngine {
        fn now(&self) -> f64 {
            self.now
        }
    }

    impl AudioEngine for TestEngine {
        fn resume(&mut self) -> Result<(), EngineError> {
            self.resumed += 1;
            Ok(())
        }

        fn schedule_tone(&mut self, tone: Tone) -> Result<(), EngineError> {
            if self.fail {
                return Err(EngineError::Suspended);
            }
            self.tones.push(tone);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        beats: Vec<u32>,
        phases: Vec<f64>,
        meters: Vec<u32>,
        resets: usize,
    }

    impl BeatDisplay for Recorder {
        fn on_beat(&mut self, beat: u32, _beats_per_measure: u32) {
            self.beats.push(beat);
        }

        fn on_phase(&mut self, angle: f64) {
            self.phases.push(angle);
        }

        fn on_meter(&mut self, beats_per_measure: u32) {
            self.meters.push(beats_per_measure);
        }

        fn on_reset(&mut self, _beats_per_measure: u32) {
            self.resets += 1;
        }
    }

    #[derive(Default)]
    struct FakeLock {
        acquired: usize,
        released: usize,
        deny: bool,
        revoke: bool,
    }

    impl WakeLock for FakeLock {
        fn acquire(&mut self) -> Result<(), WakeLockError> {
            if self.deny {
                return Err(WakeLockError::Denied("battery saver".into()));
            }
            self.acquired += 1;
            Ok(())
        }

        fn release(&mut self) {
            self.released += 1;
        }

        fn poll_released(&mut self) -> bool {
            std::mem::take(&mut self.revoke)
        }
    }

    type TestMetronome = Metronome<TestEngine, Recorder, FakeLock>;

    fn metronome(bpm: i64, beats: i64) -> TestMetronome {
        let config = MetronomeConfig::default().bpm(bpm).beats(beats);
        Metronome::new(config, TestEngine::default(), Recorder::default(), FakeLock::default())
    }

    /// Move both clocks to `ms` after `t0` and run what is due.
    fn advance_to(m: &mut TestMetronome, t0: Instant, ms: u64) -> Instant {
        let now = t0 + Duration::from_millis(ms);
        m.engine.now = ms as f64 / 1000.0;
        m.run_due(now);
        now
    }

    /// Step both clocks in 5 ms increments up to `until_ms`.
    fn play(m: &mut TestMetronome, t0: Instant, from_ms: u64, until_ms: u64) -> Instant {
        let mut now = t0;
        for ms in (from_ms..=until_ms).step_by(5) {
            now = advance_to(m, t0, ms);
        }
        now
    }

    fn tone_times(m: &TestMetronome) -> Vec<f64> {
        m.engine.tones.iter().map(|t| t.start_time).collect()
    }

    #[test]
    fn start_schedules_downbeat_immediately() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);

        assert!(m.is_running());
        assert_eq!(m.engine.resumed, 1);
        assert_eq!(m.engine.tones.len(), 1);
        assert_eq!(m.engine.tones[0].start_time, 0.0);
        assert_eq!(m.engine.tones[0].frequency, 1_000.0);
        assert_eq!(m.engine.tones[0].duration, 0.05);
        assert!(m.holds_wake_lock());

        // the visual for a beat sounding now is due now
        m.run_due(t0);
        assert_eq!(m.display.beats, vec![0]);
    }

    #[test]
    fn starting_twice_does_not_restart() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        advance_to(&mut m, t0, 700);
        let before = m.transport.clone();
        m.start(t0 + Duration::from_millis(700));
        assert_eq!(m.transport, before);
        assert_eq!(m.engine.resumed, 1);
    }

    #[test]
    fn steady_playback_spaces_clicks_exactly() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        play(&mut m, t0, 0, 2_000);

        let times = tone_times(&m);
        assert_eq!(times.len(), 5);
        for pair in times.windows(2) {
            assert!((pair[1] - pair[0] - 0.5).abs() < 1e-9);
        }
        let freqs: Vec<f32> = m.engine.tones.iter().map(|t| t.frequency).collect();
        assert_eq!(freqs, vec![1_000.0, 600.0, 600.0, 600.0, 1_000.0]);

        assert!(m.display.beats.len() >= 4);
        assert_eq!(&m.display.beats[..4], &[0, 1, 2, 3]);
    }

    #[test]
    fn visuals_fire_when_the_click_sounds() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        m.run_due(t0);

        // beat 1 sounds at 0.5 s: committed around 0.4 s, shown at 0.5 s
        play(&mut m, t0, 5, 480);
        assert_eq!(m.display.beats, vec![0]);
        assert_eq!(m.engine.tones.len(), 2);
        play(&mut m, t0, 485, 510);
        assert_eq!(m.display.beats, vec![0, 1]);
    }

    #[test]
    fn delayed_tick_catches_up() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        advance_to(&mut m, t0, 25);
        assert_eq!(m.engine.tones.len(), 1);

        // the host stalls for almost a second
        advance_to(&mut m, t0, 1_000);
        let times = tone_times(&m);
        assert_eq!(times.len(), 3);
        assert!((times[1] - 0.5).abs() < 1e-9);
        assert!((times[2] - 1.0).abs() < 1e-9);
        // both late visuals fire at once, in order
        assert_eq!(m.display.beats, vec![0, 1, 2]);
    }

    #[test]
    fn stop_cancels_every_task() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        play(&mut m, t0, 0, 300);
        let tones = m.engine.tones.len();
        let phases = m.display.phases.len();
        assert!(phases > 0);

        m.stop();
        assert!(!m.is_running());
        assert!(m.timers.is_empty());
        assert_eq!(m.next_deadline(), None);
        assert_eq!(m.display.resets, 1);
        assert_eq!(m.wake_lock.lock().released, 1);

        play(&mut m, t0, 305, 2_000);
        assert_eq!(m.engine.tones.len(), tones);
        assert_eq!(m.display.phases.len(), phases);

        m.stop();
        assert_eq!(m.wake_lock.lock().released, 1);
        assert!(m.timers.is_empty());
    }

    #[test]
    fn stop_before_a_visual_fires_swallows_it() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        m.stop();
        m.run_due(t0 + Duration::from_secs(1));
        assert!(m.display.beats.is_empty());
    }

    #[test]
    fn tempo_change_while_running_restarts_on_a_downbeat() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        let now = play(&mut m, t0, 0, 600);
        assert_eq!(m.transport.current_beat(), 2);

        assert_eq!(m.set_tempo(60, now), 60);
        assert!(m.is_running());
        assert_eq!(m.transport.measure_start_time(), 0.6);
        assert_eq!(m.transport.current_beat(), 1);

        let last = m.engine.tones.last().copied();
        assert_eq!(last.map(|t| t.start_time), Some(0.6));
        assert_eq!(last.map(|t| t.frequency), Some(1_000.0));

        play(&mut m, t0, 605, 2_700);
        let times = tone_times(&m);
        let after: Vec<f64> = times.into_iter().filter(|t| *t >= 0.6).collect();
        for pair in after.windows(2) {
            assert!((pair[1] - pair[0] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tempo_nudges_while_running_keep_the_wake_lock() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        let now = play(&mut m, t0, 0, 300);
        m.nudge_tempo(1, now);
        m.nudge_tempo(5, now);
        m.set_tempo(90, now);

        assert!(m.holds_wake_lock());
        assert_eq!(m.wake_lock.lock().acquired, 1);
        assert_eq!(m.wake_lock.lock().released, 0);

        m.stop();
        assert_eq!(m.wake_lock.lock().released, 1);
    }

    #[test]
    fn tasks_left_over_after_stop_do_nothing() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        m.stop();
        let tones = m.engine.tones.len();

        let later = t0 + Duration::from_millis(500);
        m.engine.now = 0.5;
        m.dispatch(Task::SchedulerTick, later);
        m.dispatch(Task::AnimationFrame, later);
        m.dispatch(Task::BeatVisual { beat: 1 }, later);

        assert_eq!(m.engine.tones.len(), tones);
        assert!(m.display.beats.is_empty());
        assert!(m.display.phases.is_empty());
        assert!(m.timers.is_empty());
        assert!(!m.scheduler.is_armed());
    }

    #[test]
    fn tempo_change_while_stopped_stays_stopped() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        assert_eq!(m.set_tempo(1_000, t0), 600);
        assert_eq!(m.set_tempo(-4, t0), 1);
        assert!(!m.is_running());
        assert!(m.engine.tones.is_empty());
        assert_eq!(m.nudge_tempo(5, t0), 5);
        assert_eq!(m.nudge_tempo(5, t0), 10);
    }

    #[test]
    fn invalid_tempo_text_is_rejected() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        assert_eq!(m.commit_tempo_input("fast", t0), None);
        assert_eq!(m.commit_tempo_input("0", t0), None);
        assert_eq!(m.commit_tempo_input("601", t0), None);
        assert_eq!(m.transport.tempo_bpm(), 120);
        assert_eq!(m.commit_tempo_input(" 90 ", t0), Some(90));
        assert_eq!(m.transport.tempo_bpm(), 90);
        assert_eq!(m.tempo_marking(), TempoMarking::Andante);
    }

    #[test]
    fn committing_the_same_tempo_restarts() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        let now = play(&mut m, t0, 0, 700);
        assert_eq!(m.commit_tempo_input("120", now), Some(120));
        assert_eq!(m.transport.measure_start_time(), 0.7);
    }

    #[test]
    fn meter_change_redraws_without_restarting() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        play(&mut m, t0, 0, 300);
        let start = m.transport.measure_start_time();

        assert_eq!(m.set_beats_per_measure(3), 3);
        assert!(m.is_running());
        assert_eq!(m.transport.measure_start_time(), start);
        assert_eq!(m.display.meters, vec![3]);
        assert_eq!(m.display.resets, 0);

        m.stop();
        assert_eq!(m.nudge_beats(1), 4);
        assert_eq!(m.display.meters, vec![3, 4]);
        assert_eq!(m.display.resets, 2);
    }

    #[test]
    fn rejected_tones_do_not_stall_the_transport() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.engine.fail = true;
        m.start(t0);
        play(&mut m, t0, 0, 1_600);

        assert!(m.engine.tones.is_empty());
        assert!(m.is_running());
        assert_eq!(m.display.beats, vec![0, 1, 2, 3]);
        assert_eq!(m.transport.current_beat(), 0);
    }

    #[test]
    fn pendulum_follows_elapsed_time() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        advance_to(&mut m, t0, 16);
        assert_eq!(m.display.phases.len(), 1);
        let expected = pendulum_angle(0.016, 120);
        assert!((m.display.phases[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn hidden_ui_pauses_animation_not_audio() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        play(&mut m, t0, 0, 100);
        let phases = m.display.phases.len();

        m.notify(HostEvent::VisibilityChanged { visible: false }, t0 + Duration::from_millis(100));
        play(&mut m, t0, 105, 1_100);
        assert_eq!(m.display.phases.len(), phases);
        assert_eq!(m.engine.tones.len(), 3);

        let now = t0 + Duration::from_millis(1_100);
        m.notify(HostEvent::VisibilityChanged { visible: true }, now);
        play(&mut m, t0, 1_105, 1_200);
        assert!(m.display.phases.len() > phases);
    }

    #[test]
    fn revoked_wake_lock_is_reacquired_while_playing() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.start(t0);
        assert_eq!(m.wake_lock.lock().acquired, 1);

        m.wake_lock.lock_mut().revoke = true;
        m.poll_host(t0);
        assert_eq!(m.wake_lock.lock().acquired, 2);
        assert!(m.holds_wake_lock());

        // revoked while hidden: wait for visibility
        m.notify(HostEvent::VisibilityChanged { visible: false }, t0);
        m.notify(HostEvent::WakeLockReleased, t0);
        assert!(!m.holds_wake_lock());
        assert_eq!(m.wake_lock.lock().acquired, 2);
        m.notify(HostEvent::VisibilityChanged { visible: true }, t0);
        assert_eq!(m.wake_lock.lock().acquired, 3);
    }

    #[test]
    fn revoked_wake_lock_stays_released_when_stopped() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.notify(HostEvent::WakeLockReleased, t0);
        m.notify(HostEvent::VisibilityChanged { visible: false }, t0);
        m.notify(HostEvent::VisibilityChanged { visible: true }, t0);
        assert_eq!(m.wake_lock.lock().acquired, 0);
    }

    #[test]
    fn denied_wake_lock_does_not_block_playback() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.wake_lock.lock_mut().deny = true;
        m.start(t0);
        assert!(m.is_running());
        assert!(!m.holds_wake_lock());
        assert_eq!(m.engine.tones.len(), 1);
        m.stop();
        assert_eq!(m.wake_lock.lock().released, 0);
    }

    #[test]
    fn toggle_flips_running() {
        let t0 = Instant::now();
        let mut m = metronome(120, 4);
        m.toggle(t0);
        assert!(m.is_running());
        m.toggle(t0);
        assert!(!m.is_running());
    }
}
