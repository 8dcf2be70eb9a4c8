//! Countdown timer driving a page's progress.
//!
//! The timer does not own a clock. The host run loop feeds it frame
//! deltas through [`PlaybackTimer::advance`] and it answers with the
//! notifications produced during that slice of time, in tick order.

use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerEvent {
    /// Fraction of the duration elapsed, in `0.0..=1.0`.
    Progress(f64),
    /// Emitted once, when the elapsed time reaches the duration.
    Finished,
}

#[derive(Debug, Clone)]
pub struct PlaybackTimer {
    duration: Duration,
    step_interval: Duration,
    ticks: u32,
    carry: Duration, // time accumulated towards the next tick
    paused: bool,
    finished: bool,
}

impl PlaybackTimer {
    /// Creates a paused timer at `elapsed = 0`.
    pub fn new(duration: Duration, step_interval: Duration) -> Result<Self> {
        if step_interval.is_zero() {
            return Err(Error::InvalidTimer);
        }
        Ok(Self {
            duration,
            step_interval,
            ticks: 0,
            carry: Duration::ZERO,
            paused: true,
            finished: false,
        })
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn elapsed(&self) -> Duration {
        self.step_interval
            .checked_mul(self.ticks)
            .map_or(self.duration, |reached| reached.min(self.duration))
    }

    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.finished { 1.0 } else { 0.0 };
        }
        (self.elapsed().as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Resumes ticking. No-op when already playing or finished.
    pub fn play(&mut self) {
        if self.finished {
            return;
        }
        self.paused = false;
    }

    /// Halts ticking and keeps the elapsed progress. No-op when already paused.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Rewinds to `elapsed = 0`, paused.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.carry = Duration::ZERO;
        self.paused = true;
        self.finished = false;
    }

    /// Feeds `dt` of wall time into the timer.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.paused || self.finished {
            return events;
        }

        self.carry += dt;
        while self.carry >= self.step_interval && !self.finished {
            self.carry -= self.step_interval;
            self.ticks = self.ticks.saturating_add(1);

            let reached = self.step_interval.checked_mul(self.ticks).unwrap_or(Duration::MAX);
            if reached <= self.duration {
                events.push(TimerEvent::Progress(self.progress()));
            }
            if reached >= self.duration {
                self.finished = true;
                self.paused = true;
                self.carry = Duration::ZERO;
                events.push(TimerEvent::Finished);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn progress_values(events: &[TimerEvent]) -> Vec<f64> {
        events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Progress(p) => Some(*p),
                TimerEvent::Finished => None,
            })
            .collect()
    }

    #[test]
    fn ten_second_timer_reports_tenths_then_finishes() {
        let mut timer = PlaybackTimer::new(secs(10), secs(1)).unwrap();
        timer.play();

        let mut events = Vec::new();
        for _ in 0..12 {
            events.extend(timer.advance(secs(1)));
        }

        let progress = progress_values(&events);
        assert_eq!(progress.len(), 10);
        for (i, p) in progress.iter().enumerate() {
            assert!((p - (i as f64 + 1.0) / 10.0).abs() < 1e-9, "tick {} was {}", i, p);
        }
        assert_eq!(events.last(), Some(&TimerEvent::Finished));
        assert_eq!(events.iter().filter(|e| **e == TimerEvent::Finished).count(), 1);
    }

    #[test]
    fn new_timer_is_paused_and_silent() {
        let mut timer = PlaybackTimer::new(secs(3), secs(1)).unwrap();
        assert!(timer.paused());
        assert!(timer.advance(secs(5)).is_empty());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn zero_step_is_rejected() {
        assert_eq!(PlaybackTimer::new(secs(3), Duration::ZERO).unwrap_err(), Error::InvalidTimer);
    }

    #[test]
    fn pause_keeps_elapsed_and_stops_ticks() {
        let mut timer = PlaybackTimer::new(secs(10), secs(1)).unwrap();
        timer.play();
        timer.advance(secs(3));
        timer.pause();
        assert!(timer.advance(secs(4)).is_empty());
        assert_eq!(timer.elapsed(), secs(3));

        timer.play();
        assert_eq!(progress_values(&timer.advance(secs(1))).len(), 1);
        assert_eq!(timer.elapsed(), secs(4));
    }

    #[test]
    fn sub_step_deltas_accumulate() {
        let mut timer = PlaybackTimer::new(secs(1), Duration::from_millis(100)).unwrap();
        timer.play();
        let mut count = 0;
        for _ in 0..25 {
            count += progress_values(&timer.advance(Duration::from_millis(40))).len();
        }
        assert_eq!(count, 10);
        assert!(timer.is_finished());
    }

    #[test]
    fn uneven_duration_finishes_without_overshooting() {
        let mut timer = PlaybackTimer::new(secs(10), secs(3)).unwrap();
        timer.play();
        let events = timer.advance(secs(20));
        assert_eq!(progress_values(&events).len(), 3);
        assert_eq!(events.last(), Some(&TimerEvent::Finished));
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn reset_rewinds_a_finished_timer() {
        let mut timer = PlaybackTimer::new(secs(2), secs(1)).unwrap();
        timer.play();
        timer.advance(secs(2));
        assert!(timer.is_finished());

        timer.reset();
        assert!(!timer.is_finished());
        assert!(timer.paused());
        assert_eq!(timer.elapsed(), Duration::ZERO);

        timer.play();
        let events = timer.advance(secs(2));
        assert_eq!(progress_values(&events).len(), 2);
        assert_eq!(events.last(), Some(&TimerEvent::Finished));
    }

    #[test]
    fn finished_timer_ignores_play() {
        let mut timer = PlaybackTimer::new(secs(1), secs(1)).unwrap();
        timer.play();
        timer.advance(secs(1));
        timer.play();
        assert!(timer.paused());
        assert!(timer.advance(secs(1)).is_empty());
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut timer = PlaybackTimer::new(Duration::ZERO, secs(1)).unwrap();
        timer.play();
        assert_eq!(timer.advance(secs(1)), vec![TimerEvent::Finished]);
    }

    proptest! {
        #[test]
        fn emits_floor_ticks_and_one_finish(duration_ms in 1u64..5_000, step_ms in 1u64..500) {
            prop_assume!(step_ms <= duration_ms);
            let mut timer = PlaybackTimer::new(
                Duration::from_millis(duration_ms),
                Duration::from_millis(step_ms),
            ).unwrap();
            timer.play();

            let mut events = Vec::new();
            for _ in 0..(duration_ms / step_ms + 2) {
                events.extend(timer.advance(Duration::from_millis(step_ms)));
            }

            let progress = progress_values(&events);
            prop_assert_eq!(progress.len() as u64, duration_ms / step_ms);
            prop_assert!(progress.iter().all(|p| *p > 0.0 && *p <= 1.0));
            prop_assert!(progress.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(events.iter().filter(|e| **e == TimerEvent::Finished).count(), 1);
            prop_assert_eq!(events.last(), Some(&TimerEvent::Finished));
        }

        #[test]
        fn repeated_play_and_pause_are_idempotent(calls in 1usize..5, advance_ms in 0u64..3_000) {
            let dt = Duration::from_millis(advance_ms);
            let mut once = PlaybackTimer::new(secs(2), Duration::from_millis(100)).unwrap();
            let mut many = once.clone();

            once.play();
            for _ in 0..calls {
                many.play();
            }
            prop_assert_eq!(once.advance(dt), many.advance(dt));

            once.pause();
            for _ in 0..calls {
                many.pause();
            }
            prop_assert_eq!(once.advance(dt), many.advance(dt));
            prop_assert_eq!(once.elapsed(), many.elapsed());
        }
    }
}
