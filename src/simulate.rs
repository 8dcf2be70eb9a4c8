//! Headless playback on a virtual clock.
//!
//! Content "downloads" finish after a random, seeded latency and page
//! transitions settle after a fixed animation time, so a definition can
//! be exercised end to end without a window.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{FPS, PAGE_TRANSITION_DURATION};
use crate::definition::SlideshowDefinition;
use crate::error::Result;
use crate::host::{HostEvent, PagingContainer, SlideshowHost};

#[derive(Debug, Clone)]
pub struct SimulationOptions {
    pub seed: u64,
    /// Upper bound of the random content latency per page.
    pub max_latency: Duration,
    /// Virtual times at which the user taps the page.
    pub taps: Vec<Duration>,
    pub frame: Duration,
    pub transition: Duration,
    /// Defaults to four times the total step duration.
    pub time_limit: Option<Duration>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            max_latency: Duration::from_millis(500),
            taps: Vec::new(),
            frame: Duration::from_secs(1) / FPS,
            transition: Duration::from_secs_f32(PAGE_TRANSITION_DURATION),
            time_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    /// Page indices in the order they were shown.
    pub visited: Vec<usize>,
    pub taps_delivered: usize,
    pub taps_ignored: usize,
    pub progress_updates: usize,
    pub elapsed: Duration,
    pub completed: bool,
}

/// Paging container whose scroll animation takes a fixed amount of virtual time.
#[derive(Debug)]
pub struct SimulatedPager {
    transition: Duration,
    pending: Option<(usize, Duration)>,
}

impl SimulatedPager {
    pub fn new(transition: Duration) -> Self {
        Self { transition, pending: None }
    }

    /// Returns the target page once the running scroll has settled.
    pub fn tick(&mut self, dt: Duration) -> Option<usize> {
        let (target, remaining) = self.pending?;
        if remaining <= dt {
            self.pending = None;
            Some(target)
        } else {
            self.pending = Some((target, remaining - dt));
            None
        }
    }
}

impl PagingContainer for SimulatedPager {
    fn scroll_to_page(&mut self, index: usize) {
        self.pending = Some((index, self.transition));
    }
}

pub fn simulate(definition: &SlideshowDefinition, options: &SimulationOptions) -> Result<SimulationReport> {
    let pages = definition.build_pages()?;
    let total: Duration = pages.iter().map(|p| p.duration()).sum();
    let time_limit = options.time_limit.unwrap_or(total * 4);

    let mut rng = StdRng::seed_from_u64(options.seed);
    let max_latency_ms = options.max_latency.as_millis() as u64;
    let ready_at: Vec<Duration> = (0..pages.len())
        .map(|_| Duration::from_millis(rng.random_range(0..=max_latency_ms)))
        .collect();

    let mut host = SlideshowHost::new(pages, SimulatedPager::new(options.transition))?
        .with_tap_debounce(definition.settings.tap_debounce());
    let mut ready = vec![false; ready_at.len()];
    let mut taps = options.taps.clone();
    taps.sort();
    let mut taps = taps.into_iter().peekable();

    let mut report = SimulationReport { visited: vec![0], ..Default::default() };
    let mut clock = Duration::ZERO;
    host.start();

    while clock < time_limit {
        for (index, at) in ready_at.iter().enumerate() {
            if !ready[index] && *at <= clock {
                ready[index] = true;
                host.content_ready(index);
            }
        }

        while taps.peek().is_some_and(|at| *at <= clock) {
            taps.next();
            if host.tap() {
                report.taps_delivered += 1;
            } else {
                report.taps_ignored += 1;
            }
        }

        host.advance(options.frame);
        if let Some(target) = host.pager_mut().tick(options.frame) {
            host.scroll_did_end(target);
        }
        clock += options.frame;

        for event in host.drain_events() {
            match event {
                HostEvent::ProgressChanged(_) => report.progress_updates += 1,
                HostEvent::DidEndPageChanging { index } => {
                    debug!("[{:?}] now on page {}", clock, index);
                    report.visited.push(index);
                }
                HostEvent::SequenceCompleted => report.completed = true,
                other => debug!("[{:?}] {:?}", clock, other),
            }
        }
        if report.completed {
            break;
        }
    }

    report.elapsed = clock;
    info!(
        "simulation finished after {:?}: visited {:?}, completed {}",
        report.elapsed, report.visited, report.completed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(durations: &[u32]) -> SlideshowDefinition {
        let mut source = String::from("[settings]\nstep_interval_ms = 100\ntap_debounce_ms = 200\n");
        for (i, d) in durations.iter().enumerate() {
            source.push_str(&format!("[[steps]]\nlink = \"{}.jpg\"\nduration = {}\n", i, d));
        }
        SlideshowDefinition::parse(&source).unwrap()
    }

    fn options() -> SimulationOptions {
        SimulationOptions {
            frame: Duration::from_millis(10),
            transition: Duration::from_millis(300),
            ..Default::default()
        }
    }

    #[test]
    fn plays_every_page_in_order() {
        let report = simulate(&definition(&[1, 2, 1]), &options()).unwrap();
        assert!(report.completed);
        assert_eq!(report.visited, vec![0, 1, 2]);
        // four seconds of steps, two transitions and at most half a second of latency each
        assert!(report.elapsed >= Duration::from_secs(4));
        assert!(report.elapsed < Duration::from_secs(6));
    }

    #[test]
    fn same_seed_same_report() {
        let opts = SimulationOptions { seed: 42, ..options() };
        let a = simulate(&definition(&[1, 1]), &opts).unwrap();
        let b = simulate(&definition(&[1, 1]), &opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pausing_tap_stalls_playback() {
        let opts = SimulationOptions {
            max_latency: Duration::ZERO,
            taps: vec![Duration::from_millis(200)],
            time_limit: Some(Duration::from_secs(5)),
            ..options()
        };
        let report = simulate(&definition(&[1, 1]), &opts).unwrap();
        assert_eq!(report.taps_delivered, 1);
        assert!(!report.completed);
        assert_eq!(report.visited, vec![0]);
    }

    #[test]
    fn rapid_second_tap_is_debounced() {
        let opts = SimulationOptions {
            max_latency: Duration::ZERO,
            taps: vec![Duration::from_millis(200), Duration::from_millis(250), Duration::from_millis(600)],
            ..options()
        };
        let report = simulate(&definition(&[1, 1]), &opts).unwrap();
        assert_eq!(report.taps_delivered, 2);
        assert_eq!(report.taps_ignored, 1);
        assert!(report.completed);
    }

    #[test]
    fn pager_settles_after_transition_time() {
        let mut pager = SimulatedPager::new(Duration::from_millis(30));
        assert_eq!(pager.tick(Duration::from_millis(10)), None);
        pager.scroll_to_page(2);
        assert_eq!(pager.tick(Duration::from_millis(20)), None);
        assert_eq!(pager.tick(Duration::from_millis(10)), Some(2));
        assert_eq!(pager.tick(Duration::from_millis(10)), None);
    }
}
