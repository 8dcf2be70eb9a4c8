//! Progress bar model: one segment per step, filled left to right.

use std::time::Duration;

/// Progress of a single page, clamped to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ProgressInfo(f64);

impl ProgressInfo {
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self(0.0);
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }
}

/// Where the sequence currently is: which step, and how far into it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressInfoState {
    pub step_index: usize,
    pub step_progress: ProgressInfo,
}

impl ProgressInfoState {
    pub fn new(step_index: usize, step_progress: f64) -> Self {
        Self { step_index, step_progress: ProgressInfo::new(step_progress) }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgressTrack {
    segments: Vec<Duration>,
    state: ProgressInfoState,
}

impl ProgressTrack {
    pub fn new(segments: Vec<Duration>) -> Self {
        Self { segments, state: ProgressInfoState::default() }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn state(&self) -> ProgressInfoState {
        self.state
    }

    pub fn update(&mut self, state: ProgressInfoState) {
        self.state = state;
    }

    /// Fill of segment `index`: full before the current step, empty after it.
    pub fn segment_fill(&self, index: usize) -> f64 {
        use std::cmp::Ordering;
        match index.cmp(&self.state.step_index) {
            Ordering::Less => 1.0,
            Ordering::Equal => self.state.step_progress.value(),
            Ordering::Greater => 0.0,
        }
    }

    /// Fraction of the whole sequence, weighted by step durations.
    pub fn overall_fraction(&self) -> f64 {
        let total: f64 = self.segments.iter().map(Duration::as_secs_f64).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let done: f64 = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, d)| d.as_secs_f64() * self.segment_fill(i))
            .sum();
        (done / total).clamp(0.0, 1.0)
    }
}
