//! One slideshow step and the timer that paces it.
//!
//! A page plays only while it is both focused and its content is ready.
//! Pages never touch host state; everything they want from the host is
//! returned as a [`PageEvent`].

use std::time::Duration;

use log::info;

use crate::constants::STATE_CHANGE_ANIMATION;
use crate::error::Result;
use crate::progress::ProgressInfo;
use crate::timer::{PlaybackTimer, TimerEvent};
use crate::view_state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    ProgressChanged(ProgressInfo),
    /// The page's timer ran out.
    Finished,
    /// All content for the page has been fetched.
    ContentReady,
    ViewStateChangeRequested { state: ViewState, animation: Option<Duration> },
}

#[derive(Debug, Clone)]
pub struct SlideshowPage {
    kind: StepKind,
    link: String,
    focused: bool,
    content_ready: bool,
    show_progress_in_pause: bool,
    timer: PlaybackTimer,
}

impl SlideshowPage {
    pub fn new(kind: StepKind, link: impl Into<String>, duration: Duration, step_interval: Duration) -> Result<Self> {
        Ok(Self {
            kind,
            link: link.into(),
            focused: false,
            content_ready: false,
            show_progress_in_pause: true,
            timer: PlaybackTimer::new(duration, step_interval)?,
        })
    }

    pub fn with_progress_in_pause(mut self, show: bool) -> Self {
        self.show_progress_in_pause = show;
        self
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn is_content_ready(&self) -> bool {
        self.content_ready
    }

    pub fn is_playing(&self) -> bool {
        !self.timer.paused()
    }

    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    pub fn progress(&self) -> ProgressInfo {
        ProgressInfo::new(self.timer.progress())
    }

    pub fn duration(&self) -> Duration {
        self.timer.duration()
    }

    pub fn set_focused(&mut self, focused: bool) {
        info!("focused did set: {} ({})", focused, self.link);
        if focused && self.timer.is_finished() {
            // revisited after running out: play it again from the start
            self.timer.reset();
        }
        self.focused = focused;
        self.sync_timer();
    }

    pub fn mark_content_ready(&mut self) -> Vec<PageEvent> {
        if self.content_ready {
            return Vec::new();
        }
        info!("{:?} step did download content ({})", self.kind, self.link);
        self.content_ready = true;
        self.sync_timer();
        vec![PageEvent::ContentReady]
    }

    /// Content went away again, e.g. a video stalled while buffering.
    pub fn mark_content_unavailable(&mut self) {
        self.content_ready = false;
        self.sync_timer();
    }

    /// Toggles between playing and paused, asking the host for the matching view state.
    pub fn tap(&mut self) -> PageEvent {
        info!("step view did tap, timer.paused: {}", self.timer.paused());
        if self.timer.paused() {
            self.resume()
        } else {
            self.timer.pause();
            PageEvent::ViewStateChangeRequested {
                state: ViewState::Paused(self.show_progress_in_pause),
                animation: Some(STATE_CHANGE_ANIMATION),
            }
        }
    }

    /// Play button on the chrome.
    pub fn tap_play(&mut self) -> PageEvent {
        info!("did tap play");
        self.resume()
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<PageEvent> {
        self.timer
            .advance(dt)
            .into_iter()
            .map(|event| match event {
                TimerEvent::Progress(p) => PageEvent::ProgressChanged(ProgressInfo::new(p)),
                TimerEvent::Finished => PageEvent::Finished,
            })
            .collect()
    }

    fn resume(&mut self) -> PageEvent {
        self.sync_timer();
        PageEvent::ViewStateChangeRequested {
            state: ViewState::Close,
            animation: Some(STATE_CHANGE_ANIMATION),
        }
    }

    fn sync_timer(&mut self) {
        if self.focused && self.content_ready {
            self.timer.play();
        } else {
            self.timer.pause();
        }
    }
}
