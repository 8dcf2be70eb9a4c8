//! Slideshow view state and the chrome derived from it.
//!
//! Transitions are requested from outside (host, pages, the embedding UI).
//! Every change recomputes the whole [`Chrome`] snapshot that the renderer
//! consumes.

use std::time::Duration;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Normal playback.
    #[default]
    Close,
    /// Being dragged away.
    Dismiss,
    /// Playback paused by the user; the flag keeps the progress bar on screen.
    Paused(bool),
    /// All chrome hidden.
    FullScreen,
}

impl ViewState {
    pub fn is_paused(self) -> bool {
        matches!(self, ViewState::Paused(_))
    }

    /// `Some(visible)` for paused states, `None` otherwise.
    pub fn paused_progress_visible(self) -> Option<bool> {
        match self {
            ViewState::Paused(visible) => Some(visible),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseButtonIcon {
    #[default]
    Close,
    Dismiss,
    Play,
}

/// Declarative chrome pushed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    pub close_icon: CloseButtonIcon,
    pub close_opacity: f32,
    pub progress_visible: bool,
    pub paging_enabled: bool,
}

/// A chrome change together with how long it should take to animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeChange {
    pub chrome: Chrome,
    pub animation: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct SlideshowChrome {
    view_state: ViewState,
    progress_ended: bool,
    close_icon: CloseButtonIcon,
}

impl SlideshowChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_state(&self) -> ViewState {
        self.view_state
    }

    pub fn progress_ended(&self) -> bool {
        self.progress_ended
    }

    pub fn close_icon(&self) -> CloseButtonIcon {
        self.close_icon
    }

    /// Moves to `state`. Returns `None` when the state is unchanged.
    pub fn update(&mut self, state: ViewState, animation: Option<Duration>) -> Option<ChromeChange> {
        if self.view_state == state {
            return None;
        }
        debug!("view state {:?} -> {:?}", self.view_state, state);
        self.view_state = state;
        self.close_icon = match state {
            ViewState::Close => CloseButtonIcon::Close,
            ViewState::Dismiss => CloseButtonIcon::Dismiss,
            ViewState::Paused(_) => CloseButtonIcon::Play,
            // full screen hides the button but keeps its icon
            ViewState::FullScreen => self.close_icon,
        };
        Some(ChromeChange { chrome: self.chrome(), animation })
    }

    pub fn set_progress_ended(&mut self, ended: bool) -> Option<ChromeChange> {
        if self.progress_ended == ended {
            return None;
        }
        self.progress_ended = ended;
        Some(ChromeChange { chrome: self.chrome(), animation: None })
    }

    pub fn progress_visible(&self) -> bool {
        if self.progress_ended {
            false
        } else if let Some(visible) = self.view_state.paused_progress_visible() {
            visible
        } else {
            self.view_state == ViewState::Close
        }
    }

    pub fn paging_enabled(&self) -> bool {
        !self.progress_ended && self.view_state == ViewState::Close
    }

    pub fn chrome(&self) -> Chrome {
        Chrome {
            close_icon: self.close_icon,
            close_opacity: if self.view_state == ViewState::FullScreen { 0.0 } else { 1.0 },
            progress_visible: self.progress_visible(),
            paging_enabled: self.paging_enabled(),
        }
    }
}
