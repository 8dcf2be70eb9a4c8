//! Paging container coordinator.
//!
//! The host is the only writer of the current page index, the
//! interaction gate and the end-of-sequence flag. It forwards focus to
//! pages, consumes their [`PageEvent`]s and queues [`HostEvent`]s for the
//! embedding UI to drain once per frame.

use std::time::Duration;

use log::{debug, info, warn};

use crate::constants::STATE_CHANGE_ANIMATION;
use crate::error::{Error, Result};
use crate::page::{PageEvent, SlideshowPage};
use crate::progress::{ProgressInfoState, ProgressTrack};
use crate::view_state::{Chrome, ChromeChange, CloseButtonIcon, SlideshowChrome, ViewState};

/// The scrollable, page-snapping widget the host drives.
///
/// Implementations animate to the requested page and report back through
/// [`SlideshowHost::scroll_did_end`] once the scroll has settled.
pub trait PagingContainer {
    fn scroll_to_page(&mut self, index: usize);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    WillBeginPageChanging,
    DidEndPageChanging { index: usize },
    ProgressChanged(ProgressInfoState),
    ChromeChanged(ChromeChange),
    PageContentReady { index: usize },
    SequenceCompleted,
    DismissRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Started { target: usize },
    /// A transition is already in flight.
    Ignored,
    /// There is no next page; the sequence is over.
    SequenceCompleted,
}

pub struct SlideshowHost<P> {
    pages: Vec<SlideshowPage>,
    pager: P,
    current_page_index: usize,
    user_interaction_enabled: bool,
    chrome: SlideshowChrome,
    progress: ProgressTrack,
    tap_debounce: Duration,
    clock: Duration,
    last_tap: Option<Duration>,
    events: Vec<HostEvent>,
}

impl<P: PagingContainer> SlideshowHost<P> {
    pub fn new(pages: Vec<SlideshowPage>, pager: P) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::EmptySlideshow);
        }
        let progress = ProgressTrack::new(pages.iter().map(SlideshowPage::duration).collect());
        Ok(Self {
            pages,
            pager,
            current_page_index: 0,
            user_interaction_enabled: true,
            chrome: SlideshowChrome::new(),
            progress,
            tap_debounce: Duration::ZERO,
            clock: Duration::ZERO,
            last_tap: None,
            events: Vec::new(),
        })
    }

    pub fn with_tap_debounce(mut self, debounce: Duration) -> Self {
        self.tap_debounce = debounce;
        self
    }

    /// Focuses the first page.
    pub fn start(&mut self) {
        info!("slideshow start with {} pages", self.pages.len());
        self.refocus();
        self.publish_progress();
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[SlideshowPage] {
        &self.pages
    }

    pub fn current_page(&self) -> &SlideshowPage {
        &self.pages[self.current_page_index]
    }

    pub fn user_interaction_enabled(&self) -> bool {
        self.user_interaction_enabled
    }

    pub fn progress_ended(&self) -> bool {
        self.chrome.progress_ended()
    }

    pub fn view_state(&self) -> ViewState {
        self.chrome.view_state()
    }

    pub fn chrome(&self) -> Chrome {
        self.chrome.chrome()
    }

    pub fn progress_track(&self) -> &ProgressTrack {
        &self.progress
    }

    pub fn pager(&self) -> &P {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut P {
        &mut self.pager
    }

    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Runs page timers forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        let mut page_events = Vec::new();
        for (index, page) in self.pages.iter_mut().enumerate() {
            page_events.extend(page.advance(dt).into_iter().map(|event| (index, event)));
        }
        for (index, event) in page_events {
            self.handle_page_event(index, event);
        }
    }

    pub fn move_to_next_page(&mut self) -> MoveOutcome {
        if !self.user_interaction_enabled {
            debug!("move to next page ignored, transition in flight");
            return MoveOutcome::Ignored;
        }
        let target = self.current_page_index + 1;
        if target >= self.pages.len() {
            self.complete_sequence();
            return MoveOutcome::SequenceCompleted;
        }
        info!("move to next page");
        self.begin_transition();
        self.pager.scroll_to_page(target);
        MoveOutcome::Started { target }
    }

    /// The user started dragging the paging container.
    pub fn scroll_will_begin_dragging(&mut self) -> bool {
        if !self.user_interaction_enabled || !self.chrome.paging_enabled() {
            debug!("scroll view drag ignored");
            return false;
        }
        info!("scroll view will begin dragging");
        self.begin_transition();
        true
    }

    /// The paging container settled on `index` after a drag or an animated scroll.
    pub fn scroll_did_end(&mut self, index: usize) {
        if self.user_interaction_enabled {
            debug!("scroll view did end without a pending transition");
            return;
        }
        info!("scroll view did end on page {}", index);
        self.current_page_index = index.min(self.pages.len() - 1);
        self.events.push(HostEvent::DidEndPageChanging { index: self.current_page_index });
        self.user_interaction_enabled = true;
        self.refocus();
        if self.chrome.view_state().is_paused() {
            // the newly focused page plays, so the chrome must not stay paused
            self.request_view_state(ViewState::Close, Some(STATE_CHANGE_ANIMATION));
        }
        self.publish_progress();
    }

    /// Tap on the page content. Returns whether the tap was delivered.
    pub fn tap(&mut self) -> bool {
        if !self.accept_tap() {
            return false;
        }
        let event = self.pages[self.current_page_index].tap();
        self.handle_page_event(self.current_page_index, event);
        true
    }

    /// Tap on the close button; its meaning depends on the icon shown.
    pub fn tap_close(&mut self) -> bool {
        if !self.user_interaction_enabled {
            return false;
        }
        match self.chrome.close_icon() {
            CloseButtonIcon::Play => {
                let event = self.pages[self.current_page_index].tap_play();
                self.handle_page_event(self.current_page_index, event);
            }
            CloseButtonIcon::Close | CloseButtonIcon::Dismiss => {
                self.events.push(HostEvent::DismissRequested);
            }
        }
        true
    }

    /// View state change coming from outside the pages (dismiss drag, full screen).
    pub fn request_view_state(&mut self, state: ViewState, animation: Option<Duration>) {
        if let Some(change) = self.chrome.update(state, animation) {
            self.events.push(HostEvent::ChromeChanged(change));
        }
    }

    pub fn content_ready(&mut self, index: usize) {
        let Some(page) = self.pages.get_mut(index) else {
            warn!("content ready for unknown page {}", index);
            return;
        };
        for event in page.mark_content_ready() {
            self.handle_page_event(index, event);
        }
    }

    pub fn content_unavailable(&mut self, index: usize) {
        if let Some(page) = self.pages.get_mut(index) {
            page.mark_content_unavailable();
        }
    }

    fn accept_tap(&mut self) -> bool {
        if !self.user_interaction_enabled {
            debug!("tap ignored, transition in flight");
            return false;
        }
        if let Some(last) = self.last_tap {
            if self.clock.saturating_sub(last) < self.tap_debounce {
                debug!("tap ignored, debounce");
                return false;
            }
        }
        self.last_tap = Some(self.clock);
        true
    }

    fn begin_transition(&mut self) {
        self.user_interaction_enabled = false;
        self.events.push(HostEvent::WillBeginPageChanging);
        self.pages[self.current_page_index].set_focused(false);
    }

    fn refocus(&mut self) {
        let current = self.current_page_index;
        for (index, page) in self.pages.iter_mut().enumerate() {
            if index != current && page.focused() {
                page.set_focused(false);
            }
        }
        self.pages[current].set_focused(true);
    }

    fn publish_progress(&mut self) {
        let state = ProgressInfoState {
            step_index: self.current_page_index,
            step_progress: self.pages[self.current_page_index].progress(),
        };
        self.progress.update(state);
        self.events.push(HostEvent::ProgressChanged(state));
    }

    fn complete_sequence(&mut self) {
        if let Some(change) = self.chrome.set_progress_ended(true) {
            info!("slideshow sequence completed");
            self.events.push(HostEvent::ChromeChanged(change));
            self.events.push(HostEvent::SequenceCompleted);
        }
    }

    fn handle_page_event(&mut self, index: usize, event: PageEvent) {
        match event {
            PageEvent::ProgressChanged(progress) => {
                if index == self.current_page_index {
                    let state = ProgressInfoState { step_index: index, step_progress: progress };
                    self.progress.update(state);
                    self.events.push(HostEvent::ProgressChanged(state));
                }
            }
            PageEvent::Finished => {
                if index == self.current_page_index {
                    self.move_to_next_page();
                }
            }
            PageEvent::ContentReady => self.events.push(HostEvent::PageContentReady { index }),
            PageEvent::ViewStateChangeRequested { state, animation } => {
                if index == self.current_page_index {
                    self.request_view_state(state, animation);
                }
            }
        }
    }
}
