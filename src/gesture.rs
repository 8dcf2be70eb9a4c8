//! Pointer gestures over the slideshow.
//!
//! A press becomes a tap, a horizontal page swipe or a downward
//! pan-to-dismiss. Once the pointer leaves the drag slop the gesture is
//! decided for good; a drag the host refuses is swallowed and never
//! turns into a tap on release.

use crate::constants::{DISMISS_THRESHOLD, DRAG_SLOP, STATE_CHANGE_ANIMATION, SWIPE_THRESHOLD};
use crate::host::{PagingContainer, SlideshowHost};
use crate::view_state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pressed,
    Paging,
    Dismissing,
    Refused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// The pointer never left the slop; routing (page or close button) is up to the caller.
    Tap { x: f32, y: f32 },
    Swiped { target: usize },
    Dismissed,
    DismissCancelled,
    Ignored,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerGesture {
    x: f32,
    y: f32,
    phase: Phase,
}

impl PointerGesture {
    pub fn press(x: f32, y: f32) -> Self {
        Self { x, y, phase: Phase::Pressed }
    }

    pub fn is_paging(&self) -> bool {
        self.phase == Phase::Paging
    }

    /// Horizontal travel since the press.
    pub fn dx(&self, x: f32) -> f32 {
        x - self.x
    }

    /// How far the content should follow the pointer down.
    pub fn dismiss_offset(&self, y: f32) -> f32 {
        if self.phase == Phase::Dismissing { (y - self.y).max(0.0) } else { 0.0 }
    }

    pub fn moved<P: PagingContainer>(&mut self, host: &mut SlideshowHost<P>, x: f32, y: f32) {
        if self.phase != Phase::Pressed {
            return;
        }
        let (dx, dy) = (x - self.x, y - self.y);
        if dx.abs().max(dy.abs()) <= DRAG_SLOP {
            return;
        }

        self.phase = if dy > 0.0 && dy.abs() > dx.abs() {
            if host.user_interaction_enabled() && host.view_state() == ViewState::Close {
                host.request_view_state(ViewState::Dismiss, None);
                Phase::Dismissing
            } else {
                Phase::Refused
            }
        } else if dx.abs() > dy.abs() && host.scroll_will_begin_dragging() {
            Phase::Paging
        } else {
            Phase::Refused
        };
    }

    pub fn release<P: PagingContainer>(self, host: &mut SlideshowHost<P>, x: f32, y: f32) -> GestureEnd {
        match self.phase {
            Phase::Pressed => GestureEnd::Tap { x: self.x, y: self.y },
            Phase::Refused => GestureEnd::Ignored,
            Phase::Paging => {
                let dx = x - self.x;
                let current = host.current_page_index();
                let target = if dx < -SWIPE_THRESHOLD && current + 1 < host.page_count() {
                    current + 1
                } else if dx > SWIPE_THRESHOLD && current > 0 {
                    current - 1
                } else {
                    current
                };
                host.pager_mut().scroll_to_page(target);
                GestureEnd::Swiped { target }
            }
            Phase::Dismissing => {
                if y - self.y > DISMISS_THRESHOLD {
                    host.tap_close();
                    GestureEnd::Dismissed
                } else {
                    host.request_view_state(ViewState::Close, Some(STATE_CHANGE_ANIMATION));
                    GestureEnd::DismissCancelled
                }
            }
        }
    }
}
