use std::time::Duration;

use promo_slideshow::host::{HostEvent, MoveOutcome, PagingContainer, SlideshowHost};
use promo_slideshow::page::{SlideshowPage, StepKind};
use promo_slideshow::view_state::{CloseButtonIcon, ViewState};

#[derive(Default)]
struct Pager {
    scrolls: Vec<usize>,
}

impl PagingContainer for Pager {
    fn scroll_to_page(&mut self, index: usize) {
        self.scrolls.push(index);
    }
}

fn slideshow(durations: &[u64]) -> SlideshowHost<Pager> {
    let pages = durations
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let kind = if i % 2 == 0 { StepKind::Image } else { StepKind::Video };
            SlideshowPage::new(kind, format!("step-{}", i), Duration::from_secs(*d), Duration::from_secs(1)).unwrap()
        })
        .collect();
    SlideshowHost::new(pages, Pager::default()).unwrap()
}

fn progress(events: &[HostEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            HostEvent::ProgressChanged(state) => Some(state.step_progress.value()),
            _ => None,
        })
        .collect()
}

#[test]
fn full_sequence_plays_through_every_page() {
    let mut host = slideshow(&[10, 3]);
    host.start();
    host.content_ready(0);
    host.content_ready(1);
    host.drain_events();

    for _ in 0..10 {
        host.advance(Duration::from_secs(1));
    }
    let events = host.drain_events();
    let first = progress(&events);
    assert_eq!(first.len(), 10);
    assert!((first[0] - 0.1).abs() < 1e-9);
    assert_eq!(first[9], 1.0);
    assert_eq!(events.last(), Some(&HostEvent::WillBeginPageChanging));
    assert_eq!(host.pager().scrolls, vec![1]);

    host.scroll_did_end(1);
    assert_eq!(host.current_page_index(), 1);
    for _ in 0..3 {
        host.advance(Duration::from_secs(1));
    }
    assert!(host.drain_events().contains(&HostEvent::SequenceCompleted));
    assert!(host.progress_ended());
    assert_eq!(host.current_page_index(), 1);
}

#[test]
fn focused_page_starts_once_content_arrives() {
    let mut host = slideshow(&[4]);
    host.start();
    host.advance(Duration::from_secs(3));
    assert!(progress(&host.drain_events()).iter().all(|p| *p == 0.0));

    host.content_ready(0);
    host.advance(Duration::from_secs(1));
    let events = host.drain_events();
    assert_eq!(events[0], HostEvent::PageContentReady { index: 0 });
    assert_eq!(progress(&events), vec![0.25]);
}

#[test]
fn tap_round_trip_switches_view_state_and_close_icon() {
    let mut host = slideshow(&[5, 5]);
    host.start();
    host.content_ready(0);

    host.tap();
    assert_eq!(host.view_state(), ViewState::Paused(true));
    assert_eq!(host.chrome().close_icon, CloseButtonIcon::Play);
    host.advance(Duration::from_secs(3));
    assert_eq!(host.current_page().progress().value(), 0.0);

    host.tap();
    assert_eq!(host.view_state(), ViewState::Close);
    assert_eq!(host.chrome().close_icon, CloseButtonIcon::Close);
    host.advance(Duration::from_secs(1));
    assert!((host.current_page().progress().value() - 0.2).abs() < 1e-9);
}

#[test]
fn next_page_during_transition_is_ignored() {
    let mut host = slideshow(&[2, 2, 2]);
    host.start();
    assert_eq!(host.move_to_next_page(), MoveOutcome::Started { target: 1 });
    assert_eq!(host.move_to_next_page(), MoveOutcome::Ignored);
    assert!(!host.scroll_will_begin_dragging());
    assert!(!host.user_interaction_enabled());

    host.scroll_did_end(1);
    assert!(host.user_interaction_enabled());
    assert_eq!(host.move_to_next_page(), MoveOutcome::Started { target: 2 });
    assert_eq!(host.pager().scrolls, vec![1, 2]);
}

#[test]
fn dismiss_drag_changes_chrome_and_blocks_paging() {
    let mut host = slideshow(&[2, 2]);
    host.start();
    host.drain_events();

    host.request_view_state(ViewState::Dismiss, None);
    assert_eq!(host.chrome().close_icon, CloseButtonIcon::Dismiss);
    assert!(!host.chrome().paging_enabled);
    assert!(!host.scroll_will_begin_dragging());

    host.tap_close();
    assert!(host.drain_events().contains(&HostEvent::DismissRequested));
}
