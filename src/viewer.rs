//! Raylib window playing a slideshow definition.
//!
//! Pictures are loaded one per frame so pages become ready progressively,
//! the way they would while downloading. Mouse: click to pause/resume,
//! drag horizontally to change page, drag down to dismiss, click the round
//! button for the close/play action. Keys: Right = next page, Space = tap, F = full screen.

use std::time::Duration;

use anyhow::{Result, anyhow};
use log::{info, warn};
use raylib::prelude::*;

use crate::constants::*;
use crate::definition::SlideshowDefinition;
use crate::gesture::{GestureEnd, PointerGesture};
use crate::host::{HostEvent, PagingContainer, SlideshowHost};
use crate::loader::{ImageFile, Orientation, load_image_file};
use crate::page::StepKind;
use crate::view_state::{Chrome, CloseButtonIcon, ViewState};

struct Scroll {
    tween: ease::Tween,
    target: usize,
    elapsed: f32,
}

/// Horizontal strip of pages; `offset` is measured in pages.
struct ViewerPager {
    offset: f32,
    scroll: Option<Scroll>,
}

impl ViewerPager {
    fn new() -> Self {
        Self { offset: 0.0, scroll: None }
    }

    /// Advances the running scroll; returns the page it settled on.
    fn update(&mut self, dt: f32) -> Option<usize> {
        let scroll = self.scroll.as_mut()?;
        scroll.elapsed += dt;
        self.offset = scroll.tween.apply(dt);
        if scroll.elapsed < PAGE_TRANSITION_DURATION {
            return None;
        }
        let target = scroll.target;
        self.offset = target as f32;
        self.scroll = None;
        Some(target)
    }

    fn drag(&mut self, page: usize, dx: f32, width: f32) {
        self.offset = page as f32 - dx / width;
    }
}

impl PagingContainer for ViewerPager {
    fn scroll_to_page(&mut self, index: usize) {
        self.scroll = Some(Scroll {
            tween: ease::Tween::new(ease::cubic_out, self.offset, index as f32, PAGE_TRANSITION_DURATION),
            target: index,
            elapsed: 0.0,
        });
    }
}

/// Opacity easing toward the values the chrome asks for.
struct ChromeFade {
    close: f32,
    progress: f32,
    rate: f32,
}

impl ChromeFade {
    fn new() -> Self {
        Self { close: 1.0, progress: 1.0, rate: 1.0 / STATE_CHANGE_ANIMATION.as_secs_f32() }
    }

    fn retime(&mut self, animation: Option<Duration>) {
        self.rate = match animation {
            Some(d) if !d.is_zero() => 1.0 / d.as_secs_f32(),
            _ => f32::INFINITY,
        };
    }

    fn update(&mut self, chrome: &Chrome, dt: f32) {
        let step = self.rate * dt;
        let target_progress = if chrome.progress_visible { 1.0 } else { 0.0 };
        self.close = approach(self.close, chrome.close_opacity, step);
        self.progress = approach(self.progress, target_progress, step);
    }
}

fn approach(value: f32, target: f32, step: f32) -> f32 {
    if (target - value).abs() <= step {
        target
    } else if target > value {
        value + step
    } else {
        value - step
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

fn load_texture(rl: &mut RaylibHandle, thread: &RaylibThread, file: &ImageFile) -> Result<Texture2D> {
    let mut image = Image::load_image_from_mem(&format!(".{}", file.extension), &file.bytes)
        .map_err(|e| anyhow!("failed to decode {}: {}", file.path.display(), e))?;
    match file.orientation {
        Orientation::Rotate180 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Orientation::Rotate90Cw => image.rotate_cw(),
        Orientation::Rotate90Ccw => image.rotate_ccw(),
        Orientation::Normal => {}
    }
    rl.load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("failed to create texture for {}: {}", file.path.display(), e))
}

fn close_button_center() -> Vector2 {
    let offset = CLOSE_BUTTON_MARGIN + CLOSE_BUTTON_RADIUS;
    Vector2::new(offset, offset + PROGRESS_BAR_HEIGHT + PROGRESS_BAR_GAP)
}

fn hits_close_button(point: Vector2) -> bool {
    let c = close_button_center();
    (point.x - c.x).hypot(point.y - c.y) <= CLOSE_BUTTON_RADIUS
}

fn draw_close_button(d: &mut RaylibDrawHandle, icon: CloseButtonIcon, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let c = close_button_center();
    let r = CLOSE_BUTTON_RADIUS * 0.4;
    let fg = with_alpha(Color::BLACK, alpha);
    d.draw_circle_v(c, CLOSE_BUTTON_RADIUS, with_alpha(Color::WHITE, alpha * 0.85));
    match icon {
        CloseButtonIcon::Close => {
            d.draw_line_ex(Vector2::new(c.x - r, c.y - r), Vector2::new(c.x + r, c.y + r), 3.0, fg);
            d.draw_line_ex(Vector2::new(c.x - r, c.y + r), Vector2::new(c.x + r, c.y - r), 3.0, fg);
        }
        CloseButtonIcon::Dismiss => {
            d.draw_line_ex(Vector2::new(c.x - r, c.y - r * 0.5), Vector2::new(c.x, c.y + r * 0.5), 3.0, fg);
            d.draw_line_ex(Vector2::new(c.x, c.y + r * 0.5), Vector2::new(c.x + r, c.y - r * 0.5), 3.0, fg);
        }
        CloseButtonIcon::Play => {
            d.draw_triangle(
                Vector2::new(c.x - r * 0.7, c.y - r),
                Vector2::new(c.x - r * 0.7, c.y + r),
                Vector2::new(c.x + r, c.y),
                fg,
            );
        }
    }
}

fn draw_progress<P>(d: &mut RaylibDrawHandle, host: &SlideshowHost<P>, width: f32, alpha: f32)
where
    P: PagingContainer,
{
    if alpha <= 0.0 {
        return;
    }
    let track = host.progress_track();
    let count = track.segment_count().max(1) as f32;
    let segment = (width - PROGRESS_BAR_GAP * (count + 1.0)) / count;
    for i in 0..track.segment_count() {
        let x = PROGRESS_BAR_GAP + i as f32 * (segment + PROGRESS_BAR_GAP);
        d.draw_rectangle_rec(
            Rectangle::new(x, PROGRESS_BAR_GAP, segment, PROGRESS_BAR_HEIGHT),
            with_alpha(Color::WHITE, alpha * 0.35),
        );
        d.draw_rectangle_rec(
            Rectangle::new(x, PROGRESS_BAR_GAP, segment * track.segment_fill(i) as f32, PROGRESS_BAR_HEIGHT),
            with_alpha(Color::WHITE, alpha),
        );
    }
}

pub fn run(definition: &SlideshowDefinition) -> Result<()> {
    let pages = definition.build_pages()?;
    let links: Vec<(StepKind, String)> = pages.iter().map(|p| (p.kind(), p.link().to_string())).collect();
    let mut host = SlideshowHost::new(pages, ViewerPager::new())?
        .with_tap_debounce(definition.settings.tap_debounce());

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Promo Slideshow")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut textures: Vec<Option<Texture2D>> = links.iter().map(|_| None).collect();
    let mut next_to_load = 0;
    let mut fade = ChromeFade::new();
    let mut gesture: Option<PointerGesture> = None;
    let mut finished = false;

    host.start();

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let width = rl.get_screen_width() as f32;
        let height = rl.get_screen_height() as f32;

        // --- Content loading, one page per frame ---
        if next_to_load < links.len() {
            let (kind, link) = &links[next_to_load];
            if *kind == StepKind::Image {
                match load_image_file(&definition.resolve_link(link))
                    .map_err(anyhow::Error::from)
                    .and_then(|file| load_texture(&mut rl, &thread, &file))
                {
                    Ok(texture) => textures[next_to_load] = Some(texture),
                    Err(e) => warn!("{}", e),
                }
            }
            host.content_ready(next_to_load);
            next_to_load += 1;
        }

        // --- Input ---
        let mouse = rl.get_mouse_position();
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            gesture = Some(PointerGesture::press(mouse.x, mouse.y));
        }
        if let Some(active) = gesture.as_mut() {
            active.moved(&mut host, mouse.x, mouse.y);
            if active.is_paging() {
                let current = host.current_page_index();
                host.pager_mut().drag(current, active.dx(mouse.x), width);
            }
        }
        if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(ended) = gesture.take() {
                if let GestureEnd::Tap { x, y } = ended.release(&mut host, mouse.x, mouse.y) {
                    if hits_close_button(Vector2::new(x, y)) {
                        host.tap_close();
                    } else {
                        host.tap();
                    }
                }
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            host.move_to_next_page();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            host.tap();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_F) {
            let state = if host.view_state() == ViewState::FullScreen { ViewState::Close } else { ViewState::FullScreen };
            host.request_view_state(state, Some(STATE_CHANGE_ANIMATION));
        }

        // --- Update ---
        host.advance(Duration::from_secs_f32(dt));
        if let Some(settled) = host.pager_mut().update(dt) {
            host.scroll_did_end(settled);
        }

        let mut dismiss = false;
        for event in host.drain_events() {
            match event {
                HostEvent::ChromeChanged(change) => fade.retime(change.animation),
                HostEvent::SequenceCompleted => finished = true,
                HostEvent::DismissRequested => dismiss = true,
                _ => {}
            }
        }
        if dismiss {
            info!("slideshow dismissed");
            break;
        }
        let chrome = host.chrome();
        fade.update(&chrome, dt);

        // --- Render ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let offset = host.pager().offset;
        let sink = gesture.map_or(0.0, |g| g.dismiss_offset(mouse.y));
        for (i, (kind, link)) in links.iter().enumerate() {
            let x = (i as f32 - offset) * width;
            if x <= -width || x >= width {
                continue;
            }
            match &textures[i] {
                Some(texture) => {
                    let tw = texture.width() as f32;
                    let th = texture.height() as f32;
                    let scale = (width / tw).min(height / th);
                    let (w, h) = (tw * scale, th * scale);
                    d.draw_texture_pro(
                        texture,
                        Rectangle::new(0.0, 0.0, tw, th),
                        Rectangle::new(x + (width - w) * 0.5, (height - h) * 0.5 + sink, w, h),
                        Vector2::new(0.0, 0.0),
                        0.0,
                        Color::WHITE,
                    );
                }
                None => {
                    let label = match kind {
                        StepKind::Video => format!("video: {}", link),
                        StepKind::Image if i >= next_to_load => "loading...".to_string(),
                        StepKind::Image => format!("unavailable: {}", link),
                    };
                    d.draw_text(&label, (x + 20.0) as i32, (height * 0.5 + sink) as i32, 20, Color::GRAY);
                }
            }
        }

        draw_progress(&mut d, &host, width, fade.progress);
        draw_close_button(&mut d, chrome.close_icon, fade.close);
        if finished {
            d.draw_text("The end", (width * 0.5 - 40.0) as i32, (height - 60.0) as i32, 24, Color::WHITE);
        }
    }

    Ok(())
}
