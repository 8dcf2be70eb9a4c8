use std::time::Duration;

pub const RENDER_WIDTH: i32 = 540;            // Width of the viewer window
pub const RENDER_HEIGHT: i32 = 960;           // Height of the viewer window
pub const FPS: u32 = 60;                      // Frames per second

pub const TIMER_STEP_INTERVAL: Duration = Duration::from_millis(50);      // Progress tick granularity
pub const STATE_CHANGE_ANIMATION: Duration = Duration::from_millis(300);  // Chrome fade on view state change
pub const PAGE_TRANSITION_DURATION: f32 = 0.35;                           // Paging animation (seconds)
pub const TAP_DEBOUNCE: Duration = Duration::from_millis(200);            // Minimum gap between accepted taps
pub const DEFAULT_STEP_DURATION: u32 = 5;                                 // Seconds per step when scanning a directory

pub const SWIPE_THRESHOLD: f32 = 80.0;        // Horizontal drag (px) that counts as a page swipe
pub const PROGRESS_BAR_HEIGHT: f32 = 4.0;
pub const PROGRESS_BAR_GAP: f32 = 4.0;
pub const CLOSE_BUTTON_RADIUS: f32 = 22.0;
pub const CLOSE_BUTTON_MARGIN: f32 = 16.0;
pub const DRAG_SLOP: f32 = 20.0;              // Pointer travel (px) before a press becomes a drag
pub const DISMISS_THRESHOLD: f32 = 150.0;     // Downward drag (px) that dismisses the slideshow
