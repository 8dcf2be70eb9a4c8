//! Slideshow definition files.
//!
//! ```toml
//! [settings]
//! step_interval_ms = 50
//! tap_debounce_ms = 200
//! show_progress_in_pause = true
//!
//! [[steps]]
//! kind = "image"
//! link = "promo/01.jpg"
//! duration = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{TAP_DEBOUNCE, TIMER_STEP_INTERVAL};
use crate::error::{Error, Result};
use crate::loader::load_sorted_image_paths;
use crate::page::{SlideshowPage, StepKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub step_interval_ms: u64,
    pub tap_debounce_ms: u64,
    pub show_progress_in_pause: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step_interval_ms: TIMER_STEP_INTERVAL.as_millis() as u64,
            tap_debounce_ms: TAP_DEBOUNCE.as_millis() as u64,
            show_progress_in_pause: true,
        }
    }
}

impl Settings {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn tap_debounce(&self) -> Duration {
        Duration::from_millis(self.tap_debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    #[serde(default)]
    pub kind: StepKind,
    pub link: String,
    /// Seconds.
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideshowDefinition {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl SlideshowDefinition {
    pub fn parse(source: &str) -> Result<Self> {
        let definition: Self = toml::from_str(source)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Loads a definition file; relative links resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let mut definition = Self::parse(&source)?;
        definition.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(definition)
    }

    /// One image step per picture in `dir`, in file name order.
    pub fn from_directory(dir: &Path, duration: u32) -> Result<Self> {
        let steps = load_sorted_image_paths(dir)?
            .into_iter()
            .map(|path| StepDefinition {
                kind: StepKind::Image,
                link: path.to_string_lossy().into_owned(),
                duration,
            })
            .collect();
        let definition = Self { settings: Settings::default(), steps, base_dir: PathBuf::new() };
        definition.validate()?;
        Ok(definition)
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::EmptySlideshow);
        }
        if self.settings.step_interval_ms == 0 {
            return Err(Error::InvalidTimer);
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.duration == 0 {
                return Err(Error::InvalidStep { index, reason: "duration must be at least one second".into() });
            }
            if step.link.trim().is_empty() {
                return Err(Error::InvalidStep { index, reason: "link is empty".into() });
            }
        }
        Ok(())
    }

    pub fn resolve_link(&self, link: &str) -> PathBuf {
        let path = Path::new(link);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn build_pages(&self) -> Result<Vec<SlideshowPage>> {
        self.steps
            .iter()
            .map(|step| {
                Ok(SlideshowPage::new(
                    step.kind,
                    step.link.clone(),
                    Duration::from_secs(u64::from(step.duration)),
                    self.settings.step_interval(),
                )?
                .with_progress_in_pause(self.settings.show_progress_in_pause))
            })
            .collect()
    }
}
