pub mod constants;
pub mod definition;
pub mod error;
pub mod gesture;
pub mod host;
pub mod loader;
pub mod page;
pub mod progress;
pub mod simulate;
pub mod timer;
pub mod view_state;

#[cfg(feature = "viewer")]
pub mod viewer;

pub use error::{Error, Result};
