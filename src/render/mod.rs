//! Descriptions of the render itself: engine settings, output formats and
//! render time bookkeeping.

pub mod engine;
pub mod format;
pub mod time;

pub use engine::{ComputeDevice, EngineSettings};
pub use format::{FileFormatChoice, ImageFormat};
pub use time::{
    RenderTimeLog, estimate_remaining, format_duration, format_rtime, readable_to_seconds,
    round_hundredths, seconds_to_readable,
};
