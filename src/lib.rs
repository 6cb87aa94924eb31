mod app;
mod async_task;
mod config;
mod eraser;
mod image_utils;
mod surface;
mod widget;

pub use app::run_native;
pub use config::{Config, ConfigError, WindowConfig};
pub use eraser::{CompleteCallback, OptionsError, ScratchEraser, ScratchOptions};
pub use surface::ScratchSurface;
