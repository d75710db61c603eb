//! # gridseek
//!
//! Turn a click on a video's thumbnail grid into a playback timestamp, and
//! build that grid by pulling one frame per cell out of the video with
//! `ffmpeg`.
//!
//! - [`grid`] holds the pure arithmetic: sizing the grid, resolving a click
//!   to a cell, resolving a click to a seek time, formatting times.
//! - [`thumbnails`] plans the cells and drives frame extraction through a
//!   bounded worker pool, dropping cells whose extraction fails.
//! - [`ffmpeg`] wraps the `ffprobe` and `ffmpeg` binaries.
//! - [`store`] owns the upload and thumbnail directories.
//! - [`commands`] exposes request/response handlers over all of the above.
//!
//! ```
//! use gridseek::grid::{resolve_timestamp, RelativeClick};
//!
//! let t = resolve_timestamp(RelativeClick::new(0.5, 0.3), 4, 10, 100.0, Some(2.0));
//! assert_eq!(t, 28.0);
//! ```

pub mod cancel;
pub mod commands;
pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod grid;
pub mod store;
pub mod thumbnails;
pub mod types;

pub use cancel::CancellationToken;
pub use config::Settings;
pub use error::{GridError, GridResult};
pub use grid::{
    cell_span, dimension, format_time, resolve_position, resolve_timestamp, GridCell,
    GridDimensions, RelativeClick,
};
pub use thumbnails::{GenerationReport, ThumbnailCell, ThumbnailJob, ThumbnailOrchestrator};
pub use types::ErrorEnvelope;
