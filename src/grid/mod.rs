//! Grid arithmetic: sizing the thumbnail grid and turning clicks on it into
//! cells and playback times. Everything here is pure and synchronous.

pub mod dimension;
pub mod format;
pub mod position;
pub mod timestamp;

pub use dimension::{dimension, GridDimensions};
pub use format::format_time;
pub use position::{resolve_position, GridCell, RelativeClick};
pub use timestamp::{resolve_timestamp, TimestampMode, RESET_INTERVAL};

/// Start and end time of the cell at `grid_index`.
///
/// Without an explicit `seconds_per_cell` each cell is assumed to cover an
/// equal share of the whole video, `video_duration / (width * height)`.
pub fn cell_span(
    grid_index: u64,
    grid_width: u32,
    grid_height: u32,
    video_duration: f64,
    seconds_per_cell: Option<f64>,
) -> (f64, f64) {
    let spc = seconds_per_cell.unwrap_or_else(|| {
        video_duration / (u64::from(grid_width) * u64::from(grid_height)) as f64
    });
    let start = grid_index as f64 * spc;
    (start, start + spc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_span_uses_explicit_seconds_per_cell() {
        assert_eq!(cell_span(14, 4, 10, 100.0, Some(2.0)), (28.0, 30.0));
    }

    #[test]
    fn cell_span_falls_back_to_even_share() {
        // 100s over 40 cells
        assert_eq!(cell_span(14, 4, 10, 100.0, None), (35.0, 37.5));
    }
}
