use serde::Serialize;

use crate::error::{GridError, GridResult};

/// Shape of a thumbnail grid covering a whole video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridDimensions {
    pub rows: u64,
    pub columns: u32,
    pub total_cells: u64,
}

/// Derive rows and the cell count needed to cover `video_duration` with
/// cells of `seconds_per_cell`, laid out `columns` wide.
pub fn dimension(
    video_duration: f64,
    columns: u32,
    seconds_per_cell: f64,
) -> GridResult<GridDimensions> {
    if !(seconds_per_cell > 0.0) || !seconds_per_cell.is_finite() {
        return Err(GridError::invalid(format!(
            "seconds_per_cell must be a positive number, got {}",
            seconds_per_cell
        )));
    }
    if columns == 0 {
        return Err(GridError::invalid("columns must be at least 1"));
    }
    if !(video_duration >= 0.0) || !video_duration.is_finite() {
        return Err(GridError::invalid(format!(
            "video_duration must be a non-negative number, got {}",
            video_duration
        )));
    }

    let total_cells = (video_duration / seconds_per_cell).ceil() as u64;
    let rows = total_cells.div_ceil(u64::from(columns));

    Ok(GridDimensions {
        rows,
        columns,
        total_cells,
    })
}
