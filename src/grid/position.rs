use serde::{Deserialize, Serialize};

/// Largest relative coordinate a click may resolve from. Keeps a click on
/// the far edge inside the last cell.
const MAX_REL: f64 = 0.9999;

/// A click normalised against the rendered grid, nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeClick {
    pub rel_x: f64,
    pub rel_y: f64,
}

impl RelativeClick {
    pub fn new(rel_x: f64, rel_y: f64) -> Self {
        Self { rel_x, rel_y }
    }
}

/// One grid square, by row/column and linear index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub index: u64,
}

fn clamp_rel(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_REL)
}

/// Resolve a click to the grid cell under it.
///
/// Never fails: out-of-range clicks are clamped onto the grid, and a grid
/// with a zero dimension resolves everything to cell 0.
pub fn resolve_position(click: RelativeClick, grid_width: u32, grid_height: u32) -> GridCell {
    if grid_width == 0 || grid_height == 0 {
        return GridCell {
            row: 0,
            col: 0,
            index: 0,
        };
    }

    let safe_x = clamp_rel(click.rel_x);
    let safe_y = clamp_rel(click.rel_y);

    let grid_x = (safe_x * f64::from(grid_width)).floor() as u32;
    let grid_y = (safe_y * f64::from(grid_height)).floor() as u32;

    // Second bound check against float rounding near MAX_REL.
    let grid_x = grid_x.min(grid_width - 1);
    let grid_y = grid_y.min(grid_height - 1);

    let index = u64::from(grid_y) * u64::from(grid_width) + u64::from(grid_x);

    let max_index = u64::from(grid_width) * u64::from(grid_height) - 1;
    debug_assert!(
        index <= max_index,
        "grid index {} escaped the clamped bounds (max {})",
        index,
        max_index
    );
    let index = index.min(max_index);

    GridCell {
        row: grid_y,
        col: grid_x,
        index,
    }
}
