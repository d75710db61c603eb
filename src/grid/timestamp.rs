use super::position::RelativeClick;

/// Rows per proportional segment in [`TimestampMode::Proportional`].
pub const RESET_INTERVAL: i64 = 20;

/// How a click is turned into a playback time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimestampMode {
    /// Each cell covers exactly `seconds_per_cell`.
    Exact { seconds_per_cell: f64 },
    /// Cells share the duration proportionally, re-anchored every
    /// [`RESET_INTERVAL`] rows.
    Proportional,
}

impl TimestampMode {
    /// Exact mode needs a strictly positive seconds-per-cell; anything else
    /// (absent, zero, negative, NaN) falls back to proportional.
    pub fn select(seconds_per_cell: Option<f64>) -> Self {
        match seconds_per_cell {
            Some(seconds_per_cell) if seconds_per_cell > 0.0 => Self::Exact { seconds_per_cell },
            _ => Self::Proportional,
        }
    }
}

/// Clamp into `[0, video_duration]` with min-then-max ordering, so NaN and
/// negative zero both come out as `0.0`.
fn clamp_to_duration(timestamp: f64, video_duration: f64) -> f64 {
    let capped = if video_duration < timestamp {
        video_duration
    } else {
        timestamp
    };
    if capped > 0.0 {
        capped
    } else {
        0.0
    }
}

/// Convert a click on the grid into a seek position in seconds.
///
/// The arithmetic below is order-sensitive: downstream seeking relies on
/// getting identical floating-point results for identical inputs, so the
/// operations must not be reassociated.
///
/// Returns `0.0` for a non-positive duration or a grid with a zero
/// dimension.
pub fn resolve_timestamp(
    click: RelativeClick,
    grid_width: u32,
    grid_height: u32,
    video_duration: f64,
    seconds_per_cell: Option<f64>,
) -> f64 {
    if !(video_duration > 0.0) {
        return 0.0;
    }
    if grid_width == 0 || grid_height == 0 {
        return 0.0;
    }

    let width = f64::from(grid_width);
    let height = f64::from(grid_height);
    let reset_interval = RESET_INTERVAL as f64;

    // Rows stay in f64 so an out-of-range click saturates to the clamp
    // instead of overflowing. Every in-range row is a small exact integer.
    let timestamp = match TimestampMode::select(seconds_per_cell) {
        TimestampMode::Exact { seconds_per_cell } => {
            // Row snaps to a whole row, column stays continuous.
            let row_index = (click.rel_y * height).trunc();
            let col_continuous = click.rel_x * width;
            let continuous_cell_index = row_index * width + col_continuous;
            continuous_cell_index * seconds_per_cell
        }
        TimestampMode::Proportional => {
            let actual_row = (click.rel_y * height).trunc();
            if actual_row.is_infinite() {
                actual_row
            } else {
                let row_in_block = actual_row.rem_euclid(reset_interval);
                let block_first_row = actual_row - row_in_block;

                let block_start_ratio = block_first_row / height;
                let block_start_time = block_start_ratio * video_duration;

                let cells_in_block = row_in_block * width + click.rel_x * width;
                let max_cells_in_block = reset_interval * width;
                let block_progress_ratio = cells_in_block / max_cells_in_block;
                let block_duration = (reset_interval / height) * video_duration;

                block_start_time + block_progress_ratio * block_duration
            }
        }
    };

    clamp_to_duration(timestamp, video_duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_mode_keeps_column_continuous() {
        let t = resolve_timestamp(RelativeClick::new(0.5, 0.3), 4, 10, 100.0, Some(2.0));
        assert_eq!(t, 28.0);

        let t = resolve_timestamp(RelativeClick::new(0.3, 0.7), 3, 7, 99.9, Some(4.2));
        assert_eq!(t, 54.18000000000001);
    }

    #[test]
    fn exact_mode_clamps_to_duration() {
        let t = resolve_timestamp(RelativeClick::new(1.0, 0.99), 4, 10, 50.0, Some(2.0));
        assert_eq!(t, 50.0);

        let t = resolve_timestamp(RelativeClick::new(-3.0, 0.0), 4, 10, 50.0, Some(2.0));
        assert_eq!(t, 0.0);
    }

    #[test]
    fn proportional_mode_reanchors_every_block() {
        let t = resolve_timestamp(RelativeClick::new(0.0, 20.0 / 1440.0), 4, 1440, 3600.0, None);
        assert_eq!(t, 50.0);

        let t = resolve_timestamp(RelativeClick::new(0.25, 0.5), 4, 1440, 3600.0, None);
        assert_eq!(t, 1800.625);

        let t = resolve_timestamp(RelativeClick::new(0.9, 0.999), 5, 37, 1234.5, None);
        assert_eq!(t, 1231.1635135135134);

        let t = resolve_timestamp(RelativeClick::new(0.1, 0.2), 4, 100, 600.0, None);
        assert_eq!(t, 120.6);
    }

    #[test]
    fn non_positive_seconds_per_cell_falls_back_to_proportional() {
        let click = RelativeClick::new(0.25, 0.5);
        let proportional = resolve_timestamp(click, 4, 1440, 3600.0, None);
        assert_eq!(resolve_timestamp(click, 4, 1440, 3600.0, Some(0.0)), proportional);
        assert_eq!(resolve_timestamp(click, 4, 1440, 3600.0, Some(-2.0)), proportional);
        assert_eq!(TimestampMode::select(Some(f64::NAN)), TimestampMode::Proportional);
    }

    #[test]
    fn degenerate_duration_yields_zero() {
        for spc in [None, Some(2.0)] {
            assert_eq!(resolve_timestamp(RelativeClick::new(0.5, 0.5), 4, 10, 0.0, spc), 0.0);
            assert_eq!(resolve_timestamp(RelativeClick::new(0.9, 0.9), 4, 10, -12.0, spc), 0.0);
        }
    }

    #[test]
    fn zero_sized_grid_yields_zero() {
        assert_eq!(resolve_timestamp(RelativeClick::new(0.5, 0.5), 0, 10, 100.0, None), 0.0);
        assert_eq!(resolve_timestamp(RelativeClick::new(0.5, 0.5), 4, 0, 100.0, Some(1.0)), 0.0);
    }

    #[test]
    fn nan_click_clamps_to_zero() {
        let t = resolve_timestamp(RelativeClick::new(f64::NAN, 0.5), 4, 10, 100.0, Some(2.0));
        assert_eq!(t, 0.0);
    }

    #[test]
    fn runaway_rows_clamp_instead_of_overflowing() {
        for spc in [None, Some(2.0)] {
            for rel_y in [1e20, f64::MAX, f64::INFINITY] {
                let t = resolve_timestamp(RelativeClick::new(0.5, rel_y), 4, 10, 100.0, spc);
                assert_eq!(t, 100.0, "rel_y={} spc={:?}", rel_y, spc);
            }
            for rel_y in [-1e20, f64::MIN, f64::NEG_INFINITY] {
                let t = resolve_timestamp(RelativeClick::new(0.5, rel_y), 4, 10, 100.0, spc);
                assert_eq!(t, 0.0, "rel_y={} spc={:?}", rel_y, spc);
            }
        }
    }

    #[test]
    fn result_never_leaves_the_video() {
        for spc in [None, Some(0.5), Some(15.0)] {
            for step in 0..=40 {
                let rel = step as f64 / 20.0;
                let t = resolve_timestamp(RelativeClick::new(rel, rel), 6, 45, 321.0, spc);
                assert!((0.0..=321.0).contains(&t), "{} out of range for rel={}", t, rel);
            }
        }
    }
}
