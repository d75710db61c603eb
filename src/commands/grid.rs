use super::ensure;
use crate::grid::{cell_span, dimension, format_time, resolve_position, resolve_timestamp, RelativeClick};
use crate::types::*;

/// Round to 3 decimals from the exact binary value, ties to even.
fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse().unwrap_or(value)
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Resolve a click on the grid to a seek position and the cell under it.
pub fn grid_position(request: GridPositionRequest) -> Result<GridPositionResponse, ErrorEnvelope> {
    ensure(in_unit_range(request.rel_x), "rel_x must be between 0.0 and 1.0")?;
    ensure(in_unit_range(request.rel_y), "rel_y must be between 0.0 and 1.0")?;
    ensure(request.grid_width >= 1, "grid_width must be at least 1")?;
    ensure(request.grid_height >= 1, "grid_height must be at least 1")?;
    ensure(request.video_duration > 0.0, "video_duration must be positive")?;
    if let Some(spc) = request.seconds_per_cell {
        ensure(spc > 0.0, "seconds_per_cell must be positive")?;
    }

    let click = RelativeClick::new(request.rel_x, request.rel_y);

    let timestamp = resolve_timestamp(
        click,
        request.grid_width,
        request.grid_height,
        request.video_duration,
        request.seconds_per_cell,
    );
    let cell = resolve_position(click, request.grid_width, request.grid_height);
    let (cell_start_time, cell_end_time) = cell_span(
        cell.index,
        request.grid_width,
        request.grid_height,
        request.video_duration,
        request.seconds_per_cell,
    );

    Ok(GridPositionResponse {
        timestamp: round3(timestamp),
        formatted_time: format_time(timestamp),
        grid_x: cell.col,
        grid_y: cell.row,
        grid_index: cell.index,
        cell_start_time: round3(cell_start_time),
        cell_end_time: round3(cell_end_time),
    })
}

/// Size the grid needed to cover a video.
pub fn grid_config(request: GridConfigRequest) -> Result<GridConfigResponse, ErrorEnvelope> {
    ensure(request.video_duration > 0.0, "video_duration must be positive")?;
    ensure(
        (1..=10).contains(&request.columns),
        "columns must be between 1 and 10",
    )?;

    let dims = dimension(request.video_duration, request.columns, request.seconds_per_cell)?;

    Ok(GridConfigResponse {
        rows: dims.rows,
        columns: dims.columns,
        total_cells: dims.total_cells,
        seconds_per_cell: request.seconds_per_cell,
        video_duration: request.video_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(rel_x: f64, rel_y: f64, spc: Option<f64>) -> GridPositionRequest {
        GridPositionRequest {
            rel_x,
            rel_y,
            grid_width: 4,
            grid_height: 10,
            video_duration: 100.0,
            seconds_per_cell: spc,
        }
    }

    #[test]
    fn position_with_seconds_per_cell() {
        let res = grid_position(position(0.5, 0.3, Some(2.0))).unwrap();
        assert_eq!(res.timestamp, 28.0);
        assert_eq!(res.formatted_time, "00:28.00");
        assert_eq!((res.grid_x, res.grid_y, res.grid_index), (2, 3, 14));
        assert_eq!((res.cell_start_time, res.cell_end_time), (28.0, 30.0));
    }

    #[test]
    fn position_without_seconds_per_cell_uses_even_share_for_span() {
        let res = grid_position(position(0.5, 0.3, None)).unwrap();
        assert_eq!(res.grid_index, 14);
        assert_eq!((res.cell_start_time, res.cell_end_time), (35.0, 37.5));
    }

    #[test]
    fn position_rejects_out_of_range_input() {
        let err = grid_position(position(1.5, 0.3, None)).unwrap_err();
        assert_eq!(err.code, "INVALID_INPUT");

        let mut req = position(0.5, 0.3, Some(-1.0));
        assert!(grid_position(req.clone()).is_err());
        req.seconds_per_cell = None;
        req.video_duration = 0.0;
        assert!(grid_position(req.clone()).is_err());
        req.video_duration = 100.0;
        req.grid_width = 0;
        assert!(grid_position(req).is_err());
    }

    #[test]
    fn rounding_ties_go_to_even_on_the_exact_value() {
        assert_eq!(round3(28.0625), 28.062);
        assert_eq!(round3(28.0635), 28.064);
        assert_eq!(round3(1.0005), 1.0);
        assert_eq!(round3(2.0004), 2.0);
        assert_eq!(round3(37.5), 37.5);
    }

    #[test]
    fn position_rounds_the_reported_times() {
        let mut req = position(0.25, 0.0, Some(28.0625));
        req.video_duration = 1000.0;
        let res = grid_position(req).unwrap();
        assert_eq!(res.grid_index, 1);
        assert_eq!(res.timestamp, 28.062);
        assert_eq!((res.cell_start_time, res.cell_end_time), (28.062, 56.125));
    }

    #[test]
    fn config_sizes_the_grid() {
        let res = grid_config(GridConfigRequest {
            video_duration: 100.0,
            columns: 5,
            seconds_per_cell: 15.0,
        })
        .unwrap();
        assert_eq!((res.rows, res.columns, res.total_cells), (2, 5, 7));
        assert_eq!(res.seconds_per_cell, 15.0);
    }

    #[test]
    fn config_rejects_bad_parameters() {
        let bad = [(0.0, 5, 15.0), (100.0, 0, 15.0), (100.0, 11, 15.0), (100.0, 5, 0.0)];
        for (video_duration, columns, seconds_per_cell) in bad {
            let err = grid_config(GridConfigRequest {
                video_duration,
                columns,
                seconds_per_cell,
            })
            .unwrap_err();
            assert_eq!(err.code, "INVALID_INPUT");
        }
    }
}
