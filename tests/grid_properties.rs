//! Properties every grid calculation must hold, across many inputs.

use gridseek::{dimension, format_time, resolve_position, resolve_timestamp, RelativeClick};

const GRIDS: [(u32, u32); 5] = [(1, 1), (4, 10), (5, 7), (4, 1440), (10, 3)];

fn clicks() -> impl Iterator<Item = RelativeClick> {
    (0..=25).flat_map(|x| (0..=25).map(move |y| RelativeClick::new(x as f64 * 0.08, y as f64 * 0.08)))
}

#[test]
fn position_index_is_always_on_the_grid() {
    for (w, h) in GRIDS {
        let max_index = u64::from(w) * u64::from(h) - 1;
        for click in clicks() {
            let cell = resolve_position(click, w, h);
            assert!(cell.index <= max_index);
            assert!(cell.col < w && cell.row < h);
        }
    }
}

#[test]
fn resolvers_are_pure() {
    for (w, h) in GRIDS {
        for click in clicks() {
            assert_eq!(resolve_position(click, w, h), resolve_position(click, w, h));
            for spc in [None, Some(2.0)] {
                let a = resolve_timestamp(click, w, h, 1234.5, spc);
                let b = resolve_timestamp(click, w, h, 1234.5, spc);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}

#[test]
fn zero_duration_always_resolves_to_zero() {
    for (w, h) in GRIDS {
        for click in clicks() {
            assert_eq!(resolve_timestamp(click, w, h, 0.0, None), 0.0);
            assert_eq!(resolve_timestamp(click, w, h, 0.0, Some(3.0)), 0.0);
        }
    }
}

#[test]
fn worked_examples() {
    let exact = resolve_timestamp(RelativeClick::new(0.5, 0.3), 4, 10, 100.0, Some(2.0));
    assert_eq!(exact, 28.0);

    let proportional =
        resolve_timestamp(RelativeClick::new(0.0, 20.0 / 1440.0), 4, 1440, 3600.0, None);
    assert_eq!(proportional, 50.0);

    let dims = dimension(100.0, 5, 15.0).unwrap();
    assert_eq!((dims.rows, dims.columns, dims.total_cells), (2, 5, 7));

    assert_eq!(format_time(125.5), "02:05.50");
    assert_eq!(format_time(3725.25), "01:02:05.25");
}

#[test]
fn proportional_mode_crosses_reset_blocks() {
    let t = resolve_timestamp(RelativeClick::new(0.0, 0.5), 4, 30, 300.0, None);
    assert_eq!(t, 150.0);
    // Row 25 sits in the second block of 20 rows.
    let t = resolve_timestamp(RelativeClick::new(0.5, 25.0 / 30.0), 4, 30, 300.0, None);
    assert_eq!(t, 255.0);
}
