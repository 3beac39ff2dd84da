mod common;

use glam::Vec2;
use tilefield_core::{Grid, Viewport};

#[test]
fn dims_follow_viewport_and_pitch() {
    let vp = Viewport::new(800.0, 600.0, 1.0);
    // ceil(800/44)+1 = 20, ceil(600/44)+1 = 15
    assert_eq!(Grid::dims_for(vp, 44.0), (20, 15));
    // exact multiples still get the extra column/row
    assert_eq!(Grid::dims_for(Viewport::new(440.0, 88.0, 1.0), 44.0), (11, 3));
}

#[test]
fn ensure_is_idempotent_for_unchanged_viewport() {
    let vp = Viewport::new(396.0, 396.0, 1.0);
    let mut grid = Grid::new();
    assert!(grid.ensure(vp, 44.0));
    assert_eq!((grid.cols(), grid.rows()), (10, 10));

    grid.heat[3] = 0.5;
    grid.target[4] = 0.25;
    grid.hold[5] = 12.0;
    assert!(!grid.ensure(vp, 44.0));
    assert!(!grid.ensure(vp, 44.0));
    assert_eq!(grid.heat[3], 0.5);
    assert_eq!(grid.target[4], 0.25);
    assert_eq!(grid.hold[5], 12.0);
}

#[test]
fn resize_reallocates_zeroed_buffers() {
    let mut grid = Grid::new();
    grid.ensure(Viewport::new(396.0, 396.0, 1.0), 44.0);
    grid.heat.fill(1.0);

    assert!(grid.ensure(Viewport::new(800.0, 396.0, 1.0), 44.0));
    assert_eq!(grid.heat.len(), grid.cols() * grid.rows());
    assert_eq!(grid.target.len(), grid.len());
    assert_eq!(grid.hold.len(), grid.len());
    assert!(grid.heat.iter().all(|h| *h == 0.0));
}

#[test]
fn a_width_change_within_the_same_column_count_keeps_state() {
    let mut grid = Grid::new();
    grid.ensure(Viewport::new(390.0, 396.0, 1.0), 44.0);
    grid.heat[0] = 0.7;
    assert!(!grid.ensure(Viewport::new(395.0, 396.0, 2.0), 44.0));
    assert_eq!(grid.heat[0], 0.7);
}

#[test]
fn cell_range_clamps_and_rejects_offscreen() {
    let mut grid = Grid::new();
    grid.ensure(Viewport::new(396.0, 396.0, 1.0), 44.0);

    let (cols, rows) = grid.cell_range(Vec2::new(220.0, 220.0), 60.0, 44.0).unwrap();
    assert_eq!(cols, 3..=7);
    assert_eq!(rows, 3..=7);

    let (cols, _) = grid.cell_range(Vec2::new(5.0, 5.0), 60.0, 44.0).unwrap();
    assert_eq!(*cols.start(), 0);

    assert!(grid.cell_range(Vec2::new(-9999.0, -9999.0), 60.0, 44.0).is_none());
    assert!(grid.cell_range(Vec2::new(5000.0, 100.0), 60.0, 44.0).is_none());
}

#[test]
fn dpr_is_clamped() {
    assert_eq!(Viewport::new(1.0, 1.0, 3.0).dpr, 2.0);
    assert_eq!(Viewport::new(1.0, 1.0, 0.5).dpr, 1.0);
}
