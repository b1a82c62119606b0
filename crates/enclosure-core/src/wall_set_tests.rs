//! Tests for candidate enumeration and wall-set validation.

use crate::{CandidateSet, ChannelId, EnclosureError, Grid, Terrain, WallSet};

fn mixed_grid() -> Grid {
    Grid::builder(4, 4)
        .start(5)
        .water(0)
        .cherry(6)
        .portal(9, ChannelId(0))
        .portal(15, ChannelId(0))
        .wall(10)
        .budget(3)
        .build()
        .unwrap()
}

#[test]
fn test_candidates_are_row_major() {
    let grid = mixed_grid();
    let candidates = CandidateSet::new(&grid);
    assert_eq!(candidates.cells(), &[1, 2, 3, 4, 7, 8, 11, 12, 13, 14]);
    assert_eq!(candidates.len(), 10);
    assert_eq!(candidates, CandidateSet::new(&grid));
}

#[test]
fn test_candidates_exclude_special_cells() {
    let grid = mixed_grid();
    let candidates = CandidateSet::new(&grid);
    for &cell in candidates.cells() {
        assert_ne!(cell, grid.start());
        assert!(!grid.is_cherry(cell));
        assert!(grid.portal_channel(cell).is_none());
        assert_eq!(grid.terrain(cell), Terrain::Grass);
        assert!(!grid.is_fixed_wall(cell));
    }
}

#[test]
fn test_positions_round_trip() {
    let grid = mixed_grid();
    let candidates = CandidateSet::new(&grid);

    assert_eq!(candidates.position_of(7), Some(4));
    assert_eq!(candidates.position_of(6), None);
    assert_eq!(candidates.position_of(99), None);
    assert_eq!(candidates.cell(4), 7);

    let walls = candidates.wall_set(&[4, 0, 4]);
    assert_eq!(walls.cells(), &[1, 7]);
    assert_eq!(candidates.positions_of(&walls), vec![0, 4]);

    let extended = candidates.wall_set_with(&[0], 9);
    assert_eq!(extended.cells(), &[1, 14]);
}

#[test]
fn test_wall_set_rejects_invalid_cells() {
    let grid = mixed_grid();
    for cell in [0, 5, 6, 9, 10, 16] {
        let err = WallSet::new(&grid, [cell]).unwrap_err();
        assert!(matches!(err, EnclosureError::InvalidWallSet(_)), "cell {cell}");
    }
}

#[test]
fn test_wall_set_rejects_duplicates() {
    let grid = mixed_grid();
    let err = WallSet::new(&grid, [1, 2, 1]).unwrap_err();
    assert!(err.to_string().contains("twice"));
}

#[test]
fn test_wall_set_rejects_over_budget() {
    let grid = mixed_grid();
    let err = WallSet::new(&grid, [1, 2, 3, 4]).unwrap_err();
    assert!(err.to_string().contains("budget"));
}

#[test]
fn test_wall_set_accessors() {
    let grid = mixed_grid();
    let walls = WallSet::new(&grid, [14, 2]).unwrap();
    assert_eq!(walls.len(), 2);
    assert!(!walls.is_empty());
    assert!(walls.contains(14));
    assert!(!walls.contains(3));
    assert_eq!(walls.iter().collect::<Vec<_>>(), vec![2, 14]);
    assert_eq!(walls.to_string(), "[2, 14]");
    assert!(WallSet::empty().is_empty());
}
