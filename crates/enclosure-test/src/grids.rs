//! Named puzzles with known answers.

use enclosure_core::Grid;

use crate::ascii::grid_from_rows;

/// An open grass grid with the start in the middle.
pub fn open_grid(cols: usize, rows: usize, budget: usize) -> Grid {
    let start = (rows / 2) * cols + cols / 2;
    Grid::builder(cols, rows)
        .start(start)
        .budget(budget)
        .build()
        .unwrap_or_else(|err| panic!("invalid fixture grid: {err}"))
}

/// A water pocket whose only exit is cell 13, right of the start.
///
/// Walling 13 alone encloses the start (score 1); no other single wall does.
pub fn single_chokepoint() -> Grid {
    grid_from_rows(
        &[
            ".....", //
            ".~~..", //
            ".~H..", //
            ".~~~.", //
            ".....",
        ],
        3,
    )
}

/// Start at the centre of a 5x5 grid with a cherry directly above it.
///
/// Walls `[2, 6, 8, 11, 13, 17]` enclose start and cherry: area 2, bonus 3.
pub fn cherry_pocket() -> Grid {
    grid_from_rows(
        &[
            ".....", //
            "..C..", //
            "..H..", //
            ".....", //
            ".....",
        ],
        6,
    )
}

/// A start hemmed in by water except for a portal cell linked to the corner.
///
/// Walling 10 would trap the start and the portal, but the portal escapes.
pub fn portal_escape() -> Grid {
    grid_from_rows(
        &[
            "1......", //
            ".......", //
            "..~1~..", //
            "..~H~..", //
            "..~~~..", //
            ".......", //
            ".......",
        ],
        2,
    )
}

/// A 9x9 lake with a walled island and four gaps.
///
/// Walling the four outer cells of the gaps (4, 36, 44, 76) encloses 29
/// cells and the cherry: score 32.
pub fn lake() -> Grid {
    grid_from_rows(
        &[
            ".........", //
            ".~~~.~~~.", //
            ".~.....~.", //
            ".~..C..~.", //
            "....H....", //
            ".~.....~.", //
            ".~.....~.", //
            ".~~~.~~~.", //
            ".........",
        ],
        4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use enclosure_core::{evaluate, WallSet};

    #[test]
    fn test_single_chokepoint() {
        let grid = single_chokepoint();
        let result = evaluate(&grid, &WallSet::new(&grid, [13]).unwrap());
        assert!(!result.escaped);
        assert_eq!(result.total_score, 1);
    }

    #[test]
    fn test_cherry_pocket() {
        let grid = cherry_pocket();
        let walls = WallSet::new(&grid, [2, 6, 8, 11, 13, 17]).unwrap();
        assert_eq!(evaluate(&grid, &walls).total_score, 5);
    }

    #[test]
    fn test_portal_escape() {
        let grid = portal_escape();
        let walls = WallSet::new(&grid, [10]).unwrap();
        let result = evaluate(&grid, &walls);
        assert!(result.escaped);
        assert!(result.contains(0));
    }

    #[test]
    fn test_lake_answer() {
        let grid = lake();
        let walls = WallSet::new(&grid, [4, 36, 44, 76]).unwrap();
        let result = evaluate(&grid, &walls);
        assert!(!result.escaped);
        assert_eq!(result.area, 29);
        assert_eq!(result.total_score, 32);
    }
}
