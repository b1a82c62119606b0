//! ASCII grid fixtures.
//!
//! | char      | cell                       |
//! |-----------|----------------------------|
//! | `.`       | grass                      |
//! | `~`       | water                      |
//! | `H`       | start                      |
//! | `C`       | cherry                     |
//! | `W`       | pre-placed wall            |
//! | `0`-`9`   | portal channel 0-9         |
//! | `a`-`z`   | portal channel 10-35       |
//!
//! Short rows are padded with grass to the widest row.

use enclosure_core::{ChannelId, EnclosureError, Grid, Result};

/// Parses ASCII rows into a grid.
///
/// # Errors
///
/// Returns [`EnclosureError::InvalidInput`] for an unknown character or
/// whatever [`GridBuilder::build`](enclosure_core::GridBuilder::build)
/// rejects.
pub fn parse_rows(rows: &[&str], budget: usize) -> Result<Grid> {
    let cols = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let mut builder = Grid::builder(cols, rows.len()).budget(budget);

    for (r, row) in rows.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            let cell = r * cols + c;
            builder = match ch {
                '.' => builder,
                '~' => builder.water(cell),
                'H' => builder.start(cell),
                'C' => builder.cherry(cell),
                'W' => builder.wall(cell),
                '0'..='9' | 'a'..='z' => {
                    let channel = ch.to_digit(36).unwrap_or_default() as u16;
                    builder.portal(cell, ChannelId(channel))
                }
                other => {
                    return Err(EnclosureError::InvalidInput(format!(
                        "unknown map character {other:?} at row {r}, column {c}"
                    )))
                }
            };
        }
    }
    builder.build()
}

/// Parses ASCII rows into a grid, panicking on malformed input.
pub fn grid_from_rows(rows: &[&str], budget: usize) -> Grid {
    match parse_rows(rows, budget) {
        Ok(grid) => grid,
        Err(err) => panic!("invalid fixture grid: {err}"),
    }
}
