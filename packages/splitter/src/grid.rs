//! Grid formatting.

use crate::config::{GRID_CELLS, ROW_WIDTH};

/// Number of rows written per board.
pub const ROWS: usize = GRID_CELLS / ROW_WIDTH;

/// Lay out the first 81 characters of a grid string as nine rows.
///
/// Every row is newline-terminated. A short grid still yields nine rows; the
/// rows past the end of the input come out short or empty.
///
/// # Examples
/// ```
/// use grid_splitter::grid::format_grid;
///
/// let board = format_grid(&"123456789".repeat(9));
/// assert_eq!(board, "123456789\n".repeat(9));
/// ```
pub fn format_grid(grid: &str) -> String {
    let cells: Vec<char> = grid.chars().take(GRID_CELLS).collect();
    let mut out = String::with_capacity(GRID_CELLS + ROWS);

    for row in 0..ROWS {
        let start = (row * ROW_WIDTH).min(cells.len());
        let end = (start + ROW_WIDTH).min(cells.len());
        out.extend(&cells[start..end]);
        out.push('\n');
    }

    out
}
