use crate::engine::GridState;
use crate::error::{SearchError, SearchResult};

/// Parses an array of string slices into a `GridState`.
///
/// Each string slice is one row, starting from row 0. Cells are written as `0` or `1`;
/// whitespace between cells is ignored, so `"1 0 1"` and `"101"` are equivalent.
/// The grid must be square: as many cells per row as there are rows.
///
/// # Returns
/// * `Ok(GridState)` if parsing is successful.
/// * `Err(SearchError::InvalidGrid)` if:
///     - `s` is empty.
///     - A row holds a character other than `0`, `1` or whitespace.
///     - A row's cell count differs from the number of rows.
///
/// # Examples
/// ```
/// use lights_out_solver::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["1 0", "0 1"]).unwrap();
/// assert_eq!(grid.size(), 2);
/// assert!(grid.get(0, 0));
/// assert!(!grid.get(0, 1));
///
/// assert!(grid_from_str_array(&["10", "0x"]).is_err());
/// assert!(grid_from_str_array(&["101", "01"]).is_err());
/// ```
pub fn grid_from_str_array(s: &[&str]) -> SearchResult<GridState> {
    if s.is_empty() {
        return Err(SearchError::InvalidGrid {
            reason: "no rows given".to_string(),
        });
    }

    let mut rows = Vec::with_capacity(s.len());
    for (r, row_str) in s.iter().enumerate() {
        let mut row = Vec::with_capacity(s.len());
        for (c, ch) in row_str.chars().filter(|ch| !ch.is_whitespace()).enumerate() {
            row.push(match ch {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(SearchError::InvalidGrid {
                        reason: format!("unrecognized character '{}' in row {} col {}", ch, r, c),
                    })
                }
            });
        }
        if row.len() != s.len() {
            return Err(SearchError::InvalidGrid {
                reason: format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    s.len()
                ),
            });
        }
        rows.push(row);
    }

    GridState::from_rows(&rows)
}

/// Parses grid text as read from a file: one row per line, blank lines skipped.
pub fn grid_from_text(text: &str) -> SearchResult<GridState> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    grid_from_str_array(&lines)
}
