//! Cyclic ratio table.
//!
//! A fixed, ordered list of rows with a cursor. The cursor is always in
//! range: `next` and `previous` wrap, so once a table is built every
//! operation is total.

use els_common::ratio::Ratio;
use heapless::Vec;
use thiserror::Error;

/// Row capacity of a table. Rows live inline, no heap.
pub const MAX_TABLE_ROWS: usize = 64;

/// Table construction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("ratio table has no rows")]
    Empty,

    #[error("ratio table exceeds {} rows", MAX_TABLE_ROWS)]
    TooManyRows,

    #[error("default selection {index} out of range for {rows} rows")]
    DefaultOutOfRange { index: usize, rows: usize },
}

/// A row that carries a ratio for the motion core.
pub trait RatioRow {
    fn ratio(&self) -> Ratio;
}

/// Cyclic selector over an immutable row sequence.
#[derive(Debug, Clone)]
pub struct RatioTable<T> {
    rows: Vec<T, MAX_TABLE_ROWS>,
    index: usize,
}

impl<T> RatioTable<T> {
    /// Build a table with `default_selection` as the current row.
    pub fn new(
        rows: impl IntoIterator<Item = T>,
        default_selection: usize,
    ) -> Result<Self, TableError> {
        let mut stored = Vec::new();
        for row in rows {
            stored.push(row).map_err(|_| TableError::TooManyRows)?;
        }
        if stored.is_empty() {
            return Err(TableError::Empty);
        }
        if default_selection >= stored.len() {
            return Err(TableError::DefaultOutOfRange {
                index: default_selection,
                rows: stored.len(),
            });
        }
        Ok(Self {
            rows: stored,
            index: default_selection,
        })
    }

    /// Row under the cursor.
    #[inline]
    pub fn current(&self) -> &T {
        &self.rows[self.index]
    }

    /// Advance one row, wrapping from the last row to the first.
    pub fn next(&mut self) -> &T {
        self.index = (self.index + 1) % self.rows.len();
        self.current()
    }

    /// Step back one row, wrapping from the first row to the last.
    pub fn previous(&mut self) -> &T {
        self.index = if self.index > 0 {
            self.index - 1
        } else {
            self.rows.len() - 1
        };
        self.current()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in traversal order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }
}

impl<T: RatioRow> RatioTable<T> {
    /// Ratio of the row under the cursor.
    #[inline]
    pub fn current_ratio(&self) -> Ratio {
        self.current().ratio()
    }
}
