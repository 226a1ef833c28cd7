//! Phase B: per-column skyline tracking.
//!
//! The body region is an N-column grid of fixed-height rows. The skyline holds
//! each column's fill height in row units. Placement picks the leftmost column
//! run with the lowest maximum skyline among candidates at or past the
//! frontier, the `(row, col)` of the last committed tile. Without the
//! frontier, a narrow tile placed after a wide one could drop back into a
//! still-low column at a smaller `(row, col)` than something already
//! committed; clamping keeps placement monotone, which is what makes the
//! emitted tiles, sorted by `(page, y, x)`, reproduce the input token order
//! even when tile spans mix.

/// Candidate placement in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

#[derive(Debug, Clone)]
pub struct Skyline {
    cols: Vec<u32>,
    frontier: Option<GridPosition>,
}

impl Skyline {
    pub fn new(columns: u32) -> Self {
        Skyline {
            cols: vec![0; columns as usize],
            frontier: None,
        }
    }

    pub fn columns(&self) -> u32 {
        self.cols.len() as u32
    }

    /// True until something is committed.
    pub fn is_empty(&self) -> bool {
        self.cols.iter().all(|&h| h == 0)
    }

    /// The row a full-width tile would start at: the current maximum fill.
    pub fn full_width_row(&self) -> u32 {
        self.cols.iter().copied().max().unwrap_or(0)
    }

    /// Highest committed row bottom across all columns.
    pub fn max_row(&self) -> u32 {
        self.full_width_row()
    }

    /// Finds the placement for a `col_span`-wide tile: the leftmost start
    /// column whose run has the lowest maximum skyline, never before the
    /// frontier. `None` only when the span exceeds the column count, which
    /// schema validation rules out.
    pub fn position(&self, col_span: u32) -> Option<GridPosition> {
        let columns = self.columns();
        if col_span == 0 || col_span > columns {
            return None;
        }

        let mut best: Option<GridPosition> = None;
        for start in 0..=(columns - col_span) {
            let run_row = (start..start + col_span)
                .map(|c| self.cols[c as usize])
                .max()
                .unwrap_or(0);
            let row = run_row.max(self.min_row_at(start));
            match best {
                Some(b) if b.row <= row => {}
                _ => best = Some(GridPosition { col: start, row }),
            }
        }
        best
    }

    /// Lowest row at which a tile starting in `col` stays strictly after the
    /// frontier in `(row, col)` order. Cells below this row are sealed off
    /// even when empty.
    fn min_row_at(&self, col: u32) -> u32 {
        match self.frontier {
            None => 0,
            Some(f) if col > f.col => f.row,
            Some(f) => f.row + 1,
        }
    }

    /// Raises the skyline over `[col, col + col_span)` to `row + row_span` and
    /// advances the frontier to `(row, col)`.
    pub fn commit(&mut self, col: u32, col_span: u32, row: u32, row_span: u32) {
        let bottom = row + row_span;
        for c in col..col + col_span {
            let height = &mut self.cols[c as usize];
            *height = (*height).max(bottom);
        }
        self.frontier = Some(GridPosition { col, row });
    }

    /// Commits a full-width row (section headers): every column advances
    /// equally past the current maximum.
    pub fn commit_full_width(&mut self, row: u32, row_span: u32) {
        let bottom = row + row_span;
        for height in &mut self.cols {
            *height = (*height).max(bottom);
        }
        self.frontier = Some(GridPosition { col: 0, row });
    }
}
