use crate::html;

/// Smallest flex share a column may shrink to
pub const MIN_WIDTH: f64 = 0.1;

/// Flex share used for cells without an explicit width
pub const DEFAULT_WIDTH: f64 = 1.0;

/// A single editable cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    /// Inner HTML of the cell
    pub content: String,
    pub background_color: Option<String>,
    /// Relative width (1.0 == 1fr); `None` means unset
    pub width: Option<f64>,
    /// Placeholder label shown while a heading cell is empty
    pub heading: Option<String>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Width share used for layout
    pub fn effective_width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn is_blank(&self) -> bool {
        html::is_blank(&self.content)
    }
}

pub type Row = Vec<Cell>;

/// Row-major arena of cells. Rows are kept rectangular: every structural
/// mutation touches every row or nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Create an empty grid, at least 1x1
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows: vec![vec![Cell::new(); cols]; rows],
        }
    }

    /// Build a grid from row contents, padding short rows
    pub fn from_contents(contents: Vec<Vec<String>>) -> Self {
        let cols = contents.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::new(contents.len(), cols);
        for (r, row) in contents.into_iter().enumerate() {
            for (c, content) in row.into_iter().enumerate() {
                grid.set_content(r, c, content);
            }
        }
        grid
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, taken from the first row
    pub fn col_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Iterator over all rows
    pub fn rows_iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn get_row(&self, idx: usize) -> Option<&[Cell]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    pub fn set_content(&mut self, row: usize, col: usize, content: impl Into<String>) -> bool {
        match self.get_cell_mut(row, col) {
            Some(cell) => {
                cell.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn set_background_color(&mut self, row: usize, col: usize, color: impl Into<String>) -> bool {
        match self.get_cell_mut(row, col) {
            Some(cell) => {
                cell.background_color = Some(color.into());
                true
            }
            None => false,
        }
    }

    pub fn set_width(&mut self, row: usize, col: usize, width: f64) -> bool {
        match self.get_cell_mut(row, col) {
            Some(cell) => {
                cell.width = Some(width.max(MIN_WIDTH));
                true
            }
            None => false,
        }
    }

    /// Insert an empty column before `at`, or append when `at` is past the end.
    /// Returns the index the column landed on.
    pub fn insert_col_at(&mut self, at: usize) -> usize {
        let idx = at.min(self.col_count());
        for row in &mut self.rows {
            row.insert(idx, Cell::new());
        }
        idx
    }

    /// Remove a column from every row. Refused for the last column or an
    /// index that does not exist.
    pub fn delete_col_at(&mut self, idx: usize) -> Option<Vec<Cell>> {
        if self.col_count() <= 1 || idx >= self.col_count() {
            return None;
        }
        Some(self.rows.iter_mut().map(|row| row.remove(idx)).collect())
    }

    /// Insert an empty row before `at`, or append when `at` is past the end.
    /// Column widths are copied from the first row so the new row lines up.
    pub fn insert_row_at(&mut self, at: usize) -> usize {
        let idx = at.min(self.row_count());
        let new_row: Row = match self.rows.first() {
            Some(blueprint) => blueprint
                .iter()
                .map(|cell| Cell {
                    width: cell.width,
                    ..Cell::new()
                })
                .collect(),
            None => vec![Cell::new()],
        };
        self.rows.insert(idx, new_row);
        idx
    }

    /// Remove a row. Refused for the last row or an index that does not exist.
    pub fn delete_row_at(&mut self, idx: usize) -> Option<Row> {
        if self.row_count() <= 1 || idx >= self.row_count() {
            return None;
        }
        Some(self.rows.remove(idx))
    }

    /// Shift the width of every cell in a column by `delta`, never below
    /// `MIN_WIDTH`
    pub fn adjust_col_width(&mut self, col: usize, delta: f64) {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(col) {
                let width = cell.effective_width() + delta;
                // keep one decimal so repeated steps don't drift
                cell.width = Some((width.max(MIN_WIDTH) * 10.0).round() / 10.0);
            }
        }
    }

    /// Width shares of a row's cells
    pub fn row_weights(&self, row: usize) -> Vec<f64> {
        self.rows
            .get(row)
            .map(|r| r.iter().map(Cell::effective_width).collect())
            .unwrap_or_default()
    }

    /// Set or clear the heading placeholder on the first row, clearing it
    /// everywhere else
    pub fn mark_heading_row(&mut self, label: Option<&str>) {
        for (r, row) in self.rows.iter_mut().enumerate() {
            for cell in row.iter_mut() {
                cell.heading = if r == 0 { label.map(str::to_string) } else { None };
            }
        }
    }

    pub fn is_rectangular(&self) -> bool {
        let cols = self.col_count();
        self.rows.iter().all(|r| r.len() == cols)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(2, 2)
    }
}
