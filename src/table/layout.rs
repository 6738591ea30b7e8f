use crate::geometry::{ClientRect, ScrollOffset};
use crate::html;

use super::grid::Grid;

/// Where and how large the host draws the table. Everything else in the
/// layout is derived from the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutFrame {
    /// Viewport position of the table's upper left corner
    pub left: f64,
    pub top: f64,
    /// Total table width
    pub width: f64,
    /// Height of one line of cell text
    pub line_height: f64,
    pub scroll: ScrollOffset,
    /// Edge length of a toolbox toggler
    pub toolbox_size: f64,
}

impl Default for LayoutFrame {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 600.0,
            line_height: 24.0,
            scroll: ScrollOffset::default(),
            toolbox_size: 20.0,
        }
    }
}

/// Rendered boxes of the table, its rows and its cells. Each row is a CSS
/// grid whose template is the row's own width shares (`1fr 2fr ...`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLayout {
    table: ClientRect,
    rows: Vec<ClientRect>,
    cells: Vec<Vec<ClientRect>>,
    scroll: ScrollOffset,
}

impl GridLayout {
    /// Edges are snapped to whole pixels relative to the frame origin, so
    /// floor-rounded bounding boxes land exactly on them.
    pub fn compute(grid: &Grid, frame: &LayoutFrame) -> Self {
        let mut rows = Vec::with_capacity(grid.row_count());
        let mut cells = Vec::with_capacity(grid.row_count());
        let width = frame.width.round();
        let mut lines_above = 0usize;
        let mut top = 0.0;

        for (r, row) in grid.rows_iter().enumerate() {
            let lines = row
                .iter()
                .map(|cell| html::line_count(&cell.content))
                .max()
                .unwrap_or(1);
            lines_above += lines;
            let bottom = (frame.line_height * lines_above as f64).round();
            let height = bottom - top;

            let weights = grid.row_weights(r);
            let total: f64 = weights.iter().sum();
            let mut share = 0.0;
            let mut left = 0.0;
            let row_cells: Vec<ClientRect> = weights
                .iter()
                .map(|w| {
                    share += w;
                    let right = if total > 0.0 { (width * share / total).round() } else { 0.0 };
                    let rect = ClientRect::new(frame.left + left, frame.top + top, right - left, height);
                    left = right;
                    rect
                })
                .collect();

            rows.push(ClientRect::new(frame.left, frame.top + top, width, height));
            cells.push(row_cells);
            top = bottom;
        }

        Self {
            table: ClientRect::new(frame.left, frame.top, width, top),
            rows,
            cells,
            scroll: frame.scroll,
        }
    }

    pub fn table_rect(&self) -> ClientRect {
        self.table
    }

    pub fn row_rect(&self, row: usize) -> Option<ClientRect> {
        self.rows.get(row).copied()
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Option<ClientRect> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Columns of the first row
    pub fn col_count(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    /// Locate the cell under a viewport point by scanning, used for clicks
    /// that need an exact hit rather than the hover approximation
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let row = self.rows.iter().position(|r| r.contains(x, y))?;
        let col = self.cells.get(row)?.iter().position(|c| c.contains(x, y))?;
        Some((row, col))
    }
}
