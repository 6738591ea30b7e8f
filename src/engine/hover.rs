use crate::geometry::{bounding_box, cursor_relative_to, relative_offsets, PointerEvent, RelativeOffsets};
use crate::table::GridLayout;

/// Upper bound on probes per axis; enough for any realistic table and
/// guarantees termination on degenerate geometry
pub const MAX_SEARCH_ITERATIONS: usize = 10;

/// Bisect the 1-based index of the interval containing the cursor.
///
/// `probe(mid)` yields the offsets of the `mid`th cell relative to the
/// table. The search walks left while `before` holds and right while
/// `after` holds, and stops on the first cell that satisfies neither. When
/// the iteration cap is hit the last probed index wins. Returns `None` only
/// when nothing was probed.
pub fn bin_search<P, B, A>(count: usize, mut probe: P, before: B, after: A) -> Option<usize>
where
    P: FnMut(usize) -> Option<RelativeOffsets>,
    B: Fn(&RelativeOffsets) -> bool,
    A: Fn(&RelativeOffsets) -> bool,
{
    let mut left = 0;
    let mut right = count + 1;
    let mut iterations = 0;
    let mut mid = None;

    while left + 1 < right && iterations < MAX_SEARCH_ITERATIONS {
        let m = (left + right).div_ceil(2);
        mid = Some(m);

        let Some(offsets) = probe(m) else {
            break;
        };

        if before(&offsets) {
            right = m;
        } else if after(&offsets) {
            left = m;
        } else {
            break;
        }

        iterations += 1;
    }

    mid
}

/// Resolve the (row, column) under the pointer, both 1-based.
///
/// Columns are searched along the first row, rows along the first column.
/// An axis is only searched when the pointer is not before the table on
/// that axis; otherwise, or when the search yields nothing, the previous
/// index is kept.
pub fn hovered_cell(layout: &GridLayout, pointer: PointerEvent, previous: (usize, usize)) -> (usize, usize) {
    let (mut row, mut column) = previous;
    let table = layout.table_rect();
    let scroll = layout.scroll();
    let cursor = cursor_relative_to(table, pointer);
    let table_box = bounding_box(table, scroll);
    let rows = layout.row_count();
    let cols = layout.col_count();

    if cursor.x >= 0.0 {
        let found = bin_search(
            cols,
            |mid| {
                let cell = layout.cell_rect(0, mid - 1)?;
                Some(relative_offsets(&table_box, &bounding_box(cell, scroll)))
            },
            |o| cursor.x < o.from_left as f64,
            |o| cursor.x > cursor.width - o.from_right as f64,
        );
        if let Some(found) = found.filter(|&c| c > 0) {
            column = found;
        }
    }

    if cursor.y >= 0.0 {
        let found = bin_search(
            rows,
            |mid| {
                let cell = layout.cell_rect(mid - 1, 0)?;
                Some(relative_offsets(&table_box, &bounding_box(cell, scroll)))
            },
            |o| cursor.y < o.from_top as f64,
            |o| cursor.y > cursor.height - o.from_bottom as f64,
        );
        if let Some(found) = found.filter(|&r| r > 0) {
            row = found;
        }
    }

    (row, column)
}
