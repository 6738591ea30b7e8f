//! The grid interaction engine.
//!
//! Owns the cell arena and everything transient around it: hover,
//! selection and focus indices, the three toolboxes, the color picker and
//! the document-click subscription. All indices crossing this boundary are
//! 1-based with `0` meaning none.

pub mod hover;


use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::action::{cell_actions, column_actions, row_actions, GridAction, HideRule};
use crate::config::TableConfig;
use crate::data::{CellData, TableData};
use crate::geometry::{bounding_box, relative_offsets, ClientRect, PointerEvent, RelativeOffsets};
use crate::host::{HostServices, ListenerId, TooltipTarget};
use crate::popover::PopoverClick;
use crate::table::{Grid, GridLayout, LayoutFrame};
use crate::throttle::Throttle;
use crate::toolbox::{Toolbox, ToolboxAxis, ToolboxOffset, ToolboxPosition, ToolboxTransition};
use crate::view::{
    ButtonView, CellView, ColorPickerView, RowView, TableView, ToolboxView, WrapperView,
};

/// Column width step used by the width actions
pub const WIDTH_STEP: f64 = 0.1;

const DEFAULT_ROWS: usize = 2;
const DEFAULT_COLS: usize = 2;

/// 1-based cell coordinates; `{0, 0}` means no cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    pub const NONE: CellPosition = CellPosition { row: 0, column: 0 };

    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn is_none(&self) -> bool {
        self.row == 0 || self.column == 0
    }
}

/// Where a document click landed, from this table's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the table body
    Table,
    /// Inside the wrapper but not the table: togglers, popovers, the picker
    Wrapper,
    AddRowButton,
    AddColumnButton,
    /// Anywhere else in the document, including other tables
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// What the host should do with a key event after the engine saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

/// Counts the hide rules are evaluated against
#[derive(Debug, Clone, Copy)]
struct Limits {
    rows: usize,
    cols: usize,
    max_rows: Option<usize>,
    max_cols: Option<usize>,
}

impl Limits {
    fn hides(&self, rule: HideRule) -> bool {
        match rule {
            HideRule::ColumnLimitReached => self.max_cols.is_some_and(|m| self.cols >= m),
            HideRule::SingleColumn => self.cols == 1,
            HideRule::RowLimitReached => self.max_rows.is_some_and(|m| self.rows >= m),
            HideRule::SingleRow => self.rows == 1,
        }
    }
}

pub struct GridEngine {
    read_only: bool,
    services: Rc<dyn HostServices>,
    config: TableConfig,

    grid: Grid,
    with_headings: bool,
    heading_label: String,

    frame: LayoutFrame,
    layout: GridLayout,

    hovered_row: usize,
    hovered_column: usize,
    selected_row: usize,
    selected_column: usize,
    focused_cell: CellPosition,

    toolbox_row: Toolbox,
    toolbox_column: Toolbox,
    toolbox_cell: Toolbox,
    color_picker_open: bool,

    hover_throttle: Throttle,
    listener: Option<ListenerId>,
}

impl GridEngine {
    pub fn new(read_only: bool, services: Rc<dyn HostServices>, data: &TableData, config: TableConfig) -> Self {
        let t = |s: &str| services.translate(s);
        let toolbox_row = Toolbox::new(ToolboxAxis::Row, row_actions(t));
        let toolbox_column = Toolbox::new(ToolboxAxis::Column, column_actions(t));
        let toolbox_cell = Toolbox::new(ToolboxAxis::Cell, cell_actions(t));
        let heading_label = services.translate("Heading");

        let (rows, cols) = initial_size(data, &config);
        let mut grid = Grid::new(rows, cols);
        fill(&mut grid, data);

        let frame = LayoutFrame::default();
        let layout = GridLayout::compute(&grid, &frame);

        let mut engine = Self {
            read_only,
            services,
            config,
            grid,
            with_headings: false,
            heading_label,
            frame,
            layout,
            hovered_row: 0,
            hovered_column: 0,
            selected_row: 0,
            selected_column: 0,
            focused_cell: CellPosition::NONE,
            toolbox_row,
            toolbox_column,
            toolbox_cell,
            color_picker_open: false,
            hover_throttle: Throttle::default(),
            listener: None,
        };

        if !engine.read_only {
            engine.bind_events();
        }

        debug!(rows, cols, read_only, "grid engine created");
        engine
    }

    fn bind_events(&mut self) {
        self.listener = Some(self.services.subscribe_document_clicks());
        self.services
            .attach_tooltip(TooltipTarget::AddRowButton, &self.services.translate("Add row"));
        self.services
            .attach_tooltip(TooltipTarget::AddColumnButton, &self.services.translate("Add column"));
    }

    /// Drop the document-click subscription. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(id) = self.listener.take() {
            self.services.unsubscribe_document_clicks(id);
            debug!(?id, "document click listener removed");
        }
    }

    /// Whether the engine still reacts to pointer and keyboard input
    fn is_interactive(&self) -> bool {
        self.listener.is_some()
    }

    // === Accessors ===

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    pub fn number_of_rows(&self) -> usize {
        self.grid.row_count()
    }

    pub fn number_of_columns(&self) -> usize {
        self.grid.col_count()
    }

    pub fn with_headings(&self) -> bool {
        self.with_headings
    }

    pub fn hovered(&self) -> CellPosition {
        CellPosition::new(self.hovered_row, self.hovered_column)
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn focused_cell(&self) -> CellPosition {
        self.focused_cell
    }

    pub fn is_row_menu_showing(&self) -> bool {
        self.selected_row != 0
    }

    pub fn is_column_menu_showing(&self) -> bool {
        self.selected_column != 0
    }

    /// The cell toolbox follows the focused cell
    pub fn is_cell_menu_showing(&self) -> bool {
        self.cell_rect(self.focused_cell).is_some()
    }

    pub fn is_color_picker_open(&self) -> bool {
        self.color_picker_open
    }

    pub fn toolbox(&self, axis: ToolboxAxis) -> &Toolbox {
        match axis {
            ToolboxAxis::Row => &self.toolbox_row,
            ToolboxAxis::Column => &self.toolbox_column,
            ToolboxAxis::Cell => &self.toolbox_cell,
        }
    }

    fn toolbox_mut(&mut self, axis: ToolboxAxis) -> &mut Toolbox {
        match axis {
            ToolboxAxis::Row => &mut self.toolbox_row,
            ToolboxAxis::Column => &mut self.toolbox_column,
            ToolboxAxis::Cell => &mut self.toolbox_cell,
        }
    }

    pub fn add_row_disabled(&self) -> bool {
        self.limits().hides(HideRule::RowLimitReached)
    }

    pub fn add_column_disabled(&self) -> bool {
        self.limits().hides(HideRule::ColumnLimitReached)
    }

    fn limits(&self) -> Limits {
        Limits {
            rows: self.number_of_rows(),
            cols: self.number_of_columns(),
            max_rows: self.config.max_rows(),
            max_cols: self.config.max_cols(),
        }
    }

    pub fn set_throttle_interval(&mut self, interval: Duration) {
        self.hover_throttle = Throttle::new(interval);
    }

    // === Content ===

    pub fn cell_content(&self, row: usize, column: usize) -> Option<&str> {
        let (r, c) = to_arena(row, column)?;
        self.grid.get_cell(r, c).map(|cell| cell.content.as_str())
    }

    /// Replace a cell's inner HTML. Returns false for a cell that doesn't exist.
    pub fn set_cell_content(&mut self, row: usize, column: usize, content: impl Into<String>) -> bool {
        let Some((r, c)) = to_arena(row, column) else {
            return false;
        };
        let changed = self.grid.set_content(r, c, content);
        if changed {
            self.relayout();
        }
        changed
    }

    pub fn set_cell_background_color(&mut self, row: usize, column: usize, color: &str) -> bool {
        match to_arena(row, column) {
            Some((r, c)) => self.grid.set_background_color(r, c, color),
            None => false,
        }
    }

    /// Row-major content, skipping rows where every cell is blank
    pub fn get_data(&self) -> Vec<Vec<CellData>> {
        self.grid
            .rows_iter()
            .filter(|row| !row.iter().all(|cell| cell.is_blank()))
            .map(|row| row.iter().map(CellData::from).collect())
            .collect()
    }

    // === Layout ===

    /// Place the table; every row and cell box is derived from this
    pub fn set_frame(&mut self, frame: LayoutFrame) {
        self.frame = frame;
        self.relayout();
    }

    pub fn frame(&self) -> LayoutFrame {
        self.frame
    }

    fn relayout(&mut self) {
        self.layout = GridLayout::compute(&self.grid, &self.frame);
    }

    fn cell_rect(&self, pos: CellPosition) -> Option<ClientRect> {
        let (r, c) = to_arena(pos.row, pos.column)?;
        self.layout.cell_rect(r, c)
    }

    /// Offsets of a rendered box from the table's edges
    fn offsets_in_table(&self, rect: ClientRect) -> RelativeOffsets {
        let scroll = self.layout.scroll();
        relative_offsets(
            &bounding_box(self.layout.table_rect(), scroll),
            &bounding_box(rect, scroll),
        )
    }

    // === Pointer ===

    /// Throttled pointer-move handler. Returns whether a hover pass ran.
    pub fn pointer_moved(&mut self, pointer: PointerEvent, now: Instant) -> bool {
        if !self.is_interactive() || !self.hover_throttle.try_acquire(now) {
            return false;
        }

        let hovered = self.get_hovered_cell(pointer);
        self.hovered_row = hovered.row;
        self.hovered_column = hovered.column;
        trace!(row = hovered.row, column = hovered.column, "hover");

        self.update_toolboxes_position(self.hovered_row, self.hovered_column);
        true
    }

    /// Cell under the pointer, keeping the previous index on any axis the
    /// pointer is not over
    pub fn get_hovered_cell(&self, pointer: PointerEvent) -> CellPosition {
        let (row, column) = hover::hovered_cell(&self.layout, pointer, (self.hovered_row, self.hovered_column));
        CellPosition::new(row, column)
    }

    /// Move the row/column togglers to the given indices and the cell
    /// toggler to the focused cell. Axes with an open menu stay put.
    pub fn update_toolboxes_position(&mut self, row: usize, column: usize) {
        let rows = self.number_of_rows();
        let cols = self.number_of_columns();

        if !self.is_column_menu_showing() && column > 0 && column <= cols {
            if let Some(cell) = self.layout.cell_rect(0, column - 1) {
                let offsets = self.offsets_in_table(cell);
                self.toolbox_column.show(ToolboxPosition {
                    offset: ToolboxOffset {
                        top: None,
                        left: Some(offsets.from_left as f64 + cell.width / 2.0),
                    },
                    total: cols,
                    current: column,
                });
            }
        }

        if !self.is_row_menu_showing() && row > 0 && row <= rows {
            if let Some(rect) = self.layout.row_rect(row - 1) {
                let offsets = self.offsets_in_table(rect);
                self.toolbox_row.show(ToolboxPosition {
                    offset: ToolboxOffset {
                        top: Some((offsets.from_top as f64 + rect.height / 2.0).ceil()),
                        left: None,
                    },
                    total: rows,
                    current: row,
                });
            }
        }

        if let Some(cell) = self.cell_rect(self.focused_cell) {
            let offsets = self.offsets_in_table(cell);
            self.toolbox_cell.show(ToolboxPosition {
                offset: ToolboxOffset {
                    top: Some(offsets.from_top as f64),
                    left: Some(offsets.from_left as f64 + cell.width - self.frame.toolbox_size),
                },
                total: 0,
                current: 0,
            });
        }
    }

    // === Toolboxes ===

    pub fn toggler_clicked(&mut self, axis: ToolboxAxis) {
        if !self.is_interactive() {
            return;
        }

        let limits = self.limits();
        let transition = self.toolbox_mut(axis).toggler_clicked(|rule| limits.hides(rule));
        debug!(axis = axis.name(), ?transition, "toggler clicked");

        match (axis, transition) {
            (ToolboxAxis::Column, ToolboxTransition::Opened) => {
                self.select_column(self.hovered_column);
                self.hide_row_toolbox();
                self.hide_cell_toolbox();
            }
            (ToolboxAxis::Column, ToolboxTransition::Closed) => self.unselect_column(),
            (ToolboxAxis::Row, ToolboxTransition::Opened) => {
                self.select_row(self.hovered_row);
                self.hide_column_toolbox();
            }
            (ToolboxAxis::Row, ToolboxTransition::Closed) => self.unselect_row(),
            (ToolboxAxis::Cell, ToolboxTransition::Opened) => {
                self.hide_column_toolbox();
                self.hide_row_toolbox();
            }
            (ToolboxAxis::Cell, ToolboxTransition::Closed) => {
                self.unselect_row();
                self.unselect_column();
            }
        }
    }

    /// Click on the `index`th item of a toolbox menu
    pub fn menu_item_clicked(&mut self, axis: ToolboxAxis, index: usize) {
        if !self.is_interactive() {
            return;
        }

        if let PopoverClick::Fire(action) = self.toolbox_mut(axis).popover_mut().click(index) {
            self.dispatch(action);
        }
    }

    /// Run a menu action against the current selection
    pub fn dispatch(&mut self, action: GridAction) {
        debug!(?action, row = self.selected_row, column = self.selected_column, "dispatch");

        match action {
            GridAction::AddColumnLeft => {
                self.add_column(Some(self.selected_column), true);
            }
            GridAction::AddColumnRight => {
                self.add_column(Some(self.selected_column + 1), true);
            }
            GridAction::DeleteColumn => {
                self.delete_column(self.selected_column);
            }
            GridAction::IncreaseWidth => self.increase_width(self.selected_column),
            GridAction::DecreaseWidth => self.decrease_width(self.selected_column),
            GridAction::AddRowAbove => {
                self.add_row(Some(self.selected_row), true);
            }
            GridAction::AddRowBelow => {
                self.add_row(Some(self.selected_row + 1), true);
            }
            GridAction::DeleteRow => {
                self.delete_row(self.selected_row);
            }
            GridAction::ChangeBackground => {
                self.hide_toolboxes();
                self.color_picker_open = true;
                return;
            }
        }

        self.hide_toolboxes();
    }

    /// Apply a color from the picker to the focused cell
    pub fn pick_color(&mut self, color: &str) {
        if !self.color_picker_open {
            return;
        }
        let CellPosition { row, column } = self.focused_cell;
        if self.set_cell_background_color(row, column, color) {
            debug!(row, column, color, "cell background changed");
        }
        self.hide_toolboxes();
    }

    /// Close every menu, hide every toggler, then put the togglers back
    /// under the current hover
    pub fn hide_toolboxes(&mut self) {
        self.hide_row_toolbox();
        self.hide_column_toolbox();
        self.hide_cell_toolbox();
        self.update_toolboxes_position(self.hovered_row, self.hovered_column);
    }

    fn hide_row_toolbox(&mut self) {
        self.unselect_row();
        self.toolbox_row.hide();
    }

    fn hide_column_toolbox(&mut self) {
        self.unselect_column();
        self.toolbox_column.hide();
    }

    fn hide_cell_toolbox(&mut self) {
        self.toolbox_cell.hide();
        self.color_picker_open = false;
    }

    fn select_row(&mut self, index: usize) {
        if index > 0 && index <= self.number_of_rows() {
            self.selected_row = index;
        }
    }

    fn unselect_row(&mut self) {
        self.selected_row = 0;
    }

    fn select_column(&mut self, index: usize) {
        if index > 0 && index <= self.number_of_columns() {
            self.selected_column = index;
        }
    }

    fn unselect_column(&mut self) {
        self.selected_column = 0;
    }

    // === Document events ===

    pub fn document_clicked(&mut self, target: ClickTarget) {
        if !self.is_interactive() {
            return;
        }

        if matches!(target, ClickTarget::Table | ClickTarget::Outside) {
            self.hide_toolboxes();
        }

        match target {
            ClickTarget::AddRowButton => {
                self.add_row(None, true);
                self.hide_toolboxes();
            }
            ClickTarget::AddColumnButton => {
                self.add_column(None, true);
                self.hide_toolboxes();
            }
            _ => {}
        }
    }

    /// Keyboard focus moved into a cell
    pub fn focus_in(&mut self, row: usize, column: usize) {
        let pos = CellPosition::new(row, column);
        if self.cell_rect(pos).is_some() {
            self.focused_cell = pos;
            if self.is_interactive() {
                self.update_toolboxes_position(self.hovered_row, self.hovered_column);
            }
        }
    }

    pub fn handle_key(&mut self, input: KeyInput) -> KeyOutcome {
        if !self.is_interactive() {
            return KeyOutcome::default();
        }

        match input.key {
            Key::Enter if !input.shift => {
                self.move_cursor_to_next_row();
                KeyOutcome {
                    prevent_default: true,
                    stop_propagation: false,
                }
            }
            Key::Tab => KeyOutcome {
                prevent_default: false,
                stop_propagation: true,
            },
            _ => KeyOutcome::default(),
        }
    }

    /// Focus the same column one row down, appending a row from the last one
    fn move_cursor_to_next_row(&mut self) {
        if self.focused_cell.is_none() {
            return;
        }

        if self.focused_cell.row != self.number_of_rows() {
            self.focused_cell.row += 1;
            self.update_toolboxes_position(self.hovered_row, self.hovered_column);
        } else {
            if self.add_row(None, false).is_some() {
                self.focused_cell.row += 1;
            }
            self.update_toolboxes_position(0, 0);
        }
    }

    // === Structure ===

    /// Insert a column before the 1-based `index`, or append when `index`
    /// is `None` or out of range. Returns the new column's index, or `None`
    /// at the column limit.
    pub fn add_column(&mut self, index: Option<usize>, focus_first: bool) -> Option<usize> {
        let cols = self.number_of_columns();
        if self.add_column_disabled() {
            debug!(cols, "column limit reached");
            return None;
        }

        let at = match index {
            Some(i) if i > 0 && i <= cols => i - 1,
            _ => cols,
        };
        let inserted = self.grid.insert_col_at(at) + 1;

        if focus_first {
            self.focused_cell = CellPosition::new(1, inserted);
        }

        self.sync_headings();
        self.after_structure_change();
        debug!(column = inserted, "column added");
        Some(inserted)
    }

    /// Insert a row before the 1-based `index`, or append. New rows copy
    /// column widths from the first row.
    pub fn add_row(&mut self, index: Option<usize>, focus_first: bool) -> Option<usize> {
        let rows = self.number_of_rows();
        if self.add_row_disabled() {
            debug!(rows, "row limit reached");
            return None;
        }

        let at = match index {
            Some(i) if i > 0 && i <= rows => i - 1,
            _ => rows,
        };
        let inserted = self.grid.insert_row_at(at) + 1;

        if focus_first {
            self.focused_cell = CellPosition::new(inserted, 1);
        }

        self.sync_headings();
        self.after_structure_change();
        debug!(row = inserted, "row added");
        Some(inserted)
    }

    /// Remove a column. No-op for the last column or an index that doesn't exist.
    pub fn delete_column(&mut self, index: usize) -> bool {
        let removed = index > 0 && self.grid.delete_col_at(index - 1).is_some();
        if removed {
            self.sync_headings();
            self.after_structure_change();
            debug!(column = index, "column deleted");
        }
        removed
    }

    /// Remove a row. No-op for the last row or an index that doesn't exist.
    pub fn delete_row(&mut self, index: usize) -> bool {
        let removed = index > 0 && self.grid.delete_row_at(index - 1).is_some();
        if removed {
            self.sync_headings();
            self.after_structure_change();
            debug!(row = index, "row deleted");
        }
        removed
    }

    pub fn increase_width(&mut self, column: usize) {
        self.adjust_width(column, WIDTH_STEP);
    }

    pub fn decrease_width(&mut self, column: usize) {
        self.adjust_width(column, -WIDTH_STEP);
    }

    fn adjust_width(&mut self, column: usize, delta: f64) {
        if column == 0 || column > self.number_of_columns() {
            return;
        }
        self.grid.adjust_col_width(column - 1, delta);
        self.relayout();
    }

    pub fn set_headings_setting(&mut self, with_headings: bool) {
        self.with_headings = with_headings;
        self.sync_headings();
    }

    fn sync_headings(&mut self) {
        let label = self.with_headings.then_some(self.heading_label.as_str());
        self.grid.mark_heading_row(label);
    }

    /// Pull every transient index back into range and re-derive the layout
    fn after_structure_change(&mut self) {
        let rows = self.number_of_rows();
        let cols = self.number_of_columns();

        if self.selected_row > rows {
            self.hide_row_toolbox();
        }
        if self.selected_column > cols {
            self.hide_column_toolbox();
        }

        self.hovered_row = self.hovered_row.min(rows);
        self.hovered_column = self.hovered_column.min(cols);

        if self.focused_cell.row > rows || self.focused_cell.column > cols {
            self.focused_cell = CellPosition::NONE;
            self.hide_cell_toolbox();
        }

        self.relayout();
    }

    // === Projection ===

    /// Everything a host needs to draw this table
    pub fn wrapper(&self) -> WrapperView<'_> {
        let editable = !self.read_only;
        let rows = self
            .grid
            .rows_iter()
            .enumerate()
            .map(|(r, row)| RowView {
                rect: self.layout.row_rect(r).unwrap_or_default(),
                selected: self.selected_row == r + 1,
                cells: row
                    .iter()
                    .enumerate()
                    .map(|(c, cell)| CellView {
                        rect: self.layout.cell_rect(r, c).unwrap_or_default(),
                        content: &cell.content,
                        background_color: cell.background_color.as_deref(),
                        heading: cell.heading.as_deref(),
                        selected: self.selected_column == c + 1,
                        focused: self.focused_cell == CellPosition::new(r + 1, c + 1),
                        editable,
                    })
                    .collect(),
            })
            .collect();

        let add_buttons = !self.read_only;

        WrapperView {
            read_only: self.read_only,
            table: TableView {
                rect: self.layout.table_rect(),
                with_headings: self.with_headings,
                rows,
            },
            row_toolbox: toolbox_view(&self.toolbox_row),
            column_toolbox: toolbox_view(&self.toolbox_column),
            cell_toolbox: toolbox_view(&self.toolbox_cell),
            color_picker: self.color_picker_open.then(|| ColorPickerView {
                presets: &self.config.preset_colors,
            }),
            add_row: add_buttons.then(|| ButtonView {
                disabled: self.add_row_disabled(),
            }),
            add_column: add_buttons.then(|| ButtonView {
                disabled: self.add_column_disabled(),
            }),
        }
    }
}

impl Drop for GridEngine {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for GridEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridEngine")
            .field("rows", &self.number_of_rows())
            .field("cols", &self.number_of_columns())
            .field("with_headings", &self.with_headings)
            .field("hovered", &self.hovered())
            .field("selected_row", &self.selected_row)
            .field("selected_column", &self.selected_column)
            .field("focused_cell", &self.focused_cell)
            .field("listener", &self.listener)
            .finish()
    }
}

fn toolbox_view(toolbox: &Toolbox) -> ToolboxView<'_> {
    ToolboxView {
        axis: toolbox.axis(),
        shown: toolbox.is_shown(),
        open: toolbox.is_open(),
        offset: toolbox.offset(),
        placement: toolbox.placement(),
        items: toolbox.popover().render(),
    }
}

/// 1-based engine coordinates to 0-based arena ones
fn to_arena(row: usize, column: usize) -> Option<(usize, usize)> {
    Some((row.checked_sub(1)?, column.checked_sub(1)?))
}

/// Saved content wins (widest row, so nothing is cut off), then the
/// configured size, then 2x2
fn initial_size(data: &TableData, config: &TableConfig) -> (usize, usize) {
    let content = data.dimensions();
    let rows = content
        .map(|(r, _)| r)
        .filter(|&r| r > 0)
        .or(config.initial_rows())
        .unwrap_or(DEFAULT_ROWS);
    let cols = content
        .map(|(_, c)| c)
        .filter(|&c| c > 0)
        .or(config.initial_cols())
        .unwrap_or(DEFAULT_COLS);
    (rows, cols)
}

fn fill(grid: &mut Grid, data: &TableData) {
    for (r, row) in data.content.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            grid.set_content(r, c, cell.content());
            if let Some(color) = cell.background_color() {
                grid.set_background_color(r, c, color);
            }
            if let Some(width) = cell.width() {
                grid.set_width(r, c, width);
            }
        }
    }
}
