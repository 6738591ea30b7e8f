//! Read-only projection of an engine, for hosts to draw.
//!
//! Nothing here is authoritative: a view is rebuilt from the arena every
//! time `GridEngine::wrapper` is called.

use crate::geometry::ClientRect;
use crate::popover::PopoverItemView;
use crate::toolbox::{PopoverPlacement, ToolboxAxis, ToolboxOffset};

#[derive(Debug, Clone, PartialEq)]
pub struct CellView<'a> {
    pub rect: ClientRect,
    pub content: &'a str,
    pub background_color: Option<&'a str>,
    /// Placeholder label of a heading cell
    pub heading: Option<&'a str>,
    /// Part of the column whose menu is open
    pub selected: bool,
    pub focused: bool,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub rect: ClientRect,
    pub selected: bool,
    pub cells: Vec<CellView<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rect: ClientRect,
    pub with_headings: bool,
    pub rows: Vec<RowView<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolboxView<'a> {
    pub axis: ToolboxAxis,
    pub shown: bool,
    pub open: bool,
    /// Toggler position relative to the table's upper left corner
    pub offset: ToolboxOffset,
    pub placement: PopoverPlacement,
    pub items: Vec<PopoverItemView<'a>>,
}

/// Quick-add affordance below or beside the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPickerView<'a> {
    pub presets: &'a [String],
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrapperView<'a> {
    pub read_only: bool,
    pub table: TableView<'a>,
    pub row_toolbox: ToolboxView<'a>,
    pub column_toolbox: ToolboxView<'a>,
    pub cell_toolbox: ToolboxView<'a>,
    pub color_picker: Option<ColorPickerView<'a>>,
    /// Absent in read-only mode
    pub add_row: Option<ButtonView>,
    pub add_column: Option<ButtonView>,
}

impl WrapperView<'_> {
    pub fn toolbox(&self, axis: ToolboxAxis) -> &ToolboxView<'_> {
        match axis {
            ToolboxAxis::Row => &self.row_toolbox,
            ToolboxAxis::Column => &self.column_toolbox,
            ToolboxAxis::Cell => &self.cell_toolbox,
        }
    }
}
