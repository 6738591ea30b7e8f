use crate::action::{ActionDescriptor, HideRule};
use crate::popover::Popover;

/// Which structure a toolbox is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolboxAxis {
    Row,
    Column,
    Cell,
}

impl ToolboxAxis {
    pub fn name(&self) -> &'static str {
        match self {
            ToolboxAxis::Row => "row",
            ToolboxAxis::Column => "column",
            ToolboxAxis::Cell => "cell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Bottom,
}

/// Edge the popover hangs from, relative to its toggler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopoverPlacement {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

/// Offset of the toolbox inside the wrapper. Axes that are `None` keep
/// their previous value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolboxOffset {
    pub top: Option<f64>,
    pub left: Option<f64>,
}

/// Everything `show` needs: where to draw, and the 1-based index of the
/// hovered structure out of how many
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolboxPosition {
    pub offset: ToolboxOffset,
    pub total: usize,
    pub current: usize,
}

/// Reported by `toggler_clicked` so the owner can run its open/close logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolboxTransition {
    Opened,
    Closed,
}

/// A toggle affordance paired with one popover
#[derive(Debug, Clone)]
pub struct Toolbox {
    axis: ToolboxAxis,
    popover: Popover,
    shown: bool,
    offset: ToolboxOffset,
    placement: PopoverPlacement,
    total: usize,
    current: usize,
}

impl Toolbox {
    pub fn new(axis: ToolboxAxis, items: Vec<ActionDescriptor>) -> Self {
        Self {
            axis,
            popover: Popover::new(items),
            shown: false,
            offset: ToolboxOffset::default(),
            placement: PopoverPlacement::default(),
            total: 0,
            current: 0,
        }
    }

    pub fn axis(&self) -> ToolboxAxis {
        self.axis
    }

    pub fn popover(&self) -> &Popover {
        &self.popover
    }

    pub fn popover_mut(&mut self) -> &mut Popover {
        &mut self.popover
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    pub fn offset(&self) -> ToolboxOffset {
        self.offset
    }

    pub fn placement(&self) -> PopoverPlacement {
        self.placement
    }

    /// Recompute the popover anchor, then flip the popover open or closed.
    /// `is_hidden` is only consulted when opening.
    pub fn toggler_clicked(&mut self, is_hidden: impl Fn(HideRule) -> bool) -> ToolboxTransition {
        self.placement = self.compute_placement();

        if self.popover.is_open() {
            self.popover.close();
            ToolboxTransition::Closed
        } else {
            self.popover.open(is_hidden);
            ToolboxTransition::Opened
        }
    }

    /// Past the midpoint of its axis the popover opens towards the grid
    /// instead of away from it
    fn compute_placement(&self) -> PopoverPlacement {
        let past_half = self.current > self.total.div_ceil(2);
        match self.axis {
            ToolboxAxis::Column => PopoverPlacement {
                horizontal: if past_half { HorizontalAnchor::Right } else { HorizontalAnchor::Left },
                vertical: VerticalAnchor::Top,
            },
            ToolboxAxis::Row => PopoverPlacement {
                horizontal: HorizontalAnchor::Left,
                vertical: if past_half { VerticalAnchor::Bottom } else { VerticalAnchor::Top },
            },
            ToolboxAxis::Cell => PopoverPlacement::default(),
        }
    }

    pub fn show(&mut self, position: ToolboxPosition) {
        if let Some(top) = position.offset.top {
            self.offset.top = Some(top);
        }
        if let Some(left) = position.offset.left {
            self.offset.left = Some(left);
        }

        // the cell toolbox never flips, so there is nothing to cache
        if self.axis != ToolboxAxis::Cell {
            self.total = position.total;
            self.current = position.current;
        }

        self.shown = true;
    }

    pub fn hide(&mut self) {
        self.popover.close();
        self.shown = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{column_actions, row_actions};

    fn column_toolbox() -> Toolbox {
        Toolbox::new(ToolboxAxis::Column, column_actions(|s| s.to_string()))
    }

    fn at(total: usize, current: usize) -> ToolboxPosition {
        ToolboxPosition {
            offset: ToolboxOffset { top: None, left: Some(50.0) },
            total,
            current,
        }
    }

    #[test]
    fn toggler_alternates_open_and_closed() {
        let mut toolbox = column_toolbox();
        assert_eq!(toolbox.toggler_clicked(|_| false), ToolboxTransition::Opened);
        assert!(toolbox.is_open());
        assert_eq!(toolbox.toggler_clicked(|_| false), ToolboxTransition::Closed);
        assert!(!toolbox.is_open());
    }

    #[test]
    fn column_popover_flips_past_half() {
        let mut toolbox = column_toolbox();
        toolbox.show(at(4, 2));
        toolbox.toggler_clicked(|_| false);
        assert_eq!(toolbox.placement().horizontal, HorizontalAnchor::Left);

        toolbox.toggler_clicked(|_| false);
        toolbox.show(at(4, 3));
        toolbox.toggler_clicked(|_| false);
        assert_eq!(toolbox.placement().horizontal, HorizontalAnchor::Right);
    }

    #[test]
    fn odd_totals_round_the_midpoint_up() {
        let mut toolbox = Toolbox::new(ToolboxAxis::Row, row_actions(|s| s.to_string()));
        toolbox.show(at(5, 3));
        toolbox.toggler_clicked(|_| false);
        assert_eq!(toolbox.placement().vertical, VerticalAnchor::Top);

        toolbox.toggler_clicked(|_| false);
        toolbox.show(at(5, 4));
        toolbox.toggler_clicked(|_| false);
        assert_eq!(toolbox.placement().vertical, VerticalAnchor::Bottom);
    }

    #[test]
    fn show_keeps_untouched_offset_axis() {
        let mut toolbox = column_toolbox();
        toolbox.show(ToolboxPosition {
            offset: ToolboxOffset { top: Some(3.0), left: Some(10.0) },
            total: 2,
            current: 1,
        });
        toolbox.show(at(2, 2));
        assert!(toolbox.is_shown());
        assert_eq!(toolbox.offset(), ToolboxOffset { top: Some(3.0), left: Some(50.0) });
    }

    #[test]
    fn hide_closes_popover() {
        let mut toolbox = column_toolbox();
        toolbox.show(at(2, 1));
        toolbox.toggler_clicked(|_| false);
        toolbox.hide();
        assert!(!toolbox.is_shown());
        assert!(!toolbox.is_open());
    }
}
