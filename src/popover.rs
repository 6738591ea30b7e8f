use crate::action::{ActionDescriptor, GridAction, HideRule, Icon};

/// Per-item visual state of a popover row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemState {
    pub hidden: bool,
    /// First click of a two-click confirm has happened
    pub confirmed: bool,
}

/// What a click on a popover row resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverClick {
    /// Click landed outside any visible item, or the popover is closed
    Ignored,
    /// Item moved into its confirmation state; nothing fires yet
    AwaitingConfirmation,
    Fire(GridAction),
}

/// A row as the host should draw it
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverItemView<'a> {
    pub index: usize,
    pub icon: Icon,
    pub label: &'a str,
    pub hidden: bool,
    pub confirmed: bool,
}

/// Floating menu of labeled actions. Owns only its open/closed and
/// per-item confirmation state; actions are handed back to the caller.
#[derive(Debug, Clone)]
pub struct Popover {
    items: Vec<ActionDescriptor>,
    states: Vec<ItemState>,
    opened: bool,
}

impl Popover {
    pub fn new(items: Vec<ActionDescriptor>) -> Self {
        let states = vec![ItemState::default(); items.len()];
        Self {
            items,
            states,
            opened: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn item_state(&self, index: usize) -> Option<ItemState> {
        self.states.get(index).copied()
    }

    /// One row per item: icon and label
    pub fn render(&self) -> Vec<PopoverItemView<'_>> {
        self.items
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(index, (item, state))| PopoverItemView {
                index,
                icon: item.icon,
                label: &item.label,
                hidden: state.hidden,
                confirmed: state.confirmed,
            })
            .collect()
    }

    /// Open the popover, hiding every item whose rule currently holds
    pub fn open(&mut self, is_hidden: impl Fn(HideRule) -> bool) {
        for (item, state) in self.items.iter().zip(self.states.iter_mut()) {
            if let Some(rule) = item.hide_if {
                state.hidden = is_hidden(rule);
            }
        }
        self.opened = true;
    }

    /// Close the popover and forget any pending confirmations
    pub fn close(&mut self) {
        self.opened = false;
        for state in &mut self.states {
            state.confirmed = false;
        }
    }

    pub fn click(&mut self, index: usize) -> PopoverClick {
        if !self.opened {
            return PopoverClick::Ignored;
        }
        let (Some(item), Some(state)) = (self.items.get(index), self.states.get_mut(index)) else {
            return PopoverClick::Ignored;
        };
        if state.hidden {
            return PopoverClick::Ignored;
        }

        if item.confirmation_required && !state.confirmed {
            state.confirmed = true;
            return PopoverClick::AwaitingConfirmation;
        }

        PopoverClick::Fire(item.action)
    }
}
