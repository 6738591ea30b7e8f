//! Capabilities the surrounding editor grants a table block.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

/// Handle for one document-click subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Affordances that carry a host tooltip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipTarget {
    AddRowButton,
    AddColumnButton,
}

pub trait HostServices {
    /// Translate a user-facing string; unknown keys come back unchanged
    fn translate(&self, key: &str) -> String;

    fn attach_tooltip(&self, target: TooltipTarget, text: &str);

    /// Ask to be told about every click on the document
    fn subscribe_document_clicks(&self) -> ListenerId;

    fn unsubscribe_document_clicks(&self, id: ListenerId);
}

/// In-process host: a translation dictionary, a tooltip registry and a
/// click hub that tracks live subscriptions.
#[derive(Debug, Default)]
pub struct HostContext {
    dictionary: HashMap<String, String>,
    tooltips: RefCell<HashMap<TooltipTarget, String>>,
    listeners: RefCell<BTreeSet<ListenerId>>,
    next_listener: Cell<u64>,
}

impl HostContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(dictionary: HashMap<String, String>) -> Self {
        Self {
            dictionary,
            ..Self::default()
        }
    }

    pub fn tooltip(&self, target: TooltipTarget) -> Option<String> {
        self.tooltips.borrow().get(&target).cloned()
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.borrow().contains(&id)
    }

    /// Number of live document-click subscriptions
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl HostServices for HostContext {
    fn translate(&self, key: &str) -> String {
        self.dictionary
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn attach_tooltip(&self, target: TooltipTarget, text: &str) {
        self.tooltips.borrow_mut().insert(target, text.to_string());
    }

    fn subscribe_document_clicks(&self) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id);
        id
    }

    fn unsubscribe_document_clicks(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }
}
