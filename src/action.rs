//! Action descriptors for the toolbox menus.
//!
//! Menus hold plain data; the engine resolves `GridAction` and `HideRule`
//! in one place each, so every transition a menu can trigger is visible in
//! `GridEngine::dispatch`.

/// Icons the host is expected to draw next to a menu label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    DirectionLeftDown,
    DirectionRightDown,
    DirectionUpRight,
    DirectionDownRight,
    Cross,
    Plus,
    Stretch,
    Collapse,
    AddBackground,
    MenuSmall,
    Heading,
    HeadingOff,
    Table,
}

impl Icon {
    /// Single-glyph rendition for text surfaces
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::DirectionLeftDown => "↙",
            Icon::DirectionRightDown => "↘",
            Icon::DirectionUpRight => "↗",
            Icon::DirectionDownRight => "↘",
            Icon::Cross => "✕",
            Icon::Plus => "+",
            Icon::Stretch => "⇔",
            Icon::Collapse => "⇥",
            Icon::AddBackground => "▨",
            Icon::MenuSmall => "⋮",
            Icon::Heading => "H",
            Icon::HeadingOff => "h",
            Icon::Table => "▦",
        }
    }
}

/// Everything a toolbox menu item can ask the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAction {
    AddColumnLeft,
    AddColumnRight,
    DeleteColumn,
    IncreaseWidth,
    DecreaseWidth,
    AddRowAbove,
    AddRowBelow,
    DeleteRow,
    ChangeBackground,
}

/// Conditions under which a menu item is hidden when the menu opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HideRule {
    /// Column count has reached `maxcols`
    ColumnLimitReached,
    /// Only one column is left
    SingleColumn,
    /// Row count has reached `maxrows`
    RowLimitReached,
    /// Only one row is left
    SingleRow,
}

/// One entry in a toolbox menu
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDescriptor {
    /// Translated label
    pub label: String,
    pub icon: Icon,
    /// Destructive items need a second click
    pub confirmation_required: bool,
    pub hide_if: Option<HideRule>,
    pub action: GridAction,
}

impl ActionDescriptor {
    pub fn new(label: impl Into<String>, icon: Icon, action: GridAction) -> Self {
        Self {
            label: label.into(),
            icon,
            confirmation_required: false,
            hide_if: None,
            action,
        }
    }

    pub fn hidden_if(mut self, rule: HideRule) -> Self {
        self.hide_if = Some(rule);
        self
    }

    pub fn with_confirmation(mut self) -> Self {
        self.confirmation_required = true;
        self
    }
}

/// Column menu: add left/right, delete, widen, narrow
pub fn column_actions(t: impl Fn(&str) -> String) -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::new(t("Add column to left"), Icon::DirectionLeftDown, GridAction::AddColumnLeft)
            .hidden_if(HideRule::ColumnLimitReached),
        ActionDescriptor::new(t("Add column to right"), Icon::DirectionRightDown, GridAction::AddColumnRight)
            .hidden_if(HideRule::ColumnLimitReached),
        ActionDescriptor::new(t("Delete column"), Icon::Cross, GridAction::DeleteColumn)
            .hidden_if(HideRule::SingleColumn)
            .with_confirmation(),
        ActionDescriptor::new(t("Increase Width"), Icon::Stretch, GridAction::IncreaseWidth),
        ActionDescriptor::new(t("Decrease Width"), Icon::Collapse, GridAction::DecreaseWidth),
    ]
}

/// Row menu: add above/below, delete
pub fn row_actions(t: impl Fn(&str) -> String) -> Vec<ActionDescriptor> {
    vec![
        ActionDescriptor::new(t("Add row above"), Icon::DirectionUpRight, GridAction::AddRowAbove)
            .hidden_if(HideRule::RowLimitReached),
        ActionDescriptor::new(t("Add row below"), Icon::DirectionDownRight, GridAction::AddRowBelow)
            .hidden_if(HideRule::RowLimitReached),
        ActionDescriptor::new(t("Delete row"), Icon::Cross, GridAction::DeleteRow)
            .hidden_if(HideRule::SingleRow)
            .with_confirmation(),
    ]
}

/// Cell menu: background color
pub fn cell_actions(t: impl Fn(&str) -> String) -> Vec<ActionDescriptor> {
    vec![ActionDescriptor::new(
        t("Change background color"),
        Icon::AddBackground,
        GridAction::ChangeBackground,
    )]
}
