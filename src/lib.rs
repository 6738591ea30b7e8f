//! Editable table block for rich-text editors.
//!
//! [`engine::GridEngine`] owns the grid and turns pointer, keyboard and
//! click events into structural edits and toolbox state. [`plugin::TableBlock`]
//! wraps it in the lifecycle a block editor expects.

pub mod action;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod html;
pub mod paste;
pub mod plugin;
pub mod popover;
pub mod table;
pub mod throttle;
pub mod toolbox;
pub mod view;

pub use config::TableConfig;
pub use data::{CellData, TableData};
pub use engine::{CellPosition, ClickTarget, GridEngine, Key, KeyInput, KeyOutcome};
pub use error::{Result, TableError};
pub use host::{HostContext, HostServices};
pub use plugin::TableBlock;
