pub mod grid;
pub mod layout;

pub use grid::{Cell, Grid, Row};
pub use layout::{GridLayout, LayoutFrame};
