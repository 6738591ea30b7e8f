// Property-based tests for grid structure, hover search and menu state.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::rc::Rc;

use proptest::prelude::*;
use tableblock::data::{CellData, TableData};
use tableblock::geometry::PointerEvent;
use tableblock::table::LayoutFrame;
use tableblock::toolbox::ToolboxAxis;
use tableblock::{ClickTarget, GridEngine, HostContext, HostServices, Key, KeyInput, TableConfig};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const LINE_HEIGHT: f64 = 10.0;
const TABLE_WIDTH: f64 = 1000.0;
/// Distance from a cell edge that still counts as inside the cell
const EPSILON: f64 = 0.05;

fn frame() -> LayoutFrame {
    LayoutFrame {
        left: 0.0,
        top: 0.0,
        width: TABLE_WIDTH,
        line_height: LINE_HEIGHT,
        ..LayoutFrame::default()
    }
}

fn engine(data: &TableData, config: TableConfig) -> GridEngine {
    engine_in(data, config, frame())
}

fn engine_in(data: &TableData, config: TableConfig, frame: LayoutFrame) -> GridEngine {
    let host = Rc::new(HostContext::new());
    let services: Rc<dyn HostServices> = host;
    let mut engine = GridEngine::new(false, services, data, config);
    engine.set_frame(frame);
    engine
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Edit {
    AddRow(Option<usize>),
    AddColumn(Option<usize>),
    DeleteRow(usize),
    DeleteColumn(usize),
    Type(usize, usize, String),
    Enter(usize, usize),
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        2 => proptest::option::of(0..8usize).prop_map(Edit::AddRow),
        2 => proptest::option::of(0..8usize).prop_map(Edit::AddColumn),
        2 => (0..8usize).prop_map(Edit::DeleteRow),
        2 => (0..8usize).prop_map(Edit::DeleteColumn),
        1 => (0..8usize, 0..8usize, r"[a-z ]{0,6}").prop_map(|(r, c, s)| Edit::Type(r, c, s)),
        1 => (1..8usize, 1..8usize).prop_map(|(r, c)| Edit::Enter(r, c)),
    ]
}

#[derive(Debug, Clone)]
enum MenuEvent {
    Hover(f64, f64),
    Toggle(ToolboxAxis),
    Item(ToolboxAxis, usize),
    Click(ClickTarget),
}

fn arb_axis() -> impl Strategy<Value = ToolboxAxis> {
    prop_oneof![
        Just(ToolboxAxis::Row),
        Just(ToolboxAxis::Column),
        Just(ToolboxAxis::Cell),
    ]
}

fn arb_menu_event() -> impl Strategy<Value = MenuEvent> {
    prop_oneof![
        3 => (-50.0..1050.0f64, -20.0..80.0f64).prop_map(|(x, y)| MenuEvent::Hover(x, y)),
        4 => arb_axis().prop_map(MenuEvent::Toggle),
        3 => (arb_axis(), 0..6usize).prop_map(|(a, i)| MenuEvent::Item(a, i)),
        1 => prop_oneof![
            Just(ClickTarget::Table),
            Just(ClickTarget::Wrapper),
            Just(ClickTarget::Outside),
            Just(ClickTarget::AddRowButton),
            Just(ClickTarget::AddColumnButton),
        ]
        .prop_map(MenuEvent::Click),
    ]
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn grid_stays_rectangular(
        rows in 1..5usize,
        cols in 1..5usize,
        max_rows in proptest::option::of(5..9usize),
        max_cols in proptest::option::of(5..9usize),
        edits in proptest::collection::vec(arb_edit(), 0..40),
    ) {
        let config = TableConfig {
            rows: Some(rows as i64),
            cols: Some(cols as i64),
            maxrows: max_rows,
            maxcols: max_cols,
            ..TableConfig::default()
        };
        let mut engine = engine(&TableData::default(), config);

        for edit in edits {
            match edit {
                Edit::AddRow(at) => { engine.add_row(at, true); }
                Edit::AddColumn(at) => { engine.add_column(at, true); }
                Edit::DeleteRow(i) => { engine.delete_row(i); }
                Edit::DeleteColumn(i) => { engine.delete_column(i); }
                Edit::Type(r, c, s) => { engine.set_cell_content(r, c, s); }
                Edit::Enter(r, c) => {
                    engine.focus_in(r, c);
                    engine.handle_key(KeyInput::new(Key::Enter));
                }
            }

            let grid = engine.grid();
            prop_assert!(grid.is_rectangular());
            prop_assert!(engine.number_of_rows() >= 1);
            prop_assert!(engine.number_of_columns() >= 1);
            if let Some(max) = max_rows {
                prop_assert!(engine.number_of_rows() <= max);
            }
            if let Some(max) = max_cols {
                prop_assert!(engine.number_of_columns() <= max);
            }

            let focused = engine.focused_cell();
            prop_assert!(focused.row <= engine.number_of_rows());
            prop_assert!(focused.column <= engine.number_of_columns());
        }
    }

    #[test]
    fn saved_rows_are_the_non_blank_ones(
        cells in proptest::collection::vec(
            proptest::collection::vec(prop_oneof![Just(String::new()), Just(" ".to_string()), r"[a-z]{1,4}"], 3),
            1..6,
        ),
    ) {
        let data = TableData {
            content: cells
                .iter()
                .map(|row| row.iter().map(|s| CellData::from(s.as_str())).collect())
                .collect(),
            ..TableData::default()
        };
        let engine = engine(&data, TableConfig::default());

        let expected: Vec<&Vec<String>> = cells
            .iter()
            .filter(|row| row.iter().any(|s| !s.trim().is_empty()))
            .collect();
        let saved = engine.get_data();
        prop_assert_eq!(saved.len(), expected.len());
        for (saved_row, row) in saved.iter().zip(expected) {
            let contents: Vec<&str> = saved_row.iter().map(CellData::content).collect();
            let row: Vec<&str> = row.iter().map(String::as_str).collect();
            prop_assert_eq!(contents, row);
        }
    }
}

// ---------------------------------------------------------------------------
// Hover
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn hover_finds_the_cell_under_the_pointer(
        widths in proptest::collection::vec(0.5..3.0f64, 1..13),
        lines in proptest::collection::vec(1..4usize, 1..10),
        left in 0.0..40.0f64,
        top in 0.0..40.0f64,
        pick_row in any::<proptest::sample::Index>(),
    ) {
        let content = lines
            .iter()
            .enumerate()
            .map(|(r, &n)| {
                widths
                    .iter()
                    .enumerate()
                    .map(|(c, &w)| {
                        let text = if c == 0 { vec!["x"; n].join("<br>") } else { String::new() };
                        if r == 0 {
                            CellData::Rich { content: text, background_color: None, width: Some(w) }
                        } else {
                            CellData::Text(text)
                        }
                    })
                    .collect()
            })
            .collect();
        let data = TableData { content, ..TableData::default() };
        let engine = engine_in(&data, TableConfig::default(), LayoutFrame { left, top, ..frame() });

        let row = pick_row.index(lines.len());
        let row_rect = engine.layout().row_rect(row).unwrap();
        let y = row_rect.top + row_rect.height / 2.0;

        for col in 0..widths.len() {
            let cell = engine.layout().cell_rect(0, col).unwrap();
            for x in [cell.left + EPSILON, cell.left + cell.width / 2.0, cell.right() - EPSILON] {
                let hovered = engine.get_hovered_cell(PointerEvent::at(x, y));
                prop_assert_eq!(hovered.column, col + 1, "x = {}", x);
                prop_assert_eq!(hovered.row, row + 1);
            }
        }

        let cell = engine.layout().cell_rect(0, 0).unwrap();
        for y in [row_rect.top + EPSILON, row_rect.bottom() - EPSILON] {
            let hovered = engine.get_hovered_cell(PointerEvent::at(cell.left + cell.width / 2.0, y));
            prop_assert_eq!(hovered.row, row + 1, "y = {}", y);
        }
    }

    #[test]
    fn hover_before_the_table_resolves_nothing(
        cols in 1..8usize,
        x in -100.0..-1.0f64,
        y in -100.0..-1.0f64,
    ) {
        let data = TableData {
            content: vec![vec![CellData::from("a"); cols]],
            ..TableData::default()
        };
        let engine = engine(&data, TableConfig::default());
        let hovered = engine.get_hovered_cell(PointerEvent::at(x, y));
        prop_assert_eq!((hovered.row, hovered.column), (0, 0));
    }
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn menus_stay_exclusive(events in proptest::collection::vec(arb_menu_event(), 0..60)) {
        let config = TableConfig {
            rows: Some(3),
            cols: Some(3),
            maxrows: Some(6),
            maxcols: Some(6),
            ..TableConfig::default()
        };
        let mut engine = engine(&TableData::default(), config);
        engine.set_throttle_interval(std::time::Duration::ZERO);
        engine.focus_in(1, 1);
        let start = std::time::Instant::now();

        for (step, event) in events.into_iter().enumerate() {
            match event {
                MenuEvent::Hover(x, y) => {
                    let now = start + std::time::Duration::from_millis(step as u64);
                    engine.pointer_moved(PointerEvent::at(x, y), now);
                }
                MenuEvent::Toggle(axis) => engine.toggler_clicked(axis),
                MenuEvent::Item(axis, index) => engine.menu_item_clicked(axis, index),
                MenuEvent::Click(target) => engine.document_clicked(target),
            }

            prop_assert!(engine.selected_row() == 0 || engine.selected_column() == 0);

            let open = |axis: ToolboxAxis| engine.toolbox(axis).is_open();
            if open(ToolboxAxis::Column) {
                prop_assert!(!open(ToolboxAxis::Row));
                prop_assert!(!open(ToolboxAxis::Cell));
            }
            if open(ToolboxAxis::Row) {
                prop_assert!(!open(ToolboxAxis::Column));
            }
            prop_assert!(engine.selected_row() <= engine.number_of_rows());
            prop_assert!(engine.selected_column() <= engine.number_of_columns());
        }
    }
}
