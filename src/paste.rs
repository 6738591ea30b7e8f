//! Import of pasted HTML tables.
//!
//! Only the table structure is interpreted; cell inner HTML is kept as is.
//! Merged cells are flattened: a cell spanning several columns or rows
//! keeps its content in the top-left slot and every other slot it covered
//! becomes an empty cell.

use std::sync::OnceLock;

use regex::Regex;

use crate::data::{CellData, TableData};
use crate::error::{Result, TableError};

/// Largest grid a paste may produce; rows and columns past it are dropped
pub const MAX_PASTED_ROWS: usize = 256;
pub const MAX_PASTED_COLS: usize = 64;

fn structure_regex() -> Option<&'static Regex> {
    static TAGS: OnceLock<Option<Regex>> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"(?i)<(/?)(table|thead|tbody|tfoot|tr|th|td)\b([^>]*)>").ok())
        .as_ref()
}

fn span_regex() -> Option<&'static Regex> {
    static SPAN: OnceLock<Option<Regex>> = OnceLock::new();
    SPAN.get_or_init(|| Regex::new(r#"(?i)\b(colspan|rowspan)\s*=\s*["']?\s*(\d+)"#).ok())
        .as_ref()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PastedTable {
    pub with_headings: bool,
    /// Rectangular row-major inner HTML
    pub content: Vec<Vec<String>>,
}

impl PastedTable {
    pub fn into_data(self) -> TableData {
        TableData {
            with_headings: self.with_headings,
            content: self
                .content
                .into_iter()
                .map(|row| row.into_iter().map(CellData::Text).collect())
                .collect(),
            stretched: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Spans {
    cols: usize,
    rows: usize,
}

fn parse_spans(attrs: &str) -> Spans {
    let mut spans = Spans { cols: 1, rows: 1 };
    let Some(re) = span_regex() else {
        return spans;
    };
    for caps in re.captures_iter(attrs) {
        let value = caps[2].parse::<usize>().unwrap_or(1).max(1);
        if caps[1].eq_ignore_ascii_case("colspan") {
            spans.cols = value.min(MAX_PASTED_COLS);
        } else {
            spans.rows = value.min(MAX_PASTED_ROWS);
        }
    }
    spans
}

/// Open cell: where its content starts, and how far it reaches
struct OpenCell {
    start: usize,
    spans: Spans,
}

struct TableBuilder<'a> {
    html: &'a str,
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<OpenCell>,
    /// Remaining rows each column is still covered by a rowspan from above
    carried: Vec<usize>,
    with_headings: bool,
}

impl<'a> TableBuilder<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            html,
            rows: Vec::new(),
            row: None,
            cell: None,
            carried: Vec::new(),
            with_headings: false,
        }
    }

    /// `at` is where the tag that opens the row starts
    fn open_row(&mut self, at: usize) {
        self.close_row(at);
        self.row = Some(Vec::new());
    }

    fn close_row(&mut self, at: usize) {
        self.close_cell(at);
        let Some(mut row) = self.row.take() else {
            return;
        };
        // columns still covered on the right of the last real cell
        while row.len() < self.carried.len() {
            let idx = row.len();
            if self.carried[idx] > 0 {
                self.carried[idx] -= 1;
            }
            row.push(String::new());
        }
        if self.rows.len() < MAX_PASTED_ROWS {
            self.rows.push(row);
        }
    }

    fn open_cell(&mut self, at: usize, start: usize, attrs: &str, heading: bool) {
        self.close_cell(at);
        if self.row.is_none() {
            self.open_row(at);
        }
        if heading && self.rows.is_empty() {
            self.with_headings = true;
        }
        if let Some(row) = self.row.as_mut() {
            skip_carried(row, &mut self.carried);
        }
        self.cell = Some(OpenCell {
            start,
            spans: parse_spans(attrs),
        });
    }

    fn close_cell(&mut self, end: usize) {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return;
        };
        let content = self.html.get(cell.start..end).unwrap_or_default().trim().to_string();
        let first = row.len();
        if first >= MAX_PASTED_COLS {
            return;
        }

        row.push(content);
        row.resize((first + cell.spans.cols).min(MAX_PASTED_COLS), String::new());

        let last = row.len();
        if self.carried.len() < last {
            self.carried.resize(last, 0);
        }
        for covered in &mut self.carried[first..last] {
            *covered = cell.spans.rows - 1;
        }
    }

    fn finish(mut self) -> Result<PastedTable> {
        self.close_row(self.html.len());
        if self.rows.is_empty() {
            return Err(TableError::EmptyPaste);
        }

        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for row in &mut self.rows {
            row.resize(cols, String::new());
        }

        Ok(PastedTable {
            with_headings: self.with_headings,
            content: self.rows,
        })
    }
}

/// Push placeholders for the columns a rowspan above still covers
fn skip_carried(row: &mut Vec<String>, carried: &mut [usize]) {
    while let Some(covered) = carried.get_mut(row.len()) {
        if *covered == 0 {
            break;
        }
        *covered -= 1;
        row.push(String::new());
    }
}

/// Extract rows and cells from a pasted table fragment.
///
/// Headings are on when the fragment has a `<thead>` or its first row holds
/// a `<th>`. Short rows are padded. Tables nested inside a cell stay part
/// of that cell's content.
pub fn parse_table_html(html: &str) -> Result<PastedTable> {
    let Some(re) = structure_regex() else {
        return Err(TableError::EmptyPaste);
    };

    let mut builder = TableBuilder::new(html);
    let mut depth = 0usize;

    for caps in re.captures_iter(html) {
        let (Some(tag), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let closing = !caps[1].is_empty();
        let name = name.as_str().to_ascii_lowercase();
        let attrs = caps.get(3).map_or("", |m| m.as_str());

        if name == "table" {
            if closing {
                if depth == 1 {
                    builder.close_row(tag.start());
                }
                depth = depth.saturating_sub(1);
            } else {
                depth += 1;
            }
            continue;
        }
        // markup of an inner table belongs to the enclosing cell
        if depth > 1 {
            continue;
        }

        match (name.as_str(), closing) {
            ("thead", false) => builder.with_headings = true,
            ("tr", false) => builder.open_row(tag.start()),
            ("tr", true) => builder.close_row(tag.start()),
            ("td" | "th", false) => builder.open_cell(tag.start(), tag.end(), attrs, name == "th"),
            ("td" | "th", true) => builder.close_cell(tag.start()),
            _ => {}
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(table: &PastedTable) -> Vec<Vec<&str>> {
        table
            .content
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn simple_table() {
        let table = parse_table_html(
            "<table><tr><td>a</td><td><b>b</b></td></tr><tr><td>c</td><td>d</td></tr></table>",
        )
        .unwrap();
        assert!(!table.with_headings);
        assert_eq!(rows(&table), vec![vec!["a", "<b>b</b>"], vec!["c", "d"]]);
    }

    #[test]
    fn th_in_first_row_turns_headings_on() {
        let table = parse_table_html("<table><tr><th>H</th></tr><tr><td>x</td></tr></table>").unwrap();
        assert!(table.with_headings);

        let table = parse_table_html("<table><tr><td>x</td></tr><tr><th>H</th></tr></table>").unwrap();
        assert!(!table.with_headings);
    }

    #[test]
    fn thead_turns_headings_on() {
        let table = parse_table_html(
            "<TABLE><THEAD><TR><TD>h</TD></TR></THEAD><TBODY><TR><TD>v</TD></TR></TBODY></TABLE>",
        )
        .unwrap();
        assert!(table.with_headings);
        assert_eq!(rows(&table), vec![vec!["h"], vec!["v"]]);
    }

    #[test]
    fn short_rows_are_padded() {
        let table = parse_table_html("<tr><td>1</td><td>2</td><td>3</td></tr><tr><td>4</td></tr>").unwrap();
        assert_eq!(rows(&table), vec![vec!["1", "2", "3"], vec!["4", "", ""]]);
    }

    #[test]
    fn colspan_leaves_empty_slots() {
        let table = parse_table_html(
            r#"<table><tr><td colspan="2">wide</td><td>c</td></tr><tr><td>1</td><td>2</td><td>3</td></tr></table>"#,
        )
        .unwrap();
        assert_eq!(rows(&table), vec![vec!["wide", "", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn rowspan_shifts_later_rows() {
        let table = parse_table_html(
            "<table><tr><td rowspan=2>tall</td><td>a</td></tr><tr><td>b</td></tr><tr><td>x</td><td>y</td></tr></table>",
        )
        .unwrap();
        assert_eq!(
            rows(&table),
            vec![vec!["tall", "a"], vec!["", "b"], vec!["x", "y"]]
        );
    }

    #[test]
    fn huge_spans_are_capped_to_the_paste_limit() {
        let cell = r#"<td colspan="1000" rowspan="1000">x</td>"#;
        let row = format!("<tr>{}{}</tr>", cell, cell);
        let html = format!("<table>{}</table>", row.repeat(MAX_PASTED_ROWS + 10));
        let table = parse_table_html(&html).unwrap();

        assert_eq!(table.content.len(), MAX_PASTED_ROWS);
        assert!(table.content.iter().all(|r| r.len() == MAX_PASTED_COLS));
        assert_eq!(table.content[0][0], "x");
    }

    #[test]
    fn unclosed_cells_are_closed_by_the_next_tag() {
        let table = parse_table_html("<table><tr><td>a<td>b<tr><td>c</table>").unwrap();
        assert_eq!(rows(&table), vec![vec!["a", "b"], vec!["c", ""]]);
    }

    #[test]
    fn nested_table_stays_in_its_cell() {
        let table = parse_table_html(
            "<table><tr><td>out<table><tr><td>in</td></tr></table></td><td>z</td></tr></table>",
        )
        .unwrap();
        assert_eq!(table.content.len(), 1);
        assert_eq!(table.content[0][0], "out<table><tr><td>in</td></tr></table>");
        assert_eq!(table.content[0][1], "z");
    }

    #[test]
    fn fragment_without_rows_is_rejected() {
        assert!(matches!(parse_table_html("<p>no table</p>"), Err(TableError::EmptyPaste)));
    }
}
