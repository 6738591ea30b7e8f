mod palette;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use tableblock::action::Icon;
use tableblock::geometry::ClientRect;
use tableblock::html;
use tableblock::plugin::TableBlock;
use tableblock::table::LayoutFrame;
use tableblock::toolbox::{HorizontalAnchor, ToolboxAxis, VerticalAnchor};
use tableblock::view::{CellView, ToolboxView, WrapperView};

use crate::app::App;

use palette::{contrast_fg, parse_color};

/// Room left of the table for the row toggler
const GUTTER_LEFT: u16 = 3;
/// Title line plus the column toggler line
const GUTTER_TOP: u16 = 2;
/// Room right of the table for the add-column button
const GUTTER_RIGHT: u16 = 3;
const COLLAPSED_WIDTH: u16 = 64;

/// Something clickable drawn on the last frame
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Toggler(ToolboxAxis),
    MenuItem(ToolboxAxis, usize),
    Swatch(String),
    AddRow,
    AddColumn,
}

/// Clickable regions of the last frame, topmost last
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    fn push(&mut self, rect: Rect, hit: Hit) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, hit));
        }
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<Hit> {
        self.regions
            .iter()
            .rev()
            .find(|(r, _)| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
            .map(|(_, hit)| hit.clone())
    }
}

/// Where the table goes in a terminal of the given size, in character cells
pub fn layout_frame(area: Rect, stretched: bool) -> LayoutFrame {
    let available = area.width.saturating_sub(GUTTER_LEFT + GUTTER_RIGHT).max(1);
    let width = if stretched {
        available
    } else {
        available.min(COLLAPSED_WIDTH)
    };

    LayoutFrame {
        left: f64::from(area.x + GUTTER_LEFT),
        top: f64::from(area.y + GUTTER_TOP),
        width: f64::from(width),
        line_height: 1.0,
        toolbox_size: 1.0,
        ..LayoutFrame::default()
    }
}

pub fn render(frame: &mut Frame, app: &App) -> HitMap {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let view = app.block.render();
    let mut hits = HitMap::default();

    render_title(frame, &app.block, chunks[0]);
    render_wrapper(frame, &view.wrapper, chunks[1], &mut hits);
    render_status_bar(frame, app, chunks[2]);
    render_message_line(frame, app, chunks[3]);

    hits
}

fn render_title(frame: &mut Frame, block: &TableBlock, area: Rect) {
    let entry = TableBlock::toolbox();
    let mut spans = vec![
        Span::styled(
            format!(" {} {} ", entry.icon.glyph(), entry.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    for setting in block.render_settings() {
        let style = if setting.active {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(
            format!(" {} {} ", setting.icon.glyph(), setting.label),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Snap a fractional layout box to character cells. Adjacent boxes share
/// an edge, so rounding both ends keeps them from overlapping.
fn to_cells(rect: ClientRect) -> Rect {
    let x0 = snap(rect.left);
    let y0 = snap(rect.top);
    let x1 = snap(rect.right());
    let y1 = snap(rect.bottom());
    Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

fn snap(v: f64) -> u16 {
    v.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

fn render_wrapper(frame: &mut Frame, wrapper: &WrapperView, area: Rect, hits: &mut HitMap) {
    let table = to_cells(wrapper.table.rect);

    for (r, row) in wrapper.table.rows.iter().enumerate() {
        let heading_row = wrapper.table.with_headings && r == 0;
        for cell in &row.cells {
            let rect = to_cells(cell.rect).intersection(area);
            if rect.width > 0 && rect.height > 0 {
                render_cell(frame, cell, row.selected, heading_row, rect);
            }
        }
    }

    if let Some(button) = &wrapper.add_row {
        let rect = Rect::new(table.x, table.bottom(), table.width, 1).intersection(area);
        let style = if button.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        frame.render_widget(Paragraph::new(Span::styled(format!("{} row", Icon::Plus.glyph()), style)), rect);
        if !button.disabled {
            hits.push(rect, Hit::AddRow);
        }
    }

    if let Some(button) = &wrapper.add_column {
        let rect = Rect::new(table.right() + 1, table.y, 1, table.height.max(1)).intersection(area);
        let style = if button.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        let lines: Vec<Line> = (0..rect.height).map(|_| Line::styled(Icon::Plus.glyph(), style)).collect();
        frame.render_widget(Paragraph::new(lines), rect);
        if !button.disabled {
            hits.push(rect, Hit::AddColumn);
        }
    }

    if wrapper.read_only {
        return;
    }

    let togglers = [
        (&wrapper.column_toolbox, column_toggler(table, &wrapper.column_toolbox)),
        (&wrapper.row_toolbox, row_toggler(table, &wrapper.row_toolbox)),
        (&wrapper.cell_toolbox, cell_toggler(table, &wrapper.cell_toolbox)),
    ];

    for (toolbox, at) in &togglers {
        let Some((x, y)) = at else {
            continue;
        };
        if !toolbox.shown {
            continue;
        }
        let rect = Rect::new(*x, *y, 1, 1).intersection(area);
        let style = if toolbox.open {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        frame.render_widget(Paragraph::new(Span::styled(Icon::MenuSmall.glyph(), style)), rect);
        hits.push(rect, Hit::Toggler(toolbox.axis));
    }

    for (toolbox, at) in &togglers {
        if let (true, Some((x, y))) = (toolbox.open, at) {
            render_popover(frame, toolbox, (*x, *y), area, hits);
        }
    }

    if let (Some(picker), Some((x, y))) = (&wrapper.color_picker, togglers[2].1) {
        render_color_picker(frame, picker.presets, (x, y), area, hits);
    }
}

fn render_cell(frame: &mut Frame, cell: &CellView, row_selected: bool, heading_row: bool, rect: Rect) {
    let mut style = Style::default();
    if let Some(bg) = cell.background_color.and_then(parse_color) {
        style = style.bg(bg).fg(contrast_fg(bg));
    } else if cell.selected || row_selected {
        style = style.bg(Color::DarkGray);
    }
    if heading_row {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.focused {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    let lines: Vec<Line> = match (html::is_blank(cell.content), cell.heading) {
        (true, Some(label)) => vec![Line::styled(
            label.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )],
        _ => html::text_lines(cell.content)
            .into_iter()
            .map(Line::from)
            .collect(),
    };

    let border = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).style(style).block(border), rect);
}

fn column_toggler(table: Rect, toolbox: &ToolboxView) -> Option<(u16, u16)> {
    let left = toolbox.offset.left?;
    Some((table.x + snap(left.floor()), table.y.checked_sub(1)?))
}

fn row_toggler(table: Rect, toolbox: &ToolboxView) -> Option<(u16, u16)> {
    let top = toolbox.offset.top?;
    Some((table.x.checked_sub(2)?, table.y + snap((top - 0.5).floor())))
}

fn cell_toggler(table: Rect, toolbox: &ToolboxView) -> Option<(u16, u16)> {
    Some((
        table.x + snap(toolbox.offset.left?),
        table.y + snap(toolbox.offset.top?),
    ))
}

/// Draw an open menu next to its toggler, flipped the way its placement says
fn render_popover(
    frame: &mut Frame,
    toolbox: &ToolboxView,
    (x, y): (u16, u16),
    area: Rect,
    hits: &mut HitMap,
) {
    let items: Vec<_> = toolbox.items.iter().filter(|item| !item.hidden).collect();
    if items.is_empty() {
        return;
    }

    let width = items
        .iter()
        .map(|item| unicode_width::UnicodeWidthStr::width(item.label) as u16 + 6)
        .max()
        .unwrap_or(10);
    let height = items.len() as u16 + 2;

    let (mut px, mut py) = match toolbox.axis {
        ToolboxAxis::Row => (x + 1, y),
        ToolboxAxis::Column | ToolboxAxis::Cell => (x, y + 1),
    };
    if toolbox.placement.horizontal == HorizontalAnchor::Right || toolbox.axis == ToolboxAxis::Cell {
        px = (x + 1).saturating_sub(width);
    }
    if toolbox.placement.vertical == VerticalAnchor::Bottom {
        py = (y + 1).saturating_sub(height);
    }

    let rect = Rect::new(px, py, width, height).intersection(area);
    frame.render_widget(Clear, rect);

    let lines: Vec<Line> = items
        .iter()
        .map(|item| {
            let style = if item.confirmed {
                Style::default().fg(Color::White).bg(Color::Red)
            } else {
                Style::default()
            };
            let suffix = if item.confirmed { " ?" } else { "" };
            Line::styled(format!("{} {}{}", item.icon.glyph(), item.label, suffix), style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(toolbox.axis.name());
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    for (i, item) in items.iter().enumerate() {
        let line = Rect::new(rect.x + 1, rect.y + 1 + i as u16, rect.width.saturating_sub(2), 1);
        hits.push(line.intersection(rect), Hit::MenuItem(toolbox.axis, item.index));
    }
}

fn render_color_picker(frame: &mut Frame, presets: &[String], (x, y): (u16, u16), area: Rect, hits: &mut HitMap) {
    if presets.is_empty() {
        return;
    }
    let width = presets.len() as u16 * 3 + 1;
    let rect = Rect::new((x + 1).saturating_sub(width), y + 1, width, 3).intersection(area);
    frame.render_widget(Clear, rect);
    frame.render_widget(Block::default().borders(Borders::ALL), rect);

    for (i, color) in presets.iter().enumerate() {
        let swatch = Rect::new(rect.x + 1 + i as u16 * 3, rect.y + 1, 2, 1).intersection(rect);
        let bg = parse_color(color).unwrap_or(Color::Reset);
        frame.render_widget(Paragraph::new("  ").style(Style::default().bg(bg)), swatch);
        hits.push(swatch, Hit::Swatch(color.clone()));
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let engine = app.block.engine();
    let (mode, mode_style) = if engine.is_read_only() {
        ("READ", Style::default().bg(Color::Gray).fg(Color::Black))
    } else {
        ("EDIT", Style::default().bg(Color::Blue).fg(Color::White))
    };

    let dirty_indicator = if app.dirty { "[+]" } else { "" };

    let file_name = match app.file_io.file_name() {
        name if name.is_empty() => "[No File]".to_string(),
        name => name,
    };

    let focused = engine.focused_cell();
    let position = if focused.is_none() {
        format!("{}x{} ", engine.number_of_rows(), engine.number_of_columns())
    } else {
        format!(
            "R{}C{}  {}x{} ",
            focused.row,
            focused.column,
            engine.number_of_rows(),
            engine.number_of_columns()
        )
    };

    let status = Line::from(vec![
        Span::styled(format!(" {} ", mode), mode_style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(file_name),
        Span::raw(" "),
        Span::styled(dirty_indicator, Style::default().fg(Color::Red)),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(30)
                .saturating_sub(position.len() as u16) as usize,
        )),
        Span::raw(position),
    ]);

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

fn render_message_line(frame: &mut Frame, app: &App, area: Rect) {
    let content = app
        .message
        .clone()
        .unwrap_or_else(|| "^S save  ^Q quit  ^H headings  ^T stretch  Esc close menus".to_string());
    frame.render_widget(Paragraph::new(content), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_frame_collapsed_and_stretched() {
        let area = Rect::new(0, 0, 120, 40);
        let collapsed = layout_frame(area, false);
        assert_eq!(collapsed.left, 3.0);
        assert_eq!(collapsed.top, 2.0);
        assert_eq!(collapsed.width, f64::from(COLLAPSED_WIDTH));
        assert_eq!(layout_frame(area, true).width, 114.0);
    }

    #[test]
    fn test_shared_edges_do_not_overlap() {
        let a = to_cells(ClientRect::new(3.0, 2.0, 10.4, 1.0));
        let b = to_cells(ClientRect::new(13.4, 2.0, 10.4, 1.0));
        assert_eq!(a.right(), b.x);
    }

    #[test]
    fn test_hit_map_prefers_topmost() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 10, 10), Hit::AddRow);
        hits.push(Rect::new(2, 2, 1, 1), Hit::Toggler(ToolboxAxis::Cell));
        assert_eq!(hits.hit(2, 2), Some(Hit::Toggler(ToolboxAxis::Cell)));
        assert_eq!(hits.hit(5, 5), Some(Hit::AddRow));
        assert_eq!(hits.hit(10, 10), None);
    }
}
