//! Block adapter: what an editor host sees of a table.

use std::rc::Rc;

use tracing::{info, warn};

use crate::action::Icon;
use crate::config::TableConfig;
use crate::data::TableData;
use crate::engine::GridEngine;
use crate::error::Result;
use crate::host::HostServices;
use crate::paste::parse_table_html;
use crate::table::LayoutFrame;
use crate::view::WrapperView;

/// Tags the host should route to `on_paste`
pub const PASTE_TAGS: &[&str] = &["TABLE", "TR", "TH", "TD"];

/// How the block is listed in the host's block picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolboxEntry {
    pub title: &'static str,
    pub icon: Icon,
}

/// Block-level tunes offered in the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    WithHeadings,
    WithoutHeadings,
    ToggleStretch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingView {
    pub setting: Setting,
    pub label: String,
    pub icon: Icon,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockView<'a> {
    pub stretched: bool,
    pub wrapper: WrapperView<'a>,
}

pub struct TableBlock {
    services: Rc<dyn HostServices>,
    config: TableConfig,
    read_only: bool,
    with_headings: bool,
    stretched: bool,
    engine: GridEngine,
}

impl TableBlock {
    pub fn toolbox() -> ToolboxEntry {
        ToolboxEntry {
            title: "Table",
            icon: Icon::Table,
        }
    }

    pub fn is_read_only_supported() -> bool {
        true
    }

    /// Enter inside a cell is handled by the block, not the host
    pub fn enable_line_breaks() -> bool {
        true
    }

    pub fn paste_tags() -> &'static [&'static str] {
        PASTE_TAGS
    }

    /// Build a block from saved data, or an empty one when `data` is `None`.
    /// Saved flags win over configured defaults.
    pub fn new(
        data: Option<TableData>,
        config: TableConfig,
        services: Rc<dyn HostServices>,
        read_only: bool,
    ) -> Self {
        let (with_headings, stretched) = match &data {
            Some(data) => (data.with_headings, data.stretched.unwrap_or(false)),
            None => (
                config.with_headings.unwrap_or(false),
                config.stretched.unwrap_or(false),
            ),
        };
        let data = data.unwrap_or_default();
        let engine = build_engine(&data, with_headings, &config, &services, read_only);
        info!(with_headings, stretched, read_only, "table block created");

        Self {
            services,
            config,
            read_only,
            with_headings,
            stretched,
            engine,
        }
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GridEngine {
        &mut self.engine
    }

    pub fn is_stretched(&self) -> bool {
        self.stretched
    }

    pub fn render(&self) -> BlockView<'_> {
        BlockView {
            stretched: self.stretched,
            wrapper: self.engine.wrapper(),
        }
    }

    pub fn render_settings(&self) -> Vec<SettingView> {
        let t = |s: &str| self.services.translate(s);
        vec![
            SettingView {
                setting: Setting::WithHeadings,
                label: t("With headings"),
                icon: Icon::Heading,
                active: self.with_headings,
            },
            SettingView {
                setting: Setting::WithoutHeadings,
                label: t("Without headings"),
                icon: Icon::HeadingOff,
                active: !self.with_headings,
            },
            SettingView {
                setting: Setting::ToggleStretch,
                label: t(if self.stretched { "Collapse" } else { "Stretch" }),
                icon: if self.stretched { Icon::Collapse } else { Icon::Stretch },
                active: false,
            },
        ]
    }

    pub fn activate_setting(&mut self, setting: Setting) {
        match setting {
            Setting::WithHeadings => self.set_with_headings(true),
            Setting::WithoutHeadings => self.set_with_headings(false),
            Setting::ToggleStretch => self.stretched = !self.stretched,
        }
    }

    fn set_with_headings(&mut self, with_headings: bool) {
        self.with_headings = with_headings;
        self.engine.set_headings_setting(with_headings);
    }

    pub fn save(&self) -> TableData {
        let data = TableData {
            with_headings: self.with_headings,
            content: self.engine.get_data(),
            stretched: Some(self.stretched),
        };
        info!(rows = data.content.len(), "table saved");
        data
    }

    pub fn destroy(&mut self) {
        self.engine.destroy();
        info!("table block destroyed");
    }

    /// Replace the table with a pasted HTML table. On a fragment without
    /// rows the current table is left untouched.
    pub fn on_paste(&mut self, html: &str) -> Result<()> {
        let pasted = match parse_table_html(html) {
            Ok(pasted) => pasted,
            Err(e) => {
                warn!("paste rejected: {}", e);
                return Err(e);
            }
        };

        let data = pasted.into_data();
        let frame: LayoutFrame = self.engine.frame();
        self.with_headings = data.with_headings;

        self.engine.destroy();
        self.engine = build_engine(&data, self.with_headings, &self.config, &self.services, self.read_only);
        self.engine.set_frame(frame);

        info!(
            rows = self.engine.number_of_rows(),
            cols = self.engine.number_of_columns(),
            "table pasted"
        );
        Ok(())
    }
}

fn build_engine(
    data: &TableData,
    with_headings: bool,
    config: &TableConfig,
    services: &Rc<dyn HostServices>,
    read_only: bool,
) -> GridEngine {
    let mut engine = GridEngine::new(read_only, Rc::clone(services), data, config.clone());
    engine.set_headings_setting(with_headings);
    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellData;
    use crate::host::HostContext;

    fn block(data: Option<TableData>, config: TableConfig) -> (TableBlock, Rc<HostContext>) {
        let host = Rc::new(HostContext::new());
        let services: Rc<dyn HostServices> = host.clone();
        (TableBlock::new(data, config, services, false), host)
    }

    #[test]
    fn static_metadata() {
        assert_eq!(TableBlock::toolbox().title, "Table");
        assert!(TableBlock::is_read_only_supported());
        assert!(TableBlock::enable_line_breaks());
        assert_eq!(TableBlock::paste_tags(), ["TABLE", "TR", "TH", "TD"]);
    }

    #[test]
    fn saved_flags_beat_config() {
        let config = TableConfig {
            with_headings: Some(true),
            stretched: Some(true),
            ..TableConfig::default()
        };
        let (block_saved, _) = block(Some(TableData::default()), config.clone());
        assert!(!block_saved.engine().with_headings());
        assert!(!block_saved.is_stretched());

        let (block_new, _) = block(None, config);
        assert!(block_new.engine().with_headings());
        assert!(block_new.is_stretched());
    }

    #[test]
    fn save_reports_headings_with_unchanged_content() {
        let data = TableData::from_json(r#"{"content":[["H1","H2"],["a","b"]]}"#).unwrap();
        let (mut block, _) = block(Some(data), TableConfig::default());
        block.activate_setting(Setting::WithHeadings);

        let saved = block.save();
        assert!(saved.with_headings);
        assert_eq!(saved.content.len(), 2);
        assert_eq!(saved.content[0][0], CellData::Text("H1".into()));
        assert_eq!(saved.to_json().unwrap(), r#"{"withHeadings":true,"content":[["H1","H2"],["a","b"]],"stretched":false}"#);
    }

    #[test]
    fn settings_reflect_state() {
        let (mut block, _) = block(None, TableConfig::default());
        let labels: Vec<String> = block.render_settings().into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["With headings", "Without headings", "Stretch"]);

        block.activate_setting(Setting::ToggleStretch);
        block.activate_setting(Setting::WithHeadings);
        let settings = block.render_settings();
        assert!(settings[0].active);
        assert!(!settings[1].active);
        assert_eq!(settings[2].label, "Collapse");
        assert!(block.render().stretched);
    }

    #[test]
    fn paste_replaces_table() {
        let (mut block, host) = block(None, TableConfig::default());
        block
            .on_paste("<table><tr><th>a</th><th>b</th><th>c</th></tr><tr><td>1</td></tr></table>")
            .unwrap();
        let engine = block.engine();
        assert_eq!((engine.number_of_rows(), engine.number_of_columns()), (2, 3));
        assert!(engine.with_headings());
        assert_eq!(engine.cell_content(2, 1), Some("1"));
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn bad_paste_keeps_previous_table() {
        let data = TableData::from_json(r#"{"content":[["keep"]]}"#).unwrap();
        let (mut block, _) = block(Some(data), TableConfig::default());
        assert!(block.on_paste("<p>nothing</p>").is_err());
        assert_eq!(block.engine().cell_content(1, 1), Some("keep"));
    }

    #[test]
    fn destroy_releases_listener() {
        let (mut block, host) = block(None, TableConfig::default());
        block.destroy();
        assert_eq!(host.listener_count(), 0);
    }
}
