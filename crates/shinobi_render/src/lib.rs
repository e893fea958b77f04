//! Memo tab, chat palette and JSON rendering for imported character sheets.

use chrono::NaiveDateTime;
use shinobi_core::core_api::CharacterRecord;
use shinobi_core::memo::{MemoEntry, TAB_MEMO};

mod basic;
mod importer;
mod json;
mod ninpou;
mod palette;
mod skills;

pub use basic::render_basic_tab;
pub use importer::{ImportOptions, SheetImporter};
pub use json::render_record_json;
pub use ninpou::render_ninpou_tab;
pub use palette::{PaletteEntry, palette_lines, render_chat_palette};
pub use skills::render_skill_tab;

/// Marker the memo board watches to offer a reload of the whole sheet.
pub const RELOAD_MARKER: &str = "@@@RELOAD-CHARACTER-SHEET-ALL@@@";
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
pub const LINE_SEPARATOR: &str = "\r\n";

/// Every tab of one render cycle, in board order.
pub fn render_tabs(record: &CharacterRecord, rendered_at: NaiveDateTime) -> Vec<MemoEntry> {
    vec![
        render_memo_tab(record),
        render_basic_tab(record, rendered_at),
        render_skill_tab(record, rendered_at),
        render_ninpou_tab(record, rendered_at),
    ]
}

pub fn render_memo_tab(record: &CharacterRecord) -> MemoEntry {
    MemoEntry::url_tab(TAB_MEMO, record.url.clone())
}

fn reload_line(rendered_at: NaiveDateTime) -> String {
    format!("{RELOAD_MARKER} {}", rendered_at.format(TIMESTAMP_FORMAT))
}

fn join_lines(lines: Vec<String>) -> String {
    lines.join(LINE_SEPARATOR)
}
