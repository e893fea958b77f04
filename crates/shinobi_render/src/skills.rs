use chrono::NaiveDateTime;
use shinobi_core::core_api::CharacterRecord;
use shinobi_core::layout::encode_grid;
use shinobi_core::memo::{MemoEntry, TAB_SKILLS};

use crate::{join_lines, reload_line};

/// The skill grid tab. Its table and trailing state row are the only
/// persistence for gaps, damage and the outer-ring flag.
pub fn render_skill_tab(record: &CharacterRecord, rendered_at: NaiveDateTime) -> MemoEntry {
    let mut lines = vec![
        reload_line(rendered_at),
        "リロードしてもギャップやダメージのチェック状態は引き継がれます".to_string(),
        "## 特技".to_string(),
    ];
    lines.extend(encode_grid(&record.skills));

    MemoEntry::url_tab(TAB_SKILLS, join_lines(lines))
}
