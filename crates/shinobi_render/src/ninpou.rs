use chrono::NaiveDateTime;
use shinobi_core::core_api::{CharacterRecord, Ninpou};
use shinobi_core::grid::roll_command_for;
use shinobi_core::memo::{MemoEntry, TAB_NINPOU};
use shinobi_core::table::{Column, render_table};

use crate::{join_lines, reload_line};

// The unlabelled column carries the one-click declaration command.
const NINPOU_COLUMNS: [Column; 8] = [
    Column::left("忍法"),
    Column::left(""),
    Column::left("タイプ"),
    Column::left("指定特技"),
    Column::right("間合"),
    Column::right("コスト"),
    Column::left("効果"),
    Column::left("参照p"),
];

pub fn render_ninpou_tab(record: &CharacterRecord, rendered_at: NaiveDateTime) -> MemoEntry {
    let rows: Vec<Vec<String>> = record
        .ninpou
        .iter()
        .map(|n| {
            let mut target = n.target_skill.clone();
            if let Some(roll) = roll_command_for(&record.skills, &n.target_skill) {
                target.push_str(&roll);
            }
            vec![
                n.name.clone(),
                declare_command(n),
                n.kind.clone(),
                target,
                n.range.clone(),
                n.cost.clone(),
                n.effect.clone(),
                n.page.clone(),
            ]
        })
        .collect();

    let mut lines = vec![reload_line(rendered_at), "## 忍法".to_string()];
    lines.extend(render_table(&NINPOU_COLUMNS, &rows));

    MemoEntry::url_tab(TAB_NINPOU, join_lines(lines))
}

fn declare_command(ninpou: &Ninpou) -> String {
    format!(
        "@@@CHAT-CMD:[宣言]【{}】《{}》コスト：{}／間合：{}@@@",
        ninpou.name, ninpou.target_skill, ninpou.cost, ninpou.range
    )
}
