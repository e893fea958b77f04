use chrono::NaiveDateTime;
use shinobi_core::core_api::CharacterRecord;
use shinobi_core::memo::{MemoEntry, TAB_BASIC};
use shinobi_core::personality::encode_personalities;
use shinobi_core::table::{Column, render_table};

use crate::{join_lines, reload_line};

const BACKGROUND_COLUMNS: [Column; 4] = [
    Column::left("名称"),
    Column::left("種別"),
    Column::left("功績点"),
    Column::left("効果"),
];

pub fn render_basic_tab(record: &CharacterRecord, rendered_at: NaiveDateTime) -> MemoEntry {
    let mut lines = vec![
        reload_line(rendered_at),
        "リロードしてもチェック状態や選択状態は引き継がれます".to_string(),
        "## 基本情報".to_string(),
        format!("PL: {}", record.player_name),
        pc_line(record),
        format!(
            "{} {} {} {} {}",
            record.level, record.belief, record.age, record.sex, record.cover
        ),
        style_line(record),
        format!("流儀: {}", record.style_rule),
        format!("使命: {}", record.scenario.mission),
        String::new(),
        "## 人物欄".to_string(),
    ];
    lines.extend(encode_personalities(&record.personalities));
    lines.push(String::new());
    lines.push("## 背景".to_string());

    let backgrounds: Vec<Vec<String>> = record
        .backgrounds
        .iter()
        .map(|b| {
            vec![
                b.name.clone(),
                b.kind.clone(),
                b.point.clone(),
                b.effect.clone(),
            ]
        })
        .collect();
    lines.extend(render_table(&BACKGROUND_COLUMNS, &backgrounds));

    MemoEntry::url_tab(TAB_BASIC, join_lines(lines))
}

fn pc_line(record: &CharacterRecord) -> String {
    let mut line = String::from("PC");
    if !record.scenario.pc_no.is_empty() {
        line.push_str(&format!("({})", record.scenario.pc_no));
    }
    line.push_str(": ");
    line.push_str(&record.character_name);
    if !record.character_name_kana.is_empty() {
        line.push_str(&format!("（{}）", record.character_name_kana));
    }
    line
}

fn style_line(record: &CharacterRecord) -> String {
    if record.sub_style.is_empty() {
        format!("流派：{}", record.upper_style)
    } else {
        format!("流派：{}（{}）", record.upper_style, record.sub_style)
    }
}
