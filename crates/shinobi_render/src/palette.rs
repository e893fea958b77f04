use serde::{Deserialize, Serialize};
use shinobi_core::core_api::{CharacterRecord, Ninpou};
use shinobi_core::text::strip_newlines;

const PREAMBLE: [&str; 10] = [
    "2D6",
    "2D6>=",
    "ST (無印)シーン表",
    "FT ファンブル表",
    "ET 感情表",
    "KWT 変調表",
    "RTT ランダム特技決定表",
    "D66",
    "choice[〇〇,△△,□□]",
    "",
];

const RESOURCES: [&str; 8] = [
    "",
    "兵糧丸を１つ使用",
    "兵糧丸を１つ獲得",
    "神通丸を１つ使用",
    "神通丸を１つ獲得",
    "遁甲符を１つ使用",
    "遁甲符を１つ獲得",
    "",
];

const NONE_LABEL: &str = "なし";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub label: String,
    pub text: String,
}

/// Chat commands for one character, in palette order.
pub fn palette_lines(record: &CharacterRecord) -> Vec<String> {
    let mut lines: Vec<String> = PREAMBLE.iter().map(|s| s.to_string()).collect();

    lines.extend(
        record
            .skills
            .rolls()
            .into_iter()
            .map(|(cell, roll)| format!("SG>={} 《{}》", roll.value, cell.name())),
    );

    lines.extend(RESOURCES.iter().map(|s| s.to_string()));

    for ninpou in &record.ninpou {
        lines.push(ninpou_line(ninpou));
        lines.push(format!("効果:{}", strip_newlines(&ninpou.effect)));
    }
    lines
}

pub fn render_chat_palette(record: &CharacterRecord) -> Vec<PaletteEntry> {
    vec![PaletteEntry {
        label: format!("◆{}", record.character_name),
        text: palette_lines(record).join("\n"),
    }]
}

fn ninpou_line(ninpou: &Ninpou) -> String {
    format!(
        "【{}】《{}》ｺｽﾄ：{}／間合:{}",
        strip_newlines(&ninpou.name),
        strip_newlines(&ninpou.target_skill),
        or_none(&ninpou.cost),
        or_none(&ninpou.range)
    )
}

fn or_none(value: &str) -> String {
    if value.is_empty() {
        NONE_LABEL.to_string()
    } else {
        strip_newlines(value)
    }
}
