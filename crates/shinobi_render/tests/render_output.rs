use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use shinobi_core::core_api::{CharacterRecord, Engine};
use shinobi_core::grid::{COLUMN_COUNT, ROW_COUNT};
use shinobi_core::memo::{KIND_URL, MemoEntry, TAB_BASIC, TAB_MEMO, TAB_NINPOU, TAB_SKILLS};
use shinobi_core::source::PayloadSource;
use shinobi_render::{
    ImportOptions, RELOAD_MARKER, SheetImporter, palette_lines, render_chat_palette,
    render_record_json, render_tabs,
};

const SHEET_URL: &str = "https://character-sheets.appspot.com/shinobigami/edit.html?key=abc123";

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_payload() -> String {
    let path = workspace_root().join("tests/fixtures/shinobigami_sheet.json");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
}

fn fixture_record() -> CharacterRecord {
    Engine::new()
        .open_str(&fixture_payload(), SHEET_URL)
        .expect("fixture imports")
        .into_record()
}

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(hour, 30, 0))
        .expect("valid time")
}

fn importer_at(hour: u32) -> SheetImporter<PayloadSource> {
    SheetImporter::new(PayloadSource::new(fixture_payload()), SHEET_URL).with_options(
        ImportOptions {
            timestamp: Some(at(hour)),
        },
    )
}

fn tab<'a>(tabs: &'a [MemoEntry], name: &str) -> &'a str {
    tabs.iter()
        .find(|t| t.tab == name)
        .map(|t| t.text.as_str())
        .unwrap_or_else(|| panic!("no {name} tab"))
}

fn without_reload_line(text: &str) -> Vec<&str> {
    text.split("\r\n")
        .filter(|line| !line.starts_with(RELOAD_MARKER))
        .collect()
}

#[test]
fn tabs_come_out_in_board_order() {
    let tabs = render_tabs(&fixture_record(), at(9));
    let names: Vec<&str> = tabs.iter().map(|t| t.tab.as_str()).collect();
    assert_eq!(names, vec![TAB_MEMO, TAB_BASIC, TAB_SKILLS, TAB_NINPOU]);
    assert!(tabs.iter().all(|t| t.kind == KIND_URL));
    assert_eq!(tab(&tabs, TAB_MEMO), SHEET_URL);
    assert!(
        tab(&tabs, TAB_BASIC).starts_with("@@@RELOAD-CHARACTER-SHEET-ALL@@@ 2024/05/01 09:30:00\r\n")
    );
}

#[test]
fn basic_tab_lists_profile_people_and_background() {
    let tabs = render_tabs(&fixture_record(), at(9));
    let lines = without_reload_line(tab(&tabs, TAB_BASIC));
    assert_eq!(
        &lines[..9],
        &[
            "リロードしてもチェック状態や選択状態は引き継がれます",
            "## 基本情報",
            "PL: Hanako",
            "PC(1): Taro（たろう）",
            "中忍 凶 17 男 高校生",
            "流派：斜歯忍軍（鍔鑰組）",
            "流儀: 最強の忍具を作る",
            "使命: 敵の忍者を倒す",
            "",
        ]
    );
    assert!(lines.contains(&"|キャラ|居|秘|奥|感情|"));
    assert!(lines.contains(&"|花子|[x]|[ ]|[ ]|友情|"));
    assert!(lines.contains(&"|影の一族|長所|0|シーンに一度、判定に+1。|"));
}

#[test]
fn ninpou_tab_annotates_known_skills_only() {
    let tabs = render_tabs(&fixture_record(), at(9));
    let lines = without_reload_line(tab(&tabs, TAB_NINPOU));
    assert_eq!(lines[0], "## 忍法");
    assert_eq!(lines[1], "|忍法||タイプ|指定特技|間合|コスト|効果|参照p|");
    assert_eq!(lines[2], "|:---|:---|:---|:---|---:|---:|:---|:---|");
    assert_eq!(
        lines[3],
        "|接近戦攻撃|@@@CHAT-CMD:[宣言]【接近戦攻撃】《刀術》コスト：／間合：1@@@|攻撃\
         |刀術@@@CHAT-CMD:[5]SG>=5 刀術→刀術@@@|1||接近戦ダメージを1点与える。|基本p62|"
    );
    assert!(lines[4].contains("|自由|0|2|一度だけ<br>回避に+1。||"));
}

#[test]
fn rendering_is_stable_apart_from_the_reload_marker() {
    let first = importer_at(9).create_other_text(&[]).expect("renders");
    let second = importer_at(21).create_other_text(&first).expect("renders");
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.tab, b.tab);
        assert_eq!(without_reload_line(&a.text), without_reload_line(&b.text));
    }
}

#[test]
fn checkbox_edits_in_the_memo_survive_a_reload() {
    let first = importer_at(9).create_other_text(&[]).expect("renders");

    let edited: Vec<MemoEntry> = first
        .iter()
        .map(|memo| {
            let text = match memo.tab.as_str() {
                TAB_SKILLS => memo
                    .text
                    .replacen("|　|[ ]|[ ]器術|", "|　|[x]|[x]器術|", 1)
                    .replace("|[ ]|　|　|　|　|　|　|　|　|　|　|　|　|", "|[x]|　|　|　|　|　|　|　|　|　|　|　|　|"),
                TAB_BASIC => memo.text.replace("|次郎|[ ]|[ ]|", "|次郎|[ ]|[x]|"),
                _ => memo.text.clone(),
            };
            MemoEntry {
                text,
                ..memo.clone()
            }
        })
        .collect();

    let reloaded = importer_at(10).create_other_text(&edited).expect("renders");
    let skills = tab(&reloaded, TAB_SKILLS);
    assert!(skills.contains("|　|[x]|[x]器術|"));
    assert!(skills.contains("|¦[x]|¦　|"));
    assert!(skills.contains("|2|¦|"));
    assert!(tab(&reloaded, TAB_BASIC).contains("|次郎|[ ]|[x]|[ ]||"));
}

#[test]
fn skills_removed_from_the_sheet_leave_the_rendered_tabs() {
    let first = importer_at(9).create_other_text(&[]).expect("renders");

    let mut raw: Value = serde_json::from_str(&fixture_payload()).expect("fixture is json");
    raw["skills"]["acquired"] = serde_json::json!(["火術"]);
    let importer = SheetImporter::new(PayloadSource::new(raw.to_string()), SHEET_URL)
        .with_options(ImportOptions {
            timestamp: Some(at(10)),
        });
    let reloaded = importer.create_other_text(&first).expect("renders");

    let skills = tab(&reloaded, TAB_SKILLS);
    assert!(skills.contains("|[x]火術"));
    assert!(skills.contains("|[ ]刀術"));
    assert!(!skills.contains("→刀術@@@"));
    assert!(!tab(&reloaded, TAB_NINPOU).contains("→刀術@@@"));
}

#[test]
fn palette_has_fixed_blocks_around_skills_and_ninpou() {
    let record = fixture_record();
    let lines = palette_lines(&record);
    let rolls = record.skills.rolls();

    assert_eq!(lines.len(), 10 + rolls.len() + 8 + 2 * record.ninpou.len());
    assert_eq!(lines[0], "2D6");
    assert_eq!(lines[8], "choice[〇〇,△△,□□]");
    assert_eq!(lines[9], "");
    assert!(
        lines[10..10 + rolls.len()]
            .iter()
            .all(|l| l.starts_with("SG>="))
    );
    assert!(lines.contains(&"SG>=5 《刀術》".to_string()));

    let tail = &lines[lines.len() - 4..];
    assert_eq!(tail[0], "【接近戦攻撃】《刀術》ｺｽﾄ：なし／間合:1");
    assert_eq!(tail[1], "効果:接近戦ダメージを1点与える。");
    assert_eq!(tail[2], "【見切り】《自由》ｺｽﾄ：2／間合:0");
    assert_eq!(tail[3], "効果:一度だけ回避に+1。");
}

#[test]
fn palette_is_one_entry_per_character() {
    let palette = render_chat_palette(&fixture_record());
    assert_eq!(palette.len(), 1);
    assert_eq!(palette[0].label, "◆Taro");
    assert!(palette[0].text.starts_with("2D6\n2D6>=\n"));
}

#[test]
fn importer_without_data_renders_nothing() {
    let importer = SheetImporter::new(|_: &str| None::<Value>, SHEET_URL);
    assert_eq!(importer.create_other_text(&[]), None);
    assert!(importer.create_chat_palette().is_empty());

    let broken = SheetImporter::new(PayloadSource::new("{\"base\": {}}"), SHEET_URL);
    assert_eq!(broken.create_other_text(&[]), None);
}

#[test]
fn importer_recognizes_sheet_urls() {
    assert!(importer_at(9).is_supported());
    let other = SheetImporter::new(PayloadSource::new("{}"), "https://example.com/?key=1");
    assert!(!other.is_supported());
}

#[test]
fn record_json_keeps_sheet_order_and_targets() {
    let json = render_record_json(&fixture_record());
    let keys: Vec<&str> = json
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(&keys[..3], &["url", "player", "name"]);
    assert_eq!(json["upper_style"], "斜歯忍軍");
    assert_eq!(json["skills"]["acquired"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        json["skills"]["gaps"].as_array().map(Vec::len),
        Some(COLUMN_COUNT)
    );
    assert_eq!(json["ninpou"][0]["roll"], "@@@CHAT-CMD:[5]SG>=5 刀術→刀術@@@");
    assert_eq!(json["ninpou"][1]["roll"], Value::Null);
    let targets = json["skills"]["targets"].as_array().expect("targets");
    assert!(!targets.is_empty() && targets.len() <= ROW_COUNT * COLUMN_COUNT);
}
