use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use shinobi_core::memo::{MemoEntry, TAB_SKILLS};

const SHEET_URL: &str = "https://character-sheets.appspot.com/shinobigami/edit.html?key=abc123";
const STAMP: &str = "2024/05/01 09:30:00";

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn sheet_path() -> String {
    workspace_root()
        .join("tests/fixtures/shinobigami_sheet.json")
        .to_string_lossy()
        .to_string()
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_shinobi-sheet"))
        .args(args)
        .output()
        .expect("failed to run shinobi-sheet CLI")
}

fn temp_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{}_{}.json", std::process::id(), nanos))
}

#[test]
fn cli_prints_every_tab() {
    let sheet = sheet_path();
    let output = run_cli(&[&sheet, "--url", SHEET_URL, "--timestamp", STAMP]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for header in ["=== メモ ===", "=== 基本情報 ===", "=== 特技 ===", "=== 忍法 ==="] {
        assert!(stdout.contains(header), "missing {header}");
    }
    assert!(stdout.contains("@@@RELOAD-CHARACTER-SHEET-ALL@@@ 2024/05/01 09:30:00"));
    assert!(stdout.contains("PC(1): Taro（たろう）"));
}

#[test]
fn cli_json_tabs_round_trip_through_memos() {
    let sheet = sheet_path();
    let output = run_cli(&[&sheet, "--json", "--timestamp", "2024-05-01T09:30:00"]);
    assert!(output.status.success());
    let tabs: Vec<MemoEntry> = serde_json::from_slice(&output.stdout).expect("memo json");
    assert_eq!(tabs.len(), 4);

    let edited: Vec<MemoEntry> = tabs
        .into_iter()
        .map(|mut memo| {
            if memo.tab == TAB_SKILLS {
                memo.text = memo.text.replacen("|　|[ ]|[ ]器術|", "|　|[ ]|[x]器術|", 1);
            }
            memo
        })
        .collect();
    let memos = temp_path("shinobi_memos");
    fs::write(&memos, serde_json::to_string(&edited).expect("serialize")).expect("write memos");

    let memos_arg = memos.to_string_lossy().to_string();
    let output = run_cli(&[&sheet, "--memos", &memos_arg, "--json", "--timestamp", STAMP]);
    let _ = fs::remove_file(&memos);
    assert!(output.status.success());

    let reloaded: Vec<MemoEntry> = serde_json::from_slice(&output.stdout).expect("memo json");
    let skills = reloaded
        .iter()
        .find(|m| m.tab == TAB_SKILLS)
        .expect("skill tab");
    assert!(skills.text.contains("|　|[ ]|[x]器術|"));
}

#[test]
fn cli_writes_tabs_to_output_file() {
    let sheet = sheet_path();
    let out = temp_path("shinobi_tabs");
    let out_arg = out.to_string_lossy().to_string();
    let output = run_cli(&[&sheet, "--timestamp", STAMP, "--output", &out_arg]);
    assert!(output.status.success());

    let text = fs::read_to_string(&out).expect("output written");
    let _ = fs::remove_file(&out);
    let tabs: Vec<Value> = serde_json::from_str(&text).expect("json array");
    assert_eq!(tabs.len(), 4);
    assert_eq!(tabs[0]["type"], "url");
}

#[test]
fn cli_prints_palette() {
    let sheet = sheet_path();
    let output = run_cli(&[&sheet, "--palette"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("◆Taro"));
    assert_eq!(lines.next(), Some("2D6"));
    assert!(stdout.contains("SG>=5 《刀術》"));
}

#[test]
fn cli_prints_record_json() {
    let sheet = sheet_path();
    let output = run_cli(&[&sheet, "--record", "--url", SHEET_URL]);
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("record json");
    assert_eq!(json["url"], SHEET_URL);
    assert_eq!(json["name"], "Taro");
    assert_eq!(json["upper_style"], "斜歯忍軍");
}

#[test]
fn cli_rejects_sheet_without_data() {
    let path = temp_path("shinobi_empty");
    fs::write(&path, "null").expect("write sheet");
    let path_arg = path.to_string_lossy().to_string();
    let output = run_cli(&[&path_arg]);
    let _ = fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No character data"));
}

#[test]
fn cli_rejects_bad_timestamp() {
    let sheet = sheet_path();
    let output = run_cli(&[&sheet, "--timestamp", "yesterday"]);
    assert!(!output.status.success());
}
