use serde::{Deserialize, Serialize};

pub const TAB_MEMO: &str = "メモ";
pub const TAB_BASIC: &str = "基本情報";
pub const TAB_SKILLS: &str = "特技";
pub const TAB_NINPOU: &str = "忍法";

/// Content type of every tab this crate renders.
pub const KIND_URL: &str = "url";

/// One tab of the shared memo board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoEntry {
    pub tab: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl MemoEntry {
    pub fn url_tab(tab: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            kind: KIND_URL.to_string(),
            text: text.into(),
        }
    }
}

/// Text of the first memo carrying `tab`.
pub fn tab_text<'a>(memos: &'a [MemoEntry], tab: &str) -> Option<&'a str> {
    memos
        .iter()
        .find(|memo| memo.tab == tab)
        .map(|memo| memo.text.as_str())
}
