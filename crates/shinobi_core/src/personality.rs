//! The personality ("人物欄") table of the basic-info tab.
//!
//! The location/secret/special-effect checkboxes are toggled by players in the
//! memo during a session, so the table is read back on every reload.

use tracing::debug;

use crate::core_api::Personality;
use crate::table::{Column, checkbox, escape_cell, parse_checkbox, parse_table, render_table};

pub const PERSONALITY_COLUMNS: [Column; 5] = [
    Column::left("キャラ"),
    Column::left("居"),
    Column::left("秘"),
    Column::left("奥"),
    Column::left("感情"),
];

pub fn encode_personalities(list: &[Personality]) -> Vec<String> {
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                checkbox(p.place).to_string(),
                checkbox(p.secret).to_string(),
                checkbox(p.special_effect).to_string(),
                p.emotion.clone(),
            ]
        })
        .collect();
    render_table(&PERSONALITY_COLUMNS, &rows)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonalityRecovery {
    pub updated: usize,
    pub added: usize,
}

/// Merge the personality table found in `text` into `list`.
///
/// Rows are matched by name. A match takes the row's checkboxes (unreadable
/// cells keep the current value) and its emotion when the entry has none.
/// Rows naming nobody on the sheet were added in the memo and are appended.
pub fn decode_personalities(text: &str, list: &mut Vec<Personality>) -> PersonalityRecovery {
    let mut recovery = PersonalityRecovery::default();

    for row in parse_table(text, &PERSONALITY_COLUMNS) {
        let [name, place, secret, special_effect, emotion] = row.as_slice() else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let key = escape_cell(name);
        match list.iter_mut().find(|p| escape_cell(&p.name) == key) {
            Some(existing) => {
                existing.place = parse_checkbox(place).unwrap_or(existing.place);
                existing.secret = parse_checkbox(secret).unwrap_or(existing.secret);
                existing.special_effect =
                    parse_checkbox(special_effect).unwrap_or(existing.special_effect);
                if existing.emotion.is_empty() {
                    existing.emotion = emotion.clone();
                }
                recovery.updated += 1;
            }
            None => {
                list.push(Personality {
                    name: name.clone(),
                    place: parse_checkbox(place).unwrap_or(false),
                    secret: parse_checkbox(secret).unwrap_or(false),
                    special_effect: parse_checkbox(special_effect).unwrap_or(false),
                    emotion: emotion.clone(),
                });
                recovery.added += 1;
            }
        }
    }

    debug!(
        updated = recovery.updated,
        added = recovery.added,
        "recovered personality table"
    );
    recovery
}
