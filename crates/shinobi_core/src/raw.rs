//! Field extraction from the raw sheet payload.
//!
//! This is the only module that knows the shape of the JSON served by the
//! character sheet site. Every field is listed explicitly and defaulted, and
//! the result is a fully typed [`CharacterRecord`].

use serde_json::{Map, Value};
use tracing::debug;

use crate::core_api::{
    Background, CharacterRecord, CoreError, CoreErrorCode, Ninpou, Personality, Scenario,
};
use crate::grid::{COLUMN_COUNT, CellRef, SkillGrid};
use crate::style::UpperStyle;
use crate::text::{value_flag, value_text};

type Object = Map<String, Value>;

const DEFAULT_BACKGROUND_POINT: &str = "0";

pub fn build_record(raw: &Value, url: &str) -> Result<CharacterRecord, CoreError> {
    let Some(root) = raw.as_object() else {
        return Err(CoreError::new(
            CoreErrorCode::NoData,
            "raw sheet is not a JSON object",
        ));
    };

    let base = section_object(root, "base")?;
    let scenario = section_object(root, "scenario")?;
    let ninpou = section_array(root, "ninpou")?;
    let backgrounds = section_array(root, "background")?;

    let record = CharacterRecord {
        url: url.to_string(),
        player_name: text(base, "player"),
        character_name: text(base, "name"),
        character_name_kana: text(base, "nameKana"),
        foe: text(base, "foe"),
        exp: text(base, "exp"),
        memo: text(base, "memo"),
        upper_style: UpperStyle::from_code(&text(base, "upperstyle"))
            .label()
            .to_string(),
        sub_style: text(base, "substyle"),
        level: text(base, "level"),
        age: text(base, "age"),
        sex: text(base, "sex"),
        cover: text(base, "cover"),
        belief: text(base, "belief"),
        style_rule: text(base, "stylerule"),
        scenario: Scenario {
            handout: text(scenario, "handout"),
            mission: text(scenario, "mission"),
            name: text(scenario, "name"),
            pc_no: text(scenario, "pcno"),
        },
        ninpou: ninpou.iter().map(build_ninpou).collect(),
        personalities: root
            .get("personalities")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(build_personality).collect())
            .unwrap_or_default(),
        backgrounds: backgrounds.iter().map(build_background).collect(),
        skills: root
            .get("skills")
            .and_then(Value::as_object)
            .map(build_skill_grid)
            .unwrap_or_default(),
    };

    debug!(
        character = %record.character_name,
        ninpou = record.ninpou.len(),
        personalities = record.personalities.len(),
        backgrounds = record.backgrounds.len(),
        "built character record"
    );
    Ok(record)
}

fn section_object<'a>(root: &'a Object, key: &str) -> Result<&'a Object, CoreError> {
    root.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| CoreError::missing_section(key))
}

fn section_array<'a>(root: &'a Object, key: &str) -> Result<&'a [Value], CoreError> {
    root.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| CoreError::missing_section(key))
}

fn text(object: &Object, key: &str) -> String {
    value_text(object.get(key))
}

fn flag(object: &Object, key: &str) -> bool {
    value_flag(object.get(key))
}

fn entry_text(entry: &Value, key: &str) -> String {
    value_text(entry.get(key))
}

fn build_ninpou(entry: &Value) -> Ninpou {
    Ninpou {
        name: entry_text(entry, "name"),
        kind: entry_text(entry, "type"),
        target_skill: entry_text(entry, "targetSkill"),
        range: entry_text(entry, "range"),
        cost: entry_text(entry, "cost"),
        effect: entry_text(entry, "effect"),
        page: entry_text(entry, "page"),
        secret: value_flag(entry.get("secret")),
    }
}

fn build_background(entry: &Value) -> Background {
    let point = entry_text(entry, "point");
    Background {
        name: entry_text(entry, "name"),
        kind: entry_text(entry, "type"),
        point: if point.is_empty() {
            DEFAULT_BACKGROUND_POINT.to_string()
        } else {
            point
        },
        effect: entry_text(entry, "effect"),
    }
}

fn build_personality(entry: &Value) -> Personality {
    Personality {
        name: entry_text(entry, "name"),
        place: value_flag(entry.get("place")),
        secret: value_flag(entry.get("secret")),
        special_effect: value_flag(entry.get("specialEffect")),
        emotion: entry_text(entry, "emotion"),
    }
}

fn build_skill_grid(skills: &Object) -> SkillGrid {
    let mut grid = SkillGrid {
        gaps: flag_list(skills.get("space")),
        damaged: flag_list(skills.get("damage")),
        out_row: flag(skills, "outRow"),
        ..SkillGrid::default()
    };

    let acquired = skills.get("acquired").and_then(Value::as_array);
    for entry in acquired.into_iter().flatten() {
        match acquired_cell(entry) {
            Some(cell) => grid.set_acquired(cell, true),
            None => debug!(?entry, "ignoring unrecognized acquired skill"),
        }
    }
    grid
}

fn acquired_cell(entry: &Value) -> Option<CellRef> {
    match entry {
        Value::String(name) => SkillGrid::find(name),
        Value::Object(cell) => {
            if let Some(name) = cell.get("name").and_then(Value::as_str) {
                return SkillGrid::find(name);
            }
            let row = cell.get("row").and_then(Value::as_u64)?;
            let column = cell.get("column").and_then(Value::as_u64)?;
            CellRef::new(usize::try_from(row).ok()?, usize::try_from(column).ok()?)
        }
        _ => None,
    }
}

fn flag_list(value: Option<&Value>) -> [bool; COLUMN_COUNT] {
    let mut flags = [false; COLUMN_COUNT];
    if let Some(list) = value.and_then(Value::as_array) {
        for (slot, item) in flags.iter_mut().zip(list) {
            *slot = value_flag(Some(item));
        }
    }
    flags
}
