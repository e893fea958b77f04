use serde_json::{Map as JsonMap, Value as JsonValue};
use shinobi_core::core_api::CharacterRecord;
use shinobi_core::grid::{CATEGORY_NAMES, SkillGrid, roll_command_for};

/// The typed record as JSON, keys in sheet order, with computed targets.
pub fn render_record_json(record: &CharacterRecord) -> JsonValue {
    let mut out = JsonMap::new();

    out.insert("url".to_string(), text(&record.url));
    out.insert("player".to_string(), text(&record.player_name));
    out.insert("name".to_string(), text(&record.character_name));
    out.insert("name_kana".to_string(), text(&record.character_name_kana));
    out.insert("upper_style".to_string(), text(&record.upper_style));
    out.insert("sub_style".to_string(), text(&record.sub_style));
    out.insert("style_rule".to_string(), text(&record.style_rule));
    out.insert("level".to_string(), text(&record.level));
    out.insert("age".to_string(), text(&record.age));
    out.insert("sex".to_string(), text(&record.sex));
    out.insert("cover".to_string(), text(&record.cover));
    out.insert("belief".to_string(), text(&record.belief));
    out.insert("foe".to_string(), text(&record.foe));
    out.insert("exp".to_string(), text(&record.exp));
    out.insert("memo".to_string(), text(&record.memo));
    out.insert("scenario".to_string(), scenario_to_json(record));
    out.insert("skills".to_string(), skills_to_json(&record.skills));
    out.insert("ninpou".to_string(), ninpou_to_json(record));
    out.insert("personalities".to_string(), personalities_to_json(record));
    out.insert("backgrounds".to_string(), backgrounds_to_json(record));

    JsonValue::Object(out)
}

fn text(value: &str) -> JsonValue {
    JsonValue::String(value.to_string())
}

fn scenario_to_json(record: &CharacterRecord) -> JsonValue {
    let scenario = &record.scenario;
    let mut out = JsonMap::new();
    out.insert("pc_no".to_string(), text(&scenario.pc_no));
    out.insert("name".to_string(), text(&scenario.name));
    out.insert("handout".to_string(), text(&scenario.handout));
    out.insert("mission".to_string(), text(&scenario.mission));
    JsonValue::Object(out)
}

fn skills_to_json(grid: &SkillGrid) -> JsonValue {
    let acquired: Vec<JsonValue> = grid.acquired_cells().map(|c| text(c.name())).collect();
    let gaps: Vec<JsonValue> = grid.gaps.iter().map(|&g| JsonValue::Bool(g)).collect();
    let damaged: Vec<JsonValue> = CATEGORY_NAMES
        .iter()
        .zip(grid.damaged.iter())
        .filter(|&(_, &d)| d)
        .map(|(name, _)| text(name))
        .collect();
    let targets: Vec<JsonValue> = grid
        .rolls()
        .into_iter()
        .map(|(cell, roll)| {
            let mut entry = JsonMap::new();
            entry.insert("name".to_string(), text(cell.name()));
            entry.insert("target".to_string(), JsonValue::from(roll.value));
            entry.insert("from".to_string(), text(roll.from.name()));
            JsonValue::Object(entry)
        })
        .collect();

    let mut out = JsonMap::new();
    out.insert("acquired".to_string(), JsonValue::Array(acquired));
    out.insert("gaps".to_string(), JsonValue::Array(gaps));
    out.insert("damaged".to_string(), JsonValue::Array(damaged));
    out.insert("out_row".to_string(), JsonValue::Bool(grid.out_row));
    out.insert("targets".to_string(), JsonValue::Array(targets));
    JsonValue::Object(out)
}

fn ninpou_to_json(record: &CharacterRecord) -> JsonValue {
    JsonValue::Array(
        record
            .ninpou
            .iter()
            .map(|n| {
                let mut out = JsonMap::new();
                out.insert("name".to_string(), text(&n.name));
                out.insert("type".to_string(), text(&n.kind));
                out.insert("target_skill".to_string(), text(&n.target_skill));
                out.insert("range".to_string(), text(&n.range));
                out.insert("cost".to_string(), text(&n.cost));
                out.insert("effect".to_string(), text(&n.effect));
                out.insert("page".to_string(), text(&n.page));
                out.insert("secret".to_string(), JsonValue::Bool(n.secret));
                out.insert(
                    "roll".to_string(),
                    roll_command_for(&record.skills, &n.target_skill)
                        .map(JsonValue::String)
                        .unwrap_or(JsonValue::Null),
                );
                JsonValue::Object(out)
            })
            .collect(),
    )
}

fn personalities_to_json(record: &CharacterRecord) -> JsonValue {
    JsonValue::Array(
        record
            .personalities
            .iter()
            .map(|p| {
                let mut out = JsonMap::new();
                out.insert("name".to_string(), text(&p.name));
                out.insert("place".to_string(), JsonValue::Bool(p.place));
                out.insert("secret".to_string(), JsonValue::Bool(p.secret));
                out.insert(
                    "special_effect".to_string(),
                    JsonValue::Bool(p.special_effect),
                );
                out.insert("emotion".to_string(), text(&p.emotion));
                JsonValue::Object(out)
            })
            .collect(),
    )
}

fn backgrounds_to_json(record: &CharacterRecord) -> JsonValue {
    JsonValue::Array(
        record
            .backgrounds
            .iter()
            .map(|b| {
                let mut out = JsonMap::new();
                out.insert("name".to_string(), text(&b.name));
                out.insert("type".to_string(), text(&b.kind));
                out.insert("point".to_string(), text(&b.point));
                out.insert("effect".to_string(), text(&b.effect));
                JsonValue::Object(out)
            })
            .collect(),
    )
}
