use serde::{Deserialize, Serialize};

use crate::grid::SkillGrid;

/// Typed form of one imported character sheet.
///
/// Every text field is normalized and absent fields are empty strings, so
/// renderers never deal with missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub url: String,
    pub player_name: String,
    pub character_name: String,
    pub character_name_kana: String,
    pub foe: String,
    pub exp: String,
    pub memo: String,
    /// Display label of the upper style; empty when the code is unmapped.
    pub upper_style: String,
    pub sub_style: String,
    pub level: String,
    pub age: String,
    pub sex: String,
    pub cover: String,
    pub belief: String,
    pub style_rule: String,
    pub scenario: Scenario,
    pub ninpou: Vec<Ninpou>,
    pub personalities: Vec<Personality>,
    pub backgrounds: Vec<Background>,
    pub skills: SkillGrid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub handout: String,
    pub mission: String,
    pub name: String,
    pub pc_no: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ninpou {
    pub name: String,
    pub kind: String,
    /// Skill name on the grid. Not checked; unknown names get no roll.
    pub target_skill: String,
    pub range: String,
    pub cost: String,
    pub effect: String,
    pub page: String,
    pub secret: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub name: String,
    pub place: bool,
    pub secret: bool,
    pub special_effect: bool,
    pub emotion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub name: String,
    pub kind: String,
    pub point: String,
    pub effect: String,
}
