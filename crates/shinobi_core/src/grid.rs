//! The fixed 11x6 skill grid and the roll targets derived from it.
//!
//! Skill names and grid shape are constants of the game system. A character
//! only contributes acquisitions, filled gaps, damaged categories and the
//! outer-ring flag; every roll target is computed from those on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROW_COUNT: usize = 11;
pub const COLUMN_COUNT: usize = 6;
/// Row 0 of the grid is rolled as a 2 on 2d6.
pub const FIRST_ROW_NUMBER: usize = 2;
pub const BASE_TARGET: u32 = 5;
pub const MAX_TARGET: u32 = 12;

pub const CATEGORY_NAMES: [&str; COLUMN_COUNT] = ["器術", "体術", "忍術", "謀術", "戦術", "妖術"];

/// Gap index lying immediately left of each category column.
///
/// Gap `i` sits between category `i` and category `i + 1`, wrapping, so the
/// gap left of 器術 is the one shared with 妖術.
pub const GAP_LEFT_OF: [usize; COLUMN_COUNT] = [5, 0, 1, 2, 3, 4];

#[rustfmt::skip]
pub const SKILL_TABLE: [[&str; COLUMN_COUNT]; ROW_COUNT] = [
    ["絡繰術", "騎乗術", "生存術", "医術", "兵糧術", "異形化"],
    ["火術", "砲術", "潜伏術", "毒術", "鳥獣術", "召喚術"],
    ["水術", "手裏剣術", "遁走術", "罠術", "野戦術", "死霊術"],
    ["針術", "手練", "盗聴術", "調査術", "地の利", "結界術"],
    ["仕込み", "身体操術", "腹話術", "詐術", "意気", "封術"],
    ["衣装術", "歩法", "隠形術", "対人術", "用兵術", "言霊術"],
    ["縄術", "走法", "変装術", "遊芸", "記憶術", "幻術"],
    ["登術", "飛術", "香術", "九ノ一の術", "見敵術", "瞳術"],
    ["拷問術", "骨法術", "分身の術", "傀儡の術", "暗号術", "千里眼の術"],
    ["壊器術", "刀術", "隠蔽術", "流言の術", "伝達術", "憑依術"],
    ["掘削術", "怪力", "第六感", "経済力", "人脈", "呪術"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(row: usize, column: usize) -> Option<Self> {
        (row < ROW_COUNT && column < COLUMN_COUNT).then_some(Self { row, column })
    }

    pub fn name(&self) -> &'static str {
        SKILL_TABLE[self.row][self.column]
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A defined roll target and the acquired skill it is rolled through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub value: u32,
    pub from: CellRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGrid {
    pub acquired: [[bool; COLUMN_COUNT]; ROW_COUNT],
    pub gaps: [bool; COLUMN_COUNT],
    pub damaged: [bool; COLUMN_COUNT],
    /// Outer ring engaged: the top and bottom rows count as adjacent.
    pub out_row: bool,
}

impl SkillGrid {
    /// Look a skill up by name. Unknown names are not an error.
    pub fn find(name: &str) -> Option<CellRef> {
        let name = name.trim();
        cells().find(|cell| cell.name() == name)
    }

    pub fn is_acquired(&self, cell: CellRef) -> bool {
        self.acquired[cell.row][cell.column]
    }

    pub fn set_acquired(&mut self, cell: CellRef, acquired: bool) {
        self.acquired[cell.row][cell.column] = acquired;
    }

    pub fn acquired_cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        cells().filter(|&cell| self.is_acquired(cell))
    }

    /// Whether the gap left of `column` is filled.
    pub fn gap_left_of(&self, column: usize) -> bool {
        self.gaps[GAP_LEFT_OF[column]]
    }

    pub fn distance(&self, from: CellRef, to: CellRef) -> u32 {
        let rows = from.row.abs_diff(to.row);
        let rows = if self.out_row {
            rows.min(ROW_COUNT - rows)
        } else {
            rows
        };
        rows as u32 + self.column_distance(from.column, to.column)
    }

    fn column_distance(&self, from: usize, to: usize) -> u32 {
        let step_cost = |gap: usize| if self.gaps[gap] { 1 } else { 2 };

        let mut rightward = 0;
        let mut column = from;
        while column != to {
            rightward += step_cost(column);
            column = (column + 1) % COLUMN_COUNT;
        }

        let mut leftward = 0;
        let mut column = from;
        while column != to {
            let next = (column + COLUMN_COUNT - 1) % COLUMN_COUNT;
            leftward += step_cost(next);
            column = next;
        }

        rightward.min(leftward)
    }

    /// Roll target for `cell`, through the nearest usable acquired skill.
    ///
    /// Skills in damaged categories cannot be rolled through. Ties keep the
    /// first source in row-major order.
    pub fn target(&self, cell: CellRef) -> Option<Roll> {
        let mut best: Option<Roll> = None;
        for from in self.acquired_cells() {
            if self.damaged[from.column] {
                continue;
            }
            let value = BASE_TARGET + self.distance(from, cell);
            if best.is_none_or(|b| value < b.value) {
                best = Some(Roll { value, from });
            }
        }
        best.filter(|roll| roll.value <= MAX_TARGET)
    }

    /// Every cell with a defined target, category by category.
    pub fn rolls(&self) -> Vec<(CellRef, Roll)> {
        (0..COLUMN_COUNT)
            .flat_map(|column| (0..ROW_COUNT).map(move |row| CellRef { row, column }))
            .filter_map(|cell| self.target(cell).map(|roll| (cell, roll)))
            .collect()
    }
}

/// All grid cells in row-major order.
pub fn cells() -> impl Iterator<Item = CellRef> {
    (0..ROW_COUNT).flat_map(|row| (0..COLUMN_COUNT).map(move |column| CellRef { row, column }))
}

/// Chat command rolling `target` at the given roll.
pub fn roll_command(target: CellRef, roll: &Roll) -> String {
    format!(
        "@@@CHAT-CMD:[{v}]SG>={v} {target}→{from}@@@",
        v = roll.value,
        from = roll.from
    )
}

/// Roll annotation for a skill referenced by name, if it is on the grid and
/// currently reachable.
pub fn roll_command_for(grid: &SkillGrid, skill_name: &str) -> Option<String> {
    let cell = SkillGrid::find(skill_name)?;
    let roll = grid.target(cell)?;
    Some(roll_command(cell, &roll))
}
