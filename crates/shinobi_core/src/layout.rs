//! Fixed text layout of the skill tab.
//!
//! The skill tab is the only place gap, damage and outer-ring state survive
//! between reloads, so the text written here is read back verbatim by
//! [`decode_grid`]. Both directions are driven by the same layout constants.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::grid::{
    CATEGORY_NAMES, COLUMN_COUNT, CellRef, FIRST_ROW_NUMBER, GAP_LEFT_OF, ROW_COUNT, SkillGrid,
    roll_command,
};
use crate::table::{
    Align, CHECKED, Column, alignment_row, checkbox, render_row, split_checkbox, split_row,
};

/// Row label, then a gap cell and a skill cell per category.
pub const GRID_CELL_COUNT: usize = 1 + 2 * COLUMN_COUNT;

const LABEL_CELL: usize = 0;
const EMPTY_CELL: &str = "　";
const FILLED_GAP_CELL: &str = "¦";

pub const fn gap_cell(column: usize) -> usize {
    1 + 2 * column
}

pub const fn skill_cell(column: usize) -> usize {
    2 + 2 * column
}

/// Shape of the trailing row holding the outer-ring checkbox.
///
/// Every cell is filler, the marker cell carries the checkbox, and when the
/// ring is engaged each cell is prefixed with the ring mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRowLayout {
    pub cell_count: usize,
    pub marker_cell: usize,
    pub ring_mark: char,
    pub filler: char,
}

pub const STATE_ROW_LAYOUT: StateRowLayout = StateRowLayout {
    cell_count: GRID_CELL_COUNT,
    marker_cell: 0,
    ring_mark: '¦',
    filler: '　',
};

impl StateRowLayout {
    pub fn encode(&self, engaged: bool) -> String {
        render_row((0..self.cell_count).map(|index| {
            let mut cell = String::new();
            if engaged {
                cell.push(self.ring_mark);
            }
            if index == self.marker_cell {
                cell.push_str(checkbox(engaged));
            } else {
                cell.push(self.filler);
            }
            cell
        }))
    }

    /// Anchored pattern accepting exactly the rows `encode` can produce, with
    /// any amount of filler. Capture group 1 is the checkbox mark.
    pub fn pattern(&self) -> String {
        let ring = regex::escape(&self.ring_mark.to_string());
        let filler = regex::escape(&self.filler.to_string());
        let mut pattern = String::from("^");
        for index in 0..self.cell_count {
            pattern.push_str(&format!(r"\|(?:{ring})?(?:{filler})*"));
            if index == self.marker_cell {
                pattern.push_str(&format!(r"\[([ x])\](?:{filler})*"));
            }
        }
        pattern.push_str(r"\|$");
        pattern
    }
}

/// Compiled encoder/decoder pair for one [`StateRowLayout`].
#[derive(Debug)]
pub struct StateRowCodec {
    layout: StateRowLayout,
    regex: Regex,
}

impl StateRowCodec {
    pub fn new(layout: StateRowLayout) -> Result<Self, regex::Error> {
        let regex = Regex::new(&layout.pattern())?;
        Ok(Self { layout, regex })
    }

    pub fn encode(&self, engaged: bool) -> String {
        self.layout.encode(engaged)
    }

    pub fn decode(&self, line: &str) -> Option<bool> {
        let caps = self.regex.captures(line.trim_end())?;
        Some(&caps[1] == "x")
    }

    /// Decode the last matching row in a text block.
    pub fn find_in(&self, text: &str) -> Option<bool> {
        text.lines().rev().find_map(|line| self.decode(line))
    }
}

pub static STATE_ROW: Lazy<StateRowCodec> = Lazy::new(|| {
    StateRowCodec::new(STATE_ROW_LAYOUT).expect("state row pattern is built from escaped literals")
});

fn grid_columns() -> [Column; GRID_CELL_COUNT] {
    let mut columns = [Column::center(""); GRID_CELL_COUNT];
    for column in 0..COLUMN_COUNT {
        columns[skill_cell(column)] = Column {
            label: "",
            align: Align::Left,
        };
    }
    columns
}

/// Render the grid table and its trailing state row.
pub fn encode_grid(grid: &SkillGrid) -> Vec<String> {
    let mut lines = Vec::with_capacity(ROW_COUNT + 3);

    let mut header = vec![String::new(); GRID_CELL_COUNT];
    header[LABEL_CELL] = EMPTY_CELL.to_string();
    for (column, name) in CATEGORY_NAMES.iter().enumerate() {
        header[gap_cell(column)] = checkbox(grid.gap_left_of(column)).to_string();
        header[skill_cell(column)] = format!("{}{name}", checkbox(grid.damaged[column]));
    }
    lines.push(render_row(&header));
    lines.push(alignment_row(&grid_columns()));

    for row in 0..ROW_COUNT {
        let mut cells = vec![String::new(); GRID_CELL_COUNT];
        cells[LABEL_CELL] = (row + FIRST_ROW_NUMBER).to_string();
        for column in 0..COLUMN_COUNT {
            let cell = CellRef { row, column };
            cells[gap_cell(column)] = if grid.gap_left_of(column) {
                FILLED_GAP_CELL
            } else {
                EMPTY_CELL
            }
            .to_string();

            let mut text = format!("{}{}", checkbox(grid.is_acquired(cell)), cell.name());
            if let Some(roll) = grid.target(cell) {
                text.push_str(&roll_command(cell, &roll));
            }
            cells[skill_cell(column)] = text;
        }
        lines.push(render_row(&cells));
    }

    lines.push(STATE_ROW.encode(grid.out_row));
    lines
}

/// What [`decode_grid`] managed to read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridRecovery {
    pub header_found: bool,
    pub rows_read: usize,
    pub out_row: Option<bool>,
}

/// Read gap, damage and outer-ring state back out of a rendered skill tab.
/// Unrecognized lines are ignored; state that cannot be read keeps its current
/// value. Acquired skills come from the sheet only, so body rows are counted
/// but never applied.
pub fn decode_grid(text: &str, grid: &mut SkillGrid) -> GridRecovery {
    let mut recovery = GridRecovery::default();

    for line in text.lines() {
        let Some(cells) = split_row(line) else {
            continue;
        };
        if cells.len() != GRID_CELL_COUNT {
            continue;
        }

        if let Some((gaps, damaged)) = decode_header(&cells) {
            grid.gaps = gaps;
            grid.damaged = damaged;
            recovery.header_found = true;
            continue;
        }

        if decode_row_label(cells[LABEL_CELL]).is_some() {
            recovery.rows_read += 1;
        }
    }

    recovery.out_row = STATE_ROW.find_in(text);
    match recovery.out_row {
        Some(engaged) => grid.out_row = engaged,
        None => debug!("no outer-ring state row found; keeping {}", grid.out_row),
    }
    if !recovery.header_found {
        debug!("no skill grid header found; keeping gaps and damage");
    }

    recovery
}

fn decode_header(cells: &[&str]) -> Option<([bool; COLUMN_COUNT], [bool; COLUMN_COUNT])> {
    let mut gaps = [false; COLUMN_COUNT];
    let mut damaged = [false; COLUMN_COUNT];
    for (column, name) in CATEGORY_NAMES.iter().enumerate() {
        let (is_damaged, rest) = split_checkbox(cells[skill_cell(column)])?;
        if rest.trim() != *name {
            return None;
        }
        let gap = cells[gap_cell(column)].trim();
        if gap != CHECKED && split_checkbox(gap) != Some((false, "")) {
            return None;
        }
        gaps[GAP_LEFT_OF[column]] = gap == CHECKED;
        damaged[column] = is_damaged;
    }
    Some((gaps, damaged))
}

fn decode_row_label(cell: &str) -> Option<usize> {
    let number: usize = cell.trim().parse().ok()?;
    let row = number.checked_sub(FIRST_ROW_NUMBER)?;
    (row < ROW_COUNT).then_some(row)
}

#[cfg(test)]
mod tests {
    use super::{GRID_CELL_COUNT, STATE_ROW, STATE_ROW_LAYOUT};
    use crate::table::split_row;

    #[test]
    fn encoded_state_row_has_grid_width() {
        for engaged in [true, false] {
            let line = STATE_ROW.encode(engaged);
            assert_eq!(split_row(&line).map(|c| c.len()), Some(GRID_CELL_COUNT));
        }
    }

    #[test]
    fn state_row_encode_is_always_decodable() {
        assert_eq!(STATE_ROW.decode(&STATE_ROW.encode(true)), Some(true));
        assert_eq!(STATE_ROW.decode(&STATE_ROW.encode(false)), Some(false));
    }

    #[test]
    fn state_row_matches_the_fixed_literal_form() {
        assert_eq!(
            STATE_ROW_LAYOUT.encode(false),
            "|[ ]|　|　|　|　|　|　|　|　|　|　|　|　|"
        );
        assert_eq!(
            STATE_ROW_LAYOUT.encode(true),
            "|¦[x]|¦　|¦　|¦　|¦　|¦　|¦　|¦　|¦　|¦　|¦　|¦　|¦　|"
        );
    }

    #[test]
    fn state_row_with_a_missing_cell_does_not_decode() {
        let line = "|[x]|　|　|　|　|　|　|　|　|　|　|　|";
        assert_eq!(STATE_ROW.decode(line), None);
    }

    #[test]
    fn state_row_tolerates_extra_filler() {
        assert_eq!(
            STATE_ROW.decode("|[x]　　|　|　|　|　|　|　|　|　|　|　|　|　　|  "),
            Some(true)
        );
    }
}
