//! Recovery of memo-only UI state from previously rendered tabs.

use tracing::debug;

use crate::core_api::CharacterRecord;
use crate::layout::{GridRecovery, decode_grid};
use crate::memo::{MemoEntry, TAB_BASIC, TAB_SKILLS, tab_text};
use crate::personality::{PersonalityRecovery, decode_personalities};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    pub personalities: Option<PersonalityRecovery>,
    pub grid: Option<GridRecovery>,
}

/// Apply checkbox state found in the existing basic-info and skill tabs.
///
/// Tabs that are missing or unreadable leave the record untouched.
pub fn recover_from_memos(record: &mut CharacterRecord, memos: &[MemoEntry]) -> RecoveryReport {
    let mut report = RecoveryReport::default();

    if let Some(text) = tab_text(memos, TAB_BASIC) {
        report.personalities = Some(decode_personalities(text, &mut record.personalities));
    }
    if let Some(text) = tab_text(memos, TAB_SKILLS) {
        report.grid = Some(decode_grid(text, &mut record.skills));
    }

    debug!(?report, "recovered memo state");
    report
}
