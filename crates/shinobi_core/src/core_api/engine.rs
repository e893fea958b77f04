use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::grid;
use crate::memo::MemoEntry;
use crate::raw::build_record;
use crate::recover::{RecoveryReport, recover_from_memos};
use crate::source::parse_payload;

use super::error::{CoreError, CoreErrorCode};
use super::types::{CharacterRecord, Ninpou};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// One imported sheet, from raw payload through memo recovery to rendering.
#[derive(Debug, Clone)]
pub struct Session {
    record: CharacterRecord,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_value(&self, raw: &Value, url: &str) -> Result<Session, CoreError> {
        build_record(raw, url).map(Session::new)
    }

    /// Open a JSON or JSONP payload.
    pub fn open_str(&self, payload: &str, url: &str) -> Result<Session, CoreError> {
        let raw = parse_payload(payload)?;
        self.open_value(&raw, url)
    }

    pub fn open_path(&self, path: impl AsRef<Path>, url: &str) -> Result<Session, CoreError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        self.open_str(&payload, url)
    }
}

impl Session {
    pub fn new(record: CharacterRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    pub fn into_record(self) -> CharacterRecord {
        self.record
    }

    /// Pull memo-only state (checkboxes toggled in existing tabs) back into
    /// the record. Must run before the record is rendered.
    pub fn restore_from_memos(&mut self, memos: &[MemoEntry]) -> RecoveryReport {
        recover_from_memos(&mut self.record, memos)
    }

    /// Roll command for the skill a ninpou is used with, if it is on the grid.
    pub fn ninpou_roll(&self, ninpou: &Ninpou) -> Option<String> {
        grid::roll_command_for(&self.record.skills, &ninpou.target_skill)
    }
}
