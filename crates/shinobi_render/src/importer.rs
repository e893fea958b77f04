use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shinobi_core::core_api::{Engine, Session};
use shinobi_core::locator::SheetLocator;
use shinobi_core::memo::MemoEntry;
use shinobi_core::source::SheetSource;
use tracing::{debug, warn};

use crate::palette::{PaletteEntry, render_chat_palette};
use crate::render_tabs;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Fixed reload-marker time. Local time when unset.
    pub timestamp: Option<NaiveDateTime>,
}

/// Fetches one sheet and turns it into memo tabs or a chat palette.
pub struct SheetImporter<S> {
    source: S,
    url: String,
    options: ImportOptions,
}

impl<S: SheetSource> SheetImporter<S> {
    pub fn new(source: S, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_supported(&self) -> bool {
        SheetLocator::is_supported(&self.url)
    }

    /// Replacement memo tabs, with checkbox state carried over from `memos`.
    ///
    /// `None` when the sheet could not be fetched or read.
    pub fn create_other_text(&self, memos: &[MemoEntry]) -> Option<Vec<MemoEntry>> {
        let mut session = self.open()?;
        let report = session.restore_from_memos(memos);
        debug!(url = %self.url, ?report, "rendering tabs");
        Some(render_tabs(session.record(), self.rendered_at()))
    }

    pub fn create_chat_palette(&self) -> Vec<PaletteEntry> {
        self.open()
            .map(|session| render_chat_palette(session.record()))
            .unwrap_or_default()
    }

    fn open(&self) -> Option<Session> {
        let Some(raw) = self.source.fetch(&self.url) else {
            warn!(url = %self.url, "no sheet data");
            return None;
        };
        match Engine::new().open_value(&raw, &self.url) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(url = %self.url, error = %e, "sheet could not be imported");
                None
            }
        }
    }

    fn rendered_at(&self) -> NaiveDateTime {
        self.options
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local())
    }
}
