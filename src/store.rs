// src/store.rs
// Local preferences (style, character) and the bounded recent-replies history

use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::catalog::{Catalog, CharacterProfile, Style};
use crate::error::Result;
use crate::reply::ReplyResult;

/// History keeps at most this many entries, newest first
pub const MAX_RECENT_REPLIES: usize = 10;

const CHARACTER_KEY: &str = "nextmove.character";
const STYLE_KEY: &str = "nextmove.style";
const RECENT_REPLIES_KEY: &str = "nextmove.recentReplies.json";

/// Three independent records stored as files in one directory.
///
/// Reads never fail on bad data: unreadable or corrupted records come back
/// empty and are logged.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file so a crash never leaves half a record
    async fn write(&self, key: &str, contents: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(key);
        let tmp = self.path(&format!("{key}.tmp"));
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(key = key, bytes = contents.len(), "Record saved");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_text(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read(key)
            .await?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    // ── Style

    /// Raw stored style label, if any
    pub async fn get_style(&self) -> Result<Option<String>> {
        self.read_text(STYLE_KEY).await
    }

    pub async fn save_style(&self, style: &Style) -> Result<()> {
        self.write(STYLE_KEY, style.as_str()).await
    }

    pub async fn clear_style(&self) -> Result<()> {
        self.remove(STYLE_KEY).await
    }

    /// Stored style if the catalog still knows it, default otherwise.
    /// An unknown stored label is cleared.
    pub async fn load_style(&self, catalog: &Catalog) -> Style {
        let stored = match self.get_style().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read stored style");
                return catalog.default_style().clone();
            }
        };

        match stored {
            Some(label) => match catalog.style(&label) {
                Some(style) => style,
                None => {
                    warn!(style = %label, "Stored style no longer offered, clearing");
                    if let Err(e) = self.clear_style().await {
                        warn!(error = %e, "Failed to clear stored style");
                    }
                    catalog.default_style().clone()
                }
            },
            None => catalog.default_style().clone(),
        }
    }

    // ── Character

    pub async fn get_character(&self) -> Result<Option<String>> {
        self.read_text(CHARACTER_KEY).await
    }

    pub async fn save_character(&self, character: &str) -> Result<()> {
        self.write(CHARACTER_KEY, character.trim()).await
    }

    pub async fn clear_character(&self) -> Result<()> {
        self.remove(CHARACTER_KEY).await
    }

    /// Stored character if the catalog still knows it; unknown names are cleared
    pub async fn load_character(&self, catalog: &Catalog) -> Option<CharacterProfile> {
        let stored = match self.get_character().await {
            Ok(stored) => stored?,
            Err(e) => {
                warn!(error = %e, "Failed to read stored character");
                return None;
            }
        };

        if let Some(profile) = catalog.character(&stored) {
            return Some(profile.clone());
        }

        warn!(character = %stored, "Stored character no longer offered, clearing");
        if let Err(e) = self.clear_character().await {
            warn!(error = %e, "Failed to clear stored character");
        }
        None
    }

    // ── Recent replies

    /// Newest first, at most [`MAX_RECENT_REPLIES`]. Corrupted data yields an empty list.
    pub async fn load_recent_replies(&self) -> Vec<ReplyResult> {
        let raw = match self.read(RECENT_REPLIES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read recent replies");
                return Vec::new();
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                warn!("Recent replies record is not a list, ignoring");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "Recent replies record is corrupted, ignoring");
                return Vec::new();
            }
        };

        let total = items.len();
        let mut replies: Vec<ReplyResult> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if replies.len() < total {
            warn!(dropped = total - replies.len(), "Skipped unreadable history entries");
        }
        replies.truncate(MAX_RECENT_REPLIES);
        replies
    }

    /// Persist the list as given (newest first), keeping the first [`MAX_RECENT_REPLIES`]
    pub async fn save_recent_replies(&self, replies: &[ReplyResult]) -> Result<()> {
        let kept = &replies[..replies.len().min(MAX_RECENT_REPLIES)];
        let json = serde_json::to_string(kept)?;
        self.write(RECENT_REPLIES_KEY, &json).await
    }

    /// Put `entry` at the front, replacing any entry with the same id
    pub async fn record_reply(&self, entry: ReplyResult) -> Result<Vec<ReplyResult>> {
        let mut replies = self.load_recent_replies().await;
        replies.retain(|r| r.id != entry.id);
        replies.insert(0, entry);
        replies.truncate(MAX_RECENT_REPLIES);
        self.save_recent_replies(&replies).await?;
        Ok(replies)
    }

    pub async fn clear_recent_replies(&self) -> Result<()> {
        self.remove(RECENT_REPLIES_KEY).await
    }

    /// Remove every record
    pub async fn clear_all(&self) -> Result<()> {
        self.clear_style().await?;
        self.clear_character().await?;
        self.clear_recent_replies().await
    }
}
