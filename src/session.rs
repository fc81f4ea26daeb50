// src/session.rs
// Reply session: stale-response guard, rate-limit window and history upkeep

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Style};
use crate::client::ReplyGenerator;
use crate::error::{ApiError, NextMoveError, Result};
pub use crate::error::countdown_secs;
use crate::reply::{GenerateReplyResult, ReplyRequest, ReplyResult};
use crate::store::PreferenceStore;

/// Hands out monotonically increasing sequence numbers for in-flight requests.
///
/// Only the holder of the latest number may apply its result.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new request; every earlier tag becomes stale
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// What happened to one generate/regenerate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The result became the current entry and was recorded in history
    Applied(ReplyResult),
    /// The request failed and was still the latest one
    Failed(ApiError),
    /// A newer request was issued before this one resolved; nothing changed
    Superseded,
    /// Still inside a rate-limit window; no request was sent
    Throttled(Duration),
}

#[derive(Debug, Default)]
struct SessionState {
    current: Option<ReplyResult>,
    retry_until: Option<Instant>,
}

/// Drives reply generation for one user.
///
/// All state changes happen after the generator resolves, and only for the
/// latest request.
pub struct ReplySession<G: ReplyGenerator> {
    generator: G,
    store: PreferenceStore,
    catalog: Catalog,
    sequencer: RequestSequencer,
    state: RwLock<SessionState>,
}

impl<G: ReplyGenerator> ReplySession<G> {
    pub fn new(generator: G, store: PreferenceStore, catalog: Catalog) -> Self {
        Self {
            generator,
            store,
            catalog,
            sequencer: RequestSequencer::new(),
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    pub async fn current(&self) -> Option<ReplyResult> {
        self.state.read().await.current.clone()
    }

    /// Make a history entry current, e.g. to regenerate it in another style
    pub async fn select(&self, entry: ReplyResult) {
        self.state.write().await.current = Some(entry);
    }

    /// Remaining rate-limit window, if any
    pub async fn retry_in(&self) -> Option<Duration> {
        let until = self.state.read().await.retry_until?;
        let now = Instant::now();
        (until > now).then(|| until - now)
    }

    /// Countdown shown to the user, rounded up to whole seconds
    pub async fn retry_in_secs(&self) -> u64 {
        self.retry_in().await.map(countdown_secs).unwrap_or(0)
    }

    /// Generate replies for a new message
    pub async fn generate(&self, request: ReplyRequest) -> Outcome {
        self.run(request, |request, generated| ReplyResult::new(request, generated))
            .await
    }

    /// Re-run the current entry with another style, keeping its id.
    ///
    /// The chosen style is saved as the new preference before the request goes out.
    pub async fn regenerate(&self, style: Style) -> Result<Outcome> {
        let current = self
            .current()
            .await
            .ok_or_else(|| NextMoveError::InvalidInput("no reply to regenerate".to_string()))?;

        if let Err(e) = self.store.save_style(&style).await {
            warn!(error = %e, "Failed to save style preference");
        }

        let request = current.request()?.with_style(style);
        Ok(self
            .run(request, move |request, generated| {
                current.regenerated(request.style().clone(), generated)
            })
            .await)
    }

    async fn run<F>(&self, request: ReplyRequest, make_entry: F) -> Outcome
    where
        F: FnOnce(&ReplyRequest, GenerateReplyResult) -> ReplyResult,
    {
        if let Some(remaining) = self.retry_in().await {
            debug!(remaining_ms = remaining.as_millis() as u64, "Rate limited, not sending");
            return Outcome::Throttled(remaining);
        }

        let seq = self.sequencer.begin();
        self.state.write().await.retry_until = None;
        debug!(seq, style = %request.style(), "Request issued");

        let result = self.generator.generate_reply(&request).await;

        let mut state = self.state.write().await;
        if !self.sequencer.is_latest(seq) {
            debug!(seq, latest = self.sequencer.latest(), "Discarding stale response");
            return Outcome::Superseded;
        }

        match result {
            Ok(generated) => {
                let entry = make_entry(&request, generated);
                state.current = Some(entry.clone());

                // held across the write so history saves land in request order
                if let Err(e) = self.store.record_reply(entry.clone()).await {
                    warn!(error = %e, "Failed to save recent replies");
                }
                info!(seq, id = %entry.id, style = %entry.style, "Reply applied");
                Outcome::Applied(entry)
            }
            Err(err) => {
                if let Some(window) = err.retry_after() {
                    state.retry_until = Some(Instant::now() + window);
                }
                warn!(seq, kind = %err.kind(), "Reply generation failed");
                Outcome::Failed(err)
            }
        }
    }
}
