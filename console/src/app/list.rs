//! # List Page Controller
//!
//! One generic controller drives every paginated admin page. A
//! [`ListSource`] says how to fetch one page of a resource; the controller
//! owns the render state, pagination, filter text and re-fetching.
//!
//! ## Fetch Rules
//!
//! - Each fetch takes a sequence number. Only the most recently *issued*
//!   fetch may write state; older responses are dropped when they land.
//! - A failed fetch leaves `items` untouched, clears `loading` and raises an
//!   error notification.
//! - If the server reports fewer pages than the current page, the page is
//!   clamped and fetched again.
//! - A successful mutation invalidates the resource in the
//!   [`QueryRegistry`] and re-fetches the current page. Rows are never patched
//!   locally.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared::{clamp_page, MessageResponse, Paginated, ReviewDecision};

use super::notifications::Notifier;
use super::registry::{QueryRegistry, Resource};
use crate::core::error::Result;
use crate::core::service::AdminApi;

/// Render state of a list page
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    /// 1-indexed
    pub page: u32,
    /// 0 until the first successful fetch
    pub total_pages: u32,
    pub filter_text: String,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            page: 1,
            total_pages: 0,
            filter_text: String::new(),
        }
    }
}

impl<T> ListState<T> {
    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// How a page fetches its resource
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Registry key of the underlying collection
    const RESOURCE: Resource;

    /// Plural noun used in messages ("users", "withdrawals")
    const NOUN: &'static str;

    /// Fetch one page; `filter_text` is empty when no filter is set
    async fn fetch(
        &self,
        api: &dyn AdminApi,
        page: u32,
        limit: u32,
        filter_text: &str,
    ) -> Result<Paginated<Self::Item>>;
}

/// Sources whose rows can be approved or rejected
#[async_trait]
pub trait ReviewSource: ListSource {
    /// Singular subject for messages ("Withdrawal", "KYC submission")
    const SUBJECT: &'static str;

    async fn review(&self, api: &dyn AdminApi, id: &str, decision: &ReviewDecision) -> Result<MessageResponse>;
}

/// Controller for one list page
pub struct ListController<S: ListSource> {
    api: Arc<dyn AdminApi>,
    source: S,
    state: Arc<RwLock<ListState<S::Item>>>,
    limit: u32,
    seq: AtomicU64,
    loaded_generation: Mutex<Option<u64>>,
    registry: QueryRegistry,
    notifier: Notifier,
}

impl<S: ListSource> ListController<S> {
    pub fn new(api: Arc<dyn AdminApi>, source: S, limit: u32, registry: QueryRegistry, notifier: Notifier) -> Self {
        Self {
            api,
            source,
            state: Arc::new(RwLock::new(ListState::default())),
            limit: limit.max(1),
            seq: AtomicU64::new(0),
            loaded_generation: Mutex::new(None),
            registry,
            notifier,
        }
    }

    /// Shared handle for renderers
    pub fn state(&self) -> Arc<RwLock<ListState<S::Item>>> {
        self.state.clone()
    }

    /// Cloned copy of the current render state
    pub fn snapshot(&self) -> ListState<S::Item> {
        self.state.read().clone()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub(crate) fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    /// True once a fetch has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded_generation.lock().is_some()
    }

    /// True when nothing has loaded yet or a mutation has bumped the resource
    pub fn is_stale(&self) -> bool {
        *self.loaded_generation.lock() != Some(self.registry.generation(S::RESOURCE))
    }

    /// Initial load when the page is shown
    pub async fn mount(&self) {
        self.refresh().await;
    }

    /// Re-fetch only if the resource was invalidated since the last load
    pub async fn refresh_if_stale(&self) {
        if self.is_stale() {
            self.refresh().await;
        }
    }

    /// Fetch the current page with the current filter.
    pub async fn refresh(&self) {
        loop {
            let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            let generation = self.registry.generation(S::RESOURCE);
            let (page, filter_text) = {
                let mut state = self.state.write();
                state.loading = true;
                (state.page, state.filter_text.clone())
            };

            let start = std::time::Instant::now();
            let result = self
                .source
                .fetch(self.api.as_ref(), page, self.limit, &filter_text)
                .await;

            if self.seq.load(Ordering::SeqCst) != seq {
                tracing::debug!(resource = ?S::RESOURCE, seq, "Discarding stale list response");
                return;
            }

            match result {
                Ok(envelope) => {
                    let clamped = clamp_page(page, envelope.pages);
                    let mut state = self.state.write();
                    if clamped != page {
                        tracing::info!(
                            resource = ?S::RESOURCE,
                            requested = page,
                            pages = envelope.pages,
                            "Page out of range, clamping"
                        );
                        state.page = clamped;
                        state.total_pages = envelope.pages;
                        continue;
                    }

                    tracing::debug!(
                        resource = ?S::RESOURCE,
                        page,
                        pages = envelope.pages,
                        items = envelope.items.len(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        "List loaded"
                    );
                    state.items = envelope.items;
                    state.total_pages = envelope.pages;
                    state.loading = false;
                    drop(state);
                    *self.loaded_generation.lock() = Some(generation);
                    return;
                }
                Err(e) => {
                    tracing::warn!(resource = ?S::RESOURCE, error = %e, "List fetch failed");
                    self.state.write().loading = false;
                    self.notifier
                        .error(e.user_message(&format!("Failed to fetch {}", S::NOUN)));
                    return;
                }
            }
        }
    }

    /// Go to `page`, clamped into range. No request when the page is unchanged.
    pub async fn set_page(&self, page: u32) {
        let changed = {
            let mut state = self.state.write();
            let target = clamp_page(page, state.total_pages);
            let changed = target != state.page;
            state.page = target;
            changed
        };
        if changed {
            self.refresh().await;
        }
    }

    pub async fn next_page(&self) {
        let target = {
            let state = self.state.read();
            state.can_go_next().then(|| state.page + 1)
        };
        if let Some(page) = target {
            self.set_page(page).await;
        }
    }

    pub async fn prev_page(&self) {
        let target = {
            let state = self.state.read();
            state.can_go_prev().then(|| state.page - 1)
        };
        if let Some(page) = target {
            self.set_page(page).await;
        }
    }

    /// Change the filter; always lands on page 1.
    pub async fn set_filter_text(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.state.write();
            if state.filter_text == text {
                return;
            }
            state.filter_text = text;
            state.page = 1;
        }
        self.refresh().await;
    }

    /// Jump straight to `page` under `filter_text` and fetch it.
    ///
    /// Unlike [`set_page`](Self::set_page) the page is not clamped up front,
    /// so it works before the first load; an out-of-range page is clamped
    /// once the server reports the real page count.
    pub async fn open(&self, page: u32, filter_text: impl Into<String>) {
        {
            let mut state = self.state.write();
            state.page = page.max(1);
            state.filter_text = filter_text.into();
        }
        self.refresh().await;
    }

    /// Run a mutation, report it, and on success invalidate and re-fetch.
    pub async fn mutate<F>(&self, mutation: F, success: String, failure: &str) -> Result<MessageResponse>
    where
        F: Future<Output = Result<MessageResponse>> + Send,
    {
        match mutation.await {
            Ok(response) => {
                self.notifier.success(success);
                self.registry.invalidate(S::RESOURCE);
                self.refresh().await;
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(resource = ?S::RESOURCE, error = %e, "Mutation failed");
                self.notifier.error(e.user_message(failure));
                Err(e)
            }
        }
    }
}

impl<S: ReviewSource> ListController<S> {
    /// Approve or reject one row
    pub async fn review(&self, id: &str, decision: ReviewDecision) -> Result<MessageResponse> {
        let verdict = if decision.approved { "approved" } else { "rejected" };
        let success = format!("{} {} successfully", S::SUBJECT, verdict);
        let failure = format!("Failed to update {}", S::NOUN);

        self.mutate(self.source.review(self.api.as_ref(), id, &decision), success, &failure)
            .await
    }
}
