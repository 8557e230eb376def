//! Per-account playback polling.
//!
//! A schedule fires one fetch per tick without waiting for earlier fetches to
//! settle, so responses may land out of order; the last one to resolve wins.
//! Every fetch holds the mount's [`CancelToken`] and checks it before
//! committing, which is how results that outlive their card are dropped.

use crate::api::navigator::Navigator;
use crate::api::transport::Transport;
use crate::api::{AccountId, ApiClient, ApiError, PanelClient, PlaybackState};
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

/// Liveness handle shared between a mounted poller and its tasks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a card renders: the last good state and the latest error, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PollSnapshot {
    pub playback: Option<PlaybackState>,
    pub error: Option<String>,
    /// False until the first fetch settles either way.
    pub resolved: bool,
}

impl PollSnapshot {
    pub fn record(&mut self, outcome: Result<PlaybackState, ApiError>) {
        self.resolved = true;
        match outcome {
            Ok(state) => {
                self.playback = Some(state);
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        !self.resolved
    }
}

/// Fetches once and hands the outcome to `commit` unless `token` was
/// cancelled while the request was in flight.
pub async fn poll_once<T, N>(
    client: &ApiClient<T, N>,
    account_id: AccountId,
    token: &CancelToken,
    commit: impl FnOnce(Result<PlaybackState, ApiError>),
) -> bool
where
    T: Transport,
    N: Navigator,
{
    if token.is_cancelled() {
        return false;
    }
    let outcome = client.playback_state(account_id).await;
    if token.is_cancelled() {
        debug!("discarding playback result for account {account_id} after teardown");
        return false;
    }
    commit(outcome);
    true
}

/// Calls `on_tick` immediately and then every `interval_ms` until cancelled.
pub async fn run_schedule(token: CancelToken, interval_ms: u32, mut on_tick: impl FnMut(u64)) {
    let mut tick = 0u64;
    while !token.is_cancelled() {
        on_tick(tick);
        tick = tick.saturating_add(1);
        sleep_ms(interval_ms).await;
    }
}

/// Keeps a live [`PollSnapshot`] for `account_id`, refreshed every
/// `interval_ms`. Restarts when either argument changes and stops on unmount.
pub fn use_playback_state(account_id: AccountId, interval_ms: u32) -> Signal<PollSnapshot> {
    let client = use_context::<PanelClient>();
    let snapshot = use_signal(PollSnapshot::default);
    let mut active = use_signal(|| None::<CancelToken>);

    use_effect(use_reactive!(|(account_id, interval_ms)| {
        if let Some(previous) = active.peek().as_ref() {
            previous.cancel();
        }
        let token = CancelToken::new();
        active.set(Some(token.clone()));
        debug!("polling account {account_id} every {interval_ms}ms");

        let client = client.clone();
        spawn(async move {
            let schedule_token = token.clone();
            run_schedule(schedule_token, interval_ms, move |_| {
                let client = client.clone();
                let token = token.clone();
                let mut snapshot = snapshot;
                spawn(async move {
                    poll_once(&client, account_id, &token, |outcome| {
                        snapshot.with_mut(|current| current.record(outcome));
                    })
                    .await;
                });
            })
            .await;
            debug!("stopped polling account {account_id}");
        });
    }));

    use_drop(move || {
        if let Some(token) = active.peek().as_ref() {
            token.cancel();
        }
    });

    snapshot
}
