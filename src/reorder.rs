//! Drag-to-reorder and card selection for the account grid.

use crate::api::navigator::Navigator;
use crate::api::transport::Transport;
use crate::api::{Account, AccountId, ApiClient};
use dioxus::logger::tracing::warn;
use dioxus::prelude::Key;
use std::collections::BTreeSet;
use std::future::Future;

/// Elements whose taps belong to the element rather than the card under it.
pub const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "label", "select", "textarea"];

/// Computes the order after dropping `dragged` onto `target`.
///
/// Returns `None` when nothing moves: the gesture was cancelled, the drop
/// landed on the dragged card itself, or either id is not in the list.
pub fn plan_reorder(
    accounts: &[Account],
    dragged: AccountId,
    target: Option<AccountId>,
) -> Option<Vec<Account>> {
    let target = target?;
    if target == dragged {
        return None;
    }
    let from = accounts.iter().position(|a| a.id == dragged)?;
    let to = accounts.iter().position(|a| a.id == target)?;

    let mut reordered = accounts.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Some(reordered)
}

pub fn ordered_ids(accounts: &[Account]) -> Vec<AccountId> {
    accounts.iter().map(|a| a.id).collect()
}

/// Applies a drop to `accounts` right away and returns the save to spawn.
///
/// `None` means nothing moved and nothing should be sent. The save logs a
/// failed `PUT` and leaves the local order as is.
pub fn submit_drop<T, N>(
    client: &ApiClient<T, N>,
    accounts: &mut Vec<Account>,
    dragged: AccountId,
    target: Option<AccountId>,
) -> Option<impl Future<Output = ()> + 'static>
where
    T: Transport,
    N: Navigator,
{
    let reordered = plan_reorder(accounts, dragged, target)?;
    let ids = ordered_ids(&reordered);
    *accounts = reordered;

    let client = client.clone();
    Some(async move {
        if let Err(err) = client.reorder_accounts(&ids).await {
            warn!("reorder {ids:?} was not saved: {err}");
        }
    })
}

/// Swipe distance on the grip that counts as one step.
pub const SWIPE_STEP_PX: f64 = 24.0;

/// One-position move made from the keyboard or a touch swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderStep {
    Earlier,
    Later,
}

impl ReorderStep {
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowLeft | Key::ArrowUp => Some(Self::Earlier),
            Key::ArrowRight | Key::ArrowDown => Some(Self::Later),
            _ => None,
        }
    }

    /// Step for a touch that moved from `start` to `current`, measured along
    /// whichever axis moved further.
    pub fn from_swipe(start: (f64, f64), current: (f64, f64)) -> Option<Self> {
        let dx = current.0 - start.0;
        let dy = current.1 - start.1;
        let delta = if dx.abs() >= dy.abs() { dx } else { dy };
        if delta.abs() < SWIPE_STEP_PX {
            return None;
        }
        Some(if delta < 0.0 { Self::Earlier } else { Self::Later })
    }
}

/// The neighbour a step lands on; `None` at either end of the list.
pub fn step_target(accounts: &[Account], moved: AccountId, step: ReorderStep) -> Option<AccountId> {
    let index = accounts.iter().position(|a| a.id == moved)?;
    let target = match step {
        ReorderStep::Earlier => index.checked_sub(1)?,
        ReorderStep::Later => index + 1,
    };
    accounts.get(target).map(|a| a.id)
}

/// Selected account ids. Display-only; nothing acts on the selection yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<AccountId>);

impl Selection {
    pub fn toggle(&mut self, id: AccountId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.0.contains(&id)
    }

    /// Drops ids that are no longer linked.
    pub fn retain_linked(&mut self, accounts: &[Account]) {
        self.0.retain(|id| accounts.iter().any(|a| a.id == *id));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOrigin {
    /// A button, slider, link or similar control inside the card.
    Control,
    Body,
}

pub fn is_interactive_tag(tag: &str) -> bool {
    INTERACTIVE_TAGS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(tag))
}

/// Classifies a tap from the tag names on its path, innermost first.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn classify_path<'a>(tags: impl IntoIterator<Item = &'a str>) -> GestureOrigin {
    if tags.into_iter().any(is_interactive_tag) {
        GestureOrigin::Control
    } else {
        GestureOrigin::Body
    }
}

#[cfg(target_arch = "wasm32")]
pub fn gesture_origin(evt: &dioxus::prelude::MouseEvent) -> GestureOrigin {
    use wasm_bindgen::JsCast;

    let Some(event) = evt.data().downcast::<web_sys::MouseEvent>().cloned() else {
        return GestureOrigin::Body;
    };
    let mut tags = Vec::new();
    let mut node = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok());
    while let Some(element) = node {
        tags.push(element.tag_name());
        node = element.parent_element();
    }
    classify_path(tags.iter().map(String::as_str))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn gesture_origin(_evt: &dioxus::prelude::MouseEvent) -> GestureOrigin {
    // Controls stop propagation of their own clicks in the webview build.
    GestureOrigin::Body
}
