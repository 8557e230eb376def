use crate::api::{Account, AccountId};
use crate::components::{Icon, IconKind, NowPlaying, PlaybackControls};
use crate::config::PanelConfig;
use crate::poller::use_playback_state;
use crate::reorder::{gesture_origin, GestureOrigin, ReorderStep};
use dioxus::prelude::*;

/// One linked account: live playback, transport controls and a remove button.
///
/// The card polls for itself; the grid only feeds it drag and selection state.
#[component]
pub fn AccountCard(
    account: Account,
    selected: bool,
    dragging: bool,
    drop_target: bool,
    on_remove: EventHandler<AccountId>,
    on_toggle_select: EventHandler<AccountId>,
    on_drag_start: EventHandler<AccountId>,
    on_drag_enter: EventHandler<AccountId>,
    on_drop: EventHandler<AccountId>,
    on_drag_end: EventHandler<()>,
    /// Keyboard and touch moves of one position.
    on_step: EventHandler<ReorderStep>,
) -> Element {
    let config = use_context::<PanelConfig>();
    let account_id = account.id;
    let snapshot = use_playback_state(account_id, config.poll_interval_ms);
    let current = snapshot();
    let mut touch_start = use_signal(|| None::<(f64, f64)>);
    let grip_class = if touch_start().is_some() {
        "p-1 -m-1 rounded text-emerald-300 cursor-grabbing scale-110 transition-all select-none"
    } else {
        "p-1 -m-1 rounded text-zinc-600 cursor-grab active:cursor-grabbing hover:text-zinc-400 focus:outline-none focus-visible:ring-2 focus-visible:ring-emerald-400/60 transition-all select-none"
    };

    let card_class = if dragging {
        "relative rounded-2xl border border-emerald-500/45 bg-emerald-500/10 p-5 opacity-60 scale-[0.98] transition-all select-none"
    } else if drop_target {
        "relative rounded-2xl border border-emerald-400 bg-zinc-900/80 p-5 ring-2 ring-emerald-400/40 transition-all select-none"
    } else if selected {
        "relative rounded-2xl border border-emerald-500/60 bg-zinc-900/80 p-5 shadow-lg shadow-emerald-500/10 transition-all select-none"
    } else {
        "relative rounded-2xl border border-zinc-800 bg-zinc-900/60 p-5 hover:border-zinc-700 transition-all select-none"
    };

    rsx! {
        div {
            class: "{card_class}",
            draggable: "true",
            onclick: move |evt: MouseEvent| {
                if gesture_origin(&evt) == GestureOrigin::Body {
                    on_toggle_select.call(account_id);
                }
            },
            ondragstart: move |_| on_drag_start.call(account_id),
            ondragenter: move |_| on_drag_enter.call(account_id),
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                on_drop.call(account_id);
            },
            ondragend: move |_| on_drag_end.call(()),

            div { class: "flex items-center justify-between gap-3 mb-4",
                div { class: "flex items-center gap-2 min-w-0",
                    button {
                        r#type: "button",
                        class: "{grip_class}",
                        title: "Drag, swipe or use the arrow keys to reorder",
                        style: "touch-action: none;",
                        onclick: move |evt: MouseEvent| evt.stop_propagation(),
                        onkeydown: move |evt: KeyboardEvent| {
                            if let Some(step) = ReorderStep::from_key(&evt.key()) {
                                evt.prevent_default();
                                evt.stop_propagation();
                                on_step.call(step);
                            }
                        },
                        onpointerdown: move |evt: PointerEvent| {
                            if evt.pointer_type() != "touch" {
                                return;
                            }
                            evt.prevent_default();
                            evt.stop_propagation();
                            let point = evt.client_coordinates();
                            touch_start.set(Some((point.x, point.y)));
                        },
                        onpointermove: move |evt: PointerEvent| {
                            if evt.pointer_type() != "touch" {
                                return;
                            }
                            let Some(start) = touch_start() else {
                                return;
                            };
                            evt.prevent_default();
                            evt.stop_propagation();
                            let point = evt.client_coordinates();
                            let current = (point.x, point.y);
                            if let Some(step) = ReorderStep::from_swipe(start, current) {
                                on_step.call(step);
                                touch_start.set(Some(current));
                            }
                        },
                        onpointerup: move |_| touch_start.set(None),
                        onpointerleave: move |_| touch_start.set(None),
                        Icon { kind: IconKind::Grip, class: "w-4 h-4" }
                    }
                    h3 { class: "text-base font-semibold text-white truncate", "{account.display_name}" }
                    if selected {
                        span { class: "flex items-center justify-center w-5 h-5 rounded-full bg-emerald-500 text-black",
                            Icon { kind: IconKind::Check, class: "w-3 h-3" }
                        }
                    }
                }
                button {
                    r#type: "button",
                    title: "Remove account",
                    class: "p-1.5 rounded-lg text-zinc-500 hover:text-rose-300 hover:bg-rose-500/10 transition-colors",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        on_remove.call(account_id);
                    },
                    Icon { kind: IconKind::Close, class: "w-4 h-4" }
                }
            }

            if let Some(message) = current.error.as_ref() {
                div { class: "mb-3 rounded-lg border border-rose-500/35 bg-rose-500/10 px-3 py-2 text-xs text-rose-200",
                    "Error: {message}"
                }
            }

            if let Some(state) = current.playback.clone() {
                NowPlaying { state: state.clone() }
                PlaybackControls { account_id, state }
            } else if current.is_loading() {
                div { class: "flex items-center justify-center py-10 text-zinc-500",
                    Icon { kind: IconKind::Loader, class: "w-6 h-6" }
                }
            }
        }
    }
}
