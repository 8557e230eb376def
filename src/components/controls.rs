use crate::api::navigator::Navigator;
use crate::api::transport::Transport;
use crate::api::{AccountId, ApiClient, ApiError, PanelClient, PlaybackState};
use crate::components::{Icon, IconKind};
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;

/// A transport action issued from a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
    Next,
    Previous,
    Seek(u64),
    Volume(u8),
}

impl TransportCommand {
    pub fn toggle_for(is_playing: bool) -> Self {
        if is_playing {
            Self::Pause
        } else {
            Self::Play
        }
    }

    /// Seek target from a slider value, kept inside the track.
    pub fn seek_from_input(value: &str, duration_ms: u64) -> Option<Self> {
        let position = value.trim().parse::<f64>().ok()?;
        if !position.is_finite() {
            return None;
        }
        Some(Self::Seek((position.max(0.0).round() as u64).min(duration_ms)))
    }

    pub fn volume_from_input(value: &str) -> Option<Self> {
        let level = value.trim().parse::<f64>().ok()?;
        if !level.is_finite() {
            return None;
        }
        Some(Self::Volume(level.clamp(0.0, 100.0).round() as u8))
    }

    pub async fn execute<T: Transport, N: Navigator>(
        self,
        client: &ApiClient<T, N>,
        account_id: AccountId,
    ) -> Result<(), ApiError> {
        match self {
            Self::Play => client.play(account_id).await,
            Self::Pause => client.pause(account_id).await,
            Self::Next => client.next_track(account_id).await,
            Self::Previous => client.previous_track(account_id).await,
            Self::Seek(position_ms) => client.seek(account_id, position_ms).await,
            Self::Volume(level) => client.set_volume(account_id, level).await,
        }
    }
}

/// Fire-and-forget: the next poll shows whether the command took effect.
fn dispatch(client: PanelClient, account_id: AccountId, command: TransportCommand) {
    spawn(async move {
        if let Err(err) = command.execute(&client, account_id).await {
            warn!("{command:?} on account {account_id} failed: {err}");
        }
    });
}

#[component]
pub fn PlaybackControls(account_id: AccountId, state: PlaybackState) -> Element {
    let client = use_context::<PanelClient>();
    let is_playing = state.is_playing;
    let duration_ms = state.duration_ms;
    let volume = state.volume_percent;
    let volume_value = volume.unwrap_or(0);
    let progress_ms = state.progress_ms;
    let toggle_title = if is_playing { "Pause" } else { "Play" };
    let volume_label = volume
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string());

    let on_previous = {
        let client = client.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            dispatch(client.clone(), account_id, TransportCommand::Previous);
        }
    };
    let on_toggle = {
        let client = client.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            dispatch(
                client.clone(),
                account_id,
                TransportCommand::toggle_for(is_playing),
            );
        }
    };
    let on_next = {
        let client = client.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            dispatch(client.clone(), account_id, TransportCommand::Next);
        }
    };
    let on_seek = {
        let client = client.clone();
        move |evt: Event<FormData>| {
            if let Some(command) = TransportCommand::seek_from_input(&evt.value(), duration_ms) {
                dispatch(client.clone(), account_id, command);
            }
        }
    };
    let on_volume = {
        let client = client.clone();
        move |evt: Event<FormData>| {
            if let Some(command) = TransportCommand::volume_from_input(&evt.value()) {
                dispatch(client.clone(), account_id, command);
            }
        }
    };

    rsx! {
        div { class: "mt-4 space-y-3",
            div { class: "flex items-center justify-center gap-4",
                button {
                    r#type: "button",
                    title: "Previous",
                    class: "p-2 text-zinc-300 hover:text-white transition-colors",
                    onclick: on_previous,
                    Icon { kind: IconKind::Previous }
                }
                button {
                    r#type: "button",
                    title: toggle_title,
                    class: "w-10 h-10 rounded-full bg-white flex items-center justify-center hover:scale-105 transition-transform shadow-lg",
                    onclick: on_toggle,
                    if is_playing {
                        Icon { kind: IconKind::Pause, class: "w-5 h-5 text-black" }
                    } else {
                        Icon { kind: IconKind::Play, class: "w-5 h-5 text-black ml-0.5" }
                    }
                }
                button {
                    r#type: "button",
                    title: "Next",
                    class: "p-2 text-zinc-300 hover:text-white transition-colors",
                    onclick: on_next,
                    Icon { kind: IconKind::Next }
                }
            }
            input {
                r#type: "range",
                title: "Seek",
                min: "0",
                max: "{duration_ms}",
                value: "{progress_ms}",
                class: "w-full h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-emerald-500",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                oninput: on_seek,
            }
            div { class: "flex items-center gap-3 text-xs text-zinc-400",
                Icon { kind: IconKind::Volume, class: "w-4 h-4" }
                input {
                    r#type: "range",
                    title: "Volume",
                    min: "0",
                    max: "100",
                    value: "{volume_value}",
                    disabled: volume.is_none(),
                    class: "flex-1 h-1.5 bg-zinc-800 rounded-full appearance-none cursor-pointer accent-zinc-400 disabled:opacity-40 disabled:cursor-not-allowed",
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    oninput: on_volume,
                }
                span { class: "w-10 text-right tabular-nums", "{volume_label}%" }
            }
            if let Some(device) = state.device_name.as_ref() {
                div { class: "flex items-center gap-2 text-xs text-zinc-500",
                    Icon { kind: IconKind::Speaker, class: "w-3.5 h-3.5" }
                    "Playing on: {device}"
                }
            }
        }
    }
}
