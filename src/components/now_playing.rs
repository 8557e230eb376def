use crate::api::{format_time, PlaybackState};
use crate::components::{Icon, IconKind};
use dioxus::prelude::*;

/// Album art, track and artist, and a read-only progress bar.
#[component]
pub fn NowPlaying(state: PlaybackState) -> Element {
    if !state.has_track() {
        return rsx! {
            div { class: "flex items-center gap-3 py-4 text-sm text-zinc-500",
                div { class: "w-16 h-16 rounded-lg bg-zinc-800/50 flex items-center justify-center",
                    Icon { kind: IconKind::Music, class: "w-6 h-6 text-zinc-600" }
                }
                "No track playing"
            }
        };
    }

    let percent = state.progress_percent();
    let track = state.track_name.clone().unwrap_or_default();
    let artist = state.artist_name.clone().unwrap_or_default();
    let album_alt = state
        .album_name
        .clone()
        .unwrap_or_else(|| "Album art".to_string());

    rsx! {
        div { class: "flex items-center gap-4",
            {match state.album_image_url.as_ref() {
                Some(url) => rsx! {
                    img {
                        src: "{url}",
                        alt: "{album_alt}",
                        width: "80",
                        height: "80",
                        class: "w-20 h-20 rounded-lg object-cover shadow-lg flex-shrink-0",
                        loading: "lazy",
                    }
                },
                None => rsx! {
                    div { class: "w-20 h-20 rounded-lg flex-shrink-0 flex items-center justify-center bg-gradient-to-br from-emerald-600 to-teal-700",
                        Icon { kind: IconKind::Music, class: "w-7 h-7 text-white/70" }
                    }
                },
            }}
            div { class: "min-w-0 flex-1",
                p { class: "text-sm font-medium text-white truncate", "{track}" }
                p { class: "text-xs text-zinc-400 truncate", "{artist}" }
                div { class: "mt-3 h-1.5 w-full rounded-full bg-zinc-800 overflow-hidden",
                    div {
                        class: "h-full bg-emerald-500 transition-[width] duration-500",
                        style: "width: {percent}%",
                    }
                }
                div { class: "mt-1 flex justify-between text-xs text-zinc-500 tabular-nums",
                    span { {format_time(state.progress_ms)} }
                    span { {format_time(state.duration_ms)} }
                }
            }
        }
    }
}
