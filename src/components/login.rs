use crate::components::{Icon, IconKind};
use crate::config::PanelConfig;
use dioxus::prelude::*;

#[component]
pub fn LoginPage() -> Element {
    let config = use_context::<PanelConfig>();
    let href = config.backend_url(&config.login_path);

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-zinc-950 px-4",
            div { class: "w-full max-w-sm rounded-2xl border border-zinc-800 bg-zinc-900/70 p-8 text-center shadow-2xl",
                div { class: "mx-auto mb-5 w-12 h-12 rounded-xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center",
                    Icon { kind: IconKind::Music, class: "w-6 h-6 text-white" }
                }
                h1 { class: "text-xl font-bold text-white", "Spotify Control Panel" }
                p { class: "mt-2 mb-6 text-sm text-zinc-400",
                    "Sign in with your Google account to continue."
                }
                a {
                    href: "{href}",
                    class: "block w-full rounded-lg bg-white px-4 py-2.5 text-sm font-medium text-black hover:bg-zinc-200 transition-colors",
                    "Sign in with Google"
                }
            }
        }
    }
}
