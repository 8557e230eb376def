use crate::components::{Icon, IconKind};
use crate::config::PanelConfig;
use dioxus::prelude::*;

/// Full-page hop into the backend's account-linking OAuth flow.
#[component]
pub fn AddAccount() -> Element {
    let config = use_context::<PanelConfig>();
    let href = config.backend_url(&config.link_account_path);

    rsx! {
        a {
            href: "{href}",
            title: "Link another account",
            class: "w-9 h-9 rounded-full bg-emerald-500 text-black flex items-center justify-center hover:bg-emerald-400 hover:scale-105 transition-all shadow-lg shadow-emerald-500/20",
            Icon { kind: IconKind::Plus, class: "w-5 h-5" }
        }
    }
}
