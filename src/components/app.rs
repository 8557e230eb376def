use crate::api::PanelClient;
use crate::components::{Dashboard, Icon, IconKind, LoginPage};
use crate::config::PanelConfig;
use crate::session::{Screen, SessionState};
use dioxus::prelude::*;

/// Root of the UI: shares the config and API client, then branches on the
/// session. The session is checked once per page load and never re-checked;
/// re-authentication happens through a full navigation elsewhere.
#[component]
pub fn AppShell(config: PanelConfig) -> Element {
    let config = use_context_provider(|| config);
    let client = use_context_provider(|| PanelClient::from_config(&config));

    let session = use_resource(move || {
        let client = client.clone();
        async move { client.check_session().await }
    });

    let state = match session() {
        Some(user) => SessionState::from_check(user),
        None => SessionState::Unresolved,
    };

    match state.screen() {
        Screen::Loading => rsx! {
            div { class: "min-h-screen flex items-center justify-center bg-zinc-950 text-zinc-500",
                Icon { kind: IconKind::Loader, class: "w-8 h-8" }
                span { class: "sr-only", "Loading..." }
            }
        },
        Screen::Login => rsx! {
            LoginPage {}
        },
        Screen::Dashboard { email } => rsx! {
            Dashboard { user_email: email }
        },
    }
}
