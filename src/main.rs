use dioxus::prelude::*;
use once_cell::sync::Lazy;

mod api;
mod components;
mod config;
mod poller;
mod reorder;
mod session;

use components::AppShell;
use config::PanelConfig;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

static CONFIG: Lazy<PanelConfig> = Lazy::new(PanelConfig::load);

fn main() {
    if let Err(err) = dioxus::logger::init(CONFIG.log_level) {
        eprintln!("Failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Spotify Control Panel" }
        document::Meta { name: "theme-color", content: "#09090b" }
        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        AppShell { config: CONFIG.clone() }
    }
}
