use dioxus::logger::tracing::info;

/// Full-page navigation away from the dashboard.
pub trait Navigator: Clone + 'static {
    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        info!("navigating to {path}");
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        info!("navigating to {path}");
        let script = format!("window.location.href = {};", serde_json::json!(path));
        let _ = dioxus::document::eval(&script);
    }
}
