//! Theme preference signal and its application to the document.

use dioxus::prelude::*;
use session::{ThemePreference, ThemeStore};

use crate::auth::use_app;

pub type ThemeSignal = Signal<ThemePreference>;

pub fn use_theme() -> ThemeSignal {
    use_context::<ThemeSignal>()
}

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[cfg(target_arch = "wasm32")]
fn dark_scheme_query() -> Option<web_sys::MediaQueryList> {
    web_sys::window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

/// Whether the OS asks for a dark color scheme. Always `false` off the web.
pub fn system_prefers_dark() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        dark_scheme_query().map(|mq| mq.matches()).unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// Adds or removes the `dark` class on the document root.
pub fn apply_theme(dark: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            if let Err(e) = root.class_list().toggle_with_force("dark", dark) {
                tracing::error!("Failed to apply theme: {:?}", e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = dark;
}

/// Re-applies the theme when the OS color scheme changes while `store`
/// follows the system. The listener lives as long as the page.
pub fn watch_system_theme(store: ThemeStore) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some(query) = dark_scheme_query() else {
            return;
        };
        let handler = Closure::wrap(Box::new(move || {
            if let Some(dark) = store.on_system_change(system_prefers_dark()) {
                apply_theme(dark);
            }
        }) as Box<dyn FnMut()>);

        if let Err(e) =
            query.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())
        {
            tracing::error!("Failed to watch system color scheme: {:?}", e);
            return;
        }
        handler.forget();
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (store, DARK_SCHEME_QUERY);
}

/// Switches between light and dark. [`AuthProvider`](crate::AuthProvider)
/// applies the result to the document.
#[component]
pub fn ThemeToggle(#[props(default = "".to_string())] class: String) -> Element {
    let app = use_app();
    let mut theme = use_theme();

    let _ = theme();
    let is_dark = app.theme.is_dark(system_prefers_dark());
    let onclick = move |_| {
        let next = app.theme.toggle(system_prefers_dark());
        theme.set(next);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            if is_dark { "Light mode" } else { "Dark mode" }
        }
    }
}
