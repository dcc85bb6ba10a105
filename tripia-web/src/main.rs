mod api;
mod app;
mod audio;
mod components;
mod config;
mod diagnostics;
mod hooks;
mod language;
mod models;
mod pages;
mod routes;
mod storage;

use app::App;
use i18nrs::yew::I18nProvider;
use i18nrs::yew::I18nProviderConfig;
use yew::Renderer;
use yew::{Html, function_component, html};
use yewdux::YewduxRoot;

#[function_component(InternationalApp)]
fn international_app() -> Html {
    let config = I18nProviderConfig {
        translations: language::translations(),
        default_language: language::registry().get_stored().code().to_string(),
        ..Default::default()
    };

    html! {
        <YewduxRoot>
            <I18nProvider ..config>
                <App />
            </I18nProvider>
        </YewduxRoot>
    }
}

fn main() {
    // Panic payloads are otherwise truncated to "unreachable" in the console
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("Unknown panic");
        diagnostics::error(&format!("Panic: {payload}"));
        if let Some(location) = info.location() {
            diagnostics::error(&format!(
                "  at {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ));
        }
    }));

    diagnostics::info("Starting Trip-IA Agent");

    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        diagnostics::error("No document body to mount the app on");
        return;
    };
    Renderer::<InternationalApp>::with_root(body.into()).render();
}
