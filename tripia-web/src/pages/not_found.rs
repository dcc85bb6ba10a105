use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::MainRoute;

/// Shown for any unknown path.
#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    let (i18n, _) = use_translation();

    html! {
        <div class="flex h-screen flex-col items-center justify-center gap-4 p-4">
            <h1 class="text-2xl font-bold">{ i18n.t("app.not_found") }</h1>
            <Link<MainRoute> to={MainRoute::Home} classes="btn btn-primary">
                { i18n.t("app.back_home") }
            </Link<MainRoute>>
        </div>
    }
}
