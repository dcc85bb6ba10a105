use yew::suspense::Suspense;
use yew::{Html, function_component, html};
use yew_router::prelude::*;

use crate::components::Loading;
use crate::hooks::use_settings_hydration;
use crate::routes::{MainRoute, switch};

#[function_component(App)]
pub fn app() -> Html {
    use_settings_hydration();

    html! {
        <Suspense fallback={ html! { <Loading /> } }>
            <BrowserRouter>
                <Switch<MainRoute> render={switch} />
            </BrowserRouter>
        </Suspense>
    }
}
