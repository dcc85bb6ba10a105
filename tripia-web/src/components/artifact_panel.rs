use i18nrs::yew::use_translation;
use yew::{Html, function_component, html};
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

use crate::models::app_state::ArtifactState;

/// Side panel showing details opened from an external component.
#[function_component(ArtifactPanel)]
pub fn artifact_panel() -> Html {
    let (i18n, ..) = use_translation();
    let (state, dispatch) = use_store::<ArtifactState>();
    if !state.open {
        return Html::default();
    }
    let close = dispatch.reduce_mut_callback(ArtifactState::close);

    html! {
        <aside class="flex h-full w-full max-w-md flex-col border-l border-base-300 bg-base-100">
            <div class="flex items-center justify-between border-b border-base-300 p-4">
                <h2 class="text-lg font-semibold">{ &state.title }</h2>
                <button
                    class="btn btn-ghost btn-sm btn-circle"
                    type="button"
                    aria-label={i18n.t("artifact.close")}
                    onclick={close}
                >
                    <Icon icon_id={IconId::HeroiconsOutlineXMark} class="h-5 w-5" />
                </button>
            </div>
            <div class="flex-1 overflow-y-auto p-4">
                <pre class="whitespace-pre-wrap text-sm">{ &state.body }</pre>
            </div>
        </aside>
    }
}
