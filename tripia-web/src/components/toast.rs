use gloo_timers::callback::Timeout;
use i18nrs::yew::use_translation;
use yew::{Callback, Html, Properties, function_component, html, use_effect_with};
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store;

use crate::models::app_state::{Toast, ToastState};

const TOAST_LIFETIME_MS: u32 = 5_000;

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
    dismiss_label: String,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(props.toast.id, move |id| {
            let id = *id;
            let timeout = Timeout::new(TOAST_LIFETIME_MS, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }
    let dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        Callback::from(move |_: yew::MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class="alert alert-error shadow-lg" role="alert">
            <span>{ &props.toast.message }</span>
            <button
                class="btn btn-ghost btn-xs btn-circle"
                type="button"
                aria-label={props.dismiss_label.clone()}
                onclick={dismiss}
            >
                <Icon icon_id={IconId::HeroiconsOutlineXMark} class="h-4 w-4" />
            </button>
        </div>
    }
}

/// Transient error notices, newest last.
#[function_component(Toaster)]
pub fn toaster() -> Html {
    let (i18n, ..) = use_translation();
    let (state, dispatch) = use_store::<ToastState>();
    let on_dismiss = dispatch.reduce_mut_callback_with(|state, id: u64| state.dismiss(id));
    let dismiss_label = i18n.t("errors.dismiss");

    html! {
        <div class="toast toast-end toast-bottom z-50">
            { for state.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id}
                    toast={toast.clone()}
                    on_dismiss={on_dismiss.clone()}
                    dismiss_label={dismiss_label.clone()}
                />
            }) }
        </div>
    }
}
