use i18nrs::yew::use_translation;
use tripia_shared::models::thread_label;
use yew::{Callback, Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_store_value;

use crate::models::app_state::ThreadsState;

#[derive(Properties, PartialEq)]
pub struct ThreadHistoryProps {
    #[prop_or_default]
    pub current: Option<String>,
    pub on_select: Callback<String>,
    pub on_close: Callback<()>,
}

/// Sidebar listing earlier conversations.
#[function_component(ThreadHistory)]
pub fn thread_history(props: &ThreadHistoryProps) -> Html {
    let (i18n, ..) = use_translation();
    let state = use_store_value::<ThreadsState>();
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: yew::MouseEvent| on_close.emit(()))
    };

    let list = if state.loading && state.threads.is_empty() {
        html! {
            <div class="flex flex-col gap-2 p-2">
                { for (0..5).map(|index| html! { <div key={index} class="skeleton h-8 w-full"></div> }) }
            </div>
        }
    } else if state.threads.is_empty() {
        html! { <p class="p-4 text-sm text-base-content/60">{ i18n.t("thread.history_empty") }</p> }
    } else {
        html! {
            <ul class="menu w-full gap-1">
                { for state.threads.iter().map(|thread| {
                    let id = thread.thread_id.clone();
                    let active = props.current.as_deref() == Some(id.as_str());
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let id = id.clone();
                        Callback::from(move |_: yew::MouseEvent| on_select.emit(id.clone()))
                    };
                    html! {
                        <li key={id}>
                            <button
                                class={classes!("truncate", "text-left", active.then_some("active"))}
                                type="button"
                                {onclick}
                            >
                                <span class="truncate">{ thread_label(thread) }</span>
                            </button>
                        </li>
                    }
                }) }
            </ul>
        }
    };

    html! {
        <aside class="flex h-full w-72 shrink-0 flex-col border-r border-base-300 bg-base-200">
            <div class="flex items-center justify-between p-4">
                <h2 class="font-semibold">
                    <span class="hidden lg:inline">{ i18n.t("thread.history") }</span>
                    <span class="lg:hidden">{ i18n.t("thread.history_full") }</span>
                </h2>
                <button
                    class="btn btn-ghost btn-sm btn-circle"
                    type="button"
                    aria-label={i18n.t("thread.close_history")}
                    onclick={on_close}
                >
                    <Icon icon_id={IconId::HeroiconsOutlineXMark} class="h-4 w-4" />
                </button>
            </div>
            <div class="flex-1 overflow-y-auto">{ list }</div>
        </aside>
    }
}
