use i18nrs::yew::use_translation;
use yew::{Callback, Html, Properties, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct ThreadHeaderProps {
    pub on_new_chat: Callback<()>,
    pub on_open_settings: Callback<()>,
    pub on_toggle_history: Callback<()>,
    #[prop_or(false)]
    pub history_open: bool,
    #[prop_or(true)]
    pub show_history_toggle: bool,
}

#[function_component(ThreadHeader)]
pub fn thread_header(props: &ThreadHeaderProps) -> Html {
    let (i18n, ..) = use_translation();
    let emit = |callback: &Callback<()>| {
        let callback = callback.clone();
        Callback::from(move |_: yew::MouseEvent| callback.emit(()))
    };
    let history_label = if props.history_open {
        i18n.t("thread.close_history")
    } else {
        i18n.t("thread.open_history")
    };

    html! {
        <header class="navbar sticky top-0 z-20 border-b border-base-300 bg-base-100/90 backdrop-blur">
            <div class="navbar-start gap-2">
                if props.show_history_toggle {
                    <button
                        class="btn btn-ghost btn-sm btn-square"
                        type="button"
                        aria-label={history_label}
                        onclick={emit(&props.on_toggle_history)}
                    >
                        <Icon icon_id={IconId::HeroiconsOutlineBars3} class="h-5 w-5" />
                    </button>
                }
                <button class="btn btn-ghost text-lg font-bold" type="button" onclick={emit(&props.on_new_chat)}>
                    { i18n.t("app.title") }
                </button>
            </div>
            <div class="navbar-end gap-2">
                <button class="btn btn-ghost btn-sm" type="button" onclick={emit(&props.on_new_chat)}>
                    <Icon icon_id={IconId::HeroiconsOutlinePlus} class="h-4 w-4" />
                    <span class="hidden sm:inline">{ i18n.t("thread.new_chat") }</span>
                </button>
                <button class="btn btn-ghost btn-sm" type="button" onclick={emit(&props.on_open_settings)}>
                    <Icon icon_id={IconId::HeroiconsOutlineCog6Tooth} class="h-4 w-4" />
                    <span class="hidden sm:inline">{ i18n.t("thread.settings") }</span>
                </button>
            </div>
        </header>
    }
}
