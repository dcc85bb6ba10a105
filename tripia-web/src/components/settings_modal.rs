//! Settings dialog. Edits a draft; only saving persists it.

use i18nrs::yew::use_translation;
use tripia_shared::models::{Language, Settings, SettingsPatch, Theme};
use yew::{
    Callback, Html, Properties, TargetCast, function_component, html, use_effect_with, use_state,
};
use yew_icons::{Icon, IconId};

use crate::components::language_selector::LanguageSelector;
use crate::components::theme_selector::ThemeSelector;
use crate::hooks::settings::{apply_theme, use_settings};

#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[derive(Properties, PartialEq)]
struct ToggleProps {
    label: String,
    description: String,
    checked: bool,
    on_toggle: Callback<bool>,
}

#[function_component(SettingToggle)]
fn setting_toggle(props: &ToggleProps) -> Html {
    let on_change = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |event: yew::events::Event| {
            let input: web_sys::HtmlInputElement = event.target_unchecked_into();
            on_toggle.emit(input.checked());
        })
    };
    html! {
        <label class="flex cursor-pointer items-center justify-between gap-4 rounded-lg border border-base-300 p-4">
            <div>
                <div class="font-medium">{ &props.label }</div>
                <div class="text-sm text-base-content/70">{ &props.description }</div>
            </div>
            <input type="checkbox" class="toggle toggle-primary" checked={props.checked} onchange={on_change} />
        </label>
    }
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    let (i18n, ..) = use_translation();
    let handle = use_settings();
    let draft = use_state(|| handle.settings.clone());

    {
        let draft = draft.clone();
        let settings = handle.settings.clone();
        use_effect_with(props.open, move |open| {
            if *open {
                draft.set(settings);
            }
            || ()
        });
    }

    if !props.open {
        return Html::default();
    }

    let edit = |change: fn(&mut Settings, bool)| {
        let draft = draft.clone();
        Callback::from(move |value: bool| {
            let mut next = (*draft).clone();
            change(&mut next, value);
            draft.set(next);
        })
    };
    let on_theme = {
        let draft = draft.clone();
        Callback::from(move |theme: Theme| {
            apply_theme(theme);
            draft.set(Settings {
                theme,
                ..(*draft).clone()
            });
        })
    };
    let on_language = {
        let draft = draft.clone();
        Callback::from(move |language: Language| {
            draft.set(Settings {
                language,
                ..(*draft).clone()
            });
        })
    };
    let cancel = {
        let on_close = props.on_close.clone();
        let stored_theme = handle.settings.theme;
        Callback::from(move |_: yew::MouseEvent| {
            apply_theme(stored_theme);
            on_close.emit(());
        })
    };
    let save = {
        let on_close = props.on_close.clone();
        let update = handle.update.clone();
        let draft = draft.clone();
        Callback::from(move |_: yew::MouseEvent| {
            update.emit(SettingsPatch::from_settings(&draft));
            on_close.emit(());
        })
    };
    let reset = {
        let on_close = props.on_close.clone();
        let reset = handle.reset.clone();
        Callback::from(move |_: yew::MouseEvent| {
            reset.emit(());
            on_close.emit(());
        })
    };

    html! {
        <div class="modal modal-open" role="dialog" aria-modal="true">
            <div class="modal-box max-w-2xl">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">{ i18n.t("settings.title") }</h2>
                    <button class="btn btn-ghost btn-sm btn-circle" type="button" onclick={cancel.clone()}>
                        <Icon icon_id={IconId::HeroiconsOutlineXMark} class="h-5 w-5" />
                    </button>
                </div>

                <section class="mt-6 space-y-4">
                    <h3 class="text-lg font-medium">{ i18n.t("settings.interface") }</h3>
                    <LanguageSelector current={draft.language} on_change={on_language} />
                    <ThemeSelector current={draft.theme} on_change={on_theme} />
                </section>

                <section class="mt-8 space-y-3">
                    <h3 class="text-lg font-medium">{ i18n.t("settings.chat") }</h3>
                    <SettingToggle
                        label={i18n.t("settings.hide_tool_calls")}
                        description={i18n.t("settings.hide_tool_calls_description")}
                        checked={draft.hide_tool_calls}
                        on_toggle={edit(|settings, value| settings.hide_tool_calls = value)}
                    />
                    <SettingToggle
                        label={i18n.t("settings.auto_scroll")}
                        description={i18n.t("settings.auto_scroll_description")}
                        checked={draft.auto_scroll}
                        on_toggle={edit(|settings, value| settings.auto_scroll = value)}
                    />
                    <SettingToggle
                        label={i18n.t("settings.enable_sounds")}
                        description={i18n.t("settings.enable_sounds_description")}
                        checked={draft.enable_sounds}
                        on_toggle={edit(|settings, value| settings.enable_sounds = value)}
                    />
                    <SettingToggle
                        label={i18n.t("settings.show_thread_history")}
                        description={i18n.t("settings.show_thread_history_description")}
                        checked={draft.show_thread_history}
                        on_toggle={edit(|settings, value| settings.show_thread_history = value)}
                    />
                </section>

                <div class="modal-action justify-between">
                    <button class="btn btn-ghost" type="button" onclick={reset}>{ i18n.t("settings.reset") }</button>
                    <div class="flex gap-2">
                        <button class="btn" type="button" onclick={cancel}>{ i18n.t("settings.cancel") }</button>
                        <button class="btn btn-primary" type="button" onclick={save}>{ i18n.t("settings.save") }</button>
                    </div>
                </div>
            </div>
        </div>
    }
}
