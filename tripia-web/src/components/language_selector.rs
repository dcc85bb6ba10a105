use i18nrs::yew::use_translation;
use tripia_shared::models::Language;
use web_sys::HtmlSelectElement;
use yew::{Callback, Html, Properties, TargetCast, function_component, html};

use crate::language;

#[derive(Properties, PartialEq)]
pub struct LanguageSelectorProps {
    pub current: Language,
    pub on_change: Callback<Language>,
}

#[function_component(LanguageSelector)]
pub fn language_selector(props: &LanguageSelectorProps) -> Html {
    let (i18n, ..) = use_translation();
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |event: yew::events::Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            if let Some(language) = Language::from_code(&select.value()) {
                on_change.emit(language);
            }
        })
    };

    html! {
        <label class="form-control gap-2">
            <span class="label-text font-medium">{ i18n.t("settings.language") }</span>
            <select class="select select-bordered select-sm" onchange={on_change}>
                { for language::supported_languages().into_iter().map(|info| html! {
                    <option
                        key={info.code}
                        value={info.code}
                        selected={info.language == props.current}
                    >
                        { format!("{} {}", info.flag, info.native_name) }
                    </option>
                }) }
            </select>
        </label>
    }
}
