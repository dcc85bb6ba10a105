use i18nrs::yew::use_translation;
use strum::IntoEnumIterator;
use tripia_shared::models::Theme;
use yew::{Callback, Html, Properties, classes, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct ThemeSelectorProps {
    pub current: Theme,
    pub on_change: Callback<Theme>,
}

fn icon(theme: Theme) -> IconId {
    match theme {
        Theme::Light => IconId::HeroiconsSolidSun,
        Theme::Dark => IconId::HeroiconsSolidMoon,
        Theme::System => IconId::HeroiconsOutlineComputerDesktop,
    }
}

#[function_component(ThemeSelector)]
pub fn theme_selector(props: &ThemeSelectorProps) -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="form-control gap-2">
            <span class="label-text font-medium">{ i18n.t("settings.theme") }</span>
            <div class="join">
                { for Theme::iter().map(|theme| {
                    let onclick = {
                        let on_change = props.on_change.clone();
                        Callback::from(move |_: yew::MouseEvent| on_change.emit(theme))
                    };
                    html! {
                        <button
                            key={theme.as_ref()}
                            class={classes!("btn", "btn-sm", "join-item", (theme == props.current).then_some("btn-active"))}
                            type="button"
                            aria-pressed={(theme == props.current).to_string()}
                            {onclick}
                        >
                            <Icon icon_id={icon(theme)} class="h-4 w-4" />
                            { i18n.t(&format!("settings.theme_{theme}")) }
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}
