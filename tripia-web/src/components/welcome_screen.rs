use i18nrs::yew::use_translation;
use yew::{Callback, Html, Properties, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct WelcomeScreenProps {
    pub on_suggestion: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
}

struct AgentCard {
    title: &'static str,
    subtitle: &'static str,
    bullets: [&'static str; 3],
    example: &'static str,
}

const AGENTS: [AgentCard; 2] = [
    AgentCard {
        title: "welcome.flights_title",
        subtitle: "welcome.flights_subtitle",
        bullets: [
            "welcome.flights_search",
            "welcome.flights_compare",
            "welcome.flights_book",
        ],
        example: "welcome.flights_example",
    },
    AgentCard {
        title: "welcome.hotels_title",
        subtitle: "welcome.hotels_subtitle",
        bullets: [
            "welcome.hotels_search",
            "welcome.hotels_compare",
            "welcome.hotels_book",
        ],
        example: "welcome.hotels_example",
    },
];

/// Landing view of an empty conversation; each agent card submits its
/// example prompt.
#[function_component(WelcomeScreen)]
pub fn welcome_screen(props: &WelcomeScreenProps) -> Html {
    let (i18n, ..) = use_translation();

    html! {
        <div class="mx-auto flex w-full max-w-4xl flex-col items-center gap-8 py-12">
            <div class="text-center">
                <h1 class="text-4xl font-bold">{ i18n.t("app.title") }</h1>
                <p class="mt-2 text-base-content/70">{ i18n.t("welcome.subtitle") }</p>
            </div>
            <div class="grid w-full gap-4 md:grid-cols-2">
                { for AGENTS.iter().map(|agent| {
                    let example = i18n.t(agent.example);
                    let onclick = {
                        let on_suggestion = props.on_suggestion.clone();
                        let example = example.clone();
                        Callback::from(move |_: yew::MouseEvent| on_suggestion.emit(example.clone()))
                    };
                    html! {
                        <button
                            key={agent.title}
                            class="card bg-base-200 text-left shadow-sm transition hover:shadow-md"
                            type="button"
                            disabled={props.disabled}
                            {onclick}
                        >
                            <div class="card-body gap-2">
                                <div class="flex items-center gap-2">
                                    <Icon icon_id={IconId::HeroiconsOutlineChatBubbleLeftRight} class="h-5 w-5 text-primary" />
                                    <h2 class="card-title">{ i18n.t(agent.title) }</h2>
                                </div>
                                <p class="text-sm text-base-content/70">{ i18n.t(agent.subtitle) }</p>
                                <ul class="text-sm">
                                    { for agent.bullets.iter().map(|bullet| html! {
                                        <li class="flex items-center gap-2">
                                            <Icon icon_id={IconId::HeroiconsOutlineCheck} class="h-4 w-4 text-success" />
                                            { i18n.t(bullet) }
                                        </li>
                                    }) }
                                </ul>
                                <div class="mt-2 rounded-lg bg-base-100 p-3 text-xs italic">
                                    <span class="font-semibold not-italic">{ format!("{}: ", i18n.t("welcome.try")) }</span>
                                    { example }
                                </div>
                            </div>
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}
