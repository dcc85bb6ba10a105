use yew::{Callback, Html, Properties, function_component, html};
use yew_icons::{Icon, IconId};

#[derive(Properties, PartialEq)]
pub struct BranchSwitcherProps {
    pub branch: Option<String>,
    pub options: Vec<String>,
    pub on_select: Callback<String>,
    #[prop_or(false)]
    pub disabled: bool,
    #[prop_or_default]
    pub previous_label: String,
    #[prop_or_default]
    pub next_label: String,
}

/// `‹ 2 / 3 ›` control over the alternative branches of a message.
#[function_component(BranchSwitcher)]
pub fn branch_switcher(props: &BranchSwitcherProps) -> Html {
    let Some(index) = props
        .branch
        .as_ref()
        .and_then(|branch| props.options.iter().position(|option| option == branch))
    else {
        return Html::default();
    };
    if props.options.len() < 2 {
        return Html::default();
    }

    let select = |target: Option<&String>| {
        let on_select = props.on_select.clone();
        let target = target.cloned();
        Callback::from(move |_: yew::MouseEvent| {
            if let Some(target) = &target {
                on_select.emit(target.clone());
            }
        })
    };
    let previous = index.checked_sub(1).and_then(|i| props.options.get(i));
    let next = props.options.get(index + 1);

    html! {
        <div class="flex items-center gap-1 text-xs">
            <button
                class="btn btn-ghost btn-xs"
                type="button"
                aria-label={props.previous_label.clone()}
                disabled={props.disabled || previous.is_none()}
                onclick={select(previous)}
            >
                <Icon icon_id={IconId::HeroiconsMiniSolidChevronLeft} class="h-4 w-4" />
            </button>
            <span class="tabular-nums">{ format!("{} / {}", index + 1, props.options.len()) }</span>
            <button
                class="btn btn-ghost btn-xs"
                type="button"
                aria-label={props.next_label.clone()}
                disabled={props.disabled || next.is_none()}
                onclick={select(next)}
            >
                <Icon icon_id={IconId::HeroiconsMiniSolidChevronRight} class="h-4 w-4" />
            </button>
        </div>
    }
}
