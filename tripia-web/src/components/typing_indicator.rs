use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct TypingIndicatorProps {
    #[prop_or(false)]
    pub active: bool,
    #[prop_or_default]
    pub label: Option<String>,
}

#[function_component(TypingIndicator)]
pub fn typing_indicator(props: &TypingIndicatorProps) -> Html {
    if !props.active {
        return Html::default();
    }

    html! {
        <div class="flex items-center gap-2 text-sm text-base-content/70 py-2" role="status">
            <span class="flex gap-1">
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
                <span class="typing-dot"></span>
            </span>
            { for props.label.clone() }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::LocalServerRenderer;

    #[tokio::test]
    async fn renders_label_only_while_active() {
        let active = LocalServerRenderer::<TypingIndicator>::with_props(TypingIndicatorProps {
            active: true,
            label: Some("IA está pensando...".into()),
        })
        .render()
        .await;
        assert!(active.contains("IA está pensando..."));

        let idle = LocalServerRenderer::<TypingIndicator>::with_props(TypingIndicatorProps {
            active: false,
            label: Some("IA está pensando...".into()),
        })
        .render()
        .await;
        assert!(!idle.contains("pensando"));
    }
}
