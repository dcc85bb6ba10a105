use serde_json::Value;
use tripia_shared::models::UiDescriptor;
use yew::{Callback, Html, Properties, function_component, html};

use super::boundary::ComponentBoundary;
use super::loader::{Artifact, LoaderHandle};
use super::safe_component::SafeComponent;

#[derive(Properties, PartialEq)]
pub struct CustomComponentsProps {
    pub message_id: String,
    pub ui: Vec<Value>,
    #[prop_or_default]
    pub loader: LoaderHandle,
    #[prop_or_default]
    pub on_open_artifact: Callback<Artifact>,
}

fn belongs_to(raw: &Value, message_id: &str) -> bool {
    raw.get("metadata")
        .and_then(|metadata| metadata.get("message_id"))
        .and_then(Value::as_str)
        == Some(message_id)
}

/// Fragments attached to one message, each in its own boundary.
#[function_component(CustomComponents)]
pub fn custom_components(props: &CustomComponentsProps) -> Html {
    let fragments: Vec<(usize, Option<UiDescriptor>)> = props
        .ui
        .iter()
        .filter(|raw| belongs_to(raw, &props.message_id))
        .map(UiDescriptor::from_value)
        .enumerate()
        .collect();
    if fragments.is_empty() {
        return Html::default();
    }

    html! {
        <div class="flex flex-col gap-2">
            { for fragments.into_iter().map(|(index, descriptor)| {
                let descriptor_id = descriptor.as_ref().and_then(|descriptor| descriptor.id.clone());
                let component_name = descriptor.as_ref().and_then(|descriptor| descriptor.name.clone());
                let key = format!("{index}-{}", descriptor_id.as_deref().unwrap_or_default());
                html! {
                    <ComponentBoundary
                        key={key}
                        descriptor_id={descriptor_id}
                        message_id={Some(props.message_id.clone())}
                        component_name={component_name}
                    >
                        <SafeComponent
                            descriptor={descriptor}
                            message_id={Some(props.message_id.clone())}
                            loader={props.loader.clone()}
                            on_open_artifact={props.on_open_artifact.clone()}
                        />
                    </ComponentBoundary>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fragments_are_matched_by_message_id() {
        let fragment = json!({"id": "ui-1", "metadata": {"message_id": "a1"}});
        assert!(belongs_to(&fragment, "a1"));
        assert!(!belongs_to(&fragment, "a2"));
        assert!(!belongs_to(&json!({"id": "ui-2"}), "a1"));
    }
}
