use tripia_shared::models::ComponentError;
use yew::{Callback, Children, Component, Context, ContextProvider, Html, Properties, html};

use crate::diagnostics;

/// Lets a component inside a [`ComponentBoundary`] report a failure that
/// happened after it rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryReporter {
    pub report: Callback<ComponentError>,
}

#[derive(Properties, PartialEq)]
pub struct ComponentBoundaryProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub descriptor_id: Option<String>,
    #[prop_or_default]
    pub message_id: Option<String>,
    /// Registered name of the wrapped component, used in the fallback.
    #[prop_or_default]
    pub component_name: Option<String>,
}

/// Title and description of the fallback shown for a failed component.
pub fn fallback_text(component_name: Option<&str>) -> (String, String) {
    let name = component_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.replace('_', " "));
    match name {
        Some(name) => {
            let mut title: Vec<char> = name.chars().collect();
            if let Some(first) = title.first_mut() {
                *first = first.to_ascii_uppercase();
            }
            (
                format!("{} Component Error", title.into_iter().collect::<String>()),
                format!(
                    "There was an error rendering the {name} component. This might be due to missing or invalid {name} data."
                ),
            )
        }
        None => (
            "Component Error".to_string(),
            "There was an error rendering this component. This might be due to missing or invalid data.".to_string(),
        ),
    }
}

#[derive(Debug)]
pub enum BoundaryMsg {
    Failed(ComponentError),
}

/// Isolates one fragment: a reported failure replaces only this subtree
/// with a static fallback.
#[derive(Debug)]
pub struct ComponentBoundary {
    failure: Option<ComponentError>,
    reporter: BoundaryReporter,
}

impl Component for ComponentBoundary {
    type Message = BoundaryMsg;
    type Properties = ComponentBoundaryProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            failure: None,
            reporter: BoundaryReporter {
                report: ctx.link().callback(BoundaryMsg::Failed),
            },
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            BoundaryMsg::Failed(error) => {
                let props = ctx.props();
                diagnostics::error(&format!(
                    "External component {} of message {} failed: {error}",
                    props.descriptor_id.as_deref().unwrap_or("<unknown>"),
                    props.message_id.as_deref().unwrap_or("<unknown>"),
                ));
                self.failure = Some(error);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.failure.is_some() {
            let (title, description) = fallback_text(ctx.props().component_name.as_deref());
            return html! {
                <div class="alert alert-error my-2" role="alert">
                    <div>
                        <h4 class="font-semibold">{ title }</h4>
                        <p class="text-sm">{ description }</p>
                    </div>
                </div>
            };
        }
        html! {
            <ContextProvider<BoundaryReporter> context={self.reporter.clone()}>
                { ctx.props().children.clone() }
            </ContextProvider<BoundaryReporter>>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_names_the_failed_component() {
        let (title, description) = fallback_text(Some("hotels"));
        assert_eq!(title, "Hotels Component Error");
        assert!(description.contains("the hotels component"));

        assert_eq!(fallback_text(Some("flight_card")).0, "Flight card Component Error");
        assert_eq!(fallback_text(Some("  ")).0, "Component Error");
        assert_eq!(fallback_text(None).0, "Component Error");
    }
}
