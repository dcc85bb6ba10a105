//! Guarded rendering of one agent-supplied component.
//!
//! Descriptors are validated before anything is loaded, render failures are
//! shown in place, and browser errors thrown by the component's scripts are
//! intercepted while it is mounted.

use tripia_shared::models::{DescriptorCheck, UiDescriptor, classify_failure, is_known_failure};
use web_sys::ErrorEvent;
use yew::{
    Callback, Html, Properties, function_component, html, use_context, use_effect_with, use_state,
};
use yew_hooks::use_event_with_window;

use super::boundary::BoundaryReporter;
use super::loader::{Artifact, ComponentContext, LoaderHandle};
use crate::diagnostics;

#[derive(Properties, PartialEq)]
pub struct SafeComponentProps {
    pub descriptor: Option<UiDescriptor>,
    #[prop_or_default]
    pub message_id: Option<String>,
    #[prop_or_default]
    pub loader: LoaderHandle,
    #[prop_or_default]
    pub on_open_artifact: Callback<Artifact>,
}

fn notice(title: &str, description: &str) -> Html {
    html! {
        <div class="alert alert-warning my-2" role="status">
            <div>
                <h4 class="font-semibold">{ title }</h4>
                <p class="text-sm">{ description }</p>
            </div>
        </div>
    }
}

fn failure_notice(error: &str) -> Html {
    let kind = classify_failure(error);
    html! {
        <div class="alert alert-error my-2" role="alert">
            <div class="w-full">
                <h4 class="font-semibold">{ kind.title() }</h4>
                <p class="text-sm">{ kind.description() }</p>
                <details class="mt-2 text-xs">
                    <summary class="cursor-pointer">{"Error details"}</summary>
                    <pre class="whitespace-pre-wrap break-words mt-1">{ error }</pre>
                </details>
            </div>
        </div>
    }
}

#[function_component(SafeComponent)]
pub fn safe_component(props: &SafeComponentProps) -> Html {
    let window_error = use_state(|| None::<String>);
    let reporter = use_context::<BoundaryReporter>();

    {
        let window_error = window_error.clone();
        use_event_with_window("error", move |event: ErrorEvent| {
            let message = event.message();
            if is_known_failure(&message) {
                event.prevent_default();
                diagnostics::warn(&format!("Suppressed external component error: {message}"));
                window_error.set(Some(message));
            }
        });
    }

    let check = UiDescriptor::check(props.descriptor.as_ref());
    let context = props.descriptor.clone().map(|descriptor| ComponentContext {
        descriptor,
        message_id: props.message_id.clone(),
        open_artifact: props.on_open_artifact.clone(),
    });
    let rendered = match (&context, &*window_error) {
        (Some(context), None) if check == DescriptorCheck::Ready => {
            Some(props.loader.0.render(context))
        }
        _ => None,
    };
    let mounted = matches!(rendered, Some(Ok(_)));

    {
        let loader = props.loader.clone();
        use_effect_with((mounted, context), move |(mounted, context)| {
            if *mounted
                && let Some(context) = context
                && let Err(error) = loader.0.mounted(context)
            {
                match reporter {
                    Some(reporter) => reporter.report.emit(error),
                    None => diagnostics::error(&format!("External component failed: {error}")),
                }
            }
            || ()
        });
    }

    match check {
        DescriptorCheck::Missing => {
            diagnostics::warn("External component rendered without data");
            notice("Missing Component Data", "Component data is missing or invalid.")
        }
        DescriptorCheck::MissingId => {
            diagnostics::warn("External component descriptor has no id");
            notice(
                "Invalid Component Data",
                "Component is missing required 'id' property.",
            )
        }
        DescriptorCheck::Ready => match (&*window_error, rendered) {
            (Some(message), _) => failure_notice(message),
            (None, Some(Ok(html))) => html,
            (None, Some(Err(error))) => {
                diagnostics::error(&format!("External component failed to render: {error}"));
                failure_notice(&error.to_string())
            }
            (None, None) => Html::default(),
        },
    }
}
