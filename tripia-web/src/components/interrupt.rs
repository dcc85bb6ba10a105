//! Views for a run paused on an interrupt.
//!
//! Agent-inbox interrupts get an action card with the permitted decisions;
//! anything else is shown as raw JSON with a free-text resume.

use i18nrs::yew::use_translation;
use serde_json::Value;
use tripia_shared::agent::{ActionRequest, InboxRequest, InboxResponse, inbox_requests};
use web_sys::HtmlTextAreaElement;
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html, use_state};

use crate::diagnostics;

/// Resume value for a single inbox decision.
pub fn resume_value(response: InboxResponse) -> Option<Value> {
    serde_json::to_value(vec![response])
        .map_err(|error| diagnostics::warn(&format!("unable to encode inbox response: {error}")))
        .ok()
}

/// Parses edited arguments, which must form a JSON object.
pub fn parse_edited_args(action: &str, draft: &str) -> Option<InboxResponse> {
    match serde_json::from_str::<Value>(draft) {
        Ok(args @ Value::Object(_)) => Some(InboxResponse::Edit(ActionRequest {
            action: action.to_string(),
            args,
        })),
        _ => None,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Respond,
    Edit,
}

#[derive(Properties, PartialEq)]
struct InboxCardProps {
    request: InboxRequest,
    on_resume: Callback<Value>,
    disabled: bool,
}

#[function_component(InboxCard)]
fn inbox_card(props: &InboxCardProps) -> Html {
    let (i18n, _) = use_translation();
    let mode = use_state(|| Mode::Idle);
    let draft = use_state(String::new);
    let invalid = use_state(|| false);

    let request = &props.request;
    let config = request.config;
    let action = request.action_request.action.clone();

    let decide = |response: InboxResponse| {
        let on_resume = props.on_resume.clone();
        Callback::from(move |_: yew::MouseEvent| {
            if let Some(value) = resume_value(response.clone()) {
                on_resume.emit(value);
            }
        })
    };
    let switch_to = |target: Mode, initial: String| {
        let mode = mode.clone();
        let draft = draft.clone();
        let invalid = invalid.clone();
        Callback::from(move |_: yew::MouseEvent| {
            draft.set(initial.clone());
            invalid.set(false);
            mode.set(target);
        })
    };
    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: yew::InputEvent| {
            draft.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_confirm = {
        let on_resume = props.on_resume.clone();
        let draft = draft.clone();
        let invalid = invalid.clone();
        let current = *mode;
        let action = action.clone();
        Callback::from(move |_: yew::MouseEvent| {
            let response = match current {
                Mode::Respond if !draft.trim().is_empty() => {
                    Some(InboxResponse::Response(draft.trim().to_string()))
                }
                Mode::Edit => parse_edited_args(&action, &draft),
                _ => None,
            };
            match response.and_then(resume_value) {
                Some(value) => on_resume.emit(value),
                None => invalid.set(true),
            }
        })
    };

    html! {
        <div class="card card-compact border border-warning/40 bg-base-100 shadow-sm">
            <div class="card-body gap-3">
                <div class="flex items-center gap-2">
                    <span class="badge badge-warning">{ i18n.t("interrupt.title") }</span>
                    <span class="font-semibold">{ &action }</span>
                </div>
                { for request.description.as_ref().map(|description| html! {
                    <p class="text-sm whitespace-pre-wrap">{ description }</p>
                }) }
                <pre class="rounded-md bg-base-200 p-2 text-xs overflow-x-auto">
                    { pretty(&request.action_request.args) }
                </pre>

                if *mode != Mode::Idle {
                    <textarea
                        class={classes!("textarea", "textarea-bordered", "w-full", "font-mono", "text-sm", invalid.then_some("textarea-error"))}
                        rows="4"
                        placeholder={i18n.t("interrupt.response_placeholder")}
                        value={(*draft).clone()}
                        oninput={on_input}
                        disabled={props.disabled}
                    />
                }

                <div class="card-actions justify-end">
                    if *mode == Mode::Idle {
                        if config.allow_accept {
                            <button class="btn btn-primary btn-sm" type="button" disabled={props.disabled}
                                onclick={decide(InboxResponse::Accept)}>
                                { i18n.t("interrupt.accept") }
                            </button>
                        }
                        if config.allow_edit {
                            <button class="btn btn-outline btn-sm" type="button" disabled={props.disabled}
                                onclick={switch_to(Mode::Edit, pretty(&request.action_request.args))}>
                                { i18n.t("interrupt.edit") }
                            </button>
                        }
                        if config.allow_respond {
                            <button class="btn btn-outline btn-sm" type="button" disabled={props.disabled}
                                onclick={switch_to(Mode::Respond, String::new())}>
                                { i18n.t("interrupt.respond") }
                            </button>
                        }
                        if config.allow_ignore {
                            <button class="btn btn-ghost btn-sm" type="button" disabled={props.disabled}
                                onclick={decide(InboxResponse::Ignore)}>
                                { i18n.t("interrupt.ignore") }
                            </button>
                        }
                    } else {
                        <button class="btn btn-ghost btn-sm" type="button"
                            onclick={switch_to(Mode::Idle, String::new())}>
                            { i18n.t("message.cancel") }
                        </button>
                        <button class="btn btn-primary btn-sm" type="button" disabled={props.disabled}
                            onclick={on_confirm}>
                            { i18n.t("message.submit") }
                        </button>
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GenericInterruptProps {
    value: Value,
    on_resume: Callback<Value>,
    disabled: bool,
}

#[function_component(GenericInterrupt)]
fn generic_interrupt(props: &GenericInterruptProps) -> Html {
    let (i18n, _) = use_translation();
    let draft = use_state(String::new);

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: yew::InputEvent| {
            draft.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_resume = {
        let on_resume = props.on_resume.clone();
        let draft = draft.clone();
        Callback::from(move |_: yew::MouseEvent| {
            let text = draft.trim();
            if !text.is_empty() {
                on_resume.emit(Value::String(text.to_string()));
            }
        })
    };

    html! {
        <div class="rounded-lg border border-base-300 bg-base-100 p-3 text-sm flex flex-col gap-2">
            <span class="badge badge-warning">{ i18n.t("interrupt.title") }</span>
            <pre class="rounded-md bg-base-200 p-2 text-xs overflow-x-auto">{ pretty(&props.value) }</pre>
            <textarea
                class="textarea textarea-bordered w-full text-sm"
                rows="2"
                placeholder={i18n.t("interrupt.response_placeholder")}
                value={(*draft).clone()}
                oninput={on_input}
                disabled={props.disabled}
            />
            <div class="flex justify-end">
                <button class="btn btn-primary btn-sm" type="button"
                    disabled={props.disabled || draft.trim().is_empty()}
                    onclick={on_resume}>
                    { i18n.t("interrupt.resume") }
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct InterruptViewProps {
    pub value: Value,
    pub on_resume: Callback<Value>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Interrupt payload of the thread, as an inbox card or raw JSON.
#[function_component(InterruptView)]
pub fn interrupt_view(props: &InterruptViewProps) -> Html {
    if props.value.is_null() {
        return Html::default();
    }
    let requests = inbox_requests(&props.value);
    if requests.is_empty() {
        return html! {
            <GenericInterrupt
                value={props.value.clone()}
                on_resume={props.on_resume.clone()}
                disabled={props.disabled}
            />
        };
    }
    html! {
        <div class="flex flex-col gap-2">
            { for requests.into_iter().enumerate().map(|(index, request)| html! {
                <InboxCard
                    key={index}
                    request={request}
                    on_resume={props.on_resume.clone()}
                    disabled={props.disabled}
                />
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decisions_resume_with_a_response_list() {
        assert_eq!(
            resume_value(InboxResponse::Accept).unwrap(),
            json!([{"type": "accept"}])
        );
        assert_eq!(
            resume_value(InboxResponse::Response("use the morning flight".into())).unwrap(),
            json!([{"type": "response", "args": "use the morning flight"}])
        );
    }

    #[test]
    fn edited_arguments_must_be_an_object() {
        let edited = parse_edited_args("book_flight", r#"{"flight_id": "LA8084"}"#).unwrap();
        assert_eq!(
            resume_value(edited).unwrap(),
            json!([{
                "type": "edit",
                "args": {"action": "book_flight", "args": {"flight_id": "LA8084"}}
            }])
        );
        assert!(parse_edited_args("book_flight", "[1, 2]").is_none());
        assert!(parse_edited_args("book_flight", "{broken").is_none());
    }
}
