//! The chat surface: history sidebar, message list, composer and the
//! dialogs around them.

use gloo_timers::callback::Timeout;
use serde_json::{Map, Value};
use tripia_shared::agent::{
    build_human_message, edited_messages, ensure_tool_calls_have_responses, optimistic_messages,
    submission_context,
};
use tripia_shared::models::{Checkpoint, ContentBlock, Message, MessageType, ThreadValues};
use yew::{Callback, Html, function_component, html, use_effect_with, use_node_ref, use_state};
use yew_router::prelude::{use_location, use_navigator};
use yewdux::prelude::{use_dispatch, use_store_value};

use crate::components::external::Artifact;
use crate::components::{
    ArtifactPanel, AssistantInterrupt, AssistantMessage, AssistantMessageLoading, HumanAction, HumanMessage,
    SettingsModal, ThreadFooter, ThreadHeader, ThreadHistory, Toaster, WelcomeScreen,
};
use crate::diagnostics;
use crate::hooks::{Submission, use_notification_sound, use_settings, use_stream};
use crate::models::app_state::ArtifactState;
use crate::routes::{MainRoute, ThreadQuery};

const SCROLL_DELAY_MS: u32 = 100;

/// Messages kept while an answer is regenerated: everything before it.
pub fn messages_before(messages: &[Message], message_id: Option<&str>) -> Vec<Message> {
    let end = message_id
        .and_then(|id| messages.iter().position(|message| message.has_id(id)))
        .unwrap_or(messages.len());
    messages[..end].to_vec()
}

/// Whether the "thinking" bubble is shown: a run is streaming and its first
/// assistant message has not arrived yet.
pub fn awaiting_first_answer(messages: &[&Message], is_loading: bool) -> bool {
    is_loading
        && messages
            .last()
            .is_none_or(|message| message.kind != MessageType::Ai)
}

fn pending_interrupt(values: &ThreadValues) -> Option<Value> {
    values
        .interrupts
        .first()
        .map(|interrupt| interrupt.value.clone())
        .filter(|value| !value.is_null())
}

/// Interrupt payload to render under the assistant message at `index`: only
/// the last visible message carries it.
pub fn interrupt_for(values: &ThreadValues, index: usize, visible: usize) -> Option<Value> {
    pending_interrupt(values).filter(|_| index + 1 == visible)
}

/// Interrupt payload shown on its own because no AI or tool message exists
/// yet to carry it.
pub fn standalone_interrupt(values: &ThreadValues) -> Option<Value> {
    pending_interrupt(values).filter(|_| !values.has_agent_output())
}

#[function_component(ThreadPage)]
pub fn thread_page() -> Html {
    let settings = use_settings();
    let navigator = use_navigator();
    let query = use_location()
        .and_then(|location| location.query::<ThreadQuery>().ok())
        .unwrap_or_default();
    let artifact = use_store_value::<ArtifactState>();
    let artifact_dispatch = use_dispatch::<ArtifactState>();
    let settings_open = use_state(|| false);
    let scroll_ref = use_node_ref();

    let push_query = {
        let navigator = navigator.clone();
        Callback::from(move |next: ThreadQuery| {
            let Some(navigator) = &navigator else {
                return;
            };
            if let Err(error) = navigator.push_with_query(&MainRoute::Home, &next) {
                diagnostics::warn(&format!("Failed to update the address: {error}"));
            }
        })
    };

    let on_thread_created = {
        let push_query = push_query.clone();
        let query = query.clone();
        Callback::from(move |thread_id: String| push_query.emit(query.with_thread(Some(thread_id))))
    };
    let stream = use_stream(on_thread_created);
    let state = stream.state.clone();

    {
        let stream = stream.clone();
        use_effect_with((), move |()| {
            stream.refresh_threads();
            || ()
        });
    }
    {
        let stream = stream.clone();
        let artifact_dispatch = artifact_dispatch.clone();
        use_effect_with(query.thread_id.clone(), move |thread_id| {
            artifact_dispatch.reduce_mut(ArtifactState::close);
            stream.load_thread(thread_id.clone());
            || ()
        });
    }

    let values = &state.values;
    let visible: Vec<&Message> = values
        .messages
        .iter()
        .filter(|message| !message.is_hidden())
        .collect();
    let ai_messages = visible
        .iter()
        .filter(|message| message.kind == MessageType::Ai)
        .count();
    use_notification_sound(
        state.generation,
        ai_messages,
        state.is_loading,
        settings.settings.enable_sounds,
    );

    {
        let scroll_ref = scroll_ref.clone();
        let auto_scroll = settings.settings.auto_scroll;
        use_effect_with(visible.len(), move |_| {
            if auto_scroll {
                Timeout::new(SCROLL_DELAY_MS, move || {
                    if let Some(element) = scroll_ref.cast::<web_sys::Element>() {
                        element.set_scroll_top(element.scroll_height());
                    }
                })
                .forget();
            }
            || ()
        });
    }

    let language = settings.settings.language;
    let is_loading = state.is_loading;

    let on_submit = {
        let stream = stream.clone();
        let extra = artifact.context.clone();
        Callback::from(move |(input, attachments): (String, Vec<ContentBlock>)| {
            let Some(human) = build_human_message(&input, &attachments) else {
                return;
            };
            let current = &stream.state.values.messages;
            let mut outgoing = ensure_tool_calls_have_responses(current);
            outgoing.push(human);
            stream.submit(Submission {
                optimistic: Some(optimistic_messages(current, &outgoing)),
                messages: outgoing,
                context: submission_context(language, &extra),
                ..Submission::default()
            });
        })
    };

    let on_regenerate = {
        let stream = stream.clone();
        Callback::from(move |(message_id, checkpoint): (Option<String>, Option<Checkpoint>)| {
            stream.submit(Submission {
                context: submission_context(language, &Map::new()),
                checkpoint,
                optimistic: Some(messages_before(
                    &stream.state.values.messages,
                    message_id.as_deref(),
                )),
                ..Submission::default()
            });
        })
    };

    let on_human_action = {
        let stream = stream.clone();
        Callback::from(
            move |(action, on_settled, checkpoint): (HumanAction, Callback<bool>, Option<Checkpoint>)| {
                let current = &stream.state.values.messages;
                let (original_id, sent) = match action {
                    HumanAction::Edit {
                        original,
                        replacement,
                    } => (original.id, replacement),
                    HumanAction::Retry { message } => (message.id.clone(), message),
                };
                let optimistic = match original_id.as_deref() {
                    Some(id) => edited_messages(current, id, sent.clone()),
                    None => optimistic_messages(current, std::slice::from_ref(&sent)),
                };
                stream.submit(Submission {
                    messages: vec![sent],
                    context: submission_context(language, &Map::new()),
                    checkpoint,
                    optimistic: Some(optimistic),
                    on_settled,
                    ..Submission::default()
                });
            },
        )
    };

    let on_resume = {
        let stream = stream.clone();
        Callback::from(move |resume: Value| {
            stream.submit(Submission {
                resume: Some(resume),
                ..Submission::default()
            });
        })
    };

    let on_select_branch = {
        let stream = stream.clone();
        Callback::from(move |branch: String| stream.set_branch(branch))
    };
    let on_suggestion = on_submit.reform(|example: String| (example, Vec::new()));
    let on_stop = {
        let stream = stream.clone();
        Callback::from(move |()| stream.stop())
    };
    let on_open_artifact =
        artifact_dispatch.reduce_mut_callback_with(|state, opened: Artifact| state.open_artifact(opened));

    let on_new_chat = {
        let push_query = push_query.clone();
        let query = query.clone();
        Callback::from(move |()| push_query.emit(query.with_thread(None)))
    };
    let on_select_thread = {
        let push_query = push_query.clone();
        let query = query.clone();
        Callback::from(move |thread_id: String| push_query.emit(query.with_thread(Some(thread_id))))
    };
    let history_open = query.history_open();
    let on_toggle_history = {
        let push_query = push_query.clone();
        let query = query.clone();
        Callback::from(move |()| push_query.emit(query.with_history_open(!history_open)))
    };
    let on_close_history = {
        let query = query.clone();
        Callback::from(move |()| push_query.emit(query.with_history_open(false)))
    };
    let on_open_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |()| settings_open.set(true))
    };
    let on_close_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |()| settings_open.set(false))
    };

    let show_history = settings.settings.show_thread_history && history_open;
    let chat_started = state.thread_id.is_some() || !visible.is_empty();
    let metadata = state.history.metadata(state.branch.as_deref());
    let hide_tool_calls = settings.settings.hide_tool_calls;

    let rendered = visible.iter().enumerate().map(|(index, message)| {
        let key = message
            .id
            .clone()
            .unwrap_or_else(|| format!("{:?}-{index}", message.kind));
        let message_metadata = message.id.as_ref().and_then(|id| metadata.get(id)).cloned();
        let parent = message_metadata
            .as_ref()
            .and_then(|metadata| metadata.parent_checkpoint.clone());
        if message.kind == MessageType::Human {
            html! {
                <HumanMessage
                    key={key}
                    message={(*message).clone()}
                    metadata={message_metadata}
                    is_loading={is_loading}
                    on_action={on_human_action.reform(move |(action, settled)| (action, settled, parent.clone()))}
                    on_select_branch={on_select_branch.clone()}
                />
            }
        } else {
            let message_id = message.id.clone();
            html! {
                <AssistantMessage
                    key={key}
                    message={(*message).clone()}
                    metadata={message_metadata}
                    ui={values.ui.clone()}
                    interrupt={interrupt_for(values, index, visible.len())}
                    is_loading={is_loading}
                    hide_tool_calls={hide_tool_calls}
                    on_regenerate={on_regenerate.reform(move |checkpoint| (message_id.clone(), checkpoint))}
                    on_select_branch={on_select_branch.clone()}
                    on_open_artifact={on_open_artifact.clone()}
                    on_resume={on_resume.clone()}
                />
            }
        }
    });

    html! {
        <div class="flex h-screen w-full overflow-hidden bg-base-100 text-base-content">
            if show_history {
                <ThreadHistory
                    current={state.thread_id.clone()}
                    on_select={on_select_thread}
                    on_close={on_close_history}
                />
            }
            <div class="flex min-w-0 flex-1 flex-col">
                <ThreadHeader
                    on_new_chat={on_new_chat}
                    on_open_settings={on_open_settings}
                    on_toggle_history={on_toggle_history}
                    history_open={history_open}
                    show_history_toggle={settings.settings.show_thread_history}
                />
                <main ref={scroll_ref} class="flex-1 overflow-y-auto px-4">
                    if chat_started {
                        <div class="mx-auto flex w-full max-w-4xl flex-col gap-4 py-6">
                            { for rendered }
                            { for standalone_interrupt(values).map(|value| html! {
                                <AssistantInterrupt
                                    value={value}
                                    on_resume={on_resume.clone()}
                                    disabled={is_loading}
                                />
                            }) }
                            if awaiting_first_answer(&visible, is_loading) {
                                <AssistantMessageLoading />
                            }
                        </div>
                    } else {
                        <WelcomeScreen
                            on_suggestion={on_suggestion}
                            disabled={is_loading}
                        />
                    }
                </main>
                <ThreadFooter
                    on_submit={on_submit}
                    on_stop={on_stop}
                    is_loading={is_loading}
                    has_thread={chat_started}
                />
            </div>
            <ArtifactPanel />
            <SettingsModal open={*settings_open} on_close={on_close_settings} />
            <Toaster />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(id: &str, kind: &str) -> Message {
        serde_json::from_value(json!({"id": id, "type": kind, "content": id})).unwrap()
    }

    #[test]
    fn regeneration_drops_the_answer_and_what_follows() {
        let messages = vec![message("h1", "human"), message("a1", "ai"), message("h2", "human")];
        let kept = messages_before(&messages, Some("a1"));
        assert_eq!(kept.len(), 1);
        assert!(kept[0].has_id("h1"));
        assert_eq!(messages_before(&messages, Some("missing")).len(), 3);
        assert_eq!(messages_before(&messages, None).len(), 3);
    }

    #[test]
    fn thinking_bubble_waits_for_the_first_ai_message() {
        let human = message("h1", "human");
        let ai = message("a1", "ai");
        assert!(awaiting_first_answer(&[&human], true));
        assert!(awaiting_first_answer(&[], true));
        assert!(!awaiting_first_answer(&[&human, &ai], true));
        assert!(!awaiting_first_answer(&[&human], false));
    }

    #[test]
    fn interrupts_attach_to_the_last_message() {
        let values = ThreadValues::from_value(&json!({
            "messages": [
                {"id": "h1", "type": "human", "content": "Reserve o voo"},
                {"id": "a1", "type": "ai", "content": "Confirma?"}
            ],
            "__interrupt__": [{"value": {"question": "confirm"}}]
        }));
        assert!(interrupt_for(&values, 0, 2).is_none());
        assert_eq!(interrupt_for(&values, 1, 2), Some(json!({"question": "confirm"})));
    }

    #[test]
    fn interrupts_before_agent_output_stand_alone() {
        let values = ThreadValues::from_value(&json!({
            "messages": [{"id": "h1", "type": "human", "content": "Olá"}],
            "__interrupt__": [{"value": "approve?"}]
        }));
        assert_eq!(standalone_interrupt(&values), Some(json!("approve?")));

        let answered = ThreadValues::from_value(&json!({
            "messages": [
                {"id": "h1", "type": "human", "content": "Olá"},
                {"id": "a1", "type": "ai", "content": "Confirma?"}
            ],
            "__interrupt__": [{"value": "approve?"}]
        }));
        assert!(standalone_interrupt(&answered).is_none());

        let idle = ThreadValues::from_value(&json!({"messages": []}));
        assert!(standalone_interrupt(&idle).is_none());
        let cleared = ThreadValues::from_value(&json!({"messages": [], "__interrupt__": [{"value": null}]}));
        assert!(standalone_interrupt(&cleared).is_none());
    }
}
