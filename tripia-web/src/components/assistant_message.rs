use chrono::Local;
use i18nrs::yew::use_translation;
use serde_json::Value;
use tripia_shared::MessageMetadata;
use tripia_shared::agent::display_tool_calls;
use tripia_shared::models::{Checkpoint, Message, MessageType};
use yew::{Callback, Html, Properties, function_component, html, use_state};
use yew_icons::{Icon, IconId};

use super::branch_switcher::BranchSwitcher;
use super::external::{Artifact, CustomComponents};
use super::interrupt::InterruptView;
use super::tool_calls::{ToolCalls, ToolResult};
use super::typing_indicator::TypingIndicator;

/// Text of an assistant message: the string content, or its text blocks
/// joined. Tool-use and other blocks are rendered separately.
pub fn assistant_text(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

fn avatar() -> Html {
    html! {
        <div class="avatar placeholder mt-1">
            <div class="w-8 rounded-full bg-success text-success-content">
                <Icon icon_id={IconId::HeroiconsOutlineChatBubbleLeftRight} class="h-4 w-4" />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AssistantMessageProps {
    pub message: Message,
    #[prop_or_default]
    pub metadata: Option<MessageMetadata>,
    /// Every UI fragment of the thread; only this message's are rendered.
    #[prop_or_default]
    pub ui: Vec<Value>,
    /// Pending interrupt, passed only where it should be shown.
    #[prop_or_default]
    pub interrupt: Option<Value>,
    #[prop_or(false)]
    pub is_loading: bool,
    #[prop_or(false)]
    pub hide_tool_calls: bool,
    pub on_regenerate: Callback<Option<Checkpoint>>,
    pub on_select_branch: Callback<String>,
    #[prop_or_default]
    pub on_open_artifact: Callback<Artifact>,
    #[prop_or_default]
    pub on_resume: Callback<Value>,
}

/// An AI or tool message with its tool calls, custom components and
/// controls.
#[function_component(AssistantMessage)]
pub fn assistant_message(props: &AssistantMessageProps) -> Html {
    let (i18n, _) = use_translation();
    let seen_at = use_state(Local::now);
    let message = &props.message;

    let interrupt = props.interrupt.clone().map(|value| {
        html! {
            <InterruptView
                value={value}
                on_resume={props.on_resume.clone()}
                disabled={props.is_loading}
            />
        }
    });

    if message.kind == MessageType::Tool {
        if props.hide_tool_calls {
            return Html::default();
        }
        return html! {
            <div class="mr-auto flex max-w-4xl items-start gap-3">
                { avatar() }
                <div class="flex flex-1 flex-col gap-2">
                    <ToolResult message={message.clone()} />
                    { for interrupt }
                </div>
            </div>
        };
    }

    let text = assistant_text(&message.content);
    let tool_calls = if props.hide_tool_calls {
        Vec::new()
    } else {
        display_tool_calls(message)
    };
    let parent_checkpoint = props
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.parent_checkpoint.clone());
    let on_regenerate = {
        let on_regenerate = props.on_regenerate.clone();
        Callback::from(move |_: yew::MouseEvent| on_regenerate.emit(parent_checkpoint.clone()))
    };
    let (branch, options) = props
        .metadata
        .as_ref()
        .map(|metadata| (metadata.branch.clone(), metadata.branch_options.clone()))
        .unwrap_or_default();

    html! {
        <div class="group mr-auto flex max-w-4xl items-start gap-3">
            { avatar() }
            <div class="flex flex-1 flex-col gap-2">
                if !text.is_empty() {
                    <div class="max-w-4xl rounded-2xl bg-base-200 px-4 py-3 shadow-sm whitespace-pre-wrap">
                        { &text }
                    </div>
                }
                <ToolCalls calls={tool_calls} />
                { for message.id.clone().map(|message_id| html! {
                    <CustomComponents
                        message_id={message_id}
                        ui={props.ui.clone()}
                        on_open_artifact={props.on_open_artifact.clone()}
                    />
                }) }
                { for interrupt }
                <div class="text-xs text-base-content/60">{ seen_at.format("%H:%M").to_string() }</div>
                <div class="mr-auto flex items-center gap-2 opacity-0 transition-opacity group-hover:opacity-100 group-focus-within:opacity-100">
                    <BranchSwitcher
                        branch={branch}
                        options={options}
                        on_select={props.on_select_branch.clone()}
                        disabled={props.is_loading}
                        previous_label={i18n.t("message.branch_previous")}
                        next_label={i18n.t("message.branch_next")}
                    />
                    <button
                        class="btn btn-ghost btn-xs"
                        type="button"
                        aria-label={i18n.t("message.retry")}
                        title={i18n.t("message.retry")}
                        disabled={props.is_loading}
                        onclick={on_regenerate}
                    >
                        <Icon icon_id={IconId::HeroiconsOutlineArrowPath} class="h-4 w-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AssistantInterruptProps {
    pub value: Value,
    pub on_resume: Callback<Value>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// A pending interrupt raised before the agent produced any message.
#[function_component(AssistantInterrupt)]
pub fn assistant_interrupt(props: &AssistantInterruptProps) -> Html {
    html! {
        <div class="mr-auto flex max-w-4xl items-start gap-3">
            { avatar() }
            <div class="flex flex-1 flex-col gap-2">
                <InterruptView
                    value={props.value.clone()}
                    on_resume={props.on_resume.clone()}
                    disabled={props.disabled}
                />
            </div>
        </div>
    }
}

/// Placeholder shown while the first answer of a run is pending.
#[function_component(AssistantMessageLoading)]
pub fn assistant_message_loading() -> Html {
    let (i18n, _) = use_translation();
    html! {
        <div class="mr-auto flex max-w-4xl items-start gap-3">
            { avatar() }
            <div class="rounded-2xl bg-base-200 px-4">
                <TypingIndicator active={true} label={Some(i18n.t("thread.thinking"))} />
            </div>
        </div>
    }
}
