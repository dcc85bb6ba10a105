use serde_json::Value;
use tripia_shared::models::{Message, ToolCall, content_string};
use yew::{Html, Properties, function_component, html, use_state};

const COLLAPSED_LINES: usize = 4;

fn pretty(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn argument_rows(args: &Value) -> Html {
    match args.as_object() {
        Some(map) if !map.is_empty() => html! {
            <table class="table table-xs">
                <tbody>
                    { for map.iter().map(|(key, value)| html! {
                        <tr key={key.clone()}>
                            <td class="font-medium align-top">{ key }</td>
                            <td><code class="whitespace-pre-wrap break-all">{ pretty(value) }</code></td>
                        </tr>
                    }) }
                </tbody>
            </table>
        },
        _ => html! { <code class="text-xs">{"{}"}</code> },
    }
}

#[derive(Properties, PartialEq)]
pub struct ToolCallsProps {
    pub calls: Vec<ToolCall>,
}

/// Tool invocations requested by the assistant.
#[function_component(ToolCalls)]
pub fn tool_calls(props: &ToolCallsProps) -> Html {
    if props.calls.is_empty() {
        return Html::default();
    }
    html! {
        <div class="flex flex-col gap-2 my-2">
            { for props.calls.iter().enumerate().map(|(index, call)| html! {
                <div key={call.id.clone().unwrap_or_else(|| index.to_string())}
                     class="rounded-lg border border-base-300 bg-base-200 p-3 text-sm">
                    <div class="flex items-center gap-2 mb-1">
                        <span class="badge badge-outline">{ &call.name }</span>
                        { for call.id.as_ref().map(|id| html! { <code class="text-xs opacity-60">{ id }</code> }) }
                    </div>
                    { argument_rows(&call.args) }
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToolResultProps {
    pub message: Message,
}

/// Output of a tool, collapsed when long.
#[function_component(ToolResult)]
pub fn tool_result(props: &ToolResultProps) -> Html {
    let expanded = use_state(|| false);
    let message = &props.message;
    let body = match &message.content {
        Value::String(text) => serde_json::from_str::<Value>(text)
            .ok()
            .filter(|value| value.is_object() || value.is_array())
            .map_or_else(|| text.clone(), |value| pretty(&value)),
        other => content_string(other),
    };
    let long = body.lines().count() > COLLAPSED_LINES;
    let shown = if long && !*expanded {
        body.lines().take(COLLAPSED_LINES).collect::<Vec<_>>().join("\n")
    } else {
        body
    };
    let toggle = {
        let expanded = expanded.clone();
        move |_| expanded.set(!*expanded)
    };

    html! {
        <div class="rounded-lg border border-base-300 bg-base-200 p-3 text-sm my-2">
            <div class="flex items-center gap-2 mb-1">
                { for message.name.as_ref().map(|name| html! { <span class="badge badge-outline">{ name }</span> }) }
                { for message.tool_call_id.as_ref().map(|id| html! { <code class="text-xs opacity-60">{ id }</code> }) }
            </div>
            <pre class="whitespace-pre-wrap break-words text-xs">{ shown }</pre>
            if long {
                <button class="btn btn-xs btn-ghost mt-1" type="button" onclick={toggle}>
                    { if *expanded { "−" } else { "…" } }
                </button>
            }
        </div>
    }
}
