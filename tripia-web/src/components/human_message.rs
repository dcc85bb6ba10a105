use chrono::{DateTime, Local};
use i18nrs::yew::use_translation;
use tripia_shared::MessageMetadata;
use tripia_shared::agent::build_human_message;
use tripia_shared::models::{Message, attachment_blocks};
use web_sys::HtmlTextAreaElement;
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html, use_state};
use yew_icons::{Icon, IconId};

use super::branch_switcher::BranchSwitcher;
use super::thread_footer::preview;

/// A user request to resubmit one of their messages.
#[derive(Debug, Clone, PartialEq)]
pub enum HumanAction {
    /// Replace `original` with `replacement` and fork from its parent.
    Edit {
        original: Message,
        replacement: Message,
    },
    /// Send `message` again from its parent.
    Retry { message: Message },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Sent,
    Sending,
    Failed,
}

#[derive(Properties, PartialEq)]
pub struct HumanMessageProps {
    pub message: Message,
    #[prop_or_default]
    pub metadata: Option<MessageMetadata>,
    #[prop_or(false)]
    pub is_loading: bool,
    /// Receives the action and a callback told whether the run succeeded.
    pub on_action: Callback<(HumanAction, Callback<bool>)>,
    pub on_select_branch: Callback<String>,
}

#[function_component(HumanMessage)]
pub fn human_message(props: &HumanMessageProps) -> Html {
    let (i18n, _) = use_translation();
    let editing = use_state(|| false);
    let draft = use_state(String::new);
    let status = use_state(|| Status::Sent);
    let seen_at = use_state(Local::now);

    let message = &props.message;
    let text = message.text();
    let attachments = attachment_blocks(&message.content);

    let settled = {
        let status = status.clone();
        Callback::from(move |succeeded: bool| {
            status.set(if succeeded { Status::Sent } else { Status::Failed });
        })
    };

    let submit_edit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let status = status.clone();
        let settled = settled.clone();
        let on_action = props.on_action.clone();
        let original = message.clone();
        let attachments = attachments.clone();
        Callback::from(move |()| {
            let Some(replacement) = build_human_message(&draft, &attachments) else {
                return;
            };
            editing.set(false);
            status.set(Status::Sending);
            on_action.emit((
                HumanAction::Edit {
                    original: original.clone(),
                    replacement,
                },
                settled.clone(),
            ));
        })
    };

    let on_retry = {
        let status = status.clone();
        let on_action = props.on_action.clone();
        let message = message.clone();
        Callback::from(move |_: yew::MouseEvent| {
            status.set(Status::Sending);
            on_action.emit((
                HumanAction::Retry {
                    message: message.clone(),
                },
                settled.clone(),
            ));
        })
    };

    let start_edit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let text = text.clone();
        Callback::from(move |_: yew::MouseEvent| {
            draft.set(text.clone());
            editing.set(true);
        })
    };
    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: yew::MouseEvent| editing.set(false))
    };
    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: yew::InputEvent| {
            draft.set(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };
    let on_keydown = {
        let submit_edit = submit_edit.clone();
        Callback::from(move |event: yew::events::KeyboardEvent| {
            if event.key() == "Enter" && (event.ctrl_key() || event.meta_key()) {
                event.prevent_default();
                submit_edit.emit(());
            }
        })
    };

    let branch_select = props.on_select_branch.clone();
    let (branch, options) = props
        .metadata
        .as_ref()
        .map(|metadata| (metadata.branch.clone(), metadata.branch_options.clone()))
        .unwrap_or_default();

    html! {
        <div class={classes!("group", "ml-auto", "flex", "max-w-4xl", "items-start", "gap-3", editing.then_some("w-full"))}>
            <div class={classes!("flex", "flex-1", "flex-col", "gap-2", editing.then_some("w-full"))}>
                if *editing {
                    <textarea
                        class="textarea textarea-bordered w-full"
                        rows="3"
                        value={(*draft).clone()}
                        oninput={on_input}
                        onkeydown={on_keydown}
                    />
                } else {
                    <div class="flex flex-col gap-2">
                        if !attachments.is_empty() {
                            <div class="flex flex-wrap items-end justify-end gap-2">
                                { for attachments.iter().map(preview) }
                            </div>
                        }
                        if !text.is_empty() {
                            <div class="ml-auto w-fit max-w-md rounded-2xl bg-primary px-4 py-3 text-right whitespace-pre-wrap text-primary-content shadow-sm">
                                { &text }
                            </div>
                        }
                    </div>
                }

                <div class="ml-auto flex items-center gap-2 text-xs text-base-content/60">
                    <span>{ format_time(&seen_at) }</span>
                    { status_badge(*status, &i18n.t("message.sending"), &i18n.t("message.sent")) }
                    if *status == Status::Failed {
                        <span class="flex items-center gap-1 text-error">
                            <Icon icon_id={IconId::HeroiconsOutlineExclamationCircle} class="h-3 w-3" />
                            { i18n.t("message.failed") }
                            <button class="btn btn-ghost btn-xs text-error" type="button"
                                disabled={props.is_loading} onclick={on_retry}>
                                <Icon icon_id={IconId::HeroiconsOutlineArrowPath} class="h-3 w-3" />
                                { i18n.t("message.retry") }
                            </button>
                        </span>
                    }
                </div>

                <div class={classes!(
                    "ml-auto", "flex", "items-center", "gap-2", "transition-opacity",
                    (!*editing).then(|| vec!["opacity-0", "group-hover:opacity-100", "group-focus-within:opacity-100"])
                )}>
                    <BranchSwitcher
                        branch={branch}
                        options={options}
                        on_select={branch_select}
                        disabled={props.is_loading}
                        previous_label={i18n.t("message.branch_previous")}
                        next_label={i18n.t("message.branch_next")}
                    />
                    if *editing {
                        <button class="btn btn-ghost btn-xs" type="button" onclick={cancel_edit}>
                            { i18n.t("message.cancel") }
                        </button>
                        <button class="btn btn-primary btn-xs" type="button"
                            disabled={props.is_loading}
                            onclick={submit_edit.reform(|_: yew::MouseEvent| ())}>
                            { i18n.t("message.submit") }
                        </button>
                    } else {
                        <button class="btn btn-ghost btn-xs" type="button"
                            aria-label={i18n.t("message.edit")}
                            disabled={props.is_loading}
                            onclick={start_edit}>
                            <Icon icon_id={IconId::HeroiconsOutlinePencilSquare} class="h-4 w-4" />
                        </button>
                    }
                </div>
            </div>
            <div class="avatar placeholder">
                <div class="w-8 rounded-full bg-primary text-primary-content">
                    <Icon icon_id={IconId::HeroiconsOutlineUser} class="h-4 w-4" />
                </div>
            </div>
        </div>
    }
}

fn format_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

fn status_badge(status: Status, sending: &str, sent: &str) -> Html {
    match status {
        Status::Sending => html! {
            <span title={sending.to_string()}>
                <Icon icon_id={IconId::HeroiconsOutlineClock} class="h-3 w-3 animate-pulse text-info" />
            </span>
        },
        Status::Sent => html! {
            <span title={sent.to_string()}>
                <Icon icon_id={IconId::HeroiconsOutlineCheckCircle} class="h-3 w-3 text-success" />
            </span>
        },
        Status::Failed => Html::default(),
    }
}
