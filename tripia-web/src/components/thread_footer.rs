//! Message composer with image and PDF attachments.

use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use i18nrs::yew::use_translation;
use tripia_shared::models::{ContentBlock, SUPPORTED_FILE_TYPES, is_supported_file_type};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{File, HtmlInputElement, HtmlTextAreaElement};
use yew::{
    Callback, Html, Properties, Reducible, TargetCast, classes, function_component, html,
    use_reducer, use_state,
};
use yew_icons::{Icon, IconId};

use crate::diagnostics;

/// Attachments waiting to be sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attachments(pub Vec<ContentBlock>);

#[derive(Debug)]
pub enum AttachmentAction {
    Add(Vec<ContentBlock>),
    Remove(usize),
    Clear,
}

impl Reducible for Attachments {
    type Action = AttachmentAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut blocks = self.0.clone();
        match action {
            AttachmentAction::Add(added) => {
                for block in added {
                    if !blocks.contains(&block) {
                        blocks.push(block);
                    }
                }
            }
            AttachmentAction::Remove(index) if index < blocks.len() => {
                blocks.remove(index);
            }
            AttachmentAction::Remove(_) => return self,
            AttachmentAction::Clear => blocks.clear(),
        }
        Rc::new(Self(blocks))
    }
}

async fn read_attachment(file: File) -> Result<ContentBlock, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|error| format!("{error:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ContentBlock::attachment(
        &file.type_(),
        STANDARD.encode(bytes),
        &file.name(),
    ))
}

pub(crate) fn preview(block: &ContentBlock) -> Html {
    match block {
        ContentBlock::Image {
            mime_type, data, ..
        } => html! {
            <img
                class="h-16 w-16 rounded-md object-cover"
                src={format!("data:{mime_type};base64,{data}")}
                alt={block.display_name().unwrap_or_default().to_string()}
            />
        },
        _ => html! {
            <div class="flex h-16 items-center gap-2 rounded-md bg-base-200 px-3 text-xs">
                <Icon icon_id={IconId::HeroiconsOutlineDocument} class="h-5 w-5" />
                <span class="max-w-[8rem] truncate">{ block.display_name().unwrap_or_default() }</span>
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct ThreadFooterProps {
    pub on_submit: Callback<(String, Vec<ContentBlock>)>,
    pub on_stop: Callback<()>,
    #[prop_or(false)]
    pub is_loading: bool,
    #[prop_or(false)]
    pub has_thread: bool,
}

#[function_component(ThreadFooter)]
pub fn thread_footer(props: &ThreadFooterProps) -> Html {
    let (i18n, ..) = use_translation();
    let text = use_state(String::new);
    let attachments = use_reducer(Attachments::default);
    let rejected = use_state(|| false);

    let can_submit =
        !props.is_loading && (!text.trim().is_empty() || !attachments.0.is_empty());

    let submit = {
        let text = text.clone();
        let attachments = attachments.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |()| {
            if !can_submit {
                return;
            }
            on_submit.emit(((*text).clone(), attachments.0.clone()));
            text.set(String::new());
            attachments.dispatch(AttachmentAction::Clear);
        })
    };

    let on_input = {
        let text = text.clone();
        Callback::from(move |event: yew::events::InputEvent| {
            let target: HtmlTextAreaElement = event.target_unchecked_into();
            text.set(target.value());
        })
    };

    let on_keydown = {
        let submit = submit.clone();
        Callback::from(move |event: yew::events::KeyboardEvent| {
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                submit.emit(());
            }
        })
    };

    let on_form_submit = {
        let submit = submit.clone();
        Callback::from(move |event: yew::events::SubmitEvent| {
            event.prevent_default();
            submit.emit(());
        })
    };

    let on_files = {
        let attachments = attachments.clone();
        let rejected = rejected.clone();
        Callback::from(move |event: yew::events::Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(list) = input.files() else {
                return;
            };
            let mut files = Vec::new();
            let mut any_rejected = false;
            for index in 0..list.length() {
                if let Some(file) = list.get(index) {
                    if is_supported_file_type(&file.type_()) {
                        files.push(file);
                    } else {
                        any_rejected = true;
                    }
                }
            }
            input.set_value("");
            rejected.set(any_rejected);

            let attachments = attachments.clone();
            spawn_local(async move {
                let mut blocks = Vec::with_capacity(files.len());
                for file in files {
                    match read_attachment(file).await {
                        Ok(block) => blocks.push(block),
                        Err(error) => diagnostics::warn(&format!("Failed to read attachment: {error}")),
                    }
                }
                attachments.dispatch(AttachmentAction::Add(blocks));
            });
        })
    };

    let on_stop = {
        let on_stop = props.on_stop.clone();
        Callback::from(move |_: yew::MouseEvent| on_stop.emit(()))
    };

    let placeholder = if props.has_thread {
        i18n.t("composer.placeholder")
    } else {
        i18n.t("composer.placeholder_new")
    };

    html! {
        <div class="mx-auto mb-6 w-full max-w-5xl rounded-2xl border border-base-300 bg-base-200 shadow-sm">
            <form class="grid grid-rows-[1fr_auto] gap-2" onsubmit={on_form_submit}>
                if !attachments.0.is_empty() {
                    <div class="flex flex-wrap gap-2 px-4 pt-4">
                        { for attachments.0.iter().enumerate().map(|(index, block)| {
                            let remove = {
                                let attachments = attachments.clone();
                                Callback::from(move |_: yew::MouseEvent| attachments.dispatch(AttachmentAction::Remove(index)))
                            };
                            html! {
                                <div key={index} class="relative">
                                    { preview(block) }
                                    <button
                                        class="btn btn-circle btn-xs absolute -right-2 -top-2"
                                        type="button"
                                        aria-label={i18n.t("composer.remove_attachment")}
                                        onclick={remove}
                                    >
                                        <Icon icon_id={IconId::HeroiconsOutlineXMark} class="h-3 w-3" />
                                    </button>
                                </div>
                            }
                        }) }
                    </div>
                }
                <textarea
                    class={classes!("textarea", "w-full", "resize-none", "bg-transparent", "p-4", "min-h-[52px]", "max-h-[120px]")}
                    rows="1"
                    placeholder={placeholder}
                    value={(*text).clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                />
                <div class="flex items-center justify-between gap-2 p-2">
                    <div class="flex items-center gap-2">
                        <label class="btn btn-ghost btn-sm" title={i18n.t("composer.attach")}>
                            <Icon icon_id={IconId::HeroiconsOutlinePaperClip} class="h-4 w-4" />
                            <input
                                class="hidden"
                                type="file"
                                multiple={true}
                                accept={SUPPORTED_FILE_TYPES.join(",")}
                                onchange={on_files}
                            />
                        </label>
                        if *rejected {
                            <span class="text-xs text-error">{ i18n.t("composer.unsupported_file") }</span>
                        }
                    </div>
                    <div class="flex items-center gap-2">
                        if props.is_loading {
                            <button class="btn btn-outline btn-sm" type="button" onclick={on_stop}>
                                <Icon icon_id={IconId::HeroiconsOutlineXMark} class="h-4 w-4" />
                                { i18n.t("composer.stop") }
                            </button>
                        }
                        <button class="btn btn-primary btn-sm" type="submit" disabled={!can_submit}>
                            if props.is_loading {
                                <span class="loading loading-spinner loading-xs"></span>
                            } else {
                                { i18n.t("composer.send") }
                            }
                        </button>
                    </div>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ContentBlock {
        ContentBlock::attachment("image/png", "aGVsbG8=".into(), name)
    }

    #[test]
    fn duplicate_attachments_are_ignored() {
        let state = Rc::new(Attachments::default());
        let state = state.reduce(AttachmentAction::Add(vec![image("a.png"), image("a.png")]));
        assert_eq!(state.0.len(), 1);
        let state = state.reduce(AttachmentAction::Add(vec![image("b.png")]));
        assert_eq!(state.0.len(), 2);
    }

    #[test]
    fn removing_out_of_range_keeps_the_list() {
        let state = Rc::new(Attachments(vec![image("a.png")]));
        let state = state.reduce(AttachmentAction::Remove(3));
        assert_eq!(state.0.len(), 1);
        let state = state.reduce(AttachmentAction::Remove(0));
        assert!(state.0.is_empty());
    }
}
