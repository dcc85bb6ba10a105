//! Run streaming against the agent server, wired into the `yewdux` stores.

use std::ops::ControlFlow;
use std::rc::Rc;

use i18nrs::yew::use_translation;
use serde_json::{Map, Value};
use tripia_shared::models::{Checkpoint, Message, RunInput, RunRequest};
use tripia_shared::{BranchTree, RunEvent};
use wasm_bindgen_futures::spawn_local;
use yew::{Callback, hook};
use yewdux::Dispatch;
use yewdux::prelude::{use_dispatch, use_store};

use crate::api::TripIaClient;
use crate::diagnostics;
use crate::models::app_state::{StreamState, ThreadsState, ToastState};

const HISTORY_LIMIT: usize = 1000;
const THREAD_LIST_LIMIT: usize = 100;

/// What a submit sends and what is shown until the server answers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    /// Messages appended to the thread.
    pub messages: Vec<Message>,
    /// Run context; sent whenever it or `messages` is non-empty.
    pub context: Map<String, Value>,
    /// Checkpoint to fork from.
    pub checkpoint: Option<Checkpoint>,
    /// Message list shown optimistically; `None` keeps the current one.
    pub optimistic: Option<Vec<Message>>,
    /// Value resuming an interrupted run.
    pub resume: Option<Value>,
    /// Told whether the run finished without errors.
    pub on_settled: Callback<bool>,
}

impl Submission {
    fn into_request(self, assistant_id: &str) -> RunRequest {
        let mut request = RunRequest::values(assistant_id).with_checkpoint(self.checkpoint);
        if !self.messages.is_empty() || !self.context.is_empty() {
            request = request.with_input(RunInput {
                messages: self.messages,
                context: self.context,
            });
        }
        if let Some(resume) = self.resume {
            request = request.with_resume(resume);
        }
        request
    }
}

#[derive(Clone)]
struct ErrorTexts {
    run_failed: String,
    load_thread: String,
    load_threads: String,
    create_thread: String,
}

/// Handle to the active thread's run stream.
#[derive(Clone)]
pub struct StreamController {
    pub state: Rc<StreamState>,
    stream: Dispatch<StreamState>,
    threads: Dispatch<ThreadsState>,
    toasts: Dispatch<ToastState>,
    texts: Rc<ErrorTexts>,
    on_thread_created: Callback<String>,
}

impl std::fmt::Debug for StreamController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Stream state plus its operations. `on_thread_created` receives the id of
/// a thread created by the first submission.
#[hook]
pub fn use_stream(on_thread_created: Callback<String>) -> StreamController {
    let (state, stream) = use_store::<StreamState>();
    let threads = use_dispatch::<ThreadsState>();
    let toasts = use_dispatch::<ToastState>();
    let (i18n, _) = use_translation();

    StreamController {
        state,
        stream,
        threads,
        toasts,
        texts: Rc::new(ErrorTexts {
            run_failed: i18n.t("errors.run_failed"),
            load_thread: i18n.t("errors.load_thread"),
            load_threads: i18n.t("errors.load_threads"),
            create_thread: i18n.t("errors.create_thread"),
        }),
        on_thread_created,
    }
}

impl StreamController {
    fn announce(&self, message: &str) {
        diagnostics::error(message);
        self.toasts.reduce_mut(|toasts| {
            toasts.announce(message);
        });
    }

    /// Starts a run. Ignored while another run is streaming.
    pub fn submit(&self, submission: Submission) {
        if self.stream.get().is_loading {
            return;
        }
        let on_settled = submission.on_settled.clone();
        let mut generation = 0;
        self.stream.reduce_mut(|state| {
            generation = state.begin_run();
            state.branch = None;
            if let Some(messages) = &submission.optimistic {
                state.values.messages.clone_from(messages);
            }
        });

        let controller = self.clone();
        spawn_local(async move {
            let client = TripIaClient::shared();
            let Some(thread_id) = controller.ensure_thread(&client, generation).await else {
                on_settled.emit(false);
                return;
            };
            let request = submission.into_request(client.assistant_id());

            let mut server_error = false;
            let stream = controller.stream.clone();
            let on_event = |event: RunEvent| {
                if !stream.get().is_current(generation) {
                    return ControlFlow::Break(());
                }
                match event {
                    RunEvent::Metadata { run_id } => {
                        stream.reduce_mut(|state| state.run_id = Some(run_id));
                    }
                    RunEvent::Values(values) => {
                        stream.reduce_mut(|state| state.values = values);
                    }
                    RunEvent::Error { message } => {
                        server_error = true;
                        controller.announce(&message);
                    }
                    RunEvent::End | RunEvent::Other { .. } => {}
                }
                ControlFlow::Continue(())
            };
            let result = client.stream_run(&thread_id, &request, on_event).await;

            let succeeded = result.is_ok() && !server_error;
            if !controller.stream.get().is_current(generation) {
                on_settled.emit(succeeded);
                return;
            }
            controller.stream.reduce_mut(|state| {
                state.is_loading = false;
                state.run_id = None;
            });
            on_settled.emit(succeeded);
            match result {
                Ok(()) if succeeded => controller.toasts.reduce_mut(ToastState::forget_announced),
                Ok(()) => {}
                Err(error) => {
                    diagnostics::error(&format!("Run stream failed: {error}"));
                    controller.announce(&controller.texts.run_failed);
                }
            }
            controller.load_history(thread_id);
            controller.refresh_threads();
        });
    }

    async fn ensure_thread(&self, client: &TripIaClient, generation: u64) -> Option<String> {
        if let Some(thread_id) = self.stream.get().thread_id.clone() {
            return Some(thread_id);
        }
        match client.create_thread().await {
            Ok(thread) => {
                if !self.stream.get().is_current(generation) {
                    return None;
                }
                let thread_id = thread.thread_id;
                self.stream
                    .reduce_mut(|state| state.thread_id = Some(thread_id.clone()));
                self.on_thread_created.emit(thread_id.clone());
                Some(thread_id)
            }
            Err(error) => {
                diagnostics::error(&format!("Thread creation failed: {error}"));
                self.stream.reduce_mut(|state| {
                    if state.is_current(generation) {
                        state.is_loading = false;
                    }
                });
                self.announce(&self.texts.create_thread);
                None
            }
        }
    }

    /// Stops the active run. The local stream is abandoned at once; the
    /// server is asked to cancel in the background.
    pub fn stop(&self) {
        let current = self.stream.get();
        let cancel = current.thread_id.clone().zip(current.run_id.clone());
        self.stream.reduce_mut(|state| {
            state.generation += 1;
            state.is_loading = false;
            state.run_id = None;
        });
        if let Some((thread_id, run_id)) = cancel {
            let controller = self.clone();
            spawn_local(async move {
                if let Err(error) = TripIaClient::shared().cancel_run(&thread_id, &run_id).await {
                    diagnostics::warn(&format!("Failed to cancel run {run_id}: {error}"));
                }
                controller.load_history(thread_id);
            });
        }
    }

    /// Shows another branch of the conversation.
    pub fn set_branch(&self, branch: String) {
        self.stream
            .reduce_mut(|state| state.select_branch(Some(branch)));
    }

    /// Switches to `thread_id`, or to a blank conversation.
    pub fn load_thread(&self, thread_id: Option<String>) {
        if self.stream.get().thread_id == thread_id {
            return;
        }
        self.stream
            .reduce_mut(|state| state.reset_thread(thread_id.clone()));
        if let Some(thread_id) = thread_id {
            self.load_history(thread_id);
        }
    }

    fn load_history(&self, thread_id: String) {
        let controller = self.clone();
        spawn_local(async move {
            match TripIaClient::shared()
                .thread_history(&thread_id, HISTORY_LIMIT)
                .await
            {
                Ok(states) => controller.stream.reduce_mut(|state| {
                    if state.thread_id.as_deref() != Some(thread_id.as_str()) {
                        return;
                    }
                    state.history = BranchTree::new(states);
                    if !state.is_loading {
                        let branch = state.branch.take();
                        state.select_branch(branch);
                    }
                }),
                Err(error) => {
                    diagnostics::error(&format!("Failed to load thread {thread_id}: {error}"));
                    controller.announce(&controller.texts.load_thread);
                }
            }
        });
    }

    /// Reloads the history sidebar.
    pub fn refresh_threads(&self) {
        let controller = self.clone();
        self.threads.reduce_mut(|threads| threads.loading = true);
        spawn_local(async move {
            let result = TripIaClient::shared()
                .search_threads(THREAD_LIST_LIMIT)
                .await;
            controller.threads.reduce_mut(|threads| threads.loading = false);
            match result {
                Ok(list) => controller.threads.reduce_mut(|threads| threads.threads = list),
                Err(error) => {
                    diagnostics::error(&format!("Failed to list threads: {error}"));
                    controller.announce(&controller.texts.load_threads);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tripia_shared::models::StreamMode;

    #[test]
    fn plain_submissions_send_input_only() {
        let mut context = Map::new();
        context.insert("language".into(), json!("pt-BR"));
        let request = Submission {
            messages: vec![Message::human(vec![])],
            context,
            ..Submission::default()
        }
        .into_request("agent");

        assert_eq!(request.assistant_id, "agent");
        assert_eq!(request.stream_mode, vec![StreamMode::Values]);
        let input = request.input.unwrap();
        assert_eq!(input.messages.len(), 1);
        assert_eq!(input.context["language"], "pt-BR");
        assert!(request.command.is_none());
    }

    #[test]
    fn resumes_carry_a_command_and_no_input() {
        let request = Submission {
            resume: Some(json!([{"type": "accept", "args": null}])),
            ..Submission::default()
        }
        .into_request("agent");

        assert!(request.input.is_none());
        assert_eq!(
            request.command,
            Some(json!({"resume": [{"type": "accept", "args": null}]}))
        );
    }

    #[test]
    fn regenerations_fork_from_the_checkpoint() {
        let checkpoint: Checkpoint =
            serde_json::from_value(json!({"checkpoint_id": "c1"})).unwrap();
        let mut context = Map::new();
        context.insert("language".into(), json!("en"));
        let request = Submission {
            context,
            checkpoint: Some(checkpoint.clone()),
            ..Submission::default()
        }
        .into_request("agent");

        assert_eq!(request.checkpoint, Some(checkpoint));
        assert!(request.input.unwrap().messages.is_empty());
    }
}
