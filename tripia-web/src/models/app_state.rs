//! Global client state shared through `yewdux` stores.

use serde_json::{Map, Value};
use tripia_shared::models::{Settings, Thread, ThreadValues};
use tripia_shared::{BranchTree, ErrorAnnouncer, SettingsStore};
use yewdux::Store;

use crate::components::external::Artifact;
use crate::storage::BrowserStorage;

/// User preferences, mirrored to local storage.
#[derive(Debug, Clone, Store)]
pub struct SettingsState {
    pub store: SettingsStore<BrowserStorage>,
    /// Set once storage has been read on the client.
    pub loaded: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            store: SettingsStore::new(BrowserStorage::open()),
            loaded: false,
        }
    }
}

impl PartialEq for SettingsState {
    fn eq(&self, other: &Self) -> bool {
        self.loaded == other.loaded && self.store.settings() == other.store.settings()
    }
}

impl SettingsState {
    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }
}

/// The thread being shown and the run streaming into it.
#[derive(Debug, Clone, Default, PartialEq, Store)]
pub struct StreamState {
    pub thread_id: Option<String>,
    /// Values on screen: streamed, optimistic, or the selected branch head.
    pub values: ThreadValues,
    pub history: BranchTree,
    /// Checkpoint id of the selected branch; `None` follows the newest state.
    pub branch: Option<String>,
    pub is_loading: bool,
    pub run_id: Option<String>,
    /// Bumped whenever a run is started or stopped; stale streams compare
    /// against it and stop applying events.
    pub generation: u64,
}

impl StreamState {
    /// Starts a new run generation and returns it.
    pub fn begin_run(&mut self) -> u64 {
        self.generation += 1;
        self.is_loading = true;
        self.run_id = None;
        self.generation
    }

    /// Whether `generation` is still the active run.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Shows `branch`, taking its head state from history when loaded.
    pub fn select_branch(&mut self, branch: Option<String>) {
        if let Some(head) = self.history.head(branch.as_deref()) {
            self.values = head.thread_values();
        }
        self.branch = branch;
    }

    /// Clears everything for a fresh conversation.
    pub fn reset_thread(&mut self, thread_id: Option<String>) {
        let generation = self.generation + 1;
        *self = Self {
            thread_id,
            generation,
            ..Self::default()
        };
    }
}

/// Threads listed in the history sidebar.
#[derive(Debug, Clone, Default, PartialEq, Store)]
pub struct ThreadsState {
    pub threads: Vec<Thread>,
    pub loading: bool,
}

/// A transient notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Error notices currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    announcer: ErrorAnnouncer,
    next_id: u64,
}

impl ToastState {
    /// Queues `message` unless it was already announced; returns the new
    /// toast id.
    pub fn announce(&mut self, message: &str) -> Option<u64> {
        if !self.announcer.should_announce(message) {
            return None;
        }
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            message: message.trim().to_string(),
        });
        Some(self.next_id)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Allows every message to be announced again.
    pub fn forget_announced(&mut self) {
        self.announcer.clear();
    }
}

/// Side panel opened by external components.
#[derive(Debug, Clone, Default, PartialEq, Store)]
pub struct ArtifactState {
    pub open: bool,
    pub title: String,
    pub body: String,
    /// Extra run context contributed while the artifact is open.
    pub context: Map<String, Value>,
}

impl ArtifactState {
    /// Shows `artifact`, merging its context over what is already open.
    pub fn open_artifact(&mut self, artifact: Artifact) {
        self.open = true;
        self.title = artifact.title;
        self.body = artifact.body;
        self.context.extend(artifact.context);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.context.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tripia_shared::models::ThreadState;

    #[test]
    fn duplicate_errors_are_toasted_once() {
        let mut toasts = ToastState::default();
        let first = toasts.announce("Failed to load thread").unwrap();
        assert_eq!(toasts.announce("Failed to load thread"), None);
        assert_eq!(toasts.toasts.len(), 1);

        toasts.dismiss(first);
        assert!(toasts.toasts.is_empty());
        assert_eq!(toasts.announce("Failed to load thread"), None);

        toasts.forget_announced();
        assert!(toasts.announce("Failed to load thread").is_some());
    }

    #[test]
    fn new_runs_supersede_old_ones() {
        let mut stream = StreamState::default();
        let first = stream.begin_run();
        let second = stream.begin_run();
        assert!(!stream.is_current(first));
        assert!(stream.is_current(second));
        assert!(stream.is_loading);
    }

    #[test]
    fn resetting_the_thread_invalidates_running_streams() {
        let mut stream = StreamState::default();
        let run = stream.begin_run();
        stream.reset_thread(Some("t-2".into()));
        assert!(!stream.is_current(run));
        assert!(!stream.is_loading);
        assert_eq!(stream.thread_id.as_deref(), Some("t-2"));
    }

    #[test]
    fn selecting_a_branch_shows_its_head() {
        let state = |id: &str, parent: Option<&str>, text: &str| -> ThreadState {
            serde_json::from_value(json!({
                "values": {"messages": [{"id": format!("m-{id}"), "type": "human", "content": text}]},
                "checkpoint": {"checkpoint_id": id},
                "parent_checkpoint": parent.map(|p| json!({"checkpoint_id": p})),
            }))
            .unwrap()
        };
        let mut stream = StreamState {
            history: BranchTree::new(vec![
                state("c2", Some("c0"), "edited"),
                state("c1", Some("c0"), "original"),
                state("c0", None, "root"),
            ]),
            ..StreamState::default()
        };

        stream.select_branch(Some("c1".into()));
        assert_eq!(stream.values.messages[0].text(), "original");
        stream.select_branch(None);
        assert_eq!(stream.values.messages[0].text(), "edited");
    }

    #[test]
    fn artifact_context_lives_while_the_panel_is_open() {
        let mut artifact = ArtifactState::default();
        let mut context = Map::new();
        context.insert("selected_flight".into(), json!("TP123"));
        artifact.open_artifact(Artifact {
            title: "GIG → LIS".into(),
            body: "TP76".into(),
            context,
        });

        assert!(artifact.open);
        assert_eq!(artifact.title, "GIG → LIS");
        assert_eq!(artifact.context["selected_flight"], "TP123");

        artifact.close();
        assert!(!artifact.open);
        assert!(artifact.context.is_empty());
    }
}
