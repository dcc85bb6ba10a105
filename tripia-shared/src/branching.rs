//! Checkpoint lineage of a thread: which branch is shown and where each
//! message was first seen.
//!
//! The agent server returns thread history newest first. Every state points
//! at its parent checkpoint, so states sharing a parent are alternative
//! branches (an edited human message, a regenerated answer).

use std::collections::{HashMap, HashSet};

use crate::models::thread::{Checkpoint, ThreadState};

/// Branching information for one rendered message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMetadata {
    /// Checkpoint of the state in which the message first appeared.
    pub first_seen: Option<Checkpoint>,
    /// Parent of that state; regenerating or editing forks from here.
    pub parent_checkpoint: Option<Checkpoint>,
    /// Checkpoint id of the branch currently shown, when there are several.
    pub branch: Option<String>,
    /// Checkpoint ids of every sibling branch, oldest first.
    pub branch_options: Vec<String>,
}

impl MessageMetadata {
    /// Position of the current branch among the options, zero-based.
    pub fn branch_index(&self) -> Option<usize> {
        let branch = self.branch.as_deref()?;
        self.branch_options.iter().position(|option| option == branch)
    }
}

/// Thread history indexed by checkpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchTree {
    states: Vec<ThreadState>,
}

impl BranchTree {
    /// Wraps history as returned by the server, newest first.
    pub fn new(states: Vec<ThreadState>) -> Self {
        Self { states }
    }

    /// Returns `true` when no history is loaded.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn find(&self, checkpoint_id: &str) -> Option<&ThreadState> {
        self.states
            .iter()
            .find(|state| state.checkpoint.checkpoint_id == checkpoint_id)
    }

    fn children<'a>(&'a self, checkpoint_id: &'a str) -> impl Iterator<Item = &'a ThreadState> + 'a {
        self.states.iter().filter(move |state| {
            state
                .parent_checkpoint
                .as_ref()
                .is_some_and(|parent| parent.checkpoint_id == checkpoint_id)
        })
    }

    /// State displayed for `branch`.
    ///
    /// Without a branch this is the newest state. With one, the newest
    /// descendant of that checkpoint is followed down to a leaf.
    pub fn head(&self, branch: Option<&str>) -> Option<&ThreadState> {
        let Some(branch) = branch else {
            return self.states.first();
        };
        let mut current = self.find(branch)?;
        let mut visited = HashSet::new();
        while visited.insert(current.checkpoint.checkpoint_id.as_str()) {
            match self.children(&current.checkpoint.checkpoint_id).next() {
                Some(child) => current = child,
                None => break,
            }
        }
        Some(current)
    }

    /// States from the root down to `head`, oldest first.
    pub fn path<'a>(&'a self, head: &'a ThreadState) -> Vec<&'a ThreadState> {
        let mut path = vec![head];
        let mut visited = HashSet::from([head.checkpoint.checkpoint_id.as_str()]);
        let mut current = head;
        while let Some(parent) = current
            .parent_checkpoint
            .as_ref()
            .and_then(|parent| self.find(&parent.checkpoint_id))
        {
            if !visited.insert(parent.checkpoint.checkpoint_id.as_str()) {
                break;
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    fn siblings(&self, state: &ThreadState) -> Vec<String> {
        let parent = state
            .parent_checkpoint
            .as_ref()
            .map(|parent| parent.checkpoint_id.as_str());
        let mut options: Vec<String> = self
            .states
            .iter()
            .filter(|candidate| {
                candidate
                    .parent_checkpoint
                    .as_ref()
                    .map(|parent| parent.checkpoint_id.as_str())
                    == parent
            })
            .map(|candidate| candidate.checkpoint.checkpoint_id.clone())
            .collect();
        options.reverse();
        options
    }

    /// Metadata of every message on the path to the head of `branch`, keyed
    /// by message id.
    ///
    /// A set of branch options is attached only to the first message that
    /// shares it, so one switcher is shown per fork.
    pub fn metadata(&self, branch: Option<&str>) -> HashMap<String, MessageMetadata> {
        let Some(head) = self.head(branch) else {
            return HashMap::new();
        };
        let path = self.path(head);
        let mut metadata = HashMap::new();
        let mut shown_options = HashSet::new();

        for message_id in head.message_ids() {
            let Some(first_seen) = path
                .iter()
                .find(|state| state.message_ids().contains(&message_id))
            else {
                continue;
            };
            let mut options = self.siblings(first_seen);
            if options.len() < 2 || !shown_options.insert(options.join(",")) {
                options.clear();
            }
            metadata.insert(
                message_id.to_string(),
                MessageMetadata {
                    first_seen: Some(first_seen.checkpoint.clone()),
                    parent_checkpoint: first_seen.parent_checkpoint.clone(),
                    branch: (!options.is_empty())
                        .then(|| first_seen.checkpoint.checkpoint_id.clone()),
                    branch_options: options,
                },
            );
        }
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn state(id: &str, parent: Option<&str>, messages: &[&str]) -> ThreadState {
        let messages: Vec<Value> = messages
            .iter()
            .map(|id| {
                let kind = if id.starts_with('h') { "human" } else { "ai" };
                json!({"id": id, "type": kind, "content": id})
            })
            .collect();
        serde_json::from_value(json!({
            "values": {"messages": messages},
            "next": [],
            "checkpoint": {"checkpoint_id": id, "checkpoint_ns": ""},
            "parent_checkpoint": parent.map(|p| json!({"checkpoint_id": p, "checkpoint_ns": ""})),
        }))
        .unwrap()
    }

    /// c0 -> c1 [h1] -> c2 [h1, a1]
    ///    -> c3 [h1e] -> c4 [h1e, a1e]   (h1 edited later)
    fn forked() -> BranchTree {
        BranchTree::new(vec![
            state("c4", Some("c3"), &["h1e", "a1e"]),
            state("c3", Some("c0"), &["h1e"]),
            state("c2", Some("c1"), &["h1", "a1"]),
            state("c1", Some("c0"), &["h1"]),
            state("c0", None, &[]),
        ])
    }

    #[test]
    fn default_head_is_the_newest_state() {
        let tree = forked();
        assert_eq!(tree.head(None).unwrap().checkpoint.checkpoint_id, "c4");
    }

    #[test]
    fn selecting_a_branch_follows_it_to_the_leaf() {
        let tree = forked();
        assert_eq!(tree.head(Some("c1")).unwrap().checkpoint.checkpoint_id, "c2");
        assert!(tree.head(Some("missing")).is_none());
    }

    #[test]
    fn path_runs_root_to_head() {
        let tree = forked();
        let head = tree.head(None).unwrap();
        let ids: Vec<_> = tree
            .path(head)
            .iter()
            .map(|state| state.checkpoint.checkpoint_id.as_str())
            .collect();
        assert_eq!(ids, ["c0", "c3", "c4"]);
    }

    #[test]
    fn forked_message_lists_both_branches() {
        let tree = forked();
        let metadata = tree.metadata(None);

        let edited = &metadata["h1e"];
        assert_eq!(edited.branch_options, ["c1", "c3"]);
        assert_eq!(edited.branch.as_deref(), Some("c3"));
        assert_eq!(edited.branch_index(), Some(1));
        assert_eq!(edited.parent_checkpoint.as_ref().unwrap().checkpoint_id, "c0");

        let answer = &metadata["a1e"];
        assert!(answer.branch_options.is_empty());
        assert_eq!(answer.parent_checkpoint.as_ref().unwrap().checkpoint_id, "c3");
    }

    #[test]
    fn other_branch_reports_its_own_lineage() {
        let tree = forked();
        let metadata = tree.metadata(Some("c1"));

        assert_eq!(metadata["h1"].branch.as_deref(), Some("c1"));
        assert_eq!(metadata["a1"].first_seen.as_ref().unwrap().checkpoint_id, "c2");
        assert!(!metadata.contains_key("h1e"));
    }

    #[test]
    fn empty_history_has_no_metadata() {
        let tree = BranchTree::default();
        assert!(tree.is_empty());
        assert!(tree.metadata(None).is_empty());
    }
}
