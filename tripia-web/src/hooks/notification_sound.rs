use yew::{hook, use_effect_with, use_mut_ref};

use crate::audio;

/// Decides when a run produced its first assistant message.
#[derive(Debug, Default)]
pub struct ChimeTracker {
    generation: u64,
    baseline: usize,
    played: bool,
}

impl ChimeTracker {
    /// Feeds the current number of assistant messages. Returns `true` once
    /// per run, when that number first grows past what the run started with.
    pub fn observe(&mut self, generation: u64, ai_messages: usize, running: bool) -> bool {
        if generation != self.generation {
            self.generation = generation;
            self.baseline = ai_messages;
            self.played = false;
        }
        if !running {
            self.baseline = ai_messages;
            return false;
        }
        if self.played {
            return false;
        }
        if ai_messages < self.baseline {
            // An edit truncated the list before anything streamed in.
            self.baseline = ai_messages;
            return false;
        }
        if ai_messages > self.baseline {
            self.played = true;
            return true;
        }
        false
    }
}

/// Plays the chime when the running stream delivers its first assistant
/// message and sounds are enabled.
#[hook]
pub fn use_notification_sound(generation: u64, ai_messages: usize, running: bool, enabled: bool) {
    let tracker = use_mut_ref(ChimeTracker::default);
    use_effect_with(
        (generation, ai_messages, running),
        move |(generation, ai_messages, running)| {
            let first = tracker
                .borrow_mut()
                .observe(*generation, *ai_messages, *running);
            if first {
                audio::play_chime(enabled);
            }
            || ()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chimes_once_per_run() {
        let mut tracker = ChimeTracker::default();
        assert!(!tracker.observe(1, 2, true));
        assert!(tracker.observe(1, 3, true));
        assert!(!tracker.observe(1, 4, true));
        assert!(!tracker.observe(1, 4, false));
        assert!(!tracker.observe(2, 4, true));
        assert!(tracker.observe(2, 5, true));
    }

    #[test]
    fn loading_a_thread_is_silent() {
        let mut tracker = ChimeTracker::default();
        assert!(!tracker.observe(3, 0, false));
        assert!(!tracker.observe(3, 6, false));
        assert!(!tracker.observe(4, 6, true));
    }

    #[test]
    fn edits_lower_the_baseline() {
        let mut tracker = ChimeTracker::default();
        assert!(!tracker.observe(1, 3, true));
        assert!(!tracker.observe(1, 1, true));
        assert!(tracker.observe(1, 2, true));
    }
}
