use std::collections::HashSet;

/// Remembers which error messages were already shown to the user.
///
/// The same message is announced once until [`ErrorAnnouncer::clear`] is
/// called, which happens when a run completes successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorAnnouncer {
    announced: HashSet<String>,
}

impl ErrorAnnouncer {
    /// Creates an announcer that has shown nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time `message` is seen.
    pub fn should_announce(&mut self, message: &str) -> bool {
        let message = message.trim();
        !message.is_empty() && self.announced.insert(message.to_string())
    }

    /// Forgets every announced message.
    pub fn clear(&mut self) {
        self.announced.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_messages_are_announced_once() {
        let mut announcer = ErrorAnnouncer::new();
        assert!(announcer.should_announce("Failed to load thread"));
        assert!(!announcer.should_announce("Failed to load thread"));
        assert!(!announcer.should_announce("  Failed to load thread "));
        assert!(announcer.should_announce("Run failed"));
    }

    #[test]
    fn clearing_allows_announcing_again() {
        let mut announcer = ErrorAnnouncer::new();
        announcer.should_announce("Run failed");
        announcer.clear();
        assert!(announcer.should_announce("Run failed"));
    }

    #[test]
    fn blank_messages_are_never_announced() {
        assert!(!ErrorAnnouncer::new().should_announce("   "));
    }
}
