use std::sync::{Arc, Mutex};

use crate::types::{EntryKind, TranscriptEntry};

/// Session-only conversation history, shared between the recognition worker
/// (sign entries) and the speech-to-text collaborator (voice entries).
/// Newest entries sit at the front, matching how the transcript is rendered.
#[derive(Clone, Default)]
pub struct ConversationLog {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        ConversationLog::default()
    }

    /// Appends an entry. Text is trimmed; entries that trim to empty are
    /// dropped silently.
    pub fn push(&self, kind: EntryKind, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let mut inner = self.inner.lock().expect("conversation log poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(
            0,
            TranscriptEntry {
                id,
                kind,
                text: trimmed.to_string(),
            },
        );
        log::debug!("transcript +[{}] {trimmed}", kind.tag());
    }

    /// Snapshot of all entries, newest first.
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.inner
            .lock()
            .expect("conversation log poisoned")
            .entries
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("conversation log poisoned")
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("conversation log poisoned")
            .entries
            .clear();
    }
}
