use super::entities::ConversationEntry;
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Ordered, append-only log of conversation entries.
///
/// The only removal is `remove_last`, reserved for retracting the transient
/// placeholder shown while a query is in flight.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    entries: Vec<ConversationEntry>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    /// Pop the newest entry. No-op on an empty store.
    pub fn remove_last(&mut self) -> Option<ConversationEntry> {
        let removed = self.entries.pop();
        if removed.is_none() {
            log_warn!(
                LogComponent::Domain("ConversationStore"),
                "remove_last called on an empty conversation"
            );
        }
        removed
    }

    /// Read-only snapshot in insertion order.
    pub fn all(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ConversationEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut store = ConversationStore::new();
        store.append(ConversationEntry::user("Apple"));
        store.append(ConversationEntry::system("Analyzing..."));
        store.append(ConversationEntry::system("Analyzing Apple Inc...."));
        let texts: Vec<_> = store.all().iter().filter_map(|e| e.text()).collect();
        assert_eq!(texts, vec!["Apple", "Analyzing...", "Analyzing Apple Inc...."]);
    }

    #[test]
    fn remove_last_retracts_newest_only() {
        let mut store = ConversationStore::new();
        store.append(ConversationEntry::user("Apple"));
        store.append(ConversationEntry::system("Analyzing..."));
        let removed = store.remove_last();
        assert_eq!(removed, Some(ConversationEntry::system("Analyzing...")));
        assert_eq!(store.len(), 1);
        assert!(store.last().is_some_and(|e| e.is_user()));
    }

    #[test]
    fn remove_last_on_empty_is_noop() {
        let mut store = ConversationStore::new();
        assert!(store.remove_last().is_none());
        assert!(store.is_empty());
    }
}
