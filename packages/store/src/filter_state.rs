//! Observable filter selection.

use board_core::{FilterPatch, FilterSelection};
use tokio::sync::watch;

/// Holds the current filter selection and notifies subscribers on change.
///
/// On its own this only merges; [`crate::JobsStore::update_filters`] pairs a
/// merge with the refetch it must trigger.
#[derive(Debug)]
pub struct FilterState {
    tx: watch::Sender<FilterSelection>,
}

impl FilterState {
    /// Start from the default selection.
    pub fn new() -> Self {
        Self::with_selection(FilterSelection::default())
    }

    pub fn with_selection(selection: FilterSelection) -> Self {
        let (tx, _) = watch::channel(selection);
        Self { tx }
    }

    /// Merge `patch` over the current selection and return the result.
    pub fn update(&self, patch: FilterPatch) -> FilterSelection {
        self.tx.send_modify(|selection| selection.merge(patch));
        self.current()
    }

    /// Reset to the default selection and return it.
    pub fn clear(&self) -> FilterSelection {
        self.tx.send_replace(FilterSelection::default());
        self.current()
    }

    pub fn current(&self) -> FilterSelection {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSelection> {
        self.tx.subscribe()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use board_core::{Choice, JobType, SortOrder};

    use super::*;

    #[test]
    fn update_merges_and_clear_resets() {
        let state = FilterState::new();

        let first = state.update(FilterPatch::new().job_type(Choice::Only(JobType::Contract)));
        assert_eq!(first.job_type, Choice::Only(JobType::Contract));
        assert_eq!(first.sort, SortOrder::NewestFirst);

        let second = state.update(
            FilterPatch::new()
                .tags(vec!["Go".into()])
                .sort(SortOrder::OldestFirst),
        );
        assert_eq!(second.job_type, Choice::Only(JobType::Contract));
        assert_eq!(second.tags, vec!["Go".to_string()]);
        assert_eq!(second.sort, SortOrder::OldestFirst);
        assert_eq!(state.current(), second);

        assert_eq!(state.clear(), FilterSelection::default());
        assert_eq!(state.current(), FilterSelection::default());
    }

    #[test]
    fn subscribers_see_changes() {
        let state = FilterState::new();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap_or(true));

        state.update(FilterPatch::new().keyword("rust"));
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(rx.borrow_and_update().keyword, "rust");
    }
}
