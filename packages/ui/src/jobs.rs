//! `use_jobs`: the filtered job list as component state.

use std::sync::Arc;

use api::{ApiError, JobsApi};
use board_core::{FilterPatch, FilterSelection, Job, JobDraft, JobForm, JobId, ValidationErrors};
use dioxus::prelude::*;
use store::{CollectionState, JobsStore};

use crate::mirror;

/// Handle returned by [`use_jobs`].
///
/// Reads come from signals, so a component that calls them re-renders when
/// the store changes. Actions are spawned on the calling component's scope.
#[derive(Clone)]
pub struct UseJobs {
    store: Arc<JobsStore>,
    state: Signal<CollectionState>,
    filters: Signal<FilterSelection>,
}

/// Own a [`JobsStore`] for this component and load the list on mount.
pub fn use_jobs(api: Arc<dyn JobsApi>) -> UseJobs {
    let store = use_hook(move || Arc::new(JobsStore::new(api)));
    let state = use_signal(|| store.state());
    let filters = use_signal(|| store.filters().current());

    let watched = store.clone();
    use_future(move || mirror(watched.subscribe(), state));

    let watched = store.clone();
    use_future(move || mirror(watched.filters().subscribe(), filters));

    let initial = store.clone();
    use_future(move || {
        let store = initial.clone();
        async move {
            store.refetch().await;
        }
    });

    UseJobs {
        store,
        state,
        filters,
    }
}

impl UseJobs {
    pub fn state(&self) -> CollectionState {
        self.state.read().clone()
    }

    /// Jobs in server order.
    pub fn jobs(&self) -> Vec<Job> {
        self.state.read().jobs.clone()
    }

    /// Jobs narrowed by the keyword, which the server never sees.
    pub fn visible_jobs(&self) -> Vec<Job> {
        let selection = self.filters.read();
        self.state
            .read()
            .jobs
            .iter()
            .filter(|job| selection.matches_keyword(job))
            .cloned()
            .collect()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn filters(&self) -> FilterSelection {
        self.filters.read().clone()
    }

    /// The underlying store, for callers that need to await an action.
    pub fn store(&self) -> Arc<JobsStore> {
        self.store.clone()
    }

    pub fn update_filters(&self, patch: FilterPatch) {
        let store = self.store.clone();
        spawn(async move {
            store.update_filters(patch).await;
        });
    }

    /// Add `tag` to the selection, or remove it when already selected.
    pub fn toggle_tag(&self, tag: &str) {
        let patch = FilterPatch::toggle_tag(&self.filters.read(), tag);
        self.update_filters(patch);
    }

    pub fn clear_filters(&self) {
        let store = self.store.clone();
        spawn(async move {
            store.clear_filters().await;
        });
    }

    pub fn refetch(&self) {
        let store = self.store.clone();
        spawn(async move {
            store.refetch().await;
        });
    }

    /// Validate `form` and save it in the background.
    ///
    /// Invalid forms return their errors without a request. `on_done` receives
    /// the saved posting once the list was refreshed, or the transport error
    /// so the component can notify the user.
    pub fn submit(
        &self,
        form: &JobForm,
        editing: Option<JobId>,
        on_done: EventHandler<Result<Option<Job>, ApiError>>,
    ) -> Result<(), ValidationErrors> {
        let draft = form.to_draft()?;
        let store = self.store.clone();

        spawn(async move {
            on_done.call(save(&store, &draft, editing.as_ref()).await);
        });
        Ok(())
    }

    /// Delete `id` in the background and report the result to `on_done`.
    pub fn delete(&self, id: JobId, on_done: EventHandler<Result<(), ApiError>>) {
        let store = self.store.clone();
        spawn(async move {
            on_done.call(store.delete(&id).await);
        });
    }
}

/// Create a posting, or update `editing` when given.
async fn save(
    store: &JobsStore,
    draft: &JobDraft,
    editing: Option<&JobId>,
) -> Result<Option<Job>, ApiError> {
    let result = match editing {
        Some(id) => store.update(id, draft).await,
        None => store.create(draft).await,
    };
    if let Err(e) = &result {
        tracing::warn!(error = %e, "Job form was not saved");
    }
    result
}
