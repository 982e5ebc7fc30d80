use std::sync::Arc;

use api::JobsApi;
use board_core::FilterOptions;
use dioxus::prelude::*;
use store::{FilterOptionsStore, OptionsState};

use crate::mirror;

/// Handle returned by [`use_filter_options`].
#[derive(Clone)]
pub struct UseFilterOptions {
    store: Arc<FilterOptionsStore>,
    state: Signal<OptionsState>,
}

/// Own a [`FilterOptionsStore`] for this component and load it on mount.
pub fn use_filter_options(api: Arc<dyn JobsApi>) -> UseFilterOptions {
    let store = use_hook(move || Arc::new(FilterOptionsStore::new(api)));
    let state = use_signal(|| store.state());

    let watched = store.clone();
    use_future(move || mirror(watched.subscribe(), state));

    let initial = store.clone();
    use_future(move || {
        let store = initial.clone();
        async move {
            let _ = store.load().await;
        }
    });

    UseFilterOptions { store, state }
}

impl UseFilterOptions {
    pub fn options(&self) -> FilterOptions {
        self.state.read().options.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    /// Tags for a search box; an empty term returns every tag.
    pub fn tags_matching(&self, term: &str) -> Vec<String> {
        self.state
            .read()
            .options
            .tags_matching(term)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Derive the options again, e.g. after a mutation added a new tag.
    pub fn reload(&self) {
        let store = self.store.clone();
        spawn(async move {
            if let Err(e) = store.load().await {
                tracing::warn!(error = %e, "Filter options reload failed");
            }
        });
    }
}
