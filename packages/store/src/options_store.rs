//! Filter options derived from the whole collection.

use std::sync::Arc;

use api::{ApiError, JobsApi};
use board_core::{BoardEvent, FilterOptions};
use chrono::Utc;
use tokio::sync::{broadcast, watch};

/// Snapshot of the derived options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsState {
    pub options: FilterOptions,
    pub loading: bool,
}

/// Loads the distinct job types, locations and tags offered by filter controls.
///
/// Independent of the active selection: options always describe the whole
/// dataset.
pub struct FilterOptionsStore {
    api: Arc<dyn JobsApi>,
    state: watch::Sender<OptionsState>,
    event_tx: Option<broadcast::Sender<BoardEvent>>,
}

impl FilterOptionsStore {
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        let (state, _) = watch::channel(OptionsState::default());
        Self {
            api,
            state,
            event_tx: None,
        }
    }

    /// Report loads into an existing event stream.
    pub fn with_event_tx(mut self, tx: broadcast::Sender<BoardEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Fetch the unfiltered collection and derive options from it.
    ///
    /// On failure the previous options are kept and the error is returned.
    pub async fn load(&self) -> Result<FilterOptions, ApiError> {
        self.state.send_modify(|state| state.loading = true);

        let result = self.api.filter_options().await;

        match result {
            Ok(options) => {
                tracing::debug!(
                    job_types = options.job_types.len(),
                    locations = options.locations.len(),
                    tags = options.tags.len(),
                    "Filter options loaded"
                );
                if let Some(tx) = &self.event_tx {
                    let _ = tx.send(BoardEvent::OptionsLoaded {
                        job_types: options.job_types.len(),
                        locations: options.locations.len(),
                        tags: options.tags.len(),
                        timestamp: Utc::now(),
                    });
                }
                self.state.send_modify(|state| {
                    state.options = options.clone();
                    state.loading = false;
                });
                Ok(options)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching filter options");
                self.state.send_modify(|state| state.loading = false);
                Err(e)
            }
        }
    }

    pub fn options(&self) -> FilterOptions {
        self.state.borrow().options.clone()
    }

    pub fn state(&self) -> OptionsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OptionsState> {
        self.state.subscribe()
    }
}
