//! The jobs collection store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use api::{ApiError, JobsApi, ListQuery};
use board_core::{BoardEvent, FilterPatch, FilterSelection, Job, JobDraft, JobId, Mutation};
use chrono::Utc;
use tokio::sync::{broadcast, watch};

use crate::FilterState;

/// Shown when a list request fails.
pub const FETCH_ERROR: &str = "Failed to fetch jobs. Please try again.";
/// Shown when a create request fails.
pub const CREATE_ERROR: &str = "Failed to create job. Please try again.";
/// Shown when an update request fails.
pub const UPDATE_ERROR: &str = "Failed to update job. Please try again.";
/// Shown when a delete request fails.
pub const DELETE_ERROR: &str = "Failed to delete job. Please try again.";

const EVENT_CAPACITY: usize = 64;

/// Snapshot of the held collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    /// Jobs in the order the server returned them.
    pub jobs: Vec<Job>,
    /// A list request or mutation is in flight.
    pub loading: bool,
    /// User-facing message for the last failure. Cleared when a new request starts.
    pub error: Option<String>,
}

/// How a refresh settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the held list.
    Applied { count: usize },
    /// The request failed; the previous list is kept and `error` is set.
    Failed,
    /// A newer refresh was issued before this one resolved; the response was dropped.
    Superseded,
}

/// In-memory copy of the job list plus loading and error state.
///
/// Every mutation is followed by a full refresh with the current filter
/// selection instead of patching the local list, so the held list always
/// reflects the server's own filtering and ordering.
///
/// List requests are tagged with a generation number. Only the most recently
/// issued request may apply its result, so rapid filter changes cannot leave
/// an older response on screen.
pub struct JobsStore {
    api: Arc<dyn JobsApi>,
    filters: FilterState,
    state: watch::Sender<CollectionState>,
    events: broadcast::Sender<BoardEvent>,
    /// Generation of the most recently issued list request.
    issued: AtomicU64,
    /// Generation of the most recently settled list request that was current
    /// when it settled.
    settled: AtomicU64,
    mutations: AtomicUsize,
}

impl JobsStore {
    /// Create an empty store with the default filter selection.
    pub fn new(api: Arc<dyn JobsApi>) -> Self {
        Self::with_selection(api, FilterSelection::default())
    }

    /// Create an empty store starting from `selection`.
    pub fn with_selection(api: Arc<dyn JobsApi>, selection: FilterSelection) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            filters: FilterState::with_selection(selection),
            state,
            events,
            issued: AtomicU64::new(0),
            settled: AtomicU64::new(0),
            mutations: AtomicUsize::new(0),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current snapshot.
    pub fn state(&self) -> CollectionState {
        self.state.borrow().clone()
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state.borrow().jobs.clone()
    }

    /// Held jobs narrowed by the selection's keyword.
    pub fn visible_jobs(&self) -> Vec<Job> {
        let selection = self.filters.current();
        self.state
            .borrow()
            .jobs
            .iter()
            .filter(|job| selection.matches_keyword(job))
            .cloned()
            .collect()
    }

    /// Receive a new snapshot every time the state changes.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState> {
        self.state.subscribe()
    }

    /// Subscribe to store events.
    pub fn events(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Sender half of the event stream, for sibling stores that report
    /// into the same channel.
    pub fn event_sender(&self) -> broadcast::Sender<BoardEvent> {
        self.events.clone()
    }

    /// Fetch the list scoped by `selection` and replace the held list.
    ///
    /// On failure the previous list is kept and `error` is set. Loading is
    /// cleared once the latest request settles, whichever way it went, or
    /// when the latest request is dropped before it settles.
    pub async fn refresh(&self, selection: &FilterSelection) -> RefreshOutcome {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let mut pending = PendingRefresh {
            store: self,
            generation,
            settled: false,
        };
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let query = ListQuery::from_selection(selection);
        tracing::debug!(generation, ?query, "Refreshing jobs");
        let result = self.api.list(&query).await;
        pending.settled = true;

        // The generation check and the write happen under the channel's lock,
        // so a newer list that was applied first can never be overwritten.
        let mut outcome = RefreshOutcome::Superseded;
        let mut failure = None;
        self.state.send_if_modified(|state| {
            if self.issued.load(Ordering::SeqCst) != generation {
                return false;
            }
            self.settled.store(generation, Ordering::SeqCst);

            match result {
                Ok(jobs) => {
                    outcome = RefreshOutcome::Applied { count: jobs.len() };
                    state.jobs = jobs;
                    state.error = None;
                }
                Err(e) => {
                    outcome = RefreshOutcome::Failed;
                    state.error = Some(FETCH_ERROR.to_string());
                    failure = Some(e);
                }
            }
            state.loading = self.is_busy();
            true
        });

        match (outcome, failure) {
            (RefreshOutcome::Applied { count }, _) => {
                self.broadcast(BoardEvent::JobsRefreshed {
                    generation,
                    count,
                    timestamp: Utc::now(),
                });
            }
            (RefreshOutcome::Failed, Some(e)) => {
                tracing::error!(generation, error = %e, "Error fetching jobs");
                self.broadcast(BoardEvent::RefreshFailed {
                    generation,
                    error: e.message(),
                    timestamp: Utc::now(),
                });
            }
            _ => {
                let latest = self.issued.load(Ordering::SeqCst);
                tracing::debug!(generation, latest, "Discarding superseded job list");
                self.broadcast(BoardEvent::RefreshSuperseded {
                    generation,
                    latest,
                    timestamp: Utc::now(),
                });
            }
        }
        outcome
    }

    /// Refresh with the current filter selection.
    pub async fn refetch(&self) -> RefreshOutcome {
        let selection = self.filters.current();
        self.refresh(&selection).await
    }

    /// Merge `patch` into the selection and refetch with the result.
    pub async fn update_filters(&self, patch: FilterPatch) -> FilterSelection {
        let selection = self.filters.update(patch);
        self.broadcast(BoardEvent::FiltersChanged {
            active: selection.is_active(),
            timestamp: Utc::now(),
        });
        self.refresh(&selection).await;
        selection
    }

    /// Reset the selection to its defaults and refetch.
    pub async fn clear_filters(&self) -> FilterSelection {
        let selection = self.filters.clear();
        self.broadcast(BoardEvent::FiltersChanged {
            active: false,
            timestamp: Utc::now(),
        });
        self.refresh(&selection).await;
        selection
    }

    /// Create a posting, then reconcile the list with the server.
    ///
    /// Required fields are checked by the caller. On failure the error is
    /// recorded and returned.
    pub async fn create(&self, draft: &JobDraft) -> Result<Option<Job>, ApiError> {
        let _busy = self.begin_mutation();

        match self.api.create(draft).await {
            Ok(job) => {
                let job_id = job.as_ref().map(|job| job.id.clone());
                tracing::info!(title = %draft.title, id = ?job_id, "Job created");
                self.broadcast(BoardEvent::JobCreated {
                    job_id,
                    timestamp: Utc::now(),
                });
                self.refetch().await;
                Ok(job)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Create, CREATE_ERROR, e)),
        }
    }

    /// Update an existing posting, then reconcile the list with the server.
    pub async fn update(&self, id: &JobId, draft: &JobDraft) -> Result<Option<Job>, ApiError> {
        let _busy = self.begin_mutation();

        match self.api.update(id, draft).await {
            Ok(job) => {
                tracing::info!(%id, "Job updated");
                self.broadcast(BoardEvent::JobUpdated {
                    job_id: id.clone(),
                    timestamp: Utc::now(),
                });
                self.refetch().await;
                Ok(job)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Update, UPDATE_ERROR, e)),
        }
    }

    /// Delete a posting, then reconcile the list with the server.
    pub async fn delete(&self, id: &JobId) -> Result<(), ApiError> {
        let _busy = self.begin_mutation();

        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "Job deleted");
                self.broadcast(BoardEvent::JobDeleted {
                    job_id: id.clone(),
                    timestamp: Utc::now(),
                });
                self.refetch().await;
                Ok(())
            }
            Err(e) => Err(self.mutation_failed(Mutation::Delete, DELETE_ERROR, e)),
        }
    }

    fn begin_mutation(&self) -> MutationGuard<'_> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        MutationGuard { store: self }
    }

    fn mutation_failed(&self, mutation: Mutation, message: &str, error: ApiError) -> ApiError {
        tracing::error!(%mutation, error = %error, "Job mutation failed");
        self.state.send_modify(|state| {
            state.error = Some(message.to_string());
        });
        self.broadcast(BoardEvent::MutationFailed {
            mutation,
            error: error.message(),
            timestamp: Utc::now(),
        });
        error
    }

    fn is_busy(&self) -> bool {
        self.mutations.load(Ordering::SeqCst) > 0
            || self.settled.load(Ordering::SeqCst) != self.issued.load(Ordering::SeqCst)
    }

    fn broadcast(&self, event: BoardEvent) {
        let _ = self.events.send(event);
    }
}

/// Keeps `loading` raised for the duration of a mutation.
struct MutationGuard<'a> {
    store: &'a JobsStore,
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.store.mutations.fetch_sub(1, Ordering::SeqCst);
        let busy = self.store.is_busy();
        self.store.state.send_modify(|state| state.loading = busy);
    }
}

/// Settles a list request that was dropped before its response arrived.
struct PendingRefresh<'a> {
    store: &'a JobsStore,
    generation: u64,
    settled: bool,
}

impl Drop for PendingRefresh<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let store = self.store;
        let generation = self.generation;
        tracing::debug!(generation, "Job list request dropped");
        store.state.send_modify(|state| {
            if store.issued.load(Ordering::SeqCst) == generation {
                store.settled.store(generation, Ordering::SeqCst);
            }
            state.loading = store.is_busy();
        });
    }
}

impl std::fmt::Debug for JobsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobsStore")
            .field("filters", &self.filters)
            .field("state", &*self.state.borrow())
            .field("issued", &self.issued.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
