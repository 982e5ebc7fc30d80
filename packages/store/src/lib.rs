//! Client-side state for the job board.
//!
//! - [`FilterState`] holds the active selection and merges partial updates
//! - [`JobsStore`] holds the fetched list and runs create/update/delete,
//!   each followed by a full refresh
//! - [`FilterOptionsStore`] derives filter choices from the whole collection
//!
//! Stores are plain objects: state is read with `state()` and observed with
//! `subscribe()` (a `tokio::sync::watch` receiver). Store events go out on a
//! broadcast channel.

mod filter_state;
mod jobs_store;
mod options_store;
mod submit;

pub use filter_state::FilterState;
pub use jobs_store::{
    CREATE_ERROR, CollectionState, DELETE_ERROR, FETCH_ERROR, JobsStore, RefreshOutcome,
    UPDATE_ERROR,
};
pub use options_store::{FilterOptionsStore, OptionsState};
pub use submit::{SubmitError, submit_form};
