//! Dioxus bindings for the job board stores.
//!
//! Each hook owns one store for the lifetime of the component, mirrors the
//! store's watch channel into a [`Signal`] and exposes actions that run on the
//! component's task scope.

use dioxus::prelude::*;
use tokio::sync::watch;

mod jobs;
mod options;

pub use jobs::{UseJobs, use_jobs};
pub use options::{UseFilterOptions, use_filter_options};

/// Copy every snapshot published on `rx` into `signal` until the store is dropped.
async fn mirror<T: Clone + 'static>(mut rx: watch::Receiver<T>, mut signal: Signal<T>) {
    // Changes published before the subscription are picked up here.
    signal.set(rx.borrow_and_update().clone());

    while rx.changed().await.is_ok() {
        let snapshot = rx.borrow_and_update().clone();
        signal.set(snapshot);
    }
}
