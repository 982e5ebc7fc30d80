//! Core domain types for the job board client.
//!
//! This crate contains shared types used across all packages:
//! - Job, JobDraft and JobType for postings
//! - FilterSelection and FilterPatch for narrowing the list
//! - FilterOptions derived from the whole collection
//! - JobForm validation run before anything reaches the network
//! - Events for store observers

mod events;
mod filter;
mod form;
mod job;
mod options;

pub use events::{BoardEvent, Mutation};
pub use filter::{Choice, FilterPatch, FilterSelection, SortOrder};
pub use form::{FormField, JobForm, ValidationErrors, parse_tags};
pub use job::{DEFAULT_LINK, Job, JobDraft, JobId, JobType};
pub use options::FilterOptions;
