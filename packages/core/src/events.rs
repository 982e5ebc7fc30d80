//! Events broadcast by the client stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::JobId;

/// Which mutation an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::Create => write!(f, "create"),
            Mutation::Update => write!(f, "update"),
            Mutation::Delete => write!(f, "delete"),
        }
    }
}

/// Events emitted by the stores so observers can react without polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A list request was applied.
    JobsRefreshed {
        generation: u64,
        count: usize,
        timestamp: DateTime<Utc>,
    },
    /// A list request failed; the previous list is kept.
    RefreshFailed {
        generation: u64,
        error: String,
        timestamp: DateTime<Utc>,
    },
    /// A list response arrived after a newer request was issued and was dropped.
    RefreshSuperseded {
        generation: u64,
        latest: u64,
        timestamp: DateTime<Utc>,
    },
    /// The server accepted a new posting.
    JobCreated {
        /// Absent when the server only acknowledges the write.
        job_id: Option<JobId>,
        timestamp: DateTime<Utc>,
    },
    /// The server accepted changes to a posting.
    JobUpdated {
        job_id: JobId,
        timestamp: DateTime<Utc>,
    },
    /// The server removed a posting.
    JobDeleted {
        job_id: JobId,
        timestamp: DateTime<Utc>,
    },
    /// A create, update or delete was rejected.
    MutationFailed {
        mutation: Mutation,
        error: String,
        timestamp: DateTime<Utc>,
    },
    /// The filter selection changed.
    FiltersChanged {
        active: bool,
        timestamp: DateTime<Utc>,
    },
    /// Filter options were derived from a fresh copy of the collection.
    OptionsLoaded {
        job_types: usize,
        locations: usize,
        tags: usize,
        timestamp: DateTime<Utc>,
    },
}

impl BoardEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            BoardEvent::JobsRefreshed { timestamp, .. } => *timestamp,
            BoardEvent::RefreshFailed { timestamp, .. } => *timestamp,
            BoardEvent::RefreshSuperseded { timestamp, .. } => *timestamp,
            BoardEvent::JobCreated { timestamp, .. } => *timestamp,
            BoardEvent::JobUpdated { timestamp, .. } => *timestamp,
            BoardEvent::JobDeleted { timestamp, .. } => *timestamp,
            BoardEvent::MutationFailed { timestamp, .. } => *timestamp,
            BoardEvent::FiltersChanged { timestamp, .. } => *timestamp,
            BoardEvent::OptionsLoaded { timestamp, .. } => *timestamp,
        }
    }

    /// The posting this event is about, if any.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            BoardEvent::JobCreated { job_id, .. } => job_id.as_ref(),
            BoardEvent::JobUpdated { job_id, .. } => Some(job_id),
            BoardEvent::JobDeleted { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    /// Short description for logging.
    pub fn description(&self) -> String {
        match self {
            BoardEvent::JobsRefreshed {
                generation, count, ..
            } => format!("Refresh #{} loaded {} jobs", generation, count),
            BoardEvent::RefreshFailed {
                generation, error, ..
            } => format!("Refresh #{} failed: {}", generation, error),
            BoardEvent::RefreshSuperseded {
                generation, latest, ..
            } => format!("Refresh #{} superseded by #{}", generation, latest),
            BoardEvent::JobCreated { job_id, .. } => match job_id {
                Some(id) => format!("Job {} created", id),
                None => "Job created".to_string(),
            },
            BoardEvent::JobUpdated { job_id, .. } => format!("Job {} updated", job_id),
            BoardEvent::JobDeleted { job_id, .. } => format!("Job {} deleted", job_id),
            BoardEvent::MutationFailed {
                mutation, error, ..
            } => format!("Job {} failed: {}", mutation, error),
            BoardEvent::FiltersChanged { active, .. } => {
                if *active {
                    "Filters changed".to_string()
                } else {
                    "Filters cleared".to_string()
                }
            }
            BoardEvent::OptionsLoaded {
                job_types,
                locations,
                tags,
                ..
            } => format!(
                "Loaded {} job types, {} locations, {} tags",
                job_types, locations, tags
            ),
        }
    }
}
