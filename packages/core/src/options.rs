//! Distinct filter choices derived from the whole collection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Job, JobType};

/// Every job type, location and tag present in the collection.
///
/// Derived from the unfiltered list, so the choices stay complete no matter
/// how the current selection narrows the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub job_types: Vec<JobType>,
    pub locations: Vec<String>,
    pub tags: Vec<String>,
}

impl FilterOptions {
    /// Derive distinct, sorted choices. Input order does not matter.
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let job_types: BTreeSet<&str> = jobs.iter().map(|job| job.job_type.as_str()).collect();
        let locations: BTreeSet<&str> = jobs.iter().map(|job| job.location.as_str()).collect();
        let tags: BTreeSet<&str> = jobs
            .iter()
            .flat_map(|job| job.tags.iter().map(String::as_str))
            .collect();

        Self {
            job_types: job_types.into_iter().map(JobType::from).collect(),
            locations: locations.into_iter().map(str::to_string).collect(),
            tags: tags.into_iter().map(str::to_string).collect(),
        }
    }

    /// Tags containing `term`, case-insensitively. An empty term returns all tags.
    pub fn tags_matching(&self, term: &str) -> Vec<&str> {
        let term = term.to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.to_lowercase().contains(&term))
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.job_types.is_empty() && self.locations.is_empty() && self.tags.is_empty()
    }
}
