//! Editable form state for a posting, and the checks run before submission.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::{Job, JobDraft, JobType};

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Company,
    Location,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Company => "company",
            FormField::Location => "location",
        }
    }
}

/// Per-field validation messages. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid job form: {}", self.summary())]
pub struct ValidationErrors {
    fields: BTreeMap<FormField, &'static str>,
}

impl ValidationErrors {
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.fields.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.fields.insert(field, message);
    }

    fn summary(&self) -> String {
        self.fields
            .values()
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Raw form input. Tags are typed as one comma-separated string.
#[derive(Debug, Clone, PartialEq)]
pub struct JobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub tags: String,
    pub description: String,
    pub posting_date: NaiveDate,
    pub link: String,
}

impl JobForm {
    /// Empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            job_type: JobType::FullTime,
            tags: String::new(),
            description: String::new(),
            posting_date: today,
            link: String::new(),
        }
    }

    /// Form prefilled from an existing posting, for editing.
    pub fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type.clone(),
            tags: job.tags.join(", "),
            description: job.description.clone().unwrap_or_default(),
            posting_date: job.posting_date,
            link: job.link.clone(),
        }
    }

    /// Check required fields. Title, company and location must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.title.trim().is_empty() {
            errors.insert(FormField::Title, "Job title is required");
        }
        if self.company.trim().is_empty() {
            errors.insert(FormField::Company, "Company name is required");
        }
        if self.location.trim().is_empty() {
            errors.insert(FormField::Location, "Location is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and convert into a draft ready for the transport.
    pub fn to_draft(&self) -> Result<JobDraft, ValidationErrors> {
        self.validate()?;

        let description = self.description.trim();
        let link = self.link.trim();

        Ok(JobDraft {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            posting_date: self.posting_date,
            tags: parse_tags(&self.tags),
            description: (!description.is_empty()).then(|| description.to_string()),
            link: (!link.is_empty()).then(|| link.to_string()),
        })
    }
}

/// Split a comma-separated tag list, trimming entries and dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
