//! Filter selection and merge-update semantics.

use crate::{Job, JobType};

/// A filter field that is either unrestricted ("All") or pinned to one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::All => write!(f, "All"),
            Choice::Only(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Choice<String> {
    fn from(value: &str) -> Self {
        if value == "All" {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }
}

impl From<&str> for Choice<JobType> {
    fn from(value: &str) -> Self {
        if value == "All" {
            Choice::All
        } else {
            Choice::Only(JobType::from(value))
        }
    }
}

/// Ordering applied by the server to listed jobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    /// Value of the `sort` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "posting_date_desc",
            SortOrder::OldestFirst => "posting_date_asc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::NewestFirst => write!(f, "newest first"),
            SortOrder::OldestFirst => write!(f, "oldest first"),
        }
    }
}

/// The active narrowing and sorting criteria.
///
/// Every field always holds a value from its domain; the only way to change
/// a selection is [`FilterSelection::merge`] or a reset to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Substring matched locally against the held list. Never sent to the server.
    pub keyword: String,
    pub job_type: Choice<JobType>,
    pub location: Choice<String>,
    /// Ordered, semantically a set. Only the first entry reaches the server.
    pub tags: Vec<String>,
    pub sort: SortOrder,
}

impl FilterSelection {
    /// Shallow merge: fields present in `patch` replace the current value,
    /// the rest are retained.
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(keyword) = patch.keyword {
            self.keyword = keyword;
        }
        if let Some(job_type) = patch.job_type {
            self.job_type = job_type;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }

    /// Return a copy with `patch` merged in.
    pub fn merged(&self, patch: FilterPatch) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }

    /// Whether any narrowing criterion is set. Sort order does not count.
    pub fn is_active(&self) -> bool {
        !self.keyword.is_empty()
            || !self.job_type.is_all()
            || !self.location.is_all()
            || !self.tags.is_empty()
    }

    /// The tag sent to the server, if any.
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Case-insensitive keyword match against title, company, location and tags.
    /// An empty keyword matches everything.
    pub fn matches_keyword(&self, job: &Job) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }

        job.title.to_lowercase().contains(&keyword)
            || job.company.to_lowercase().contains(&keyword)
            || job.location.to_lowercase().contains(&keyword)
            || job
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&keyword))
    }
}

/// A partial filter update. `None` fields leave the selection untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub keyword: Option<String>,
    pub job_type: Option<Choice<JobType>>,
    pub location: Option<Choice<String>>,
    pub tags: Option<Vec<String>>,
    pub sort: Option<SortOrder>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn job_type(mut self, job_type: Choice<JobType>) -> Self {
        self.job_type = Some(job_type);
        self
    }

    pub fn location(mut self, location: Choice<String>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Patch that adds `tag` to the current tags, or removes it if already
    /// selected. Order of the remaining tags is kept.
    pub fn toggle_tag(current: &FilterSelection, tag: &str) -> Self {
        let mut tags = current.tags.clone();
        if let Some(pos) = tags.iter().position(|t| t == tag) {
            tags.remove(pos);
        } else {
            tags.push(tag.to_string());
        }
        Self::new().tags(tags)
    }

    /// Patch that sets every field back to its default.
    pub fn reset() -> Self {
        let defaults = FilterSelection::default();
        Self {
            keyword: Some(defaults.keyword),
            job_type: Some(defaults.job_type),
            location: Some(defaults.location),
            tags: Some(defaults.tags),
            sort: Some(defaults.sort),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::disallowed_methods)]

    use chrono::NaiveDate;

    use super::*;
    use crate::JobId;

    fn sample_selection() -> FilterSelection {
        FilterSelection {
            keyword: "rust".into(),
            job_type: Choice::Only(JobType::Contract),
            location: Choice::Only("Berlin".into()),
            tags: vec!["Go".into(), "SQL".into()],
            sort: SortOrder::OldestFirst,
        }
    }

    fn job(title: &str, tags: &[&str]) -> Job {
        Job {
            id: JobId::new("1"),
            title: title.into(),
            company: "Acme".into(),
            location: "Lisbon".into(),
            job_type: JobType::FullTime,
            posting_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: None,
            link: "https://acme.test".into(),
        }
    }

    #[test]
    fn defaults() {
        let selection = FilterSelection::default();
        assert_eq!(selection.keyword, "");
        assert_eq!(selection.job_type, Choice::All);
        assert_eq!(selection.location, Choice::All);
        assert!(selection.tags.is_empty());
        assert_eq!(selection.sort, SortOrder::NewestFirst);
        assert!(!selection.is_active());
    }

    #[test]
    fn merge_replaces_only_supplied_fields() {
        let before = sample_selection();

        let after = before.merged(FilterPatch::new().location(Choice::All));
        assert_eq!(after.location, Choice::All);
        assert_eq!(after.keyword, before.keyword);
        assert_eq!(after.job_type, before.job_type);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.sort, before.sort);

        let after = before.merged(
            FilterPatch::new()
                .keyword("")
                .sort(SortOrder::NewestFirst),
        );
        assert_eq!(after.keyword, "");
        assert_eq!(after.sort, SortOrder::NewestFirst);
        assert_eq!(after.location, before.location);
        assert_eq!(after.tags, before.tags);
    }

    #[test]
    fn empty_patch_is_identity() {
        let before = sample_selection();
        assert!(FilterPatch::new().is_empty());
        assert_eq!(before.merged(FilterPatch::new()), before);
    }

    #[test]
    fn reset_patch_yields_defaults() {
        assert_eq!(
            sample_selection().merged(FilterPatch::reset()),
            FilterSelection::default()
        );
    }

    #[test]
    fn unknown_job_type_is_kept_verbatim() {
        let after = FilterSelection::default()
            .merged(FilterPatch::new().job_type(Choice::from("Freelance")));
        assert_eq!(
            after.job_type,
            Choice::Only(JobType::Other("Freelance".into()))
        );
    }

    #[test]
    fn toggle_tag_adds_and_removes() {
        let selection = sample_selection();

        let removed = selection.merged(FilterPatch::toggle_tag(&selection, "Go"));
        assert_eq!(removed.tags, vec!["SQL".to_string()]);
        assert_eq!(removed.primary_tag(), Some("SQL"));

        let added = removed.merged(FilterPatch::toggle_tag(&removed, "Rust"));
        assert_eq!(added.tags, vec!["SQL".to_string(), "Rust".to_string()]);
    }

    #[test]
    fn keyword_matching() {
        let mut selection = FilterSelection::default();
        let posting = job("Senior Rust Developer", &["Tokio"]);
        assert!(selection.matches_keyword(&posting));

        selection.keyword = "rust".into();
        assert!(selection.matches_keyword(&posting));

        selection.keyword = "tokio".into();
        assert!(selection.matches_keyword(&posting));

        selection.keyword = "python".into();
        assert!(!selection.matches_keyword(&posting));
        assert!(selection.is_active());
    }
}
