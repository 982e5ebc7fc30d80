//! Command handlers. Each one drives the stores the same way a UI would and
//! prints the result.

use std::sync::Arc;

use api::{ApiError, JobsApi};
use board_core::{FilterOptions, Job, JobForm, JobId};
use store::{FilterOptionsStore, JobsStore, SubmitError, submit_form};
use thiserror::Error;

use crate::cli::{CreateArgs, ListArgs, UpdateArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The store recorded a failure instead of returning one.
    #[error("{0}")]
    Store(String),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub type CliResult<T = ()> = Result<T, CliError>;

/// Output format shared by all commands.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    fn jobs(&self, jobs: &[Job]) -> CliResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(jobs)?);
            return Ok(());
        }

        if jobs.is_empty() {
            println!("No jobs found");
            return Ok(());
        }
        for job in jobs {
            println!(
                "{:>6}  {}  {} @ {}  [{}]  {}",
                job.id,
                job.posting_date,
                job.title,
                job.company,
                job.job_type,
                job.location
            );
        }
        Ok(())
    }

    fn job(&self, job: &Job) -> CliResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(job)?);
            return Ok(());
        }

        println!("{} ({})", job.title, job.id);
        println!("  Company:  {}", job.company);
        println!("  Location: {}", job.location);
        println!("  Type:     {}", job.job_type);
        println!("  Posted:   {}", job.posting_date);
        if !job.tags.is_empty() {
            println!("  Tags:     {}", job.tags.join(", "));
        }
        println!("  Link:     {}", job.link);
        if let Some(description) = &job.description {
            println!();
            println!("{}", description);
        }
        Ok(())
    }

    fn saved(&self, verb: &str, saved: Option<&Job>) -> CliResult {
        match saved {
            Some(job) => self.job(job),
            None if self.json => {
                println!("{}", serde_json::json!({ "message": format!("Job {} successfully", verb) }));
                Ok(())
            }
            None => {
                println!("Job {} successfully", verb);
                Ok(())
            }
        }
    }

    fn options(&self, options: &FilterOptions, search: Option<&str>) -> CliResult {
        let tags = options.tags_matching(search.unwrap_or_default());
        if self.json {
            let value = serde_json::json!({
                "job_types": options.job_types,
                "locations": options.locations,
                "tags": tags,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        let job_types: Vec<&str> = options.job_types.iter().map(|t| t.as_str()).collect();
        println!("Job types: {}", job_types.join(", "));
        println!("Locations: {}", options.locations.join(", "));
        println!("Tags:      {}", tags.join(", "));
        Ok(())
    }
}

/// Fail with the store's user-facing message when one was recorded.
fn ensure_no_error(store: &JobsStore) -> CliResult {
    match store.state().error {
        Some(message) => Err(CliError::Store(message)),
        None => Ok(()),
    }
}

pub async fn cmd_list(api: Arc<dyn JobsApi>, args: &ListArgs, out: Output) -> CliResult {
    let store = JobsStore::new(api);
    let selection = store.update_filters(args.to_patch()).await;
    tracing::debug!(?selection, "Listing jobs");
    ensure_no_error(&store)?;

    out.jobs(&store.visible_jobs())
}

pub async fn cmd_show(api: Arc<dyn JobsApi>, id: &str, out: Output) -> CliResult {
    let job = api.get(&JobId::new(id)).await?;
    out.job(&job)
}

pub async fn cmd_create(api: Arc<dyn JobsApi>, args: CreateArgs, out: Output) -> CliResult {
    let mut form = JobForm::new(args.date.unwrap_or_else(today));
    form.title = args.title;
    form.company = args.company;
    form.location = args.location;
    if let Some(job_type) = args.job_type {
        form.job_type = job_type;
    }
    form.tags = args.tags.unwrap_or_default();
    form.description = args.description.unwrap_or_default();
    form.link = args.link.unwrap_or_default();

    let store = JobsStore::new(api);
    let saved = submit_form(&store, &form, None).await?;
    out.saved("created", saved.as_ref())
}

pub async fn cmd_update(
    api: Arc<dyn JobsApi>,
    id: &str,
    fields: UpdateArgs,
    out: Output,
) -> CliResult {
    let id = JobId::new(id);
    let current = api.get(&id).await?;

    let mut form = JobForm::from_job(&current);
    if let Some(title) = fields.title {
        form.title = title;
    }
    if let Some(company) = fields.company {
        form.company = company;
    }
    if let Some(location) = fields.location {
        form.location = location;
    }
    if let Some(job_type) = fields.job_type {
        form.job_type = job_type;
    }
    if let Some(tags) = fields.tags {
        form.tags = tags;
    }
    if let Some(date) = fields.date {
        form.posting_date = date;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(link) = fields.link {
        form.link = link;
    }

    let store = JobsStore::new(api);
    let saved = submit_form(&store, &form, Some(&id)).await?;
    out.saved("updated", saved.as_ref())
}

pub async fn cmd_delete(api: Arc<dyn JobsApi>, id: &str, out: Output) -> CliResult {
    let store = JobsStore::new(api);
    store.delete(&JobId::new(id)).await?;

    if out.json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted job {}", id);
    }
    Ok(())
}

pub async fn cmd_options(api: Arc<dyn JobsApi>, search: Option<&str>, out: Output) -> CliResult {
    let store = FilterOptionsStore::new(api);
    let options = store.load().await?;
    out.options(&options, search)
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
