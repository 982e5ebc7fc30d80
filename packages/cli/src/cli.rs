use board_core::{Choice, FilterPatch, JobType, SortOrder};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(about = "List, filter and edit job postings on a job board backend")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides JOB_BOARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List postings matching the given filters
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a single posting
    Show {
        /// Posting ID
        id: String,
    },

    /// Create a posting
    Create(CreateArgs),

    /// Update a posting; omitted fields keep their current values
    Update {
        /// Posting ID
        id: String,

        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Delete a posting
    #[command(visible_alias = "rm")]
    Delete {
        /// Posting ID
        id: String,
    },

    /// Show the job types, locations and tags available for filtering
    Options {
        /// Only list tags containing this text
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against title, company, location and tags
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Job type, e.g. Full-time, Part-time, Contract, Internship
    #[arg(short = 't', long, value_parser = parse_job_type)]
    pub job_type: Option<JobType>,

    /// Exact location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Tag to filter by (repeatable; the first one is sent to the server)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Sort by posting date
    #[arg(short, long, value_enum, default_value_t = SortArg::Newest)]
    pub sort: SortArg,
}

impl ListArgs {
    /// The filter change these arguments describe.
    pub fn to_patch(&self) -> FilterPatch {
        let mut patch = FilterPatch::new().sort(self.sort.into());
        if let Some(keyword) = &self.keyword {
            patch = patch.keyword(keyword.clone());
        }
        if let Some(job_type) = &self.job_type {
            patch = patch.job_type(Choice::Only(job_type.clone()));
        }
        if let Some(location) = &self.location {
            patch = patch.location(Choice::Only(location.clone()));
        }
        if !self.tags.is_empty() {
            patch = patch.tags(self.tags.clone());
        }
        patch
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Job title
    #[arg(long)]
    pub title: String,

    /// Company name
    #[arg(long)]
    pub company: String,

    /// Location
    #[arg(long)]
    pub location: String,

    /// Job type (default: Full-time)
    #[arg(short = 't', long, value_parser = parse_job_type)]
    pub job_type: Option<JobType>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Posting date as YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Description text
    #[arg(short, long)]
    pub description: Option<String>,

    /// Link to the original posting
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(short = 't', long, value_parser = parse_job_type)]
    pub job_type: Option<JobType>,

    /// Comma-separated tags; an empty string clears them
    #[arg(long)]
    pub tags: Option<String>,

    /// Posting date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    #[default]
    Newest,
    Oldest,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => SortOrder::NewestFirst,
            SortArg::Oldest => SortOrder::OldestFirst,
        }
    }
}

/// Known job types match case-insensitively; anything else is kept verbatim.
fn parse_job_type(s: &str) -> Result<JobType, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("job type must not be empty".to_string());
    }

    let known = JobType::KNOWN
        .into_iter()
        .find(|job_type| job_type.as_str().eq_ignore_ascii_case(trimmed));
    Ok(known.unwrap_or_else(|| JobType::from(trimmed)))
}
