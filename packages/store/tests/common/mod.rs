#![allow(clippy::disallowed_methods)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use api::{ApiError, ApiFuture, JobsApi, ListQuery};
use board_core::{Job, JobDraft, JobId, JobType};
use chrono::NaiveDate;

/// A transport call as seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Get(JobId),
    Create(JobDraft),
    Update(JobId, JobDraft),
    Delete(JobId),
    FetchAll,
}

/// In-memory jobs resource that records every call.
#[derive(Default)]
pub struct FakeApi {
    jobs: Mutex<Vec<Job>>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<i64>,
    list_delays: Mutex<HashMap<String, Duration>>,
    pub fail_list: AtomicBool,
    pub fail_mutations: AtomicBool,
}

impl FakeApi {
    pub fn new(jobs: Vec<Job>) -> Self {
        let next_id = jobs.len() as i64 + 100;
        Self {
            jobs: Mutex::new(jobs),
            next_id: Mutex::new(next_id),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn server_jobs(&self) -> Vec<Job> {
        self.jobs.lock().unwrap().clone()
    }

    /// Delay list responses whose `location` parameter equals `location`.
    pub fn delay_list_for(&self, location: &str, delay: Duration) {
        self.list_delays
            .lock()
            .unwrap()
            .insert(location.to_string(), delay);
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::Status {
            status: 500,
            message: message.to_string(),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: "Job not found".to_string(),
        }
    }

    fn apply_query(&self, query: &ListQuery) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|job| {
                query
                    .job_type
                    .as_deref()
                    .is_none_or(|t| job.job_type.as_str() == t)
            })
            .filter(|job| query.location.as_deref().is_none_or(|l| job.location == l))
            .filter(|job| {
                query
                    .tag
                    .as_deref()
                    .is_none_or(|tag| job.tags.iter().any(|t| t == tag))
            })
            .cloned()
            .collect();

        jobs.sort_by_key(|job| job.posting_date);
        if query.sort != Some("posting_date_asc") {
            jobs.reverse();
        }
        jobs
    }

    fn materialize(id: JobId, draft: &JobDraft) -> Job {
        Job {
            id,
            title: draft.title.clone(),
            company: draft.company.clone(),
            location: draft.location.clone(),
            job_type: draft.job_type.clone(),
            posting_date: draft.posting_date,
            tags: draft.tags.clone(),
            description: draft.description.clone(),
            link: draft
                .link
                .clone()
                .unwrap_or_else(|| board_core::DEFAULT_LINK.to_string()),
        }
    }
}

impl JobsApi for FakeApi {
    fn list<'a>(&'a self, query: &'a ListQuery) -> ApiFuture<'a, Vec<Job>> {
        self.record(Call::List(query.clone()));
        let delay = query
            .location
            .as_ref()
            .and_then(|l| self.list_delays.lock().unwrap().get(l).copied());
        let fail = self.fail_list.load(Ordering::SeqCst);
        let jobs = self.apply_query(query);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(Self::server_error("Failed to fetch jobs"));
            }
            Ok(jobs)
        })
    }

    fn get<'a>(&'a self, id: &'a JobId) -> ApiFuture<'a, Job> {
        self.record(Call::Get(id.clone()));
        let found = self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .find(|job| &job.id == id)
            .cloned();
        Box::pin(async move { found.ok_or_else(Self::not_found) })
    }

    fn create<'a>(&'a self, draft: &'a JobDraft) -> ApiFuture<'a, Option<Job>> {
        self.record(Call::Create(draft.clone()));
        let result = if self.fail_mutations.load(Ordering::SeqCst) {
            Err(Self::server_error("Failed to create job"))
        } else {
            let mut next_id = self.next_id.lock().unwrap();
            let job = Self::materialize(JobId::from(*next_id), draft);
            *next_id += 1;
            self.jobs.lock().unwrap().push(job.clone());
            Ok(Some(job))
        };
        Box::pin(async move { result })
    }

    fn update<'a>(&'a self, id: &'a JobId, draft: &'a JobDraft) -> ApiFuture<'a, Option<Job>> {
        self.record(Call::Update(id.clone(), draft.clone()));
        let result = if self.fail_mutations.load(Ordering::SeqCst) {
            Err(Self::server_error("Failed to update job"))
        } else {
            let mut jobs = self.jobs.lock().unwrap();
            match jobs.iter_mut().find(|job| &job.id == id) {
                Some(job) => {
                    *job = Self::materialize(id.clone(), draft);
                    Ok(Some(job.clone()))
                }
                None => Err(Self::not_found()),
            }
        };
        Box::pin(async move { result })
    }

    fn delete<'a>(&'a self, id: &'a JobId) -> ApiFuture<'a, ()> {
        self.record(Call::Delete(id.clone()));
        let result = if self.fail_mutations.load(Ordering::SeqCst) {
            Err(Self::server_error("Failed to delete job"))
        } else {
            let mut jobs = self.jobs.lock().unwrap();
            let before = jobs.len();
            jobs.retain(|job| &job.id != id);
            if jobs.len() == before {
                Err(Self::not_found())
            } else {
                Ok(())
            }
        };
        Box::pin(async move { result })
    }

    fn fetch_all(&self) -> ApiFuture<'_, Vec<Job>> {
        self.record(Call::FetchAll);
        let fail = self.fail_list.load(Ordering::SeqCst);
        let jobs = self.jobs.lock().unwrap().clone();
        Box::pin(async move {
            if fail {
                return Err(Self::server_error("Failed to fetch filter options"));
            }
            Ok(jobs)
        })
    }
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

pub fn job(id: &str, title: &str, job_type: JobType, location: &str, day: u32, tags: &[&str]) -> Job {
    Job {
        id: JobId::new(id),
        title: title.to_string(),
        company: "Acme".to_string(),
        location: location.to_string(),
        job_type,
        posting_date: date(day),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: None,
        link: format!("https://acme.test/jobs/{}", id),
    }
}

pub fn seed() -> Vec<Job> {
    vec![
        job("1", "Backend Engineer", JobType::FullTime, "Berlin", 10, &["Go", "SQL"]),
        job("2", "Go Contractor", JobType::Contract, "Berlin", 12, &["Go"]),
        job("3", "Data Intern", JobType::Internship, "Remote", 5, &["Python"]),
        job("42", "Rust Developer", JobType::FullTime, "Lisbon", 20, &["Rust"]),
    ]
}

pub fn draft(title: &str, job_type: JobType, location: &str) -> JobDraft {
    JobDraft::new(title, "Globex", location, date(25)).with_job_type(job_type)
}
