//! Job queue glue: turn a JSON array into typed jobs on a queue.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Job type used for push notification batches.
pub const PUSH_NOTIFICATION_JOB: &str = "push_notification_code_3";

pub type JobId = u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("Jobs is not an array")]
    NotASequence,

    #[error("queue rejected job: {0}")]
    Queue(String),
}

/// A unit of work waiting on a queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub kind: String,
    pub data: Value,
}

pub trait JobQueue {
    /// Enqueue a job and return its id.
    fn push(&self, kind: &str, data: Value) -> Result<JobId, JobError>;
}

/// Queue that keeps every pushed job in memory, in order.
///
/// Ids come from a counter that only moves forward; `clear` drops jobs but
/// never hands an id out twice.
#[derive(Debug, Default)]
pub struct InMemoryQueue {
    state: Mutex<QueueState>,
}

#[derive(Debug, Default)]
struct QueueState {
    last_id: JobId,
    jobs: Vec<Job>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the jobs pushed since the last `clear`.
    pub fn jobs(&self) -> Vec<Job> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .jobs
            .clone()
    }

    pub fn clear(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .jobs
            .clear();
    }
}

impl JobQueue for InMemoryQueue {
    fn push(&self, kind: &str, data: Value) -> Result<JobId, JobError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| JobError::Queue(e.to_string()))?;
        state.last_id += 1;
        let id = state.last_id;
        state.jobs.push(Job {
            id,
            kind: kind.to_string(),
            data,
        });
        Ok(id)
    }
}

/// Push one `kind` job per element of `items`, preserving order.
///
/// Fails with [`JobError::NotASequence`] before touching the queue if `items`
/// is not a JSON array.
pub fn create_jobs(
    items: &Value,
    queue: &impl JobQueue,
    kind: &str,
) -> Result<Vec<JobId>, JobError> {
    let Value::Array(items) = items else {
        return Err(JobError::NotASequence);
    };

    items
        .iter()
        .map(|item| {
            let id = queue.push(kind, item.clone())?;
            info!(job = id, kind, "Notification job created: {id}");
            Ok(id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_is_rejected() {
        let queue = InMemoryQueue::new();
        let result = create_jobs(&json!("not an array"), &queue, PUSH_NOTIFICATION_JOB);
        assert_eq!(result, Err(JobError::NotASequence));
        assert_eq!(result.unwrap_err().to_string(), "Jobs is not an array");
        assert!(queue.jobs().is_empty());
    }

    #[test]
    fn object_is_rejected() {
        let queue = InMemoryQueue::new();
        let result = create_jobs(&json!({ "phoneNumber": "1" }), &queue, PUSH_NOTIFICATION_JOB);
        assert_eq!(result, Err(JobError::NotASequence));
    }

    #[test]
    fn creates_one_job_per_item_in_order() {
        let queue = InMemoryQueue::new();
        let items = json!([
            { "phoneNumber": "1234567890", "message": "This is the code 1" },
            { "phoneNumber": "0987654321", "message": "This is the code 2" },
        ]);

        let ids = create_jobs(&items, &queue, PUSH_NOTIFICATION_JOB).unwrap();
        assert_eq!(ids, vec![1, 2]);

        let jobs = queue.jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].kind, PUSH_NOTIFICATION_JOB);
        assert_eq!(jobs[0].data, items[0]);
        assert_eq!(jobs[1].kind, PUSH_NOTIFICATION_JOB);
        assert_eq!(jobs[1].data, items[1]);
    }

    #[test]
    fn empty_array_creates_nothing() {
        let queue = InMemoryQueue::new();
        let ids = create_jobs(&json!([]), &queue, PUSH_NOTIFICATION_JOB).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn clear_empties_queue() {
        let queue = InMemoryQueue::new();
        create_jobs(&json!([1, 2, 3]), &queue, PUSH_NOTIFICATION_JOB).unwrap();
        queue.clear();
        assert!(queue.jobs().is_empty());
    }

    #[test]
    fn ids_keep_increasing_after_clear() {
        let queue = InMemoryQueue::new();
        let first = create_jobs(&json!([1, 2]), &queue, PUSH_NOTIFICATION_JOB).unwrap();
        queue.clear();
        let second = create_jobs(&json!([3]), &queue, PUSH_NOTIFICATION_JOB).unwrap();

        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![3]);
        assert_eq!(queue.jobs()[0].id, 3);
    }
}
