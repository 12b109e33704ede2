//! In-memory [`TaskService`] for exercising the submission workflow without
//! a server.
//!
//! Responses are scripted per endpoint and consumed in order; every call is
//! recorded so tests can check what was sent and in which order.
//!
//! ```rust
//! use taskers::task::{Priority, TaskId};
//! use taskers::testing::MockTaskService;
//!
//! let service = MockTaskService::new()
//!     .with_prediction(Priority::High, 4.0)
//!     .with_created_id(TaskId::Number(1));
//! assert_eq!(service.calls().len(), 0);
//! ```

use crate::client::TaskService;
use crate::error::{Error, Result};
use crate::task::{NewTask, Prediction, Priority, Task, TaskDraft, TaskId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One recorded call against the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchTasks,
    Predict(TaskDraft),
    CreateTask(NewTask),
}

enum CreateResponse {
    /// Echo the payload back under this id.
    Echo(TaskId),
    Err(Error),
}

#[derive(Default)]
struct Script {
    fetch: VecDeque<Result<Vec<Task>>>,
    predict: VecDeque<Result<Prediction>>,
    create: VecDeque<CreateResponse>,
}

#[derive(Clone, Default)]
pub struct MockTaskService {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unscripted(endpoint: &str) -> Error {
    Error::InvalidResponse {
        endpoint: endpoint.to_string(),
        message: "no scripted response".to_string(),
    }
}

impl MockTaskService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        lock(&self.script).fetch.push_back(Ok(tasks));
        self
    }

    pub fn with_fetch_error(self, err: Error) -> Self {
        lock(&self.script).fetch.push_back(Err(err));
        self
    }

    pub fn with_prediction(self, priority: Priority, deadline_hours: f64) -> Self {
        lock(&self.script).predict.push_back(Ok(Prediction {
            priority,
            deadline_hours,
        }));
        self
    }

    pub fn with_predict_error(self, err: Error) -> Self {
        lock(&self.script).predict.push_back(Err(err));
        self
    }

    pub fn with_created_id(self, id: TaskId) -> Self {
        lock(&self.script).create.push_back(CreateResponse::Echo(id));
        self
    }

    pub fn with_create_error(self, err: Error) -> Self {
        lock(&self.script).create.push_back(CreateResponse::Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn predict_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Predict(_)))
    }

    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, Call::CreateTask(_)))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl TaskService for MockTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.record(Call::FetchTasks);
        lock(&self.script)
            .fetch
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn predict(&self, draft: &TaskDraft) -> Result<Prediction> {
        self.record(Call::Predict(draft.clone()));
        lock(&self.script)
            .predict
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("POST /predict")))
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.record(Call::CreateTask(task.clone()));
        let next = lock(&self.script).create.pop_front();
        match next {
            Some(CreateResponse::Echo(id)) => Ok(Task {
                id,
                title: task.title.clone(),
                description: task.description.clone(),
                category: task.category,
                user_priority: task.user_priority,
                ai_priority: task.ai_priority,
                ai_deadline_hours: task.ai_deadline_hours,
            }),
            Some(CreateResponse::Err(err)) => Err(err),
            None => Err(unscripted("POST /tasks")),
        }
    }
}
