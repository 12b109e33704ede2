use crate::client::TaskService;
use crate::error::{Error, Result};
use crate::form::TaskForm;
use crate::task::{Task, TaskDraft};
use crate::task_list::TaskList;
use crate::workflow::{self, SubmissionState};
use chrono::{DateTime, Local};
use tracing::{error, warn};

pub const TITLE_REQUIRED: &str = "Title is required!";
pub const SUBMISSION_BUSY: &str = "Still analyzing the previous task.";
pub const SUBMISSION_FAILED: &str = "Failed to create task. Make sure the backend is running.";
pub const LOAD_FAILED: &str = "Could not load tasks. Make sure the backend is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Alert,
    Error,
}

/// Modal message shown until the user dismisses it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub at: DateTime<Local>,
}

impl Notice {
    fn new(kind: NoticeKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            at: Local::now(),
        }
    }
}

/// Results delivered back to the event loop by spawned network calls.
#[derive(Debug)]
pub enum AppEvent {
    TasksLoaded(Result<Vec<Task>>),
    SubmissionFinished(Result<Task>),
}

/// All UI state. The event loop owns it; rendering only borrows it.
#[derive(Debug, Default)]
pub struct App {
    pub form: TaskForm,
    pub tasks: TaskList,
    state: SubmissionState,
    notice: Option<Notice>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::TasksLoaded(result) => self.finish_load(result),
            AppEvent::SubmissionFinished(outcome) => self.finish_submission(outcome),
        }
    }

    pub fn finish_load(&mut self, result: Result<Vec<Task>>) {
        match result {
            Ok(tasks) => self.tasks.load(tasks),
            Err(err) => {
                error!(error = %err, "error fetching tasks");
                self.notice = Some(Notice::new(NoticeKind::Error, LOAD_FAILED));
            }
        }
    }

    /// Enters `Submitting` and hands back the form snapshot to send.
    ///
    /// Rejected without side effects on the task list when the title is
    /// blank or another submission is still running.
    pub fn begin_submission(&mut self) -> Result<TaskDraft> {
        if self.is_submitting() {
            self.notice = Some(Notice::new(NoticeKind::Alert, SUBMISSION_BUSY));
            return Err(Error::SubmissionInFlight);
        }
        let draft = self.form.draft().inspect_err(|_| {
            self.notice = Some(Notice::new(NoticeKind::Alert, TITLE_REQUIRED));
        })?;
        self.state = SubmissionState::Submitting;
        Ok(draft)
    }

    /// Applies the workflow outcome and returns to `Idle`.
    pub fn finish_submission(&mut self, outcome: Result<Task>) {
        match outcome {
            Ok(task) => self.complete_submission(task),
            Err(err) => self.fail_submission(&err),
        }
    }

    fn complete_submission(&mut self, task: Task) {
        self.leave_submitting();
        self.tasks.push(task);
        self.form.reset();
    }

    fn fail_submission(&mut self, err: &Error) {
        self.leave_submitting();
        error!(error = %err, "error creating task");
        self.notice = Some(Notice::new(NoticeKind::Error, SUBMISSION_FAILED));
    }

    fn leave_submitting(&mut self) {
        if !self.is_submitting() {
            warn!("submission finished while idle");
        }
        self.state = SubmissionState::Idle;
    }

    /// Whole submission in one await; used outside the interactive loop.
    pub async fn submit<S>(&mut self, service: &S) -> Result<&Task>
    where
        S: TaskService + ?Sized,
    {
        let draft = self.begin_submission()?;
        match workflow::submit(service, draft).await {
            Ok(task) => self.complete_submission(task),
            Err(err) => {
                self.fail_submission(&err);
                return Err(err);
            }
        }
        self.tasks.tasks().last().ok_or_else(|| Error::InvalidResponse {
            endpoint: "POST /tasks".to_string(),
            message: "created task missing from list".to_string(),
        })
    }
}
