//! HTTP access to the task service.
//!
//! The service owns both the prediction model and storage; this side only
//! knows the three endpoints below.
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`TaskService::fetch_tasks`] | `GET /tasks` |
//! | [`TaskService::predict`] | `POST /predict` |
//! | [`TaskService::create_task`] | `POST /tasks` |

use crate::config::Config;
use crate::error::{Error, Result};
use crate::task::{NewTask, Prediction, Task, TaskDraft};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

#[async_trait]
pub trait TaskService: Send + Sync {
    /// Every task the service currently holds, in its order.
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;

    async fn predict(&self, draft: &TaskDraft) -> Result<Prediction>;

    /// Persists a predicted task and returns it with its assigned id.
    async fn create_task(&self, task: &NewTask) -> Result<Task>;
}

pub struct HttpTaskService {
    client: Client,
    config: Config,
}

impl HttpTaskService {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint, status = status.as_u16(), %body, "task service response");

        if !status.is_success() {
            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let url = self.config.endpoint("tasks")?;
        self.send("GET /tasks", self.client.get(url)).await
    }

    async fn predict(&self, draft: &TaskDraft) -> Result<Prediction> {
        let url = self.config.endpoint("predict")?;
        self.send("POST /predict", self.client.post(url).json(draft)).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let url = self.config.endpoint("tasks")?;
        self.send("POST /tasks", self.client.post(url).json(task)).await
    }
}
