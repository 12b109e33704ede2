use crate::client::TaskService;
use crate::error::Result;
use crate::task::{Task, TaskDraft};
use tracing::{debug, info};

/// `Idle -> Submitting -> Idle`. While `Submitting` the submit control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Runs the two dependent calls of one submission.
///
/// Creation is only attempted once the prediction has resolved, and the
/// returned task is the service's copy (with its id). Either call failing
/// aborts the whole sequence; nothing is retried.
pub async fn submit<S>(service: &S, draft: TaskDraft) -> Result<Task>
where
    S: TaskService + ?Sized,
{
    info!(title = %draft.title, "requesting prediction");
    let prediction = service.predict(&draft).await?;
    debug!(
        priority = %prediction.priority,
        deadline_hours = prediction.deadline_hours,
        "prediction received"
    );

    let task = service.create_task(&draft.enrich(prediction)).await?;
    info!(id = %task.id, "task created");
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::task::{Category, Priority, TaskId};
    use crate::testing::{Call, MockTaskService};

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "Write report".to_string(),
            description: "urgent".to_string(),
            category: Category::Work,
            user_priority: Priority::High,
        }
    }

    #[tokio::test]
    async fn predicts_before_creating() {
        let service = MockTaskService::new()
            .with_prediction(Priority::High, 4.0)
            .with_created_id(TaskId::Number(1));

        let task = submit(&service, draft()).await.unwrap();

        assert_eq!(task.id, TaskId::Number(1));
        assert_eq!(task.ai_priority, Priority::High);
        assert_eq!(task.ai_deadline_hours, 4.0);
        assert_eq!(task.user_priority, Priority::High);

        let calls = service.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::Predict(d) if *d == draft()));
        assert!(matches!(&calls[1], Call::CreateTask(t) if t.ai_deadline_hours == 4.0));
    }

    #[tokio::test]
    async fn prediction_failure_skips_creation() {
        let service = MockTaskService::new()
            .with_predict_error(Error::InvalidResponse {
                endpoint: "POST /predict".to_string(),
                message: "bad".to_string(),
            })
            .with_created_id(TaskId::Number(1));

        assert!(submit(&service, draft()).await.is_err());
        assert_eq!(service.calls().len(), 1);
        assert_eq!(service.create_count(), 0);
    }
}
