mod common;

use common::{persisted_report, render, service_for, setup_mock_server, write_report_app};
use serde_json::json;
use taskers::app::{App, AppEvent, SUBMISSION_FAILED, TITLE_REQUIRED};
use taskers::client::TaskService;
use taskers::task::{Category, Priority, TaskId};
use taskers::workflow::{self, SubmissionState};
use taskers::Error;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_prediction(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "priority": "High", "deadlineHours": 4 })),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_creation(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(persisted_report()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn write_report_scenario() {
    let server = setup_mock_server().await;
    mount_prediction(&server, 1).await;
    mount_creation(&server, 1).await;
    let service = service_for(&server);
    let mut app = write_report_app();

    let task = assert_ok!(app.submit(&service).await).clone();

    assert_eq!(task.id, TaskId::Number(1));
    assert_eq!(task.ai_priority, Priority::High);
    assert_eq!(task.ai_deadline_hours, 4.0);
    assert_eq!(app.tasks.len(), 1);
    assert!(app.form.title.is_empty());
    assert!(app.form.description.is_empty());
    assert_eq!(app.form.category, Category::Work);
    assert_eq!(app.form.user_priority, Priority::High);

    let screen = render(&app);
    assert!(screen.contains("Write report"));
    assert!(screen.contains("AI Priority: High"));
    assert!(screen.contains("AI Est. Hours: 4"));

    // Creation only ever follows a resolved prediction.
    let requests = server.received_requests().await.expect("recording enabled");
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, ["/predict", "/tasks"]);

    let sent: serde_json::Value = serde_json::from_slice(&requests[1].body).expect("json body");
    assert_eq!(sent["aiPriority"], "High");
    assert_eq!(sent["aiDeadlineHours"], 4.0);
    assert_eq!(sent["title"], "Write report");
    assert!(sent.get("id").is_none());
}

#[tokio::test]
async fn empty_title_never_reaches_the_network() {
    let server = setup_mock_server().await;
    mount_prediction(&server, 0).await;
    mount_creation(&server, 0).await;
    let service = service_for(&server);

    let mut app = write_report_app();
    app.form.title = "  ".to_string();

    let err = assert_err!(app.submit(&service).await);
    assert!(err.is_validation());
    assert!(app.tasks.is_empty());
    assert_eq!(app.state(), SubmissionState::Idle);
    assert_eq!(app.notice().map(|n| n.message.as_str()), Some(TITLE_REQUIRED));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn prediction_failure_changes_nothing() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_creation(&server, 0).await;
    let service = service_for(&server);
    let mut app = write_report_app();

    let err = assert_err!(app.submit(&service).await);

    assert!(matches!(err, Error::Status { status: 503, .. }));
    assert!(app.tasks.is_empty());
    assert!(!app.is_submitting());
    assert_eq!(app.form.title, "Write report");
    assert_eq!(app.notice().map(|n| n.message.as_str()), Some(SUBMISSION_FAILED));
}

#[tokio::test]
async fn persistence_failure_changes_nothing() {
    let server = setup_mock_server().await;
    mount_prediction(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
        .expect(1)
        .mount(&server)
        .await;
    let service = service_for(&server);
    let mut app = write_report_app();

    assert_err!(app.submit(&service).await);

    assert!(app.tasks.is_empty());
    assert!(!app.is_submitting());
    assert_eq!(app.notice().map(|n| n.message.as_str()), Some(SUBMISSION_FAILED));
}

#[tokio::test]
async fn submit_control_disabled_for_whole_workflow() {
    let server = setup_mock_server().await;
    mount_prediction(&server, 1).await;
    mount_creation(&server, 1).await;
    let service = service_for(&server);
    let mut app = write_report_app();

    let draft = assert_ok!(app.begin_submission());
    assert!(app.is_submitting());
    assert!(render(&app).contains("Analyzing..."));

    // A second trigger is refused and does not reset the state.
    assert!(matches!(app.begin_submission(), Err(Error::SubmissionInFlight)));
    app.dismiss_notice();
    assert!(app.is_submitting());

    let outcome = workflow::submit(&service, draft).await;
    assert!(app.is_submitting());

    app.handle(AppEvent::SubmissionFinished(outcome));
    assert_eq!(app.state(), SubmissionState::Idle);
    assert_eq!(app.tasks.len(), 1);
    assert!(render(&app).contains("Add Task with AI Insight"));
}

#[tokio::test]
async fn initial_load_populates_list() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([persisted_report()])))
        .expect(1)
        .mount(&server)
        .await;
    let service = service_for(&server);
    let mut app = App::new();

    app.handle(AppEvent::TasksLoaded(service.fetch_tasks().await));

    assert_eq!(app.tasks.len(), 1);
    assert!(app.notice().is_none());
    assert!(render(&app).contains("Write report"));
}
