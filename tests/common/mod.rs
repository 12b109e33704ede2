//! Shared fixtures for the integration tests.

use ratatui::{backend::TestBackend, Terminal};
use serde_json::{json, Value};
use std::time::Duration;
use taskers::{
    app::App,
    client::HttpTaskService,
    config::Config,
    task::{Category, Priority},
    ui,
};
use wiremock::MockServer;

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn service_for(server: &MockServer) -> HttpTaskService {
    service_with_timeout(server, None)
}

#[allow(dead_code)]
pub fn service_with_timeout(server: &MockServer, timeout: Option<Duration>) -> HttpTaskService {
    let config = Config::new(&server.uri())
        .expect("mock server uri")
        .with_timeout(timeout);
    HttpTaskService::new(config).expect("http client")
}

/// Form filled with the "Write report" example.
#[allow(dead_code)]
pub fn write_report_app() -> App {
    let mut app = App::new();
    app.form.title = "Write report".to_string();
    app.form.description = "urgent".to_string();
    app.form.category = Category::Work;
    app.form.user_priority = Priority::High;
    app
}

#[allow(dead_code)]
pub fn persisted_report() -> Value {
    json!({
        "id": 1,
        "title": "Write report",
        "description": "urgent",
        "category": "Work",
        "userPriority": "High",
        "aiPriority": "High",
        "aiDeadlineHours": 4,
    })
}

#[allow(dead_code)]
pub fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 40)).expect("test terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("draw");
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
