//! Command-line surface.
//!
//! ```text
//! taskers                       # interactive board (same as `taskers tui`)
//! taskers list                  # print every task and exit
//! taskers add --title "..."     # predict + create one task without the UI
//! ```

use crate::app::App;
use crate::client::TaskService;
use crate::config::{Config, DEFAULT_API_URL, DEFAULT_LOG_FILE};
use crate::error::Result;
use crate::task::{Category, Priority, Task};
use crate::ui::EMPTY_LIST;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "taskers")]
#[command(about = "Task board that asks an AI service for priority and deadline estimates")]
#[command(version)]
pub struct Cli {
    /// Base URL of the task service
    #[arg(long, env = "TASKERS_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in seconds (none by default)
    #[arg(long, env = "TASKERS_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Log file used while the interactive board owns the terminal
    #[arg(long, env = "TASKERS_LOG_FILE", default_value = DEFAULT_LOG_FILE, global = true)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive board
    Tui,
    /// Print all tasks
    List,
    /// Create a task with AI insight
    Add(AddArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value_t = Category::Work)]
    pub category: Category,

    #[arg(long, default_value_t = Priority::Medium)]
    pub priority: Priority,
}

impl Cli {
    pub fn config(&self) -> Result<Config> {
        Ok(Config::new(&self.api_url)?
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
            .with_log_file(&self.log_file))
    }
}

/// Plain-text rendition of a task card.
pub fn format_task(task: &Task) -> String {
    let mut out = format!("[#{}] {}\n", task.id, task.title);
    for line in task.description.lines() {
        out.push_str(&format!("    {}\n", line));
    }
    out.push_str(&format!(
        "    Category: {} | Your Priority: {} | AI Priority: {} | AI Est. Hours: {}",
        task.category,
        task.user_priority,
        task.ai_priority,
        task.deadline_label()
    ));
    out
}

pub async fn list(service: &dyn TaskService) -> Result<()> {
    let tasks = service.fetch_tasks().await?;
    if tasks.is_empty() {
        println!("{}", EMPTY_LIST);
    }
    for task in &tasks {
        println!("{}", format_task(task));
    }
    Ok(())
}

pub async fn add(service: &dyn TaskService, args: AddArgs) -> Result<()> {
    let mut app = App::new();
    app.form.title = args.title;
    app.form.description = args.description;
    app.form.category = args.category;
    app.form.user_priority = args.priority;

    let task = app.submit(service).await?;
    println!("{}", format_task(task));
    Ok(())
}
