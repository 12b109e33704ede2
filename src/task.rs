use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseFieldError {
    kind: &'static str,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(alias = "work")]
    Work,
    #[serde(alias = "personal")]
    Personal,
    #[serde(alias = "study")]
    Study,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Study];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Study => "Study",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let index = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(index + step).rem_euclid(len) as usize]
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl FromStr for Priority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// Identifier assigned by the task service. Backends hand out either
/// integers or strings, so both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

/// Form contents at submission time. This is also the body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(alias = "user_priority")]
    pub user_priority: Priority,
}

impl TaskDraft {
    /// Merges the prediction into the payload sent to `POST /tasks`.
    pub fn enrich(self, prediction: Prediction) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            category: self.category,
            user_priority: self.user_priority,
            ai_priority: prediction.priority,
            ai_deadline_hours: prediction.deadline_hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(alias = "predicted_priority", alias = "predictedPriority")]
    pub priority: Priority,
    #[serde(
        alias = "deadline_hours",
        alias = "predicted_deadline_hours",
        alias = "predictedDeadlineHours"
    )]
    pub deadline_hours: f64,
}

/// A predicted task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(alias = "user_priority")]
    pub user_priority: Priority,
    #[serde(alias = "ai_priority")]
    pub ai_priority: Priority,
    #[serde(alias = "ai_deadline_hours")]
    pub ai_deadline_hours: f64,
}

/// A persisted task. Only values of this type ever reach the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(alias = "user_priority")]
    pub user_priority: Priority,
    #[serde(alias = "ai_priority")]
    pub ai_priority: Priority,
    #[serde(alias = "ai_deadline_hours")]
    pub ai_deadline_hours: f64,
}

impl Task {
    /// Estimated hours as shown on a card; integral values drop the fraction.
    pub fn deadline_label(&self) -> String {
        self.ai_deadline_hours.to_string()
    }
}
