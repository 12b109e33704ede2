//! Terminal task board whose new tasks are enriched by an AI prediction
//! service before they are stored.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod task;
pub mod task_list;
pub mod testing;
pub mod ui;
pub mod workflow;

pub use error::{Error, Result};
