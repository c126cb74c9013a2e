//! # TaskForge walkthrough
//!
//! Builds the application container, drives the task service through a short
//! session and shuts down explicitly so every `pre_destroy` hook runs.
//!
//! ```bash
//! RUST_LOG=info cargo run --example taskforge
//! TASKFORGE_PROJECT_STAGE=unittest cargo run --example taskforge
//! ```

use taskforge::app::{self, TaskService, TaskStatistics};
use taskforge::{Config, Qualifiers};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let container = app::container(Config::from_env())?;
    let service = container.resolve::<dyn TaskService>(&Qualifiers::none())?;

    println!("== {} ==", service.app_name()?);

    println!("\n-- creating tasks --");
    for title in ["Learn resolution", "Implement qualifiers", "Test interceptors"] {
        let task = service.create_task(title)?;
        println!("  created {task}");
    }

    println!("\n-- completing a task --");
    let done = service.complete_task("Learn resolution")?;
    println!("  completed: {done}");

    println!("\n-- task list --");
    for task in service.list_tasks()? {
        println!("  {task}");
    }

    println!("\n-- statistics --");
    let stats = container.resolve::<TaskStatistics>(&Qualifiers::none())?;
    println!("  {}", stats.summary());

    println!("\n-- repository implementations --");
    for name in service.repository_implementations()? {
        println!("  - {name}");
    }

    println!("\n-- validation --");
    match service.create_task("") {
        Ok(task) => println!("  unexpectedly accepted {task}"),
        Err(err) => println!("  rejected: {}", err.as_message()),
    }

    println!("\n-- shutdown --");
    container.shutdown()?;
    Ok(())
}
