use crate::OutputFormat;
use crate::commands::{require_user, store_client};
use crate::config::Config;
use crate::identity::SessionIdentity;
use crate::platform::state_paths;
use crate::state::with_state_lock;
use crate::store::DocumentStore;
use crate::store::queries::WORKOUTS_FOR_USER;
use crate::workout::models::records_from_documents;
use crate::workout::summary::{formatted_date, formatted_duration, history_headline};
use crate::workout::{WorkoutRecord, WorkoutSummary};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use termtree::Tree;

#[derive(Debug, Serialize)]
struct HistoryOutput<'a> {
    count: usize,
    workouts: &'a [WorkoutSummary],
}

/// Fetch and validate the user's workouts, newest first.
pub fn fetch_history(store: &dyn DocumentStore, user_id: &str) -> Result<Vec<WorkoutRecord>> {
    let docs = store
        .fetch(WORKOUTS_FOR_USER, &[("userId", json!(user_id))])
        .context("Failed to fetch workouts")?;
    Ok(records_from_documents(&docs))
}

pub fn render_text(records: &[WorkoutRecord]) -> String {
    let mut out = String::new();
    out.push_str("Workout History\n");
    out.push_str(&history_headline(records.len()));
    out.push('\n');

    if records.is_empty() {
        out.push_str("\nNo workouts yet\nYour completed workouts will appear here\n");
        return out;
    }

    for record in records {
        let summary = WorkoutSummary::from_record(record);
        out.push('\n');
        out.push_str(&format!("{}\n", summary.date));
        out.push_str(&format!("  {}\n", summary.duration));
        out.push_str(&format!(
            "  {} EXERCISES  {} SETS\n",
            summary.total_exercises, summary.total_sets
        ));
        if !summary.exercise_names.is_empty() {
            out.push_str(&format!("  Exercises: {}\n", summary.exercise_names.join(", ")));
        }
    }

    out
}

fn workout_tree(record: &WorkoutRecord) -> Tree<String> {
    let label = format!("{} ({})", formatted_date(record), formatted_duration(record));
    let mut tree = Tree::new(label);
    for performance in &record.exercises {
        let mut node = Tree::new(performance.exercise.name.clone());
        for set in &performance.sets {
            node.push(Tree::new(set.describe()));
        }
        tree.push(node);
    }
    tree
}

pub fn render_tree(records: &[WorkoutRecord]) -> String {
    records
        .iter()
        .map(|r| workout_tree(r).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(records: &[WorkoutRecord]) -> Result<String> {
    let summaries: Vec<WorkoutSummary> = records.iter().map(WorkoutSummary::from_record).collect();
    let output = HistoryOutput {
        count: summaries.len(),
        workouts: &summaries,
    };
    serde_json::to_string_pretty(&output).context("Failed to serialize history")
}

pub fn history(config: &Config, limit: Option<usize>, format: OutputFormat, tree: bool) -> Result<()> {
    config.validate()?;
    let (lock_path, state_path) = state_paths(config.state.state_dir_override.as_ref())?;

    let identity = SessionIdentity::new(state_path.clone());
    let user_id = require_user(&identity)?;
    let client = store_client(config);

    let mut records = fetch_history(&client, &user_id)?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    let output = match (format, tree) {
        (OutputFormat::Json, _) => render_json(&records)?,
        (OutputFormat::Text, true) if !records.is_empty() => render_tree(&records),
        (OutputFormat::Text, _) => render_text(&records),
    };
    println!("{}", output);

    with_state_lock(&lock_path, &state_path, |state| {
        state.last_sync = Some(Utc::now());
        Ok(())
    })
}
