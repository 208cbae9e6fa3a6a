use crate::commands::{require_user, store_client};
use crate::config::Config;
use crate::identity::SessionIdentity;
use crate::platform::state_paths;
use crate::store::{DocumentStore, MutationResult};
use crate::workout::draft::WorkoutDraft;
use crate::workout::duration::{format_duration, pluralize};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use std::path::Path;
use tracing::info;

pub fn read_draft(file: &Path) -> Result<WorkoutDraft> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let draft = WorkoutDraft::from_json(&content)?;
    draft.validate()?;
    Ok(draft)
}

/// Create the workout in the store for `user_id`.
pub fn save_workout(
    store: &dyn DocumentStore,
    draft: &WorkoutDraft,
    user_id: &str,
    now: DateTime<FixedOffset>,
) -> Result<MutationResult> {
    let document = draft.to_document(user_id, now);
    let result = store.create(&document).context("Failed to save workout")?;
    info!(transaction = %result.transaction_id, "workout saved");
    Ok(result)
}

pub fn log_workout(config: &Config, file: &Path, dry_run: bool) -> Result<()> {
    config.validate()?;
    let draft = read_draft(file)?;

    let (_, state_path) = state_paths(config.state.state_dir_override.as_ref())?;
    let identity = SessionIdentity::new(state_path);
    let user_id = require_user(&identity)?;

    let duration = format_duration(i64::from(draft.duration))?;

    if dry_run {
        println!(
            "[DRY-RUN] Would log workout for {}: {}, {}, {}",
            user_id,
            pluralize(draft.exercises.len() as i64, "exercise"),
            pluralize(draft.total_sets() as i64, "set"),
            duration
        );
        return Ok(());
    }

    let client = store_client(config);
    let result = save_workout(&client, &draft, &user_id, Utc::now().fixed_offset())?;
    let id = result.document_ids.first().map(String::as_str).unwrap_or("unknown");
    println!("✓ Workout saved ({}, ID: {})", duration, id);

    Ok(())
}
