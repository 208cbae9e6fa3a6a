use crate::OutputFormat;
use crate::commands::{store_client, truncate};
use crate::config::Config;
use crate::store::DocumentStore;
use crate::store::image::image_url;
use crate::store::queries::{ALL_EXERCISES, EXERCISE_BY_ID};
use crate::workout::Exercise;
use crate::workout::models::exercises_from_documents;
use anyhow::{Context, Result};
use serde_json::json;

/// Case-insensitive name filter; a blank query keeps everything.
pub fn filter_exercises<'a>(exercises: &'a [Exercise], query: &str) -> Vec<&'a Exercise> {
    let needle = query.trim().to_lowercase();
    exercises
        .iter()
        .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn fetch_exercises(store: &dyn DocumentStore) -> Result<Vec<Exercise>> {
    let docs = store
        .fetch(ALL_EXERCISES, &[])
        .context("Failed to fetch exercises")?;
    Ok(exercises_from_documents(&docs))
}

pub fn fetch_exercise(store: &dyn DocumentStore, id: &str) -> Result<Option<Exercise>> {
    let docs = store
        .fetch(EXERCISE_BY_ID, &[("id", json!(id))])
        .context("Failed to fetch exercise")?;
    Ok(exercises_from_documents(&docs).into_iter().next())
}

pub fn list(config: &Config, search: Option<String>, format: OutputFormat) -> Result<()> {
    config.validate()?;
    let client = store_client(config);
    let exercises = fetch_exercises(&client)?;
    let filtered = filter_exercises(&exercises, search.as_deref().unwrap_or(""));

    if format == OutputFormat::Json {
        let out = serde_json::to_string_pretty(&filtered).context("Failed to serialize exercises")?;
        println!("{}", out);
        return Ok(());
    }

    if filtered.is_empty() {
        println!("No exercises found");
        if search.is_some() {
            println!("Try a different search term");
        }
        return Ok(());
    }

    println!("{:<30} {:<14} {:<30}", "Name", "Difficulty", "ID");
    println!("{}", "-".repeat(76));
    for exercise in filtered {
        let difficulty = exercise.difficulty.map(|d| d.label()).unwrap_or("-");
        let name = if exercise.is_active {
            exercise.name.clone()
        } else {
            format!("{} (inactive)", exercise.name)
        };
        println!(
            "{:<30} {:<14} {:<30}",
            truncate(&name, 30),
            difficulty,
            exercise.id
        );
    }

    Ok(())
}

pub fn render_detail(exercise: &Exercise, project_id: &str, dataset: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", exercise.name));
    if let Some(difficulty) = exercise.difficulty {
        out.push_str(&format!("Difficulty: {}\n", difficulty.label()));
    }
    if !exercise.is_active {
        out.push_str("Status: inactive\n");
    }
    if let Some(description) = &exercise.description {
        out.push_str(&format!("\n{}\n", description));
    }
    if let Some(image) = &exercise.image {
        if let Some(url) = image_url(project_id, dataset, &image.asset_ref) {
            out.push_str(&format!("\nImage: {}\n", url));
        }
    }
    if let Some(video) = &exercise.video_url {
        out.push_str(&format!("Video: {}\n", video));
    }
    out
}

pub fn show(config: &Config, id: &str) -> Result<()> {
    config.validate()?;
    let client = store_client(config);
    let exercise = fetch_exercise(&client, id)?
        .with_context(|| format!("Exercise '{}' not found", id))?;

    print!(
        "{}",
        render_detail(&exercise, &config.store.project_id, &config.store.dataset)
    );
    Ok(())
}
