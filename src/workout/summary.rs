use crate::workout::duration::{format_duration, pluralize};
use crate::workout::models::WorkoutRecord;
use serde::Serialize;

pub const DURATION_NOT_RECORDED: &str = "Duration not recorded";

pub fn total_sets(record: &WorkoutRecord) -> usize {
    record.exercises.iter().map(|e| e.sets.len()).sum()
}

pub fn total_exercises(record: &WorkoutRecord) -> usize {
    record.exercises.len()
}

pub fn formatted_duration(record: &WorkoutRecord) -> String {
    match record.duration_seconds {
        None | Some(0) => DURATION_NOT_RECORDED.to_string(),
        // u32 always fits and is never negative, so the formatter cannot fail here
        Some(secs) => format_duration(i64::from(secs))
            .unwrap_or_else(|_| DURATION_NOT_RECORDED.to_string()),
    }
}

/// Long US calendar date ("January 5, 2025") in the record's own offset
pub fn formatted_date(record: &WorkoutRecord) -> String {
    record.date.format("%B %-d, %Y").to_string()
}

pub fn history_headline(count: usize) -> String {
    format!("{} completed", pluralize(count as i64, "workout"))
}

/// Everything the history view shows for one workout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    pub id: String,
    pub date: String,
    pub duration: String,
    pub total_exercises: usize,
    pub total_sets: usize,
    pub exercise_names: Vec<String>,
}

impl WorkoutSummary {
    pub fn from_record(record: &WorkoutRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: formatted_date(record),
            duration: formatted_duration(record),
            total_exercises: total_exercises(record),
            total_sets: total_sets(record),
            exercise_names: record
                .exercises
                .iter()
                .map(|e| e.exercise.name.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::models::{ExercisePerformance, ExerciseRef, SetEntry, WeightUnit};
    use chrono::DateTime;

    fn set(reps: u32) -> SetEntry {
        SetEntry {
            reps,
            weight: None,
            weight_unit: WeightUnit::Pounds,
        }
    }

    fn performance(name: &str, sets: Vec<SetEntry>) -> ExercisePerformance {
        ExercisePerformance {
            exercise: ExerciseRef {
                id: None,
                name: name.to_string(),
                difficulty: None,
            },
            sets,
        }
    }

    fn record(duration: Option<u32>, exercises: Vec<ExercisePerformance>) -> WorkoutRecord {
        WorkoutRecord {
            id: "w1".to_string(),
            user_id: "user_1".to_string(),
            date: DateTime::parse_from_rfc3339("2025-01-05T18:30:00Z").unwrap(),
            duration_seconds: duration,
            exercises,
        }
    }

    #[test]
    fn test_total_sets() {
        let r = record(
            Some(600),
            vec![
                performance("Squat", vec![set(5), set(5)]),
                performance("Row", vec![set(8)]),
            ],
        );
        assert_eq!(total_sets(&r), 3);
        assert_eq!(total_exercises(&r), 2);
    }

    #[test]
    fn test_total_sets_empty() {
        assert_eq!(total_sets(&record(None, vec![])), 0);
    }

    #[test]
    fn test_formatted_duration_not_recorded() {
        assert_eq!(formatted_duration(&record(Some(0), vec![])), DURATION_NOT_RECORDED);
        assert_eq!(formatted_duration(&record(None, vec![])), DURATION_NOT_RECORDED);
        assert_eq!(formatted_duration(&record(Some(90), vec![])), "1 minute 30 seconds");
    }

    #[test]
    fn test_formatted_date_keeps_offset() {
        let mut r = record(None, vec![]);
        assert_eq!(formatted_date(&r), "January 5, 2025");
        // 23:30 on the 5th in UTC-05:00 is the 6th in UTC; no conversion happens
        r.date = DateTime::parse_from_rfc3339("2025-01-05T23:30:00-05:00").unwrap();
        assert_eq!(formatted_date(&r), "January 5, 2025");
    }

    #[test]
    fn test_summary_is_idempotent() {
        let r = record(Some(3661), vec![performance("Bench Press", vec![set(10)])]);
        let first = WorkoutSummary::from_record(&r);
        let second = WorkoutSummary::from_record(&r);
        assert_eq!(first, second);
        assert_eq!(first.duration, "1 hour 1 minute");
        assert_eq!(first.exercise_names, vec!["Bench Press".to_string()]);
        assert_eq!(first.total_sets, 1);
    }

    #[test]
    fn test_history_headline() {
        assert_eq!(history_headline(1), "1 workout completed");
        assert_eq!(history_headline(0), "0 workouts completed");
        assert_eq!(history_headline(4), "4 workouts completed");
    }
}
