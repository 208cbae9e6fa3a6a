use crate::error::RecordError;
use crate::workout::models::WeightUnit;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// A set as written in a workout draft file
#[derive(Debug, Clone, Deserialize)]
pub struct DraftSet {
    pub reps: u32,
    pub weight: Option<f64>,
    #[serde(rename = "weightUnit", default)]
    pub weight_unit: WeightUnit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftExercise {
    pub exercise_id: String,
    pub sets: Vec<DraftSet>,
}

/// A workout the user wants to log, read from a JSON file.
///
/// `date` defaults to the time of logging.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutDraft {
    pub date: Option<DateTime<FixedOffset>>,
    pub duration: u32,
    pub exercises: Vec<DraftExercise>,
}

fn new_key() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

impl WorkoutDraft {
    pub fn from_json(content: &str) -> Result<Self, RecordError> {
        serde_json::from_str(content).map_err(|e| RecordError::invalid("draft", e.to_string()))
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        if self.duration < 1 {
            return Err(RecordError::invalid("duration", "must be at least 1 second"));
        }
        if self.exercises.is_empty() {
            return Err(RecordError::invalid("exercises", "at least one exercise is required"));
        }
        for exercise in &self.exercises {
            if exercise.exercise_id.trim().is_empty() {
                return Err(RecordError::MissingField("exercise_id"));
            }
            if exercise.sets.is_empty() {
                return Err(RecordError::invalid(
                    "sets",
                    format!("exercise '{}' has no sets", exercise.exercise_id),
                ));
            }
            for set in &exercise.sets {
                if set.reps < 1 {
                    return Err(RecordError::invalid("reps", "must be at least 1"));
                }
                if let Some(w) = set.weight {
                    if !w.is_finite() || w < 0.0 {
                        return Err(RecordError::invalid("weight", format!("{} is negative", w)));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Build the `workout` document to create in the store.
    pub fn to_document(&self, user_id: &str, now: DateTime<FixedOffset>) -> Value {
        let date = self.date.unwrap_or(now);
        let exercises: Vec<Value> = self
            .exercises
            .iter()
            .map(|e| {
                let sets: Vec<Value> = e
                    .sets
                    .iter()
                    .map(|s| {
                        let mut set = json!({
                            "_type": "exerciseSet",
                            "_key": new_key(),
                            "reps": s.reps,
                            "weightUnit": s.weight_unit.as_str(),
                        });
                        if let Some(w) = s.weight {
                            set["weight"] = json!(w);
                        }
                        set
                    })
                    .collect();
                json!({
                    "_type": "workoutExercise",
                    "_key": new_key(),
                    "exercise": { "_type": "reference", "_ref": e.exercise_id },
                    "sets": sets,
                })
            })
            .collect();

        json!({
            "_type": "workout",
            "userId": user_id,
            "date": date.to_rfc3339(),
            "duration": self.duration,
            "exercises": exercises,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = r#"{
        "date": "2025-03-02T07:15:00+01:00",
        "duration": 1800,
        "exercises": [
            { "exercise_id": "ex-squat", "sets": [
                { "reps": 5, "weight": 100, "weightUnit": "kg" },
                { "reps": 5, "weight": 100, "weightUnit": "kg" }
            ]},
            { "exercise_id": "ex-pullup", "sets": [ { "reps": 8 } ] }
        ]
    }"#;

    #[test]
    fn test_parse_and_validate() {
        let draft = WorkoutDraft::from_json(DRAFT).unwrap();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.total_sets(), 3);
        assert_eq!(draft.exercises[1].sets[0].weight_unit, WeightUnit::Pounds);
    }

    #[test]
    fn test_validate_rejects_empty_exercises() {
        let draft = WorkoutDraft::from_json(r#"{"duration": 60, "exercises": []}"#).unwrap();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_duration_and_reps() {
        let draft = WorkoutDraft::from_json(
            r#"{"duration": 0, "exercises": [{"exercise_id": "a", "sets": [{"reps": 1}]}]}"#,
        )
        .unwrap();
        assert!(draft.validate().is_err());

        let draft = WorkoutDraft::from_json(
            r#"{"duration": 60, "exercises": [{"exercise_id": "a", "sets": [{"reps": 0}]}]}"#,
        )
        .unwrap();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_duration_in_json() {
        assert!(WorkoutDraft::from_json(r#"{"duration": -1, "exercises": []}"#).is_err());
    }

    #[test]
    fn test_to_document_shape() {
        let draft = WorkoutDraft::from_json(DRAFT).unwrap();
        let now = DateTime::parse_from_rfc3339("2025-03-03T00:00:00Z").unwrap();
        let doc = draft.to_document("user_42", now);

        assert_eq!(doc["_type"], "workout");
        assert_eq!(doc["userId"], "user_42");
        assert_eq!(doc["date"], "2025-03-02T07:15:00+01:00");
        assert_eq!(doc["duration"], 1800);
        assert_eq!(doc["exercises"][0]["exercise"]["_ref"], "ex-squat");
        assert_eq!(doc["exercises"][0]["sets"][0]["weightUnit"], "kg");
        assert!(doc["exercises"][1]["sets"][0].get("weight").is_none());

        let k1 = doc["exercises"][0]["_key"].as_str().unwrap();
        let k2 = doc["exercises"][1]["_key"].as_str().unwrap();
        assert_eq!(k1.len(), 12);
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_to_document_defaults_date_to_now() {
        let draft = WorkoutDraft::from_json(
            r#"{"duration": 60, "exercises": [{"exercise_id": "a", "sets": [{"reps": 1}]}]}"#,
        )
        .unwrap();
        let now = DateTime::parse_from_rfc3339("2025-03-03T10:00:00+00:00").unwrap();
        let doc = draft.to_document("u", now);
        assert_eq!(doc["date"], "2025-03-03T10:00:00+00:00");
    }
}
