use crate::error::{FormatError, RecordError};
use crate::workout::duration::whole_seconds;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub const UNKNOWN_EXERCISE: &str = "Unknown Exercise";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "lbs")]
    Pounds,
    #[serde(rename = "kg")]
    Kilograms,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Pounds => "lbs",
            WeightUnit::Kilograms => "kg",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "lbs" => Some(WeightUnit::Pounds),
            "kg" => Some(WeightUnit::Kilograms),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetEntry {
    pub reps: u32,
    pub weight: Option<f64>,
    pub weight_unit: WeightUnit,
}

impl SetEntry {
    /// "10 reps @ 135 lbs", or "10 reps (bodyweight)" when no weight was logged
    pub fn describe(&self) -> String {
        match self.weight {
            Some(w) if w > 0.0 => format!("{} reps @ {} {}", self.reps, w, self.weight_unit.as_str()),
            _ => format!("{} reps (bodyweight)", self.reps),
        }
    }
}

/// Dereferenced exercise as projected into a workout document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseRef {
    pub id: Option<String>,
    pub name: String,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExercisePerformance {
    pub exercise: ExerciseRef,
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<FixedOffset>,
    pub duration_seconds: Option<u32>,
    pub exercises: Vec<ExercisePerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    pub asset_ref: String,
    pub alt: Option<String>,
}

/// Exercise library document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub image: Option<ImageRef>,
    pub video_url: Option<String>,
    pub is_active: bool,
}

// Raw shapes as they come off the wire. Everything optional; validation
// happens when converting into the typed records above.

#[derive(Debug, Deserialize)]
struct RawRef {
    #[serde(rename = "_id")]
    id: Option<String>,
    name: Option<String>,
    difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSet {
    reps: Option<f64>,
    weight: Option<f64>,
    #[serde(rename = "weightUnit")]
    weight_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPerformance {
    exercise: Option<RawRef>,
    #[serde(default)]
    sets: Vec<RawSet>,
}

#[derive(Debug, Deserialize)]
struct RawWorkout {
    #[serde(rename = "_id")]
    id: Option<String>,
    #[serde(rename = "userId")]
    user_id: Option<String>,
    date: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    exercises: Vec<RawPerformance>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    #[serde(rename = "_ref")]
    reference: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    asset: Option<RawAsset>,
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawExercise {
    #[serde(rename = "_id")]
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    difficulty: Option<String>,
    image: Option<RawImage>,
    #[serde(rename = "videoUrl")]
    video_url: Option<String>,
    #[serde(rename = "isActive")]
    is_active: Option<bool>,
}

fn whole_number(field: &'static str, value: f64) -> Result<u32, RecordError> {
    let n = whole_seconds(value).map_err(|e| match e {
        FormatError::InvalidArgument(reason) => RecordError::invalid(field, reason),
    })?;
    u32::try_from(n).map_err(|_| RecordError::invalid(field, format!("{} is out of range", value)))
}

fn parse_difficulty(raw: Option<String>) -> Result<Option<Difficulty>, RecordError> {
    match raw {
        None => Ok(None),
        Some(s) => Difficulty::parse(&s)
            .map(Some)
            .ok_or_else(|| RecordError::invalid("difficulty", format!("unknown value '{}'", s))),
    }
}

impl SetEntry {
    fn from_raw(raw: RawSet) -> Result<Self, RecordError> {
        let reps = whole_number("reps", raw.reps.ok_or(RecordError::MissingField("reps"))?)?;
        if reps < 1 {
            return Err(RecordError::invalid("reps", "must be at least 1"));
        }
        if let Some(w) = raw.weight {
            if !w.is_finite() || w < 0.0 {
                return Err(RecordError::invalid("weight", format!("{} is negative", w)));
            }
        }
        let weight_unit = match raw.weight_unit.as_deref() {
            None => WeightUnit::default(),
            Some(u) => WeightUnit::parse(u)
                .ok_or_else(|| RecordError::invalid("weightUnit", format!("unknown unit '{}'", u)))?,
        };
        Ok(SetEntry {
            reps,
            weight: raw.weight,
            weight_unit,
        })
    }
}

impl WorkoutRecord {
    /// Map a workout document from the store into a validated record.
    pub fn from_document(doc: &Value) -> Result<Self, RecordError> {
        let raw: RawWorkout = serde_json::from_value(doc.clone())
            .map_err(|e| RecordError::invalid("document", e.to_string()))?;

        let id = raw.id.ok_or(RecordError::MissingField("_id"))?;
        let user_id = raw.user_id.ok_or(RecordError::MissingField("userId"))?;
        let date_str = raw.date.ok_or(RecordError::MissingField("date"))?;
        let date = DateTime::parse_from_rfc3339(&date_str)
            .map_err(|e| RecordError::invalid("date", format!("'{}': {}", date_str, e)))?;

        let duration_seconds = raw
            .duration
            .map(|d| whole_number("duration", d))
            .transpose()?;

        let mut exercises = Vec::with_capacity(raw.exercises.len());
        for perf in raw.exercises {
            if perf.sets.is_empty() {
                return Err(RecordError::invalid("sets", "exercise has no sets"));
            }
            let exercise = match perf.exercise {
                Some(r) => ExerciseRef {
                    id: r.id,
                    name: r.name.unwrap_or_else(|| UNKNOWN_EXERCISE.to_string()),
                    difficulty: parse_difficulty(r.difficulty)?,
                },
                None => ExerciseRef {
                    id: None,
                    name: UNKNOWN_EXERCISE.to_string(),
                    difficulty: None,
                },
            };
            let sets = perf
                .sets
                .into_iter()
                .map(SetEntry::from_raw)
                .collect::<Result<Vec<_>, _>>()?;
            exercises.push(ExercisePerformance { exercise, sets });
        }

        Ok(WorkoutRecord {
            id,
            user_id,
            date,
            duration_seconds,
            exercises,
        })
    }
}

impl Exercise {
    pub fn from_document(doc: &Value) -> Result<Self, RecordError> {
        let raw: RawExercise = serde_json::from_value(doc.clone())
            .map_err(|e| RecordError::invalid("document", e.to_string()))?;

        let id = raw.id.ok_or(RecordError::MissingField("_id"))?;
        let name = raw.name.ok_or(RecordError::MissingField("name"))?;
        let image = raw.image.and_then(|img| {
            let asset_ref = img.asset.and_then(|a| a.reference)?;
            Some(ImageRef {
                asset_ref,
                alt: img.alt,
            })
        });

        Ok(Exercise {
            id,
            name,
            description: raw.description,
            difficulty: parse_difficulty(raw.difficulty)?,
            image,
            video_url: raw.video_url,
            is_active: raw.is_active.unwrap_or(true),
        })
    }
}

fn document_id(doc: &Value) -> &str {
    doc.get("_id").and_then(Value::as_str).unwrap_or("<no id>")
}

/// Keep the documents that map cleanly, in order; log and drop the rest.
pub fn records_from_documents(docs: &[Value]) -> Vec<WorkoutRecord> {
    let records: Vec<WorkoutRecord> = docs
        .iter()
        .filter_map(|doc| match WorkoutRecord::from_document(doc) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(id = document_id(doc), error = %e, "skipping malformed workout document");
                None
            }
        })
        .collect();
    debug!(fetched = docs.len(), kept = records.len(), "mapped workout documents");
    records
}

pub fn exercises_from_documents(docs: &[Value]) -> Vec<Exercise> {
    docs.iter()
        .filter_map(|doc| match Exercise::from_document(doc) {
            Ok(exercise) => Some(exercise),
            Err(e) => {
                warn!(id = document_id(doc), error = %e, "skipping malformed exercise document");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn workout_doc() -> Value {
        json!({
            "_id": "workout-1",
            "userId": "user_abc",
            "date": "2025-01-05T18:30:00Z",
            "duration": 2730,
            "exercises": [
                {
                    "_key": "k1",
                    "exercise": { "_id": "ex-squat", "name": "Squat", "difficulty": "intermediate" },
                    "sets": [
                        { "_key": "s1", "reps": 5, "weight": 225, "weightUnit": "lbs" },
                        { "_key": "s2", "reps": 5, "weight": 100, "weightUnit": "kg" }
                    ]
                },
                {
                    "_key": "k2",
                    "exercise": null,
                    "sets": [ { "_key": "s3", "reps": 12 } ]
                }
            ]
        })
    }

    #[test]
    fn test_workout_from_document() {
        let record = WorkoutRecord::from_document(&workout_doc()).unwrap();
        assert_eq!(record.id, "workout-1");
        assert_eq!(record.user_id, "user_abc");
        assert_eq!(record.duration_seconds, Some(2730));
        assert_eq!(record.exercises.len(), 2);
        assert_eq!(record.exercises[0].exercise.name, "Squat");
        assert_eq!(record.exercises[0].exercise.difficulty, Some(Difficulty::Intermediate));
        assert_eq!(record.exercises[0].sets[1].weight_unit, WeightUnit::Kilograms);
        assert_eq!(record.exercises[1].exercise.name, UNKNOWN_EXERCISE);
        assert_eq!(record.exercises[1].sets[0].weight, None);
        assert_eq!(record.exercises[1].sets[0].weight_unit, WeightUnit::Pounds);
    }

    #[test]
    fn test_missing_duration_is_not_recorded() {
        let mut doc = workout_doc();
        doc.as_object_mut().unwrap().remove("duration");
        let record = WorkoutRecord::from_document(&doc).unwrap();
        assert_eq!(record.duration_seconds, None);
    }

    #[test]
    fn test_rejects_fractional_duration() {
        let mut doc = workout_doc();
        doc["duration"] = json!(12.5);
        let err = WorkoutRecord::from_document(&doc).unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "duration", .. }));
    }

    #[test]
    fn test_rejects_fractional_reps() {
        let mut doc = workout_doc();
        doc["exercises"][0]["sets"][0]["reps"] = json!(2.5);
        let err = WorkoutRecord::from_document(&doc).unwrap_err();
        assert_eq!(
            err,
            RecordError::invalid("reps", "2.5 is not a whole number")
        );
    }

    #[test]
    fn test_rejects_negative_duration() {
        let mut doc = workout_doc();
        doc["duration"] = json!(-5);
        assert!(WorkoutRecord::from_document(&doc).is_err());
    }

    #[test]
    fn test_rejects_empty_sets_and_zero_reps() {
        let mut doc = workout_doc();
        doc["exercises"][1]["sets"] = json!([]);
        assert!(WorkoutRecord::from_document(&doc).is_err());

        let mut doc = workout_doc();
        doc["exercises"][1]["sets"][0]["reps"] = json!(0);
        assert!(WorkoutRecord::from_document(&doc).is_err());
    }

    #[test]
    fn test_rejects_unknown_unit_and_bad_date() {
        let mut doc = workout_doc();
        doc["exercises"][0]["sets"][0]["weightUnit"] = json!("stone");
        assert!(WorkoutRecord::from_document(&doc).is_err());

        let mut doc = workout_doc();
        doc["date"] = json!("yesterday");
        let err = WorkoutRecord::from_document(&doc).unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "date", .. }));
    }

    #[test]
    fn test_missing_user_id() {
        let mut doc = workout_doc();
        doc.as_object_mut().unwrap().remove("userId");
        assert_eq!(
            WorkoutRecord::from_document(&doc).unwrap_err(),
            RecordError::MissingField("userId")
        );
    }

    #[test]
    fn test_records_from_documents_skips_malformed() {
        let mut bad = workout_doc();
        bad["_id"] = json!("workout-bad");
        bad["date"] = json!(null);
        let docs = vec![workout_doc(), bad, json!("not an object")];
        let records = records_from_documents(&docs);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "workout-1");
    }

    #[test]
    fn test_exercise_from_document() {
        let doc = json!({
            "_id": "ex-pushup",
            "_type": "exercise",
            "name": "Push-up",
            "description": "Lower your chest to the floor and press back up.",
            "difficulty": "beginner",
            "image": {
                "_type": "image",
                "asset": { "_ref": "image-abc123-800x600-jpg", "_type": "reference" },
                "alt": "Person doing a push-up"
            },
            "videoUrl": "https://example.com/pushup"
        });
        let exercise = Exercise::from_document(&doc).unwrap();
        assert_eq!(exercise.name, "Push-up");
        assert_eq!(exercise.difficulty, Some(Difficulty::Beginner));
        assert!(exercise.is_active);
        let image = exercise.image.unwrap();
        assert_eq!(image.asset_ref, "image-abc123-800x600-jpg");
        assert_eq!(image.alt.as_deref(), Some("Person doing a push-up"));
    }

    #[test]
    fn test_set_describe() {
        let set = SetEntry {
            reps: 8,
            weight: Some(60.0),
            weight_unit: WeightUnit::Kilograms,
        };
        assert_eq!(set.describe(), "8 reps @ 60 kg");
        let bodyweight = SetEntry {
            reps: 15,
            weight: None,
            weight_unit: WeightUnit::Pounds,
        };
        assert_eq!(bodyweight.describe(), "15 reps (bodyweight)");
    }
}
