//! Workout records and the pure display logic built on them.

pub mod draft;
pub mod duration;
pub mod models;
pub mod summary;

pub use duration::{format_duration, pluralize};
pub use models::{
    Difficulty, Exercise, ExercisePerformance, ExerciseRef, SetEntry, WeightUnit, WorkoutRecord,
};
pub use summary::WorkoutSummary;
