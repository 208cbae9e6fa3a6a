/// Workouts owned by `$userId`, newest first, with exercise names dereferenced
pub const WORKOUTS_FOR_USER: &str = r#"*[_type == "workout" && userId == $userId] | order(date desc) {
  _id,
  userId,
  date,
  duration,
  exercises[]{
    exercise->{
      _id,
      name,
      difficulty
    },
    sets[]{
      _key,
      reps,
      weight,
      weightUnit
    },
    _key
  }
}"#;

pub const ALL_EXERCISES: &str = r#"*[_type == "exercise"] | order(name asc)"#;

pub const EXERCISE_BY_ID: &str = r#"*[_type == "exercise" && _id == $id][0]"#;
