use crate::types::Workout;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("workout id already logged: {0}")]
    DuplicateId(String),
}

/// Workouts of the current session in creation order. Append-only.
#[derive(Debug, Default)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, workout: Workout) -> Result<(), LogError> {
        if self.find_by_id(workout.id()).is_some() {
            return Err(LogError::DuplicateId(workout.id().to_string()));
        }
        self.workouts.push(workout);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Rehydration only: trusts the source and skips the duplicate check.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
