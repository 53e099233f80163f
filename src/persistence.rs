use crate::dlog;
use crate::storage::KeyValueStore;
use crate::types::{Workout, WorkoutRecord};
use crate::workout_log::WorkoutLog;
use anyhow::{Context, Result};

pub const STORAGE_KEY: &str = "workouts";

/// Writes the whole log as a JSON array of flat records under [`STORAGE_KEY`].
pub fn save(store: &mut dyn KeyValueStore, log: &WorkoutLog) -> Result<()> {
    let records: Vec<WorkoutRecord> = log.all().iter().map(WorkoutRecord::from).collect();
    let json = serde_json::to_string(&records).context("Serializing workout log")?;
    store.save(STORAGE_KEY, &json)?;
    dlog!("persisted workouts={}", records.len());
    Ok(())
}

/// Reads the stored log. Absent or corrupt values yield an empty list.
///
/// Derived fields (label, pace, speed) come back exactly as stored.
pub fn load(store: &dyn KeyValueStore) -> Result<Vec<Workout>> {
    let Some(json) = store.load(STORAGE_KEY)? else {
        dlog!("no stored workouts");
        return Ok(Vec::new());
    };

    match decode(&json) {
        Ok(workouts) => {
            tracing::info!(workouts = workouts.len(), "loaded stored workouts");
            Ok(workouts)
        }
        Err(e) => {
            tracing::warn!(err = %e, "stored workouts are corrupt; starting empty");
            Ok(Vec::new())
        }
    }
}

pub fn clear(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove(STORAGE_KEY)
}

fn decode(json: &str) -> Result<Vec<Workout>> {
    // Legacy stores may hold `null`.
    let records: Option<Vec<WorkoutRecord>> =
        serde_json::from_str(json).context("Parsing stored workouts")?;
    records
        .unwrap_or_default()
        .into_iter()
        .map(|r| Workout::try_from(r).map_err(anyhow::Error::msg))
        .collect()
}
