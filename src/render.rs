use crate::types::{ActivityKind, Metrics, Workout};
use std::fmt;

/// The variant-specific pair shown under each list entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListMetric {
    Pace { pace_min_per_km: f64, cadence_spm: f64 },
    Speed { speed_km_per_h: f64, elevation_gain_m: f64 },
}

/// View-layer representation of one workout in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutListItem {
    pub id: String,
    pub kind: ActivityKind,
    pub label: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub metric: ListMetric,
}

impl From<&Workout> for WorkoutListItem {
    fn from(w: &Workout) -> Self {
        let metric = match w.metrics() {
            Metrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => ListMetric::Pace {
                pace_min_per_km,
                cadence_spm,
            },
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => ListMetric::Speed {
                speed_km_per_h,
                elevation_gain_m,
            },
        };

        Self {
            id: w.id().to_string(),
            kind: w.kind(),
            label: w.label().to_string(),
            distance_km: w.distance_km(),
            duration_min: w.duration_min(),
            metric,
        }
    }
}

impl fmt::Display for WorkoutListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}\n  {} {} km  ⏱ {} min",
            self.id,
            self.label,
            self.kind.icon(),
            self.distance_km,
            self.duration_min
        )?;
        match self.metric {
            ListMetric::Pace {
                pace_min_per_km,
                cadence_spm,
            } => write!(f, "  ⚡️ {pace_min_per_km:.1} min/km  🦶🏼 {cadence_spm} spm"),
            ListMetric::Speed {
                speed_km_per_h,
                elevation_gain_m,
            } => write!(f, "  ⚡️ {speed_km_per_h:.1} km/h  ⛰ {elevation_gain_m} m"),
        }
    }
}

/// Marker popup text, e.g. "🏃‍♂️ Running on April 14".
pub fn popup_content(w: &Workout) -> String {
    format!("{} {}", w.kind().icon(), w.label())
}

/// Style class for the marker popup.
pub fn popup_class(kind: ActivityKind) -> String {
    format!("{kind}-popup")
}
