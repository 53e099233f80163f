use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Cycling,
}

impl ActivityKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(format!("unknown activity kind: {other:?}")),
        }
    }
}

/// Latitude/longitude pair in degrees. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Variant-specific measurements. Exactly one set exists per workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metrics {
    Running {
        cadence_spm: f64,
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        speed_km_per_h: f64,
    },
}

impl Metrics {
    pub const fn kind(&self) -> ActivityKind {
        match self {
            Self::Running { .. } => ActivityKind::Running,
            Self::Cycling { .. } => ActivityKind::Cycling,
        }
    }
}

/// A logged workout. Immutable once built; every derived field is filled in
/// by the constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    label: String,
    metrics: Metrics,
}

impl Workout {
    /// Assumes validated input (`distance_km > 0`, `duration_min > 0`, `cadence_spm > 0`).
    pub fn running(
        id: String,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        cadence_spm: f64,
    ) -> Self {
        let metrics = Metrics::Running {
            cadence_spm,
            pace_min_per_km: compute_running_pace(distance_km, duration_min),
        };
        Self::build(id, created_at, coordinates, distance_km, duration_min, metrics)
    }

    /// Assumes validated input (`distance_km > 0`, `duration_min > 0`).
    pub fn cycling(
        id: String,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        let metrics = Metrics::Cycling {
            elevation_gain_m,
            speed_km_per_h: compute_cycling_speed(distance_km, duration_min),
        };
        Self::build(id, created_at, coordinates, distance_km, duration_min, metrics)
    }

    fn build(
        id: String,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        metrics: Metrics,
    ) -> Self {
        let label = derive_label(metrics.kind(), &created_at.with_timezone(&Local));
        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            label,
            metrics,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub const fn kind(&self) -> ActivityKind {
        self.metrics.kind()
    }
}

/// Flat storage shape of a [`Workout`], derived fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub activity_kind: ActivityKind,
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_spm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace_min_per_km: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_km_per_h: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(w: &Workout) -> Self {
        let (cadence_spm, pace_min_per_km, elevation_gain_m, speed_km_per_h) = match w.metrics {
            Metrics::Running {
                cadence_spm,
                pace_min_per_km,
            } => (Some(cadence_spm), Some(pace_min_per_km), None, None),
            Metrics::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => (None, None, Some(elevation_gain_m), Some(speed_km_per_h)),
        };

        Self {
            id: w.id.clone(),
            created_at: w.created_at,
            coordinates: w.coordinates,
            distance_km: w.distance_km,
            duration_min: w.duration_min,
            activity_kind: w.kind(),
            label: w.label.clone(),
            cadence_spm,
            pace_min_per_km,
            elevation_gain_m,
            speed_km_per_h,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = String;

    /// Takes every derived field as stored; nothing is recomputed.
    fn try_from(r: WorkoutRecord) -> Result<Self, Self::Error> {
        let metrics = match r.activity_kind {
            ActivityKind::Running => match (r.cadence_spm, r.pace_min_per_km) {
                (Some(cadence_spm), Some(pace_min_per_km)) => Metrics::Running {
                    cadence_spm,
                    pace_min_per_km,
                },
                _ => return Err(format!("running record {} lacks cadence/pace", r.id)),
            },
            ActivityKind::Cycling => match (r.elevation_gain_m, r.speed_km_per_h) {
                (Some(elevation_gain_m), Some(speed_km_per_h)) => Metrics::Cycling {
                    elevation_gain_m,
                    speed_km_per_h,
                },
                _ => return Err(format!("cycling record {} lacks elevation/speed", r.id)),
            },
        };

        Ok(Self {
            id: r.id,
            created_at: r.created_at,
            coordinates: r.coordinates,
            distance_km: r.distance_km,
            duration_min: r.duration_min,
            label: r.label,
            metrics,
        })
    }
}

/// Minutes per kilometre. `distance_km` must be non-zero.
pub fn compute_running_pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Kilometres per hour. `duration_min` must be non-zero.
pub fn compute_cycling_speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// "Running on April 14"
pub fn derive_label(kind: ActivityKind, date: &impl Datelike) -> String {
    let name = kind.as_str();
    let mut chars = name.chars();
    let capitalized = chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect::<String>()
    });
    let month = MONTHS[date.month0() as usize];
    format!("{capitalized} on {month} {}", date.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn pace_is_duration_over_distance() {
        for (d, t) in [(5.0, 25.0), (10.0, 47.5), (0.4, 3.0), (42.195, 180.0)] {
            assert!((compute_running_pace(d, t) - t / d).abs() < 1e-12);
        }
    }

    #[test]
    fn speed_is_distance_over_hours() {
        for (d, t) in [(20.0, 60.0), (33.3, 75.0), (1.0, 1.0)] {
            assert!((compute_cycling_speed(d, t) - d / (t / 60.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn label_uses_month_table() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let dec = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(derive_label(ActivityKind::Running, &jan), "Running on January 3");
        assert_eq!(derive_label(ActivityKind::Cycling, &dec), "Cycling on December 31");
    }

    #[test]
    fn running_constructor_fills_derived_fields() {
        let w = Workout::running("1".into(), at(), Coordinates::new(51.5, -0.12), 5.0, 25.0, 178.0);
        assert_eq!(w.kind(), ActivityKind::Running);
        assert_eq!(
            w.metrics(),
            Metrics::Running {
                cadence_spm: 178.0,
                pace_min_per_km: 5.0
            }
        );
        let local = at().with_timezone(&Local);
        assert_eq!(w.label(), derive_label(ActivityKind::Running, &local));
    }

    #[test]
    fn cycling_constructor_fills_derived_fields() {
        let w = Workout::cycling("2".into(), at(), Coordinates::new(0.0, 0.0), 20.0, 60.0, 0.0);
        assert_eq!(
            w.metrics(),
            Metrics::Cycling {
                elevation_gain_m: 0.0,
                speed_km_per_h: 20.0
            }
        );
        assert!(w.label().starts_with("Cycling on "));
    }

    #[test]
    fn record_is_flat_and_carries_only_its_variant_fields() {
        let w = Workout::running("7".into(), at(), Coordinates::new(1.0, 2.0), 5.0, 25.0, 170.0);
        let json = serde_json::to_value(WorkoutRecord::from(&w)).unwrap();
        assert_eq!(json["activity_kind"], "running");
        assert_eq!(json["coordinates"], serde_json::json!([1.0, 2.0]));
        assert_eq!(json["pace_min_per_km"], 5.0);
        assert!(json.get("speed_km_per_h").is_none());
        assert!(json.get("elevation_gain_m").is_none());
    }

    #[test]
    fn record_missing_variant_fields_is_refused() {
        let w = Workout::cycling("8".into(), at(), Coordinates::new(1.0, 2.0), 5.0, 25.0, 10.0);
        let mut r = WorkoutRecord::from(&w);
        r.speed_km_per_h = None;
        assert!(Workout::try_from(r).is_err());
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Cycling".parse::<ActivityKind>(), Ok(ActivityKind::Cycling));
        assert!("swimming".parse::<ActivityKind>().is_err());
    }
}
