use crate::dlog;
use crate::ids::IdGenerator;
use crate::types::{ActivityKind, Coordinates, Workout};
use thiserror::Error;

/// Why a form submission did not produce a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("input is not a finite number")]
    NonFinite,

    #[error("input must be a positive number")]
    NonPositive,
}

impl Rejection {
    /// The one message shown to the user for every rejection.
    pub const NOTICE: &'static str = "all input fields must be positive numbers";
}

/// Field values as typed into the form. `extra` is cadence for running and
/// elevation gain for cycling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub distance: String,
    pub duration: String,
    pub extra: String,
}

impl RawFields {
    pub fn new(distance: impl Into<String>, duration: impl Into<String>, extra: impl Into<String>) -> Self {
        Self {
            distance: distance.into(),
            duration: duration.into(),
            extra: extra.into(),
        }
    }
}

/// Read a form field as a number. Blank reads as 0.
pub fn parse_number(raw: &str) -> Result<f64, Rejection> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Rejection::NonFinite),
    }
}

/// Validate `raw` and build the matching workout variant.
///
/// All three fields must parse before positivity is checked. Cycling
/// elevation may be zero (or negative); running cadence may not.
/// An id is drawn from `ids` only on success.
pub fn submit_workout(
    kind: ActivityKind,
    coordinates: Coordinates,
    raw: &RawFields,
    ids: &mut IdGenerator,
) -> Result<Workout, Rejection> {
    let distance = parse_number(&raw.distance)?;
    let duration = parse_number(&raw.duration)?;
    let extra = parse_number(&raw.extra)?;

    let positive = match kind {
        ActivityKind::Running => [distance, duration, extra].iter().all(|v| *v > 0.0),
        ActivityKind::Cycling => [distance, duration].iter().all(|v| *v > 0.0),
    };
    if !positive {
        dlog!("rejected kind={kind} distance={distance} duration={duration} extra={extra}");
        return Err(Rejection::NonPositive);
    }

    let (id, created_at) = ids.next();
    let workout = match kind {
        ActivityKind::Running => {
            Workout::running(id, created_at, coordinates, distance, duration, extra)
        }
        ActivityKind::Cycling => {
            Workout::cycling(id, created_at, coordinates, distance, duration, extra)
        }
    };
    Ok(workout)
}
