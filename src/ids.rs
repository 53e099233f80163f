use chrono::{DateTime, Utc};

/// Ids are the last ten digits of the creation time in milliseconds.
const ID_MODULUS: u64 = 10_000_000_000;

pub type Clock = Box<dyn FnMut() -> DateTime<Utc>>;

/// Issues `(id, created_at)` pairs for new workouts.
///
/// Timestamp-derived like a plain `now_ms % 10^10`, but never hands out an id
/// twice: when the clock has not advanced past the last id, the last id + 1 is
/// used instead.
pub struct IdGenerator {
    clock: Clock,
    last: Option<u64>,
}

impl IdGenerator {
    pub fn system() -> Self {
        Self::with_clock(Box::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock, last: None }
    }

    /// Make sure future ids sort after every id in `existing`. Ids outside
    /// the ten-digit range could not have come from here and are ignored.
    pub fn observe<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) {
        let max = existing
            .into_iter()
            .filter_map(|id| id.parse::<u64>().ok())
            .filter(|id| *id < ID_MODULUS)
            .max();
        if let Some(max) = max {
            self.last = Some(self.last.map_or(max, |last| last.max(max)));
        }
    }

    pub fn next(&mut self) -> (String, DateTime<Utc>) {
        let now = (self.clock)();
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let mut id = millis % ID_MODULUS;
        if let Some(last) = self.last
            && id <= last
        {
            id = last + 1;
        }
        self.last = Some(id);
        (format!("{id:010}"), now)
    }
}
