use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "mapty.sqlite3";
pub const DEFAULT_MAP_ZOOM: u8 = 13;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub map_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            map_zoom: DEFAULT_MAP_ZOOM,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads `MAPTY_DB` and `MAPTY_MAP_ZOOM` through `get`, so tests never touch
    /// the process environment.
    pub fn from_env_with<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let db_path = get("MAPTY_DB").map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
        let map_zoom = match get("MAPTY_MAP_ZOOM") {
            None => DEFAULT_MAP_ZOOM,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "MAPTY_MAP_ZOOM is not a zoom level; using default");
                DEFAULT_MAP_ZOOM
            }),
        };
        Self { db_path, map_zoom }
    }
}
