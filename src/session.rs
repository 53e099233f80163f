use crate::dlog;
use crate::ids::IdGenerator;
use crate::persistence;
use crate::render::{WorkoutListItem, popup_class, popup_content};
use crate::storage::KeyValueStore;
use crate::types::{ActivityKind, Coordinates, Workout};
use crate::validate::{RawFields, Rejection, submit_workout};
use crate::workout_log::{LogError, WorkoutLog};
use thiserror::Error;

pub const GEOLOCATION_NOTICE: &str = "Unable to load your current position";

/// The map widget: centred view, click events, markers with popups.
pub trait MapDisplay {
    fn initialize(&mut self, center: Coordinates, zoom: u8);
    fn add_marker(&mut self, at: Coordinates, popup: &str, class: &str);
    fn pan_to(&mut self, at: Coordinates, zoom: u8);
    fn clear_markers(&mut self);
}

/// The workout form plus the user notice channel.
pub trait FormInput {
    fn show(&mut self);
    fn hide(&mut self);
    fn clear_fields(&mut self);
    fn set_visible_extra_field(&mut self, kind: ActivityKind);
    fn notify(&mut self, message: &str);
}

/// The visible workout list.
pub trait ListView {
    fn render(&mut self, item: &WorkoutListItem);
    fn clear(&mut self);
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("workout rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("no map location selected")]
    NotAwaitingInput,

    #[error("map is not ready yet")]
    MapNotReady,

    #[error("current position unavailable; map disabled")]
    GeolocationUnavailable,

    #[error("no workout with id {0}")]
    UnknownWorkout(String),

    #[error(transparent)]
    Log(#[from] LogError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MapReady(Coordinates),
    GeolocationFailed,
    MapClick(Coordinates),
    ActivityKindChanged(ActivityKind),
    Submit { kind: ActivityKind, fields: RawFields },
    Select(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    AwaitingInput { at: Coordinates },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapState {
    Pending,
    Ready,
    Unavailable,
}

/// Owns everything the workout flow touches for one session.
pub struct Session<S, M, F, L> {
    store: S,
    map: M,
    form: F,
    list: L,
    ids: IdGenerator,
    zoom: u8,
    log: WorkoutLog,
    phase: Phase,
    map_state: MapState,
}

impl<S, M, F, L> Session<S, M, F, L>
where
    S: KeyValueStore,
    M: MapDisplay,
    F: FormInput,
    L: ListView,
{
    pub fn new(store: S, map: M, form: F, list: L, ids: IdGenerator, zoom: u8) -> Self {
        Self {
            store,
            map,
            form,
            list,
            ids,
            zoom,
            log: WorkoutLog::new(),
            phase: Phase::Idle,
            map_state: MapState::Pending,
        }
    }

    /// Rehydrate the log from storage and render it, replacing whatever was
    /// shown before. A failing store is treated like an empty one. Markers
    /// follow if the map is already up.
    pub fn restore(&mut self) -> usize {
        let workouts = persistence::load(&self.store).unwrap_or_else(|e| {
            tracing::warn!(err = %e, "could not read stored workouts; starting empty");
            Vec::new()
        });

        self.ids.observe(workouts.iter().map(Workout::id));
        self.log.replace_all(workouts);
        self.list.clear();
        for w in self.log.all() {
            self.list.render(&WorkoutListItem::from(w));
        }
        if self.map_state == MapState::Ready {
            self.map.clear_markers();
            self.render_all_markers();
        }
        self.log.len()
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::MapReady(center) => self.map_ready(center),
            SessionEvent::GeolocationFailed => self.geolocation_failed(),
            SessionEvent::MapClick(at) => return self.map_click(at),
            SessionEvent::ActivityKindChanged(kind) => self.change_activity_kind(kind),
            SessionEvent::Submit { kind, fields } => {
                self.submit(kind, &fields)?;
            }
            SessionEvent::Select(id) => return self.select(&id),
        }
        Ok(())
    }

    pub fn map_ready(&mut self, center: Coordinates) {
        if self.map_state == MapState::Ready {
            return;
        }
        self.map.initialize(center, self.zoom);
        self.map_state = MapState::Ready;
        tracing::info!(center = %center, zoom = self.zoom, "map ready");
        self.render_all_markers();
    }

    /// Reported once; the list keeps working without a map.
    pub fn geolocation_failed(&mut self) {
        if self.map_state != MapState::Pending {
            return;
        }
        self.map_state = MapState::Unavailable;
        tracing::warn!("geolocation failed; map disabled");
        self.form.notify(GEOLOCATION_NOTICE);
    }

    pub fn map_click(&mut self, at: Coordinates) -> Result<(), SessionError> {
        self.require_map()?;
        dlog!("map_click at={at}");
        self.phase = Phase::AwaitingInput { at };
        self.form.show();
        Ok(())
    }

    pub fn change_activity_kind(&mut self, kind: ActivityKind) {
        self.form.set_visible_extra_field(kind);
    }

    /// Validate and log a workout at the pending click location.
    ///
    /// On rejection the session stays in [`Phase::AwaitingInput`]. A storage
    /// failure is returned after the workout is already logged and rendered.
    pub fn submit(&mut self, kind: ActivityKind, fields: &RawFields) -> Result<Workout, SessionError> {
        let Phase::AwaitingInput { at } = self.phase else {
            return Err(SessionError::NotAwaitingInput);
        };

        let workout = match submit_workout(kind, at, fields, &mut self.ids) {
            Ok(w) => w,
            Err(rejection) => {
                tracing::info!(kind = %kind, reason = %rejection, "submission rejected");
                self.form.notify(Rejection::NOTICE);
                return Err(rejection.into());
            }
        };

        self.log.append(workout.clone())?;
        tracing::info!(id = workout.id(), kind = %kind, label = workout.label(), "workout logged");

        self.render_marker(&workout);
        self.list.render(&WorkoutListItem::from(&workout));
        let persisted = persistence::save(&mut self.store, &self.log);
        self.form.clear_fields();
        self.form.hide();
        self.phase = Phase::Idle;

        persisted?;
        Ok(workout)
    }

    /// Resolve a list selection and move the map to it.
    pub fn select(&mut self, id: &str) -> Result<(), SessionError> {
        let at = self
            .log
            .find_by_id(id)
            .map(Workout::coordinates)
            .ok_or_else(|| SessionError::UnknownWorkout(id.to_string()))?;
        self.require_map()?;
        self.map.pan_to(at, self.zoom);
        Ok(())
    }

    /// Drop the stored log and start over with an empty session.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        persistence::clear(&mut self.store)?;
        self.log.replace_all(Vec::new());
        self.list.clear();
        if self.map_state == MapState::Ready {
            self.map.clear_markers();
        }
        self.form.clear_fields();
        self.form.hide();
        self.phase = Phase::Idle;
        tracing::info!("session reset");
        Ok(())
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn log(&self) -> &WorkoutLog {
        &self.log
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub const fn form(&self) -> &F {
        &self.form
    }

    pub const fn list(&self) -> &L {
        &self.list
    }

    fn require_map(&self) -> Result<(), SessionError> {
        match self.map_state {
            MapState::Ready => Ok(()),
            MapState::Pending => Err(SessionError::MapNotReady),
            MapState::Unavailable => Err(SessionError::GeolocationUnavailable),
        }
    }

    fn render_marker(&mut self, w: &Workout) {
        if self.map_state != MapState::Ready {
            return;
        }
        self.map
            .add_marker(w.coordinates(), &popup_content(w), &popup_class(w.kind()));
    }

    fn render_all_markers(&mut self) {
        for w in self.log.all() {
            self.map
                .add_marker(w.coordinates(), &popup_content(w), &popup_class(w.kind()));
        }
    }
}
