//! Terminal stand-ins for the map, form and list widgets used by the CLI.

use crate::dlog;
use crate::render::WorkoutListItem;
use crate::session::{FormInput, ListView, MapDisplay};
use crate::types::{ActivityKind, Coordinates};

/// Prints map requests instead of drawing them. Markers are only echoed
/// when `echo_markers` is set, so `list` output stays clean.
#[derive(Debug, Default)]
pub struct TerminalMap {
    pub echo_markers: bool,
}

impl MapDisplay for TerminalMap {
    fn initialize(&mut self, center: Coordinates, zoom: u8) {
        dlog!("map_init center={center} zoom={zoom}");
    }

    fn add_marker(&mut self, at: Coordinates, popup: &str, class: &str) {
        dlog!("marker at={at} class={class}");
        if self.echo_markers {
            println!("📍 {at}  {popup}");
        }
    }

    fn pan_to(&mut self, at: Coordinates, zoom: u8) {
        println!("https://www.openstreetmap.org/#map={zoom}/{}/{}", at.lat, at.lng);
    }

    fn clear_markers(&mut self) {
        dlog!("markers cleared");
    }
}

#[derive(Debug, Default)]
pub struct TerminalForm;

impl FormInput for TerminalForm {
    fn show(&mut self) {
        dlog!("form shown");
    }

    fn hide(&mut self) {
        dlog!("form hidden");
    }

    fn clear_fields(&mut self) {}

    fn set_visible_extra_field(&mut self, kind: ActivityKind) {
        let field = match kind {
            ActivityKind::Running => "cadence",
            ActivityKind::Cycling => "elevation",
        };
        dlog!("extra_field={field}");
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Prints each rendered list entry; `quiet` suppresses output.
#[derive(Debug, Default)]
pub struct TerminalList {
    pub quiet: bool,
}

impl ListView for TerminalList {
    fn render(&mut self, item: &WorkoutListItem) {
        if !self.quiet {
            println!("{item}");
        }
    }

    fn clear(&mut self) {
        dlog!("list cleared");
    }
}
