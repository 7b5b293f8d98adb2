//! Time indicator controller - Live/Overridden state machine
//!
//! Owns the clock state (selected cities, format flag, optional manual
//! minute) and translates pointer angles into minute-of-day overrides. While
//! Live, the indicated minute tracks the current time in the reference zone;
//! once the user drags or clicks, the override sticks until explicitly
//! cleared.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::geometry::angle_to_minute_of_day;
use crate::rotation::{build_dial_scene, DialScene};

/// Whether the indicator tracks the live clock or a user-chosen minute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// Tracking the current time in the reference zone
    Live,
    /// A dragged/clicked minute is in effect until cleared
    Overridden,
}

/// Mutable widget state driving every geometry pass
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    /// Ordered timezone ids; index 0 is the reference dial. Duplicates are
    /// allowed and order is significant.
    pub selected_cities: Vec<String>,
    /// 24-hour vs 12-hour display
    pub use_24_hour: bool,
    /// Manually selected minute-of-day in the reference zone, in [0, 1440);
    /// `None` means track the live clock
    pub selected_minute: Option<f64>,
}

/// Stateful controller owning the selected time and the drag interaction
#[derive(Debug, Clone)]
pub struct TimeIndicatorController {
    state: ClockState,
    dragging: bool,
}

impl TimeIndicatorController {
    pub fn new(selected_cities: Vec<String>, use_24_hour: bool) -> Self {
        Self {
            state: ClockState {
                selected_cities,
                use_24_hour,
                selected_minute: None,
            },
            dragging: false,
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn mode(&self) -> IndicatorMode {
        if self.state.selected_minute.is_some() {
            IndicatorMode::Overridden
        } else {
            IndicatorMode::Live
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn use_24_hour(&self) -> bool {
        self.state.use_24_hour
    }

    pub fn set_use_24_hour(&mut self, use_24_hour: bool) {
        self.state.use_24_hour = use_24_hour;
    }

    /// The reference timezone id (first selected city), if any
    pub fn reference_city(&self) -> Option<&str> {
        self.state.selected_cities.first().map(String::as_str)
    }

    /// Minute-of-day the indicator points at: the override when one is set,
    /// otherwise the live time in the reference zone. `None` hides the
    /// indicator (no cities selected).
    pub fn indicator_minute(&self, now: DateTime<Utc>) -> Option<f64> {
        let reference = self.reference_city()?;
        if let Some(minute) = self.state.selected_minute {
            return Some(minute);
        }
        let tz: Tz = reference.parse().ok()?;
        let local = now.with_timezone(&tz);
        Some(
            f64::from(local.hour()) * 60.0
                + f64::from(local.minute())
                + f64::from(local.second()) / 60.0,
        )
    }

    /// Begin a drag at the decoded pointer angle; Live -> Overridden
    ///
    /// A no-op with no cities selected, since there is nothing to indicate.
    pub fn drag_start(&mut self, angle_deg: f64) {
        if self.state.selected_cities.is_empty() {
            return;
        }
        self.dragging = true;
        self.state.selected_minute = Some(angle_to_minute_of_day(angle_deg));
    }

    /// Update the override while a drag is active
    ///
    /// Stray move events outside a drag (including ones arriving after the
    /// dial was re-rendered under the pointer) are safe no-ops.
    pub fn drag_move(&mut self, angle_deg: f64) {
        if !self.dragging {
            return;
        }
        self.state.selected_minute = Some(angle_to_minute_of_day(angle_deg));
    }

    /// End the drag interaction; the override stays in effect
    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    /// A click anywhere on the dial stack sets the override directly
    pub fn click(&mut self, angle_deg: f64) {
        if self.state.selected_cities.is_empty() {
            return;
        }
        self.state.selected_minute = Some(angle_to_minute_of_day(angle_deg));
    }

    /// Drop the override and return to tracking the live clock
    ///
    /// The engine never does this on its own; the override is sticky until
    /// the user asks for live time again.
    pub fn clear_override(&mut self) {
        self.state.selected_minute = None;
        self.dragging = false;
    }

    /// Update the city slot at `index`: replace it, append a new city, or
    /// remove it when `selection` is `None`
    ///
    /// Mirrors the selector rows in the view: each existing city has a row
    /// plus one trailing empty row whose selection appends.
    pub fn select_city(&mut self, index: usize, selection: Option<String>) {
        match selection {
            Some(timezone_id) => {
                if index < self.state.selected_cities.len() {
                    self.state.selected_cities[index] = timezone_id;
                } else {
                    self.state.selected_cities.push(timezone_id);
                }
            }
            None => {
                if index < self.state.selected_cities.len() {
                    self.state.selected_cities.remove(index);
                }
            }
        }
    }

    /// Build the rendering contract for the current state at `now`
    ///
    /// With no cities (or while the reference id fails to resolve) this
    /// yields an empty scene with the indicator hidden.
    pub fn scene(&self, now: DateTime<Utc>) -> DialScene {
        match self.indicator_minute(now) {
            Some(base_minute) => build_dial_scene(
                &self.state.selected_cities,
                base_minute,
                self.state.use_24_hour,
                now,
            ),
            None => DialScene::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EPSILON: f64 = 1e-9;

    fn controller() -> TimeIndicatorController {
        TimeIndicatorController::new(
            vec![
                "America/New_York".to_string(),
                "Europe/London".to_string(),
            ],
            true,
        )
    }

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_starts_live() {
        let c = controller();
        assert_eq!(c.mode(), IndicatorMode::Live);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_live_minute_tracks_reference_zone() {
        // 12:00 UTC is 07:00 in New York in January
        let minute = controller().indicator_minute(noon_utc()).unwrap();
        assert!((minute - 420.0).abs() < EPSILON);
    }

    #[test]
    fn test_drag_to_six_am() {
        let mut c = controller();
        c.drag_start(90.0);
        assert_eq!(c.mode(), IndicatorMode::Overridden);
        assert!(c.is_dragging());
        let minute = c.state().selected_minute.unwrap();
        assert!((minute - 360.0).abs() < EPSILON);

        // The scene now shows 06:00 in New York, 11:00 in London
        let scene = c.scene(noon_utc());
        assert_eq!(scene.dials[0].time_text, "06:00");
        assert_eq!(scene.dials[1].time_text, "11:00");
    }

    #[test]
    fn test_override_is_sticky_after_drag_end() {
        let mut c = controller();
        c.drag_start(180.0);
        c.drag_move(270.0);
        c.drag_end();
        assert!(!c.is_dragging());
        assert_eq!(c.mode(), IndicatorMode::Overridden);
        let minute = c.state().selected_minute.unwrap();
        assert!((minute - 1080.0).abs() < EPSILON);

        // Ticks do not clobber the override
        let indicated = c.indicator_minute(noon_utc()).unwrap();
        assert!((indicated - 1080.0).abs() < EPSILON);
    }

    #[test]
    fn test_stray_move_without_drag_is_noop() {
        let mut c = controller();
        c.drag_move(90.0);
        assert_eq!(c.mode(), IndicatorMode::Live);
        assert!(c.state().selected_minute.is_none());
    }

    #[test]
    fn test_clear_override_returns_to_live() {
        let mut c = controller();
        c.click(45.0);
        assert_eq!(c.mode(), IndicatorMode::Overridden);
        c.clear_override();
        assert_eq!(c.mode(), IndicatorMode::Live);
    }

    #[test]
    fn test_empty_city_list_hides_indicator() {
        let mut c = TimeIndicatorController::new(Vec::new(), true);
        assert!(c.indicator_minute(noon_utc()).is_none());
        assert!(c.scene(noon_utc()).dials.is_empty());

        // Drags with nothing selected change nothing
        c.drag_start(90.0);
        assert_eq!(c.mode(), IndicatorMode::Live);
    }

    #[test]
    fn test_select_city_replaces_appends_and_removes() {
        let mut c = controller();
        c.select_city(1, Some("Asia/Tokyo".to_string()));
        assert_eq!(
            c.state().selected_cities,
            vec!["America/New_York", "Asia/Tokyo"]
        );

        // Index past the end appends (the trailing empty selector row)
        c.select_city(2, Some("Europe/Paris".to_string()));
        assert_eq!(c.state().selected_cities.len(), 3);

        // Duplicates are allowed
        c.select_city(3, Some("Asia/Tokyo".to_string()));
        assert_eq!(c.state().selected_cities.len(), 4);

        c.select_city(0, None);
        assert_eq!(c.state().selected_cities[0], "Asia/Tokyo");
        assert_eq!(c.state().selected_cities.len(), 3);

        // Removing past the end is a no-op
        c.select_city(10, None);
        assert_eq!(c.state().selected_cities.len(), 3);
    }

    #[test]
    fn test_removing_reference_shifts_rotation_baseline() {
        let mut c = TimeIndicatorController::new(
            vec![
                "America/New_York".to_string(),
                "Europe/London".to_string(),
                "Asia/Tokyo".to_string(),
            ],
            true,
        );
        c.click(0.0);
        c.select_city(0, None);
        let scene = c.scene(noon_utc());
        // London is now the reference and sits at zero rotation
        assert_eq!(scene.dials[0].config.timezone_id, "Europe/London");
        assert_eq!(scene.dials[0].rotation_deg, 0.0);
        assert!((scene.dials[1].rotation_deg - 135.0).abs() < EPSILON);
    }
}
