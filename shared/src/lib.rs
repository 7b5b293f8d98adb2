//! Shared engine for the Spindlo world-dial clock
//!
//! Everything that is not pixels lives here: the city catalog, timezone
//! offset resolution, the dial angle geometry, the rotation engine that
//! turns offset differences into nested-dial rotations, the Live/Overridden
//! time-indicator controller, and preference persistence. The binary crate
//! only renders the [`rotation::DialScene`] this crate produces.

pub mod catalog;
pub mod config;
pub mod geometry;
pub mod indicator;
pub mod offset;
pub mod prefs;
pub mod rotation;

pub use catalog::{display_name, find, search, TimezoneRecord, MAX_SEARCH_RESULTS};
pub use config::{delete_preferences, load_preferences, save_preferences, ConfigError};
pub use indicator::{ClockState, IndicatorMode, TimeIndicatorController};
pub use offset::{resolve_offset_hours, validate, OffsetError};
pub use prefs::{
    parse_share_query, resolve_preferences, Preferences, ShareLink, TimeFormat, DEFAULT_CITIES,
};
pub use rotation::{
    build_dial_scene, compute_city_time_at_minute, compute_dial_rotation, dial_size_fractions,
    format_hour_label, format_minute_of_day, DialConfig, DialRender, DialScene,
};
