//! Dial rotation engine - composes offset resolution and angle geometry
//!
//! Computes each dial's rotation relative to the reference dial (the first
//! selected city), converts reference-zone minutes to per-city wall-clock
//! minutes, and builds the full [`DialScene`] handed to the render layer.

use chrono::{DateTime, Utc};

use crate::catalog;
use crate::geometry::{
    hour_to_angle_deg, minute_to_angle_deg, offset_diff_to_rotation_deg, polar_to_percent,
    wrap_minutes,
};
use crate::offset::{resolve_offset_hours, OffsetError};

/// Radius of the hour marker ring, as a percent of the dial container
pub const MARKER_RADIUS_PERCENT: f64 = 48.0;

/// Radius of the hour label ring, as a percent of the dial container
pub const LABEL_RADIUS_PERCENT: f64 = 40.0;

/// Hour labels are drawn every this many hours; markers at this interval are
/// the major ticks
pub const LABEL_HOUR_STEP: u32 = 3;

/// Per-dial configuration derived from the selected city list
#[derive(Debug, Clone, PartialEq)]
pub struct DialConfig {
    /// IANA timezone id of the city on this dial
    pub timezone_id: String,
    /// Position in the city list; index 0 is the reference dial
    pub ordinal_index: usize,
    /// Diameter as a fraction of the outermost dial, in (0, 1]
    pub size_fraction: f64,
}

/// An hour tick mark on a dial, in the dial's own (unrotated) frame
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPlacement {
    /// Hour of day this mark represents (0-23)
    pub hour: u32,
    /// Angle under the shared convention, before dial rotation
    pub angle_deg: f64,
    /// Horizontal position, percent of the dial container
    pub x_percent: f64,
    /// Vertical position, percent of the dial container (y grows downward)
    pub y_percent: f64,
    /// Major marks fall on the label hours
    pub major: bool,
}

/// An hour label on a dial, in the dial's own (unrotated) frame
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Formatted label text per the active time format
    pub text: String,
    /// Horizontal position, percent of the dial container
    pub x_percent: f64,
    /// Vertical position, percent of the dial container
    pub y_percent: f64,
    /// Rotation applied to the label so text stays upright once the dial
    /// itself is rotated; always the negative of the dial rotation
    pub counter_rotation_deg: f64,
}

/// Everything the render layer needs for one dial
#[derive(Debug, Clone, PartialEq)]
pub struct DialRender {
    pub config: DialConfig,
    /// "City, Country" or the raw timezone id
    pub display_name: String,
    /// Rotation relative to the reference dial, degrees clockwise
    pub rotation_deg: f64,
    pub markers: Vec<MarkerPlacement>,
    pub labels: Vec<LabelPlacement>,
    /// The city's wall-clock time at the indicated minute, formatted
    pub time_text: String,
}

/// The full rendering contract for one geometry pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialScene {
    /// Dials in city-list order: index 0 is the innermost, reference dial
    pub dials: Vec<DialRender>,
    /// Indicator hand angle; `None` when no cities are selected (the
    /// indicator is hidden)
    pub indicator_angle_deg: Option<f64>,
}

/// Rotation of `target_id`'s dial relative to `reference_id`'s dial
///
/// A target ahead of the reference rotates clockwise by 15 degrees per hour
/// of offset difference. A dial measured against itself is exactly zero.
pub fn compute_dial_rotation(
    reference_id: &str,
    target_id: &str,
    instant: DateTime<Utc>,
) -> Result<f64, OffsetError> {
    let reference_offset = resolve_offset_hours(reference_id, instant)?;
    let target_offset = resolve_offset_hours(target_id, instant)?;
    Ok(offset_diff_to_rotation_deg(target_offset - reference_offset))
}

/// Counter-rotation keeping labels upright; fixed at the negative of the
/// dial rotation
pub fn label_counter_rotation(rotation_deg: f64) -> f64 {
    -rotation_deg
}

/// Convert a minute-of-day in the reference zone to the equivalent
/// minute-of-day in the target zone, wrapped into [0, 1440)
pub fn compute_city_time_at_minute(
    target_id: &str,
    reference_id: &str,
    base_minute: f64,
    instant: DateTime<Utc>,
) -> Result<f64, OffsetError> {
    let reference_offset = resolve_offset_hours(reference_id, instant)?;
    let target_offset = resolve_offset_hours(target_id, instant)?;
    let diff_minutes = f64::from(target_offset - reference_offset) * 60.0;
    Ok(wrap_minutes(base_minute + diff_minutes))
}

/// Diameter fractions for `count` nested dials
///
/// The first city gets the smallest, innermost dial and the last city the
/// full-size outermost dial, so fractions increase strictly with the
/// ordinal index and dials nest without collision.
pub fn dial_size_fractions(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 1.0 - (count - 1 - i) as f64 / (count + 1) as f64)
        .collect()
}

/// Build per-dial configs for a city list
pub fn dial_configs(selected_cities: &[String]) -> Vec<DialConfig> {
    let fractions = dial_size_fractions(selected_cities.len());
    selected_cities
        .iter()
        .zip(fractions)
        .enumerate()
        .map(|(index, (timezone_id, size_fraction))| DialConfig {
            timezone_id: timezone_id.clone(),
            ordinal_index: index,
            size_fraction,
        })
        .collect()
}

/// Format a minute-of-day as a clock time, e.g. "06:00" or "6:00 AM"
pub fn format_minute_of_day(minute_of_day: f64, use_24_hour: bool) -> String {
    let total = wrap_minutes(minute_of_day);
    let hours = (total / 60.0).floor() as u32;
    let minutes = (total % 60.0).floor() as u32;

    if use_24_hour {
        format!("{:02}:{:02}", hours, minutes)
    } else {
        let display_hours = match hours {
            0 => 12,
            1..=12 => hours,
            _ => hours - 12,
        };
        let meridiem = if hours < 12 { "AM" } else { "PM" };
        format!("{}:{:02} {}", display_hours, minutes, meridiem)
    }
}

/// Format an hour-of-day for the dial face, e.g. "6:00" or "6am"
///
/// In 24-hour mode midnight reads "24:00" at the top of the dial.
pub fn format_hour_label(hour: u32, use_24_hour: bool) -> String {
    if use_24_hour {
        if hour == 0 {
            "24:00".to_string()
        } else {
            format!("{}:00", hour)
        }
    } else if hour == 0 {
        "12am".to_string()
    } else if hour == 12 {
        "12pm".to_string()
    } else if hour < 12 {
        format!("{}am", hour)
    } else {
        format!("{}pm", hour - 12)
    }
}

/// Build the rendering contract for the current city list and indicated
/// minute (a minute-of-day in the reference zone)
///
/// Offsets are resolved fresh on every call; nothing is cached across
/// geometry passes. A city whose id no longer resolves is skipped with a
/// warning rather than failing the whole scene.
pub fn build_dial_scene(
    selected_cities: &[String],
    base_minute: f64,
    use_24_hour: bool,
    instant: DateTime<Utc>,
) -> DialScene {
    let valid_cities: Vec<String> = selected_cities
        .iter()
        .filter(|id| match crate::offset::validate(id) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Skipping dial: {}", e);
                false
            }
        })
        .cloned()
        .collect();

    if valid_cities.is_empty() {
        return DialScene::default();
    }

    let reference_id = valid_cities[0].clone();
    let configs = dial_configs(&valid_cities);

    let dials = configs
        .into_iter()
        .map(|config| {
            // Ids were validated above, so these cannot fail for a fixed
            // instant; fall back to the reference's own values if they do.
            let rotation_deg = compute_dial_rotation(&reference_id, &config.timezone_id, instant)
                .unwrap_or(0.0);
            let city_minute =
                compute_city_time_at_minute(&config.timezone_id, &reference_id, base_minute, instant)
                    .unwrap_or(base_minute);

            let markers = (0..24)
                .map(|hour| {
                    let angle_deg = hour_to_angle_deg(hour);
                    let (x_percent, y_percent) = polar_to_percent(angle_deg, MARKER_RADIUS_PERCENT);
                    MarkerPlacement {
                        hour,
                        angle_deg,
                        x_percent,
                        y_percent,
                        major: hour % LABEL_HOUR_STEP == 0,
                    }
                })
                .collect();

            let labels = (0..24)
                .step_by(LABEL_HOUR_STEP as usize)
                .map(|hour| {
                    let angle_deg = hour_to_angle_deg(hour);
                    let (x_percent, y_percent) = polar_to_percent(angle_deg, LABEL_RADIUS_PERCENT);
                    LabelPlacement {
                        hour,
                        text: format_hour_label(hour, use_24_hour),
                        x_percent,
                        y_percent,
                        counter_rotation_deg: label_counter_rotation(rotation_deg),
                    }
                })
                .collect();

            DialRender {
                display_name: catalog::display_name(&config.timezone_id),
                rotation_deg,
                markers,
                labels,
                time_text: format_minute_of_day(city_minute, use_24_hour),
                config,
            }
        })
        .collect();

    DialScene {
        dials,
        indicator_angle_deg: Some(minute_to_angle_deg(base_minute)),
    }
}
