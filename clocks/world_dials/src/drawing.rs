//! Drawing module - nested dial rendering from the DialScene contract
//!
//! Each dial is a disc shaded as a day/night cycle, rotated by its offset
//! difference against the reference (innermost) dial, with hour ticks and
//! labels. Labels are placed in the rotated frame but drawn upright, which
//! realizes the label counter-rotation from the scene.

use nannou::prelude::*;
use shared::DialScene;

/// Color palette for the world dials theme
pub mod colors {
    use nannou::prelude::*;

    const fn srgb8(red: u8, green: u8, blue: u8) -> Srgb<u8> {
        Srgb {
            red,
            green,
            blue,
            standard: std::marker::PhantomData,
        }
    }

    pub const BACKGROUND: Srgb<u8> = srgb8(16, 18, 28);
    pub const TEXT_PRIMARY: Srgb<u8> = srgb8(240, 240, 240);
    pub const TEXT_SECONDARY: Srgb<u8> = srgb8(160, 160, 160);
    pub const INDICATOR: Srgb<u8> = srgb8(255, 92, 92);
    pub const RIM: Srgb<u8> = srgb8(60, 64, 84);

    /// One shade per hour wedge, midnight at index 0: deep night through a
    /// midday gold and back
    pub const DAY_NIGHT: [Srgb<u8>; 24] = [
        srgb8(26, 34, 56),
        srgb8(10, 14, 39),
        srgb8(10, 14, 39),
        srgb8(10, 14, 39),
        srgb8(26, 34, 56),
        srgb8(58, 68, 88),
        srgb8(90, 100, 120),
        srgb8(122, 132, 152),
        srgb8(154, 164, 184),
        srgb8(232, 200, 98),
        srgb8(240, 216, 124),
        srgb8(245, 225, 150),
        srgb8(250, 234, 176),
        srgb8(254, 243, 202),
        srgb8(245, 225, 150),
        srgb8(240, 216, 124),
        srgb8(232, 200, 98),
        srgb8(205, 176, 95),
        srgb8(154, 164, 184),
        srgb8(122, 132, 152),
        srgb8(90, 100, 120),
        srgb8(74, 84, 104),
        srgb8(58, 68, 88),
        srgb8(42, 52, 72),
    ];
}

/// Point on a dial at `radius` from `center`, angle 0 at the top and
/// increasing clockwise
fn dial_point(center: Point2, radius: f32, angle_deg: f32) -> Point2 {
    let radians = angle_deg.to_radians();
    pt2(
        center.x + radius * radians.sin(),
        center.y + radius * radians.cos(),
    )
}

/// Samples per hour wedge arc
const WEDGE_ARC_SAMPLES: usize = 6;

/// Draw the full dial stack plus the time indicator hand
///
/// Dials are painted outermost first so the smaller, inner dials end up on
/// top, matching the nesting order of the scene.
pub fn draw_dial_stack(draw: &Draw, scene: &DialScene, center: Point2, base_diameter: f32) {
    for dial in scene.dials.iter().rev() {
        let radius = base_diameter * dial.config.size_fraction as f32 / 2.0;
        let rotation = dial.rotation_deg as f32;

        // Day/night wedges, rotated with the dial
        for (hour, &color) in colors::DAY_NIGHT.iter().enumerate() {
            let start = rotation + hour as f32 * 15.0;
            let mut points = Vec::with_capacity(WEDGE_ARC_SAMPLES + 2);
            points.push(center);
            for i in 0..=WEDGE_ARC_SAMPLES {
                let angle = start + 15.0 * i as f32 / WEDGE_ARC_SAMPLES as f32;
                points.push(dial_point(center, radius, angle));
            }
            draw.polygon().points(points).color(color);
        }

        draw.ellipse()
            .xy(center)
            .radius(radius)
            .no_fill()
            .stroke(colors::RIM)
            .stroke_weight(2.0);

        // Hour ticks
        for marker in &dial.markers {
            let angle = rotation + marker.angle_deg as f32;
            let tick_length = if marker.major {
                radius * 0.08
            } else {
                radius * 0.045
            };
            let outer = dial_point(center, radius * 0.96, angle);
            let inner = dial_point(center, radius * 0.96 - tick_length, angle);
            let (color, weight) = if marker.major {
                (srgba(0u8, 0u8, 0u8, 200u8), 2.5)
            } else {
                (srgba(0u8, 0u8, 0u8, 100u8), 1.0)
            };
            draw.line().start(inner).end(outer).color(color).weight(weight);
        }

        // Hour labels: positioned in the rotated frame, drawn upright (the
        // counter-rotation from the scene)
        let font_size = if dial.config.ordinal_index == 0 { 16 } else { 14 };
        for label in &dial.labels {
            let angle = rotation + shared::geometry::hour_to_angle_deg(label.hour) as f32;
            let pos = dial_point(center, radius * 0.80, angle);
            draw.text(&label.text)
                .xy(pos)
                .font_size(font_size)
                .color(colors::TEXT_PRIMARY)
                .w(80.0);
        }
    }

    // Indicator hand over the whole stack
    if let Some(angle_deg) = scene.indicator_angle_deg {
        let angle = angle_deg as f32;
        let outer_radius = base_diameter / 2.0;
        let tip = dial_point(center, outer_radius, angle);

        draw.line()
            .start(center)
            .end(tip)
            .color(colors::INDICATOR)
            .weight(3.0);
        draw.ellipse()
            .xy(tip)
            .radius(7.0)
            .color(colors::INDICATOR);
        draw.ellipse()
            .xy(center)
            .radius(5.0)
            .color(colors::INDICATOR);
    }
}

/// Draw the placeholder shown when no cities are selected
pub fn draw_empty_state(draw: &Draw, center: Point2) {
    draw.text("Select a city to begin")
        .xy(center)
        .font_size(22)
        .color(colors::TEXT_SECONDARY)
        .w(400.0);
}
