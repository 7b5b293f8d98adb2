//! Spindlo - nested world-clock dials
//!
//! One concentric dial per selected city. The innermost dial is the
//! reference; every other dial is rotated by its offset difference so the
//! same radial line crosses each city's local hour. Dragging the red hand
//! previews a time of day across all cities.

mod drawing;
mod ui;

use chrono::Utc;
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use shared::{DialScene, Preferences, TimeFormat, TimeIndicatorController};

use crate::drawing::colors;
use crate::ui::SelectorState;

const SIDE_PANEL_WIDTH: f32 = 300.0;
const DIAL_MARGIN: f32 = 40.0;

fn main() {
    env_logger::init();
    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// Owns the clock state and the Live/Overridden machine
    controller: TimeIndicatorController,
    /// Rendering contract rebuilt once per frame
    scene: DialScene,
    /// City search state
    selector: SelectorState,
    /// egui integration
    egui: Egui,
}

fn save_preferences(controller: &TimeIndicatorController) {
    let prefs = Preferences {
        cities: controller.state().selected_cities.clone(),
        time_format: TimeFormat::from_use_24_hour(controller.use_24_hour()),
    };
    if let Err(e) = shared::save_preferences(&prefs) {
        log::warn!("Could not save preferences: {}", e);
    }
}

/// Center and outermost diameter of the dial stack for the current window
fn dial_layout(window_rect: Rect) -> (Point2, f32) {
    let canvas_width = (window_rect.w() - SIDE_PANEL_WIDTH).max(1.0);
    let center = pt2(window_rect.x() - SIDE_PANEL_WIDTH / 2.0, window_rect.y());
    let base_diameter = (canvas_width.min(window_rect.h()) - 2.0 * DIAL_MARGIN).max(120.0);
    (center, base_diameter)
}

/// Decode a pointer position into the shared angular convention
fn pointer_angle(center: Point2, pos: Point2) -> f64 {
    shared::geometry::pointer_angle_deg(
        <f64 as From<f32>>::from(pos.x - center.x),
        <f64 as From<f32>>::from(center.y - pos.y),
    )
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Spindlo - World Dials")
        .size(1000, 700)
        .min_size(700, 500)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Stored preferences first, share-link parameters on top
    let stored = match shared::load_preferences() {
        Ok(stored) => stored,
        Err(e) => {
            log::warn!("Could not load preferences: {}", e);
            None
        }
    };
    let link = std::env::args()
        .nth(1)
        .map(|query| shared::parse_share_query(&query));
    let prefs = shared::resolve_preferences(link.as_ref(), stored);

    let controller =
        TimeIndicatorController::new(prefs.cities, prefs.time_format.use_24_hour());
    let scene = controller.scene(Utc::now());

    Model {
        controller,
        scene,
        selector: SelectorState::default(),
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let ui_result = ui::draw_side_panel(
        &ctx,
        &mut model.selector,
        &model.controller.state().selected_cities,
        &model.scene,
        model.controller.use_24_hour(),
        model.controller.mode(),
    );

    drop(ctx);

    if let Some((slot, selection)) = ui_result.select_city {
        model.controller.select_city(slot, selection);
        save_preferences(&model.controller);
    }
    if let Some(use_24_hour) = ui_result.set_use_24_hour {
        model.controller.set_use_24_hour(use_24_hour);
        save_preferences(&model.controller);
    }
    if ui_result.go_live {
        model.controller.clear_override();
    }

    // One geometry pass per frame: offsets are re-resolved every time, so a
    // DST boundary crossing between frames is picked up without caching
    model.scene = model.controller.scene(Utc::now());
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(colors::BACKGROUND);

    let (center, base_diameter) = dial_layout(app.window_rect());
    if model.scene.dials.is_empty() {
        drawing::draw_empty_state(&draw, center);
    } else {
        drawing::draw_dial_stack(&draw, &model.scene, center, base_diameter);
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // L returns to live time (the override is otherwise sticky)
        Key::L => model.controller.clear_override(),
        // T toggles 24hr/12hr
        Key::T => {
            let use_24_hour = !model.controller.use_24_hour();
            model.controller.set_use_24_hour(use_24_hour);
            save_preferences(&model.controller);
        }
        _ => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }
    let (center, base_diameter) = dial_layout(app.window_rect());
    let pos = app.mouse.position();
    // A press anywhere on the dial stack grabs the hand
    if pos.distance(center) <= base_diameter / 2.0 {
        model.controller.drag_start(pointer_angle(center, pos));
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    // No-op unless a drag is active
    if model.controller.is_dragging() {
        let (center, _) = dial_layout(app.window_rect());
        model.controller.drag_move(pointer_angle(center, pos));
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.controller.drag_end();
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}
