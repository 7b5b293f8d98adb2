//! UI module - egui city selectors, search, and format toggle
//!
//! One row per selected city plus a trailing empty row for adding the next
//! city. Clicking a row opens the catalog search; picking a result assigns
//! it to that slot.

use nannou_egui::egui;
use shared::catalog::{self, TimezoneRecord};
use shared::{DialScene, IndicatorMode};

/// State for the city search popup
#[derive(Default)]
pub struct SelectorState {
    /// Which city slot the search is editing; `None` when closed. A slot
    /// equal to the city count appends a new city.
    pub active_slot: Option<usize>,
    /// Current search query
    pub search_query: String,
    /// Cached search results (at most ten)
    pub search_results: Vec<&'static TimezoneRecord>,
    /// Whether the search field should grab focus
    pub should_focus_search: bool,
}

impl SelectorState {
    pub fn open(&mut self, slot: usize) {
        self.active_slot = Some(slot);
        self.search_query.clear();
        self.search_results = catalog::search("");
        self.should_focus_search = true;
    }

    pub fn close(&mut self) {
        self.active_slot = None;
        self.search_query.clear();
        self.search_results.clear();
    }

    pub fn update_search(&mut self) {
        self.search_results = catalog::search(&self.search_query);
    }
}

/// Result of UI interactions for one frame
#[derive(Default)]
pub struct UiResult {
    /// If Some, assign (`Some(id)`) or remove (`None`) the city at a slot
    pub select_city: Option<(usize, Option<String>)>,
    /// If Some, the user switched the time format
    pub set_use_24_hour: Option<bool>,
    /// If true, drop the manual time override and track the live clock
    pub go_live: bool,
}

/// Draw the right-hand control panel
pub fn draw_side_panel(
    ctx: &egui::Context,
    selector: &mut SelectorState,
    cities: &[String],
    scene: &DialScene,
    use_24_hour: bool,
    mode: IndicatorMode,
) -> UiResult {
    let mut result = UiResult::default();

    egui::SidePanel::right("control_panel")
        .resizable(false)
        .exact_width(300.0)
        .show(ctx, |ui| {
            ui.heading("Spindlo");
            ui.label("Drag the hand to preview a time");
            ui.separator();

            // Format toggle
            ui.horizontal(|ui| {
                ui.label("Format:");
                if ui.selectable_label(use_24_hour, "24hr").clicked() && !use_24_hour {
                    result.set_use_24_hour = Some(true);
                }
                if ui.selectable_label(!use_24_hour, "12hr").clicked() && use_24_hour {
                    result.set_use_24_hour = Some(false);
                }
            });

            // Override status and reset affordance
            ui.horizontal(|ui| {
                match mode {
                    IndicatorMode::Live => {
                        ui.label("Tracking live time");
                    }
                    IndicatorMode::Overridden => {
                        ui.colored_label(
                            egui::Color32::from_rgb(232, 200, 98),
                            "Previewing a chosen time",
                        );
                        if ui.small_button("Back to live").clicked() {
                            result.go_live = true;
                        }
                    }
                }
            });

            ui.separator();

            // One row per city, innermost dial first
            for (index, timezone_id) in cities.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("City {}", index + 1));
                    if let Some(dial) = scene.dials.get(index) {
                        ui.colored_label(
                            egui::Color32::from_rgb(139, 115, 85),
                            &dial.time_text,
                        );
                    }
                    if ui.small_button("✕").clicked() {
                        result.select_city = Some((index, None));
                        selector.close();
                    }
                });
                let name = catalog::display_name(timezone_id);
                let is_active = selector.active_slot == Some(index);
                if ui.selectable_label(is_active, &name).clicked() {
                    selector.open(index);
                }
            }

            // Trailing empty row appends the next city
            ui.horizontal(|ui| {
                ui.label(format!("City {}", cities.len() + 1));
            });
            let appending = selector.active_slot == Some(cities.len());
            if ui.selectable_label(appending, "Select City").clicked() {
                selector.open(cities.len());
            }

            // Search popup for the active slot
            if let Some(slot) = selector.active_slot {
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Search:");
                    let response = ui.text_edit_singleline(&mut selector.search_query);
                    if selector.should_focus_search {
                        response.request_focus();
                        selector.should_focus_search = false;
                    }
                    if response.changed() {
                        selector.update_search();
                    }
                });

                egui::ScrollArea::vertical()
                    .max_height(240.0)
                    .show(ui, |ui| {
                        for record in &selector.search_results {
                            let label = format!(
                                "{}, {} · {} ({})",
                                record.city,
                                record.country,
                                catalog::region_of(record.timezone_id).replace('_', " "),
                                record.abbreviation
                            );
                            if ui.selectable_label(false, &label).clicked() {
                                result.select_city =
                                    Some((slot, Some(record.timezone_id.to_string())));
                            }
                        }
                        if selector.search_results.is_empty() {
                            ui.label("No matching cities");
                        }
                    });

                if ui.button("Cancel").clicked() {
                    selector.close();
                }
            }
        });

    if result.select_city.is_some() {
        selector.close();
    }

    result
}
