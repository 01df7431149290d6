use crate::catalog::{Catalog, CatalogLoadDiagnostic, FocusArea};
use crate::recommend;
use crate::session::{SavedTip, SessionState};
use crate::theme::Theme;
use eframe::egui::{self, ComboBox, RichText, ScrollArea};
use std::time::{SystemTime, UNIX_EPOCH};

enum RandomScope {
    ActiveArea,
    Anywhere,
}

pub struct GuideApp {
    catalog: Catalog,
    session: SessionState,
    theme: Theme,
    area_input: String,
    active_area: Option<FocusArea>,
    selected_label: Option<String>,
    error_banner: Option<String>,
    notice: Option<String>,
    diagnostics_log: Vec<String>,
}

impl GuideApp {
    pub fn new(catalog: Catalog, load_diagnostics: Vec<CatalogLoadDiagnostic>) -> Self {
        let mut app = Self {
            catalog,
            session: SessionState::new(),
            theme: Theme::default(),
            area_input: String::new(),
            active_area: None,
            selected_label: None,
            error_banner: None,
            notice: None,
            diagnostics_log: Vec::new(),
        };

        for diagnostic in load_diagnostics {
            app.log_diagnostic(diagnostic.to_log_line());
        }

        app
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn set_area_input(&mut self, input: String) {
        self.area_input = input;
        let parsed = FocusArea::parse(&self.area_input);
        if parsed != self.active_area {
            self.selected_label = None;
        }
        self.active_area = parsed;

        if self.active_area.is_some() || self.area_input.trim().is_empty() {
            self.error_banner = None;
        } else {
            self.error_banner = Some(recommend::RecommendError::UnknownFocusArea.to_string());
        }
    }

    fn lookup_tip(&mut self, area: &str, label: &str, origin: &str) {
        match recommend::find_by_label(&self.catalog, area, label) {
            Ok((area, tip)) => {
                let tip = tip.clone();
                self.session.record_recommendation(area, &tip);
                self.error_banner = None;
                self.notice = None;
                self.log_diagnostic(format!(
                    "tip shown origin={origin} area={area} label={}",
                    tip.label
                ));
            }
            Err(err) => {
                log::warn!("lookup failed: {err}");
                self.error_banner = Some(err.to_string());
                self.log_diagnostic(format!("lookup failed origin={origin}: {err}"));
            }
        }
    }

    fn get_tip(&mut self) {
        let Some(label) = self.selected_label.clone() else {
            return;
        };
        let area = self.area_input.clone();
        self.lookup_tip(&area, &label, "chooser");
    }

    fn get_random_tip(&mut self, scope: RandomScope) {
        let area = match scope {
            RandomScope::ActiveArea => Some(self.area_input.clone()),
            RandomScope::Anywhere => None,
        };
        match recommend::pick_random(&self.catalog, area.as_deref()) {
            Ok((area, tip)) => {
                let tip = tip.clone();
                self.session.record_recommendation(area, &tip);
                self.error_banner = None;
                self.notice = None;
                self.log_diagnostic(format!(
                    "tip shown origin=random area={area} label={}",
                    tip.label
                ));
            }
            Err(err) => {
                log::warn!("random pick failed: {err}");
                self.error_banner = Some(err.to_string());
                self.log_diagnostic(format!("random pick failed: {err}"));
            }
        }
    }

    fn save_current_tip(&mut self) {
        if self.session.save_last() {
            self.notice = None;
            if let Some(saved) = self.session.last_recommendation() {
                let line = format!("tip saved area={} label={}", saved.area, saved.tip.label);
                self.log_diagnostic(line);
            }
        } else {
            self.notice = Some("That tip is already in your saved list.".to_string());
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("Mindful Eating Guide");
                ui.separator();
                ui.label(
                    RichText::new(format!("{} tips in the catalog", self.catalog.len()))
                        .color(self.theme.text_muted),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!("{} saved this session", self.session.saved().len()))
                        .color(self.theme.text_muted),
                );
            });
        });
    }

    fn render_left_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("focus_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Focus Area");
                ui.label(
                    RichText::new("Pick an area, or type one below.").color(self.theme.text_muted),
                );
                ui.separator();

                let mut clicked_area: Option<FocusArea> = None;
                for area in FocusArea::ALL {
                    let selected = self.active_area == Some(area);
                    if ui.selectable_label(selected, area.as_str()).clicked() {
                        clicked_area = Some(area);
                    }
                }
                if let Some(area) = clicked_area {
                    self.set_area_input(area.as_str().to_string());
                }

                ui.separator();
                ui.strong("Type your area of focus");
                let mut input = self.area_input.clone();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut input)
                        .hint_text("e.g. Portion Control")
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    self.set_area_input(input);
                }
            });
    }

    fn render_right_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("saved_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Saved Tips");
                ui.separator();

                if self.session.saved().is_empty() {
                    ui.label(RichText::new("Nothing saved yet").color(self.theme.text_muted));
                    return;
                }

                let mut clicked_saved: Option<(FocusArea, String)> = None;
                ScrollArea::vertical().id_salt("saved_tips").show(ui, |ui| {
                    for saved in self.session.saved() {
                        let entry = format!("{} ({})", saved.tip.label, saved.area);
                        if ui.button(entry).clicked() {
                            clicked_saved = Some((saved.area, saved.tip.label.clone()));
                        }
                    }
                });

                if let Some((area, label)) = clicked_saved {
                    self.lookup_tip(area.as_str(), &label, "saved_list");
                }
            });
    }

    fn render_recommendation_card(&self, ui: &mut egui::Ui, current: &SavedTip) {
        self.theme.card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&current.tip.label);
                ui.label(RichText::new(current.area.as_str()).color(self.theme.text_muted));
            });
            ui.label(&current.tip.description);

            if let Some(fact) = &current.tip.fact {
                ui.separator();
                ui.label(RichText::new(fact).italics());
            }

            if let Some(food) = &current.tip.food {
                ui.separator();
                ui.label(
                    RichText::new(format!("Healthy food: {food}"))
                        .color(self.theme.accent_primary),
                );
                if let Some(reason) = &current.tip.food_reason {
                    ui.label(reason);
                }
            }

            if let Some(activity) = &current.tip.activity {
                ui.separator();
                ui.label(
                    RichText::new(format!("Physical activity: {activity}"))
                        .color(self.theme.accent_primary),
                );
                if let Some(description) = &current.tip.activity_description {
                    ui.label(description);
                }
                if let Some(fact) = &current.tip.activity_fact {
                    ui.label(RichText::new(fact).italics());
                }
            }
        });
    }

    fn render_center_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Get a Tip");
            ui.label(
                RichText::new("Practical advice for developing a healthier relationship with food.")
                    .color(self.theme.text_muted),
            );
            ui.separator();

            if let Some(area) = self.active_area {
                let labels: Vec<String> = self
                    .catalog
                    .labels(area)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if self.selected_label.is_none() {
                    self.selected_label = labels.first().cloned();
                }

                ui.horizontal(|ui| {
                    ui.label("Select a tip:");
                    let current = self.selected_label.clone().unwrap_or_default();
                    ComboBox::from_id_salt("tip_chooser")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            for label in &labels {
                                let checked = self.selected_label.as_deref() == Some(label);
                                if ui.selectable_label(checked, label).clicked() {
                                    self.selected_label = Some(label.clone());
                                }
                            }
                        });
                });

                ui.horizontal(|ui| {
                    if ui.button("Get Tip").clicked() {
                        self.get_tip();
                    }
                    if ui.button(format!("Random from {area}")).clicked() {
                        self.get_random_tip(RandomScope::ActiveArea);
                    }
                });
            } else {
                ui.label(
                    RichText::new("Choose a focus area to browse its tips.")
                        .color(self.theme.text_muted),
                );
            }

            if ui.button("Get Random Tip").clicked() {
                self.get_random_tip(RandomScope::Anywhere);
            }

            if let Some(message) = &self.error_banner {
                ui.label(RichText::new(message).color(self.theme.danger));
            }
            if let Some(message) = &self.notice {
                ui.label(RichText::new(message).color(self.theme.warning));
            }

            ui.separator();
            let diagnostics_height = 110.0;
            let card_height = (ui.available_height() - diagnostics_height).max(140.0);
            ScrollArea::vertical()
                .id_salt("recommendation")
                .max_height(card_height)
                .show(ui, |ui| {
                    if let Some(current) = self.session.last_recommendation().cloned() {
                        self.render_recommendation_card(ui, &current);
                        let already_saved = self.session.is_saved(current.area, &current.tip.label);
                        if ui
                            .add_enabled(!already_saved, egui::Button::new("Save Tip"))
                            .clicked()
                        {
                            self.save_current_tip();
                        }
                    } else {
                        ui.label(
                            RichText::new("Your recommendation will appear here.")
                                .color(self.theme.text_muted),
                        );
                    }
                });

            ui.separator();
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(RichText::new(entry).monospace());
                            }
                        });
                });
        });
    }
}

impl eframe::App for GuideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_top_bar(ctx);
        self.render_left_panel(ctx);
        self.render_right_panel(ctx);
        self.render_center_panel(ctx);
    }
}
