use crate::app::session::Session;
use crate::camera::{CameraControl, CameraParams, ELEVATION_LIMIT, MAX_DISTANCE, MIN_DISTANCE};
use crate::generation::build_prompt;
use crate::photo::PhotoSlot;
use crate::settings::{API_KEY_ENV, Settings};

/// What the user asked for this frame; carried out by the app after the UI pass.
#[derive(Debug, Default)]
pub struct UiActions {
    pub open_photo: bool,
    pub clear_photo: bool,
    pub generate: bool,
    pub save_result: bool,
}

pub struct Ui;

impl Ui {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ctx: &egui::Context, session: &mut Session, settings: &mut Settings) -> UiActions {
        let mut actions = UiActions::default();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                if ui.button("📁 Open Photo").clicked() {
                    actions.open_photo = true;
                }
                ui.separator();
                if ui
                    .button(if settings.ui.show_settings {
                        "✅ Settings"
                    } else {
                        "⬜ Settings"
                    })
                    .clicked()
                {
                    settings.ui.show_settings = !settings.ui.show_settings;
                    settings.ui.save();
                }
            });
        });

        egui::SidePanel::left("camera_panel")
            .resizable(false)
            .min_width(340.0)
            .show(ctx, |ui| {
                self.camera_panel(ui, session, settings, &mut actions);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.photo_panel(ui, session, &mut actions);
        });

        self.settings_window(ctx, settings);

        actions
    }

    fn camera_panel(
        &mut self,
        ui: &mut egui::Ui,
        session: &mut Session,
        settings: &mut Settings,
        actions: &mut UiActions,
    ) {
        ui.heading("🎥 Camera");
        ui.add_space(4.0);

        let mut updated: Option<CameraParams> = None;
        let mut control = CameraControl::new(&mut session.controller, session.camera)
            .image(session.source.texture_id())
            .show_grid(settings.display.show_grid);
        if !settings.ui.lock_camera {
            control = control.on_update(|params| updated = Some(params));
        }
        ui.add(control);
        if let Some(params) = updated {
            session.camera = params;
        }

        ui.label(
            egui::RichText::new("Drag the ring, the arc or the camera. Right-drag or scroll to zoom.")
                .small()
                .weak(),
        );
        ui.separator();

        let camera = &mut session.camera;
        ui.add(
            egui::Slider::new(&mut camera.azimuth, 0.0..=359.0)
                .text("Azimuth")
                .suffix("°")
                .step_by(1.0),
        );
        ui.add(
            egui::Slider::new(&mut camera.elevation, -ELEVATION_LIMIT..=ELEVATION_LIMIT)
                .text("Elevation")
                .suffix("°")
                .step_by(1.0),
        );
        ui.add(
            egui::Slider::new(&mut camera.distance, MIN_DISTANCE..=MAX_DISTANCE)
                .text("Distance")
                .step_by(0.01),
        );
        *camera = camera.normalized();

        ui.horizontal(|ui| {
            if ui.button("🔄 Reset Camera").clicked() {
                camera.reset();
            }
            if ui
                .checkbox(&mut settings.ui.lock_camera, "🔒 Lock widget")
                .changed()
            {
                settings.ui.save();
            }
        });

        ui.separator();
        ui.heading("✨ Re-shoot");
        ui.label("Extra instructions:");
        ui.add(
            egui::TextEdit::multiline(&mut session.instructions)
                .desired_rows(3)
                .hint_text("e.g. keep the background blurred"),
        );

        if settings.display.show_prompt_preview {
            egui::CollapsingHeader::new("Prompt preview").show(ui, |ui| {
                ui.label(
                    egui::RichText::new(build_prompt(&session.camera, &session.instructions))
                        .small()
                        .monospace(),
                );
            });
        }

        ui.horizontal(|ui| {
            if ui
                .add_enabled(session.can_generate(), egui::Button::new("🚀 Generate"))
                .clicked()
            {
                actions.generate = true;
            }
            if session.generating {
                ui.spinner();
                ui.label("Generating...");
            }
        });

        if let Some(status) = &session.status {
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
        if let Some(note) = &session.note {
            ui.label(egui::RichText::new(note).italics().weak());
        }
    }

    fn photo_panel(&mut self, ui: &mut egui::Ui, session: &mut Session, actions: &mut UiActions) {
        let half = egui::vec2(
            (ui.available_width() - 16.0).max(0.0) * 0.5,
            (ui.available_height() - 80.0).max(0.0),
        );

        ui.columns(2, |columns| {
            columns[0].heading("Source");
            photo_status(&mut columns[0], &session.source);
            photo_view(&mut columns[0], &session.source, half, "Drop a photo here or use Open Photo");
            if (session.source.is_loaded() || session.source.has_error())
                && columns[0].button("✖ Clear").clicked()
            {
                actions.clear_photo = true;
            }

            columns[1].heading("Result");
            photo_status(&mut columns[1], &session.result);
            photo_view(&mut columns[1], &session.result, half, "The re-shot image appears here");
            if columns[1]
                .add_enabled(session.result.is_loaded(), egui::Button::new("💾 Save Result"))
                .clicked()
            {
                actions.save_result = true;
            }
        });
    }

    fn settings_window(&mut self, ctx: &egui::Context, settings: &mut Settings) {
        let mut open = settings.ui.show_settings;
        egui::Window::new("Settings")
            .default_width(420.0)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("generation_settings")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        let generation = &mut settings.generation;
                        ui.label("Endpoint");
                        ui.text_edit_singleline(&mut generation.endpoint);
                        ui.end_row();

                        ui.label("Model");
                        ui.text_edit_singleline(&mut generation.model);
                        ui.end_row();

                        ui.label("API key");
                        ui.add(egui::TextEdit::singleline(&mut generation.api_key).password(true));
                        ui.end_row();

                        ui.label("Timeout (s)");
                        ui.add(egui::DragValue::new(&mut generation.timeout_secs).range(5..=600));
                        ui.end_row();
                    });

                if settings.generation.api_key.trim().is_empty() {
                    ui.label(
                        egui::RichText::new(format!("Leave empty to use ${API_KEY_ENV}."))
                            .small()
                            .weak(),
                    );
                }

                ui.separator();
                let mut display_changed = false;
                display_changed |= ui
                    .checkbox(&mut settings.display.show_grid, "Show floor grid")
                    .changed();
                display_changed |= ui
                    .checkbox(&mut settings.display.show_prompt_preview, "Show prompt preview")
                    .changed();
                if display_changed {
                    settings.display.save();
                }

                ui.separator();
                if ui.button("💾 Save").clicked() {
                    settings.generation.save();
                }
            });

        if open != settings.ui.show_settings {
            settings.ui.show_settings = open;
            settings.ui.save();
        }
    }
}

fn photo_status(ui: &mut egui::Ui, slot: &PhotoSlot) {
    ui.horizontal(|ui| {
        let radius = 5.0;
        let (rect, _response) =
            ui.allocate_exact_size(egui::vec2(radius * 2.0, radius * 2.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(rect.center(), radius, slot.status_color());
        ui.label(slot.status_text());
    });
}

fn photo_view(ui: &mut egui::Ui, slot: &PhotoSlot, max: egui::Vec2, hint: &str) {
    match slot.texture_id() {
        Some(texture) => {
            ui.image((texture, slot.fit_size(max)));
        }
        None => {
            let size = egui::vec2(max.x, max.y.min(max.x));
            let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
            let painter = ui.painter();
            painter.rect_stroke(
                rect,
                egui::CornerRadius::same(6),
                egui::Stroke::new(1.0, ui.visuals().weak_text_color()),
                egui::StrokeKind::Inside,
            );
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                hint,
                egui::FontId::proportional(14.0),
                ui.visuals().weak_text_color(),
            );
        }
    }
}
