//! Main application struct and eframe integration.

use crate::integration::SessionCoordinator;
use crate::session::{Feedback, Mode};
use crate::ui::theme::Theme;
use egui::{CentralPanel, Color32, Frame, RichText, TextureOptions, TopBottomPanel};
use std::time::{Duration, Instant};

const PREVIEW_SIZE: egui::Vec2 = egui::Vec2::new(480.0, 360.0);

/// Main coach application.
pub struct CoachApp {
    coordinator: SessionCoordinator,
    theme: Theme,
    preview_texture: Option<egui::TextureHandle>,
}

impl CoachApp {
    pub fn new(cc: &eframe::CreationContext<'_>, coordinator: SessionCoordinator) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            coordinator,
            theme,
            preview_texture: None,
        }
    }

    /// Pull the latest captured frame into a texture for display.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(slot) = self.coordinator.preview() else {
            self.preview_texture = None;
            return;
        };
        let Some(frame) = slot.lock().take() else {
            return;
        };
        if !frame.has_resolution() {
            return;
        }

        let size = [frame.width as usize, frame.height as usize];
        if frame.rgb.len() != size[0] * size[1] * 3 {
            return;
        }
        let image = egui::ColorImage::from_rgb(size, &frame.rgb);

        match &mut self.preview_texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.preview_texture =
                    Some(ctx.load_texture("camera-preview", image, TextureOptions::LINEAR));
            }
        }
    }

    fn show_mode_bar(&mut self, ctx: &egui::Context, now: Instant) {
        let mode = self.coordinator.engine().mode();
        TopBottomPanel::top("mode-bar")
            .frame(
                Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Practice Mode").clicked() && mode != Mode::Practice {
                        self.preview_texture = None;
                        self.coordinator.enter_practice(now);
                    }
                    if ui.button("Test Mode").clicked() && mode != Mode::Test {
                        self.preview_texture = None;
                        self.coordinator.enter_test(now);
                    }
                    if ui.button("Return Home").clicked() {
                        self.preview_texture = None;
                        self.coordinator.go_home();
                    }

                    if let Some(error) = self.coordinator.camera_error() {
                        ui.label(RichText::new(error).color(self.theme.error));
                    }
                });
            });
    }

    fn show_home(&mut self, ctx: &egui::Context, now: Instant) {
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.label(
                    RichText::new("SignCoach")
                        .size(48.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.label(
                    RichText::new("A simple sign-alphabet learning application")
                        .size(18.0)
                        .color(self.theme.text_muted),
                );
                ui.add_space(self.theme.spacing * 2.0);

                if ui
                    .button(RichText::new("Practice Mode").size(20.0))
                    .clicked()
                {
                    self.coordinator.enter_practice(now);
                }
                if ui.button(RichText::new("Test Mode").size(20.0)).clicked() {
                    self.coordinator.enter_test(now);
                }
            });
        });
    }

    fn show_target_and_preview(&mut self, ui: &mut egui::Ui, extra: impl FnOnce(&mut egui::Ui)) {
        let feedback = self.coordinator.engine().feedback();
        let target = self.coordinator.engine().target();

        Frame::none()
            .fill(self.theme.feedback_fill(feedback))
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        extra(ui);
                        ui.label(
                            RichText::new("Sign the letter:").color(self.theme.text_primary),
                        );
                        ui.label(
                            RichText::new(target.to_string())
                                .size(120.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );
                    });

                    match &self.preview_texture {
                        Some(texture) => {
                            ui.add(egui::Image::new(texture).fit_to_exact_size(PREVIEW_SIZE));
                        }
                        None => {
                            let (rect, _) = ui
                                .allocate_exact_size(PREVIEW_SIZE, egui::Sense::hover());
                            ui.painter().rect_filled(rect, 4.0, Color32::BLACK);
                        }
                    }
                });
            });
    }

    fn show_practice(&mut self, ctx: &egui::Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Practice");
                ui.add_space(self.theme.spacing_sm);
            });

            self.show_target_and_preview(ui, |_| {});

            let engine = self.coordinator.engine();
            let feedback = engine.feedback();
            let banner = match feedback {
                Feedback::Correct => Some("Correct!".to_string()),
                Feedback::Incorrect => engine.prediction().map(|prediction| {
                    format!(
                        "Try Again! You signed {}, not {}",
                        prediction,
                        engine.target()
                    )
                }),
                Feedback::Neutral => None,
            };
            if let Some(banner) = banner {
                ui.add_space(self.theme.spacing_sm);
                ui.label(
                    RichText::new(banner)
                        .size(18.0)
                        .strong()
                        .color(self.theme.feedback_accent(feedback)),
                );
            }

            ui.add_space(self.theme.spacing_sm);
            if ui.button("Practice Next Letter").clicked() {
                self.coordinator.next_letter();
            }
        });
    }

    fn show_test(&mut self, ctx: &egui::Context) {
        let progress = self.coordinator.engine().test().clone();

        CentralPanel::default().show(ctx, |ui| {
            if progress.finished {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.label(
                        RichText::new("Test Complete!")
                            .size(36.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new(format!("Your Score: {}/10", progress.score))
                            .size(24.0)
                            .color(self.theme.text_primary),
                    );
                    ui.add_space(self.theme.spacing);
                    if ui.button(RichText::new("Try Again").size(18.0)).clicked() {
                        self.preview_texture = None;
                        self.coordinator.go_home();
                    }
                });
                return;
            }

            ui.vertical_centered(|ui| {
                ui.heading(format!("Round {}/10", progress.round));
                ui.add_space(self.theme.spacing_sm);
            });

            self.show_target_and_preview(ui, |ui| {
                ui.label(
                    RichText::new(format!("Time left: {}s", progress.countdown))
                        .size(18.0)
                        .monospace(),
                );
            });

            if progress.round_solved {
                ui.add_space(self.theme.spacing_sm);
                ui.label(
                    RichText::new("Correct!")
                        .size(18.0)
                        .strong()
                        .color(self.theme.success),
                );
            }
        });
    }
}

impl eframe::App for CoachApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.coordinator.poll(now);
        self.refresh_preview(ctx);

        match self.coordinator.engine().mode() {
            Mode::Home => self.show_home(ctx, now),
            Mode::Practice => {
                self.show_mode_bar(ctx, now);
                self.show_practice(ctx);
            }
            Mode::Test => {
                self.show_mode_bar(ctx, now);
                self.show_test(ctx);
            }
        }

        // Keep polling even when no input arrives.
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}
