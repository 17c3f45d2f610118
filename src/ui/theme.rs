//! Theme and styling for the coach UI.

use crate::session::Feedback;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration.
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Success color (green)
    pub success: Color32,
    /// Error color (red)
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_muted: Color32,

    /// Frame fills for the three feedback states
    pub feedback_correct: Color32,
    pub feedback_incorrect: Color32,
    pub feedback_neutral: Color32,

    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(99, 102, 241),  // Indigo
            success: Color32::from_rgb(34, 197, 94),   // Green
            error: Color32::from_rgb(239, 68, 68),     // Red

            bg_primary: Color32::from_rgb(17, 24, 39),   // Dark blue-gray
            bg_secondary: Color32::from_rgb(31, 41, 55), // Lighter blue-gray

            text_primary: Color32::from_rgb(249, 250, 251), // Almost white
            text_muted: Color32::from_rgb(156, 163, 175),   // Medium gray

            feedback_correct: Color32::from_rgb(21, 87, 46),    // Deep green
            feedback_incorrect: Color32::from_rgb(110, 34, 34), // Deep red
            feedback_neutral: Color32::from_rgb(92, 80, 21),    // Deep yellow

            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_sm: 8.0,
        }
    }

    /// Frame fill for a feedback classification.
    pub fn feedback_fill(&self, feedback: Feedback) -> Color32 {
        match feedback {
            Feedback::Correct => self.feedback_correct,
            Feedback::Incorrect => self.feedback_incorrect,
            Feedback::Neutral => self.feedback_neutral,
        }
    }

    /// Banner text color for a feedback classification.
    pub fn feedback_accent(&self, feedback: Feedback) -> Color32 {
        match feedback {
            Feedback::Correct => self.success,
            Feedback::Incorrect => self.error,
            Feedback::Neutral => self.text_muted,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(24.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}
