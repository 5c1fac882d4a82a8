//! Theming for the graph canvas.

use egui::Color32;

use crate::types::PinRole;

/// Colors and strokes used to paint figures.
#[derive(Clone, Debug)]
pub struct GraphTheme {
    /// Background color.
    pub background_color: Color32,
    /// Grid line color.
    pub grid_color: Color32,
    /// Grid spacing.
    pub grid_spacing: f32,
    /// Node body fill.
    pub node_body_color: Color32,
    /// Node header fill.
    pub header_color: Color32,
    /// Header height in pixels.
    pub header_height: f32,
    /// Group body fill; translucent so members stay visible.
    pub group_body_color: Color32,
    /// Group outline.
    pub group_outline_color: Color32,
    pub input_pin_color: Color32,
    pub output_pin_color: Color32,
    /// Label color.
    pub label_color: Color32,
    /// Link color.
    pub link_color: Color32,
    /// Corner rounding for bodies.
    pub rounding: f32,
}

impl GraphTheme {
    pub fn pin_color(&self, role: PinRole) -> Color32 {
        match role {
            PinRole::Input => self.input_pin_color,
            PinRole::Output => self.output_pin_color,
        }
    }
}

impl Default for GraphTheme {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(30, 30, 30),
            grid_color: Color32::from_rgb(40, 40, 40),
            grid_spacing: 50.0,
            node_body_color: Color32::from_rgb(45, 45, 50),
            header_color: Color32::from_rgb(60, 100, 160),
            header_height: 24.0,
            group_body_color: Color32::from_rgba_unmultiplied(100, 150, 255, 24),
            group_outline_color: Color32::from_rgb(100, 150, 255),
            input_pin_color: Color32::from_rgb(109, 200, 238), // Cyan
            output_pin_color: Color32::from_rgb(238, 207, 109), // Yellow
            label_color: Color32::from_rgb(200, 200, 200),
            link_color: Color32::from_rgb(180, 180, 180),
            rounding: 4.0,
        }
    }
}
