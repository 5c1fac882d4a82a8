//! Painting of canvas figures with an egui painter.

use egui::{Color32, Pos2, Rect, Stroke, StrokeKind, Vec2};

use crate::figure::{Figure, FigureKind, Layer};
use crate::theme::GraphTheme;
use crate::traits::FigureCanvas;

/// Draw a background grid that scrolls with `pan`.
pub fn draw_grid(painter: &egui::Painter, rect: Rect, pan: Vec2, color: Color32, spacing: f32) {
    for x in grid_lines(rect.min.x, rect.max.x, pan.x, spacing) {
        painter.line_segment(
            [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
            Stroke::new(1.0, color),
        );
    }

    for y in grid_lines(rect.min.y, rect.max.y, pan.y, spacing) {
        painter.line_segment(
            [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
            Stroke::new(1.0, color),
        );
    }
}

/// Grid line coordinates along one axis. Empty for a non-positive spacing.
pub(crate) fn grid_lines(min: f32, max: f32, pan: f32, spacing: f32) -> Vec<f32> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut at = min + (pan % spacing);
    while at < max {
        lines.push(at);
        at += spacing;
    }
    lines
}

/// Sample a horizontal-tangent cubic bezier between two points.
pub fn bezier_points(from: Pos2, to: Pos2, segments: usize) -> Vec<Pos2> {
    let dx = (to.x - from.x).abs() * 0.5;
    let cp1 = Pos2::new(from.x + dx, from.y);
    let cp2 = Pos2::new(to.x - dx, to.y);

    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * from.x + 3.0 * mt2 * t * cp1.x + 3.0 * mt * t2 * cp2.x + t3 * to.x;
        let y = mt3 * from.y + 3.0 * mt2 * t * cp1.y + 3.0 * mt * t2 * cp2.y + t3 * to.y;
        points.push(Pos2::new(x, y));
    }
    points
}

/// Draw a cubic bezier connection between two points.
pub fn draw_bezier_connection(painter: &egui::Painter, from: Pos2, to: Pos2, color: Color32) {
    for window in bezier_points(from, to, 20).windows(2) {
        painter.line_segment([window[0], window[1]], Stroke::new(2.0, color));
    }
}

/// Paint every layer of `canvas`, content first, shifted by `offset`.
pub fn paint_canvas(
    painter: &egui::Painter,
    canvas: &dyn FigureCanvas,
    theme: &GraphTheme,
    offset: Vec2,
) {
    for layer in Layer::ALL {
        for id in canvas.layer_figures(layer) {
            if let Some(figure) = canvas.figure(id) {
                paint_figure(painter, canvas, theme, &figure, offset);
            }
        }
    }
}

fn paint_figure(
    painter: &egui::Painter,
    canvas: &dyn FigureCanvas,
    theme: &GraphTheme,
    figure: &Figure,
    offset: Vec2,
) {
    let rect = figure.bounds.translate(offset);
    match figure.kind {
        FigureKind::GroupBody => {
            painter.rect_filled(rect, theme.rounding, theme.group_body_color);
            painter.rect_stroke(
                rect,
                theme.rounding,
                Stroke::new(1.0, with_alpha(theme.group_outline_color, figure.alpha)),
                StrokeKind::Outside,
            );
            if let Some(label) = &figure.label {
                painter.text(
                    rect.left_top() + Vec2::new(6.0, 4.0),
                    egui::Align2::LEFT_TOP,
                    label,
                    egui::FontId::proportional(11.0),
                    with_alpha(theme.label_color, figure.alpha),
                );
            }
        }
        FigureKind::NodeBody => {
            painter.rect_filled(
                rect,
                theme.rounding,
                with_alpha(theme.node_body_color, figure.alpha),
            );
            let header_rect =
                Rect::from_min_size(rect.min, Vec2::new(rect.width(), theme.header_height));
            painter.rect_filled(
                header_rect,
                egui::CornerRadius {
                    nw: theme.rounding as u8,
                    ne: theme.rounding as u8,
                    sw: 0,
                    se: 0,
                },
                with_alpha(theme.header_color, figure.alpha),
            );
            if let Some(label) = &figure.label {
                painter.text(
                    header_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    label,
                    egui::FontId::proportional(12.0),
                    with_alpha(Color32::WHITE, figure.alpha),
                );
            }
        }
        FigureKind::Pin(role) | FigureKind::GhostPin(role) => {
            let color = with_alpha(theme.pin_color(role), figure.alpha);
            painter.circle_filled(rect.center(), rect.width().min(rect.height()) / 2.0, color);
            if let (Some(label), FigureKind::Pin(_)) = (&figure.label, figure.kind) {
                let (pos, align) = if role.is_output() {
                    (rect.left_center() - Vec2::new(4.0, 0.0), egui::Align2::RIGHT_CENTER)
                } else {
                    (rect.right_center() + Vec2::new(4.0, 0.0), egui::Align2::LEFT_CENTER)
                };
                painter.text(
                    pos,
                    align,
                    label,
                    egui::FontId::proportional(10.0),
                    with_alpha(theme.label_color, figure.alpha),
                );
            }
        }
        FigureKind::Link { source, target } | FigureKind::GhostLink { source, target } => {
            if let (Some(from), Some(to)) = (canvas.anchor(source), canvas.anchor(target)) {
                draw_bezier_connection(
                    painter,
                    from + offset,
                    to + offset,
                    with_alpha(theme.link_color, figure.alpha),
                );
            }
        }
    }
}

/// Scale a color's opacity by `alpha / 255`.
pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    if alpha == u8::MAX {
        return color;
    }
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as u16 * alpha as u16 / 255) as u8,
    )
}
