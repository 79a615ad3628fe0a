//! Layout helpers: separators, section labels, row labels.

use egui::{Align2, Color32, CornerRadius, FontId, Frame, Margin, Pos2, Response, Sense, Stroke, Ui, vec2};

use crate::{sizing, theme};

/// Draw a horizontal separator line.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(8.0);
}

/// Draw a section label (small, muted text).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

/// Frame drawn behind the header row.
pub fn header_frame() -> Frame {
    Frame::new()
        .fill(theme::HEADER_BG)
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .inner_margin(Margin::symmetric(4, 2))
}

/// Draw left-aligned text in a cell of exactly `width`.
pub fn row_label(ui: &mut Ui, text: &str, width: f32, font_size: f32, color: Color32) -> Response {
    let (rect, response) = ui.allocate_exact_size(vec2(width, sizing::ROW_HEIGHT), Sense::hover());
    if ui.is_rect_visible(rect) {
        ui.painter().text(
            Pos2::new(rect.left() + sizing::LABEL_PADDING, rect.center().y),
            Align2::LEFT_CENTER,
            text,
            FontId::proportional(font_size),
            color,
        );
    }
    response
}
