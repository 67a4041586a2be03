use eframe::egui::{Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use paper_atlas::viewport::TextMeasure;

pub(super) const SEARCH_MATCH_RING: Color32 = Color32::from_rgb(234, 88, 12);

/// Measures label text with the painter's font atlas.
pub(super) struct PainterMeasure<'a> {
    pub(super) painter: &'a Painter,
}

impl TextMeasure for PainterMeasure<'_> {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.painter
            .layout_no_wrap(
                text.to_owned(),
                FontId::proportional(font_size),
                Color32::BLACK,
            )
            .size()
            .x
    }
}

/// Light canvas with a grid that follows the camera. `offset` is the
/// viewport-local screen position of the world origin.
pub(super) fn draw_background(painter: &Painter, rect: Rect, offset: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(248, 249, 251));

    let step = (64.0 * zoom.clamp(0.5, 2.0)).max(24.0);
    let origin = rect.min + offset;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(148, 163, 184, 40));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            stroke,
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
        );
        y += step;
    }
}
