use eframe::egui::{Pos2, Rect};

pub fn circle_visible(viewport: Rect, center: Pos2, radius: f32) -> bool {
    viewport.expand(radius).contains(center)
}

/// Whether the segment touches the viewport, with `padding` of slack for
/// line width.
pub fn edge_visible(viewport: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let bounds = Rect::from_two_pos(start, end).expand(padding);
    if !bounds.intersects(viewport) {
        return false;
    }

    let area = viewport.expand(padding);
    if area.contains(start) || area.contains(end) {
        return true;
    }

    let corners = [
        area.left_top(),
        area.right_top(),
        area.right_bottom(),
        area.left_bottom(),
    ];
    (0..corners.len()).any(|side| {
        segments_intersect(start, end, corners[side], corners[(side + 1) % corners.len()])
    })
}

pub fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn orientation(origin: Pos2, a: Pos2, b: Pos2) -> f32 {
        (a - origin).x * (b - origin).y - (a - origin).y * (b - origin).x
    }

    fn straddles(first: f32, second: f32) -> bool {
        (first <= 0.0 && second >= 0.0) || (first >= 0.0 && second <= 0.0)
    }

    if !Rect::from_two_pos(a1, a2).intersects(Rect::from_two_pos(b1, b2)) {
        return false;
    }

    straddles(orientation(a1, a2, b1), orientation(a1, a2, b2))
        && straddles(orientation(b1, b2, a1), orientation(b1, b2, a2))
}
