use std::collections::BTreeMap;
use std::f32::consts::PI;

use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontEntry, text_width, to_winansi_bytes};
use crate::model::{Alignment, Color, FontStyle, Paint, Point, Rect, TextStyle};

use super::PageSize;

/// Line pitch as a multiple of the font size for stacked text lines.
pub(crate) const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Maps top-left page units to PDF user space (points, bottom-left origin).
pub(super) struct Surface {
    scale: f32,
    page_height_pt: f32,
}

impl Surface {
    pub(super) fn new(size: PageSize) -> Self {
        Self {
            scale: size.points_per_unit,
            page_height_pt: size.height * size.points_per_unit,
        }
    }

    pub(super) fn scale(&self) -> f32 {
        self.scale
    }

    fn x(&self, units: f32) -> f32 {
        units * self.scale
    }

    fn y(&self, units: f32) -> f32 {
        self.page_height_pt - units * self.scale
    }

    fn len(&self, units: f32) -> f32 {
        units * self.scale
    }
}

/// Sample the decorative header wave: starting from `(0, y0)`, the curve
/// `y(x) = y0 + sin(x/W * 4pi) * H/3 + H/3` at unit steps from 0 to W, then
/// close the band along `y0 + H`.
/// The band carries four humps (two full periods) across the width.
pub fn wave_band(width: f32, y0: f32, height: f32) -> Vec<Point> {
    if !(width > 0.0) || !height.is_finite() {
        return Vec::new();
    }
    let amplitude = height / 3.0;
    let steps = width.floor() as usize;
    let mut points = Vec::with_capacity(steps + 4);
    points.push(Point::new(0.0, y0));
    points.extend((0..=steps).map(|i| {
        let x = i as f32;
        let phase = x / width * 4.0 * PI;
        Point::new(x, y0 + phase.sin() * amplitude + amplitude)
    }));
    points.push(Point::new(width, y0 + height));
    points.push(Point::new(0.0, y0 + height));
    points
}

fn rgb(color: Color) -> (f32, f32, f32) {
    (
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

fn set_fill(content: &mut Content, color: Color) {
    let (r, g, b) = rgb(color);
    content.set_fill_rgb(r, g, b);
}

fn set_stroke(content: &mut Content, color: Color, line_width: f32, surface: &Surface) {
    let (r, g, b) = rgb(color);
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(surface.len(line_width));
}

fn prepare_paint(content: &mut Content, paint: &Paint, surface: &Surface) {
    match *paint {
        Paint::Fill(color) => set_fill(content, color),
        Paint::Stroke { color, line_width } => set_stroke(content, color, line_width, surface),
        Paint::FillStroke {
            fill,
            stroke,
            line_width,
        } => {
            set_fill(content, fill);
            set_stroke(content, stroke, line_width, surface);
        }
    }
}

fn finish_paint(content: &mut Content, paint: &Paint) {
    match paint {
        Paint::Fill(_) => content.fill_nonzero(),
        Paint::Stroke { .. } => content.stroke(),
        Paint::FillStroke { .. } => content.fill_nonzero_and_stroke(),
    };
}

pub(super) fn draw_rect(content: &mut Content, surface: &Surface, rect: &Rect, paint: &Paint) {
    content.save_state();
    prepare_paint(content, paint, surface);
    content.rect(
        surface.x(rect.x),
        surface.y(rect.y + rect.height),
        surface.len(rect.width),
        surface.len(rect.height),
    );
    finish_paint(content, paint);
    content.restore_state();
}

/// Same rectangle with non-negative width and height.
fn normalized(rect: &Rect) -> Rect {
    Rect::new(
        rect.x.min(rect.x + rect.width),
        rect.y.min(rect.y + rect.height),
        rect.width.abs(),
        rect.height.abs(),
    )
}

pub(super) fn draw_rounded_rect(
    content: &mut Content,
    surface: &Surface,
    rect: &Rect,
    radius: f32,
    paint: &Paint,
) {
    let rect = &normalized(rect);
    let max_r = surface.len(rect.width.min(rect.height)) / 2.0;
    let r = if radius > 0.0 { surface.len(radius).min(max_r) } else { 0.0 };
    if !(r > 0.0) {
        draw_rect(content, surface, rect, paint);
        return;
    }
    let x0 = surface.x(rect.x);
    let x1 = surface.x(rect.x + rect.width);
    let y0 = surface.y(rect.y + rect.height);
    let y1 = surface.y(rect.y);
    let k = r * KAPPA;

    content.save_state();
    prepare_paint(content, paint, surface);
    content.move_to(x0 + r, y0);
    content.line_to(x1 - r, y0);
    content.cubic_to(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
    content.line_to(x1, y1 - r);
    content.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    content.line_to(x0 + r, y1);
    content.cubic_to(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
    content.line_to(x0, y0 + r);
    content.cubic_to(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
    content.close_path();
    finish_paint(content, paint);
    content.restore_state();
}

pub(super) fn draw_path(content: &mut Content, surface: &Surface, points: &[Point], paint: &Paint) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    content.save_state();
    prepare_paint(content, paint, surface);
    content.move_to(surface.x(first.x), surface.y(first.y));
    for p in rest {
        content.line_to(surface.x(p.x), surface.y(p.y));
    }
    if !matches!(paint, Paint::Stroke { .. }) {
        content.close_path();
    }
    finish_paint(content, paint);
    content.restore_state();
}

/// Left edge, in points, of a line whose anchor is `anchor_pt`.
fn line_start(anchor_pt: f32, width_pt: f32, align: Alignment) -> f32 {
    match align {
        Alignment::Left => anchor_pt,
        Alignment::Center => anchor_pt - width_pt / 2.0,
        Alignment::Right => anchor_pt - width_pt,
    }
}

/// Draw `text` with its anchor at `x` and first baseline at `y`. Embedded
/// newlines stack further lines below at [`LINE_HEIGHT_FACTOR`] spacing.
pub(super) fn draw_text(
    content: &mut Content,
    surface: &Surface,
    text: &str,
    x: f32,
    y: f32,
    style: &TextStyle,
    fonts: &BTreeMap<FontStyle, FontEntry>,
) {
    if text.is_empty() {
        return;
    }
    let Some(font) = fonts.get(&style.font_style) else {
        log::warn!("no font registered for {:?}, skipping text", style.font_style);
        return;
    };
    let line_pitch = style.font_size * LINE_HEIGHT_FACTOR;

    content.save_state();
    content.begin_text();
    set_fill(content, style.color);
    content.set_font(Name(font.pdf_name.as_bytes()), style.font_size);

    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;
    for (i, line) in text.split('\n').enumerate() {
        let width = text_width(line, style.font_style, style.font_size);
        let lx = line_start(surface.x(x), width, style.align);
        let ly = surface.y(y) - i as f32 * line_pitch;
        content.next_line(lx - td_x, ly - td_y);
        td_x = lx;
        td_y = ly;
        content.show(Str(&to_winansi_bytes(line)));
    }
    content.end_text();
    content.restore_state();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_samples_every_unit_and_closes() {
        let pts = wave_band(210.0, 45.0, 12.0);
        assert_eq!(pts.len(), 1 + 211 + 2);
        assert_eq!(pts[0], Point::new(0.0, 45.0));
        assert_eq!(pts[1], Point::new(0.0, 49.0));
        assert_eq!(pts[212], Point::new(210.0, 57.0));
        assert_eq!(pts[213], Point::new(0.0, 57.0));
        for p in &pts[1..212] {
            assert!(p.y >= 45.0 - 1e-3 && p.y <= 53.0 + 1e-3, "{p:?}");
        }
    }

    #[test]
    fn wave_has_four_humps() {
        let pts = wave_band(200.0, 0.0, 12.0);
        let at = |x: usize| pts[x + 1].y;
        // First crest at W/8, first trough at 3W/8.
        assert!((at(25) - 8.0).abs() < 1e-3, "crest {}", at(25));
        assert!(at(75).abs() < 1e-3, "trough {}", at(75));
        // Every 50 units the wave is back at its midline.
        for x in [0usize, 50, 100, 150, 200] {
            assert!((at(x) - 4.0).abs() < 1e-3, "x={x} y={}", at(x));
        }
    }

    #[test]
    fn wave_degenerate_width() {
        assert!(wave_band(0.0, 10.0, 12.0).is_empty());
        assert!(wave_band(f32::NAN, 10.0, 12.0).is_empty());
    }

    #[test]
    fn alignment_moves_line_start() {
        assert_eq!(line_start(100.0, 40.0, Alignment::Left), 100.0);
        assert_eq!(line_start(100.0, 40.0, Alignment::Center), 80.0);
        assert_eq!(line_start(100.0, 40.0, Alignment::Right), 60.0);
    }

    #[test]
    fn normalized_flips_negative_extents() {
        let r = normalized(&Rect::new(20.0, 60.0, 50.0, -12.0));
        assert_eq!(r, Rect::new(20.0, 48.0, 50.0, 12.0));
        let r = normalized(&Rect::new(20.0, 60.0, -5.0, 4.0));
        assert_eq!(r, Rect::new(15.0, 60.0, 5.0, 4.0));
    }
}
