mod layout;
mod table;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use pdf_writer::{Content, Filter, Name, Pdf, Rect as PdfRect, Ref, TextStr};

use crate::error::LayoutError;
use crate::fonts::{FontEntry, register_fonts};
use crate::model::{
    Color, DrawCommand, FontStyle, Page, Paint, Point, Rect, RowKind, TableSpec, TextStyle,
};

pub use layout::wave_band;

use layout::{Surface, draw_path, draw_rect, draw_rounded_rect, draw_text};
use table::{layout_table, table_primitives};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// Largest page side PDF viewers accept, in points (200 inches).
const MAX_PAGE_POINTS: f32 = 14_400.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
    /// PDF points per page unit.
    pub points_per_unit: f32,
}

impl PageSize {
    /// A4 portrait measured in millimetres.
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
        points_per_unit: MM,
    };

    fn validate(self) -> Result<Self, LayoutError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        let fits = |v: f32| v * self.points_per_unit <= MAX_PAGE_POINTS;
        if ok(self.width)
            && ok(self.height)
            && ok(self.points_per_unit)
            && fits(self.width)
            && fits(self.height)
        {
            Ok(self)
        } else {
            Err(LayoutError::InvalidPageSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// An in-memory drawing surface: an ordered list of pages, each an ordered
/// list of draw commands. Commands always target the last page.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    size: PageSize,
    pages: Vec<Page>,
    cursor: Point,
}

impl Document {
    pub fn new(size: PageSize) -> Result<Self, LayoutError> {
        let size = size.validate()?;
        Ok(Self {
            size,
            pages: vec![Page::default()],
            cursor: Point::new(0.0, 0.0),
        })
    }

    pub fn a4() -> Self {
        Self {
            size: PageSize::A4,
            pages: vec![Page::default()],
            cursor: Point::new(0.0, 0.0),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.size
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    /// Vertical cursor: the last table's `final_y`, or 0 on a fresh page.
    pub fn cursor_y(&self) -> f32 {
        self.cursor.y
    }

    fn set_cursor_y(&mut self, y: f32) {
        self.cursor.y = y;
    }

    fn push(&mut self, cmd: DrawCommand) {
        let last = self.pages.len() - 1;
        self.pages[last].commands.push(cmd);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.push(DrawCommand::FillRect {
            rect: Rect::new(x, y, w, h),
            color,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, line_width: f32) {
        self.push(DrawCommand::StrokeRect {
            rect: Rect::new(x, y, w, h),
            color,
            line_width,
        });
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, paint: Paint) {
        self.push(DrawCommand::RoundedRect {
            rect: Rect::new(x, y, w, h),
            radius,
            paint,
        });
    }

    pub fn text(&mut self, content: impl Into<String>, x: f32, y: f32, style: TextStyle) {
        self.push(DrawCommand::Text {
            content: content.into(),
            x,
            y,
            style,
        });
    }

    pub fn path(&mut self, points: Vec<Point>, paint: Paint) {
        self.push(DrawCommand::Path { points, paint });
    }

    /// Lay out a table; see [`TableSpec`]. Returns `final_y`.
    pub fn table(&mut self, spec: &TableSpec) -> Result<f32, LayoutError> {
        layout_table(self, spec)
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = Point::new(0.0, 0.0);
        log::debug!("new page {}", self.pages.len());
    }

    /// Serialize every page to PDF bytes. Consumes the document.
    pub fn finalize(self) -> Vec<u8> {
        render(&self.pages, self.size)
    }
}

fn fonts_used(cmd: &DrawCommand, out: &mut BTreeSet<FontStyle>) {
    match cmd {
        DrawCommand::Text { content, style, .. } if !content.is_empty() => {
            out.insert(style.font_style);
        }
        DrawCommand::Table(t) => {
            for row in &t.rows {
                if row.cells.iter().all(String::is_empty) {
                    continue;
                }
                let style = match row.kind {
                    RowKind::Head => &t.head_style,
                    RowKind::Body(_) => &t.body_style,
                };
                out.insert(style.font_style);
            }
        }
        _ => {}
    }
}

fn draw_command(
    content: &mut Content,
    surface: &Surface,
    cmd: &DrawCommand,
    fonts: &BTreeMap<FontStyle, FontEntry>,
) {
    match cmd {
        DrawCommand::FillRect { rect, color } => {
            draw_rect(content, surface, rect, &Paint::Fill(*color));
        }
        DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        } => {
            let paint = Paint::Stroke {
                color: *color,
                line_width: *line_width,
            };
            draw_rect(content, surface, rect, &paint);
        }
        DrawCommand::RoundedRect {
            rect,
            radius,
            paint,
        } => draw_rounded_rect(content, surface, rect, *radius, paint),
        DrawCommand::Text {
            content: text,
            x,
            y,
            style,
        } => draw_text(content, surface, text, *x, *y, style, fonts),
        DrawCommand::Path { points, paint } => draw_path(content, surface, points, paint),
        DrawCommand::Table(t) => {
            for prim in table_primitives(t, surface.scale()) {
                draw_command(content, surface, &prim, fonts);
            }
        }
    }
}

fn render(pages: &[Page], size: PageSize) -> Vec<u8> {
    let t0 = Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let mut used = BTreeSet::new();
    for cmd in pages.iter().flat_map(|p| p.commands.iter()) {
        fonts_used(cmd, &mut used);
    }
    let fonts = register_fonts(&mut pdf, used, &mut alloc);
    let t_fonts = t0.elapsed();

    let surface = Surface::new(size);
    let contents: Vec<Content> = pages
        .iter()
        .map(|page| {
            let mut content = Content::new();
            for cmd in &page.commands {
                draw_command(&mut content, &surface, cmd, &fonts);
            }
            content
        })
        .collect();
    let t_draw = t0.elapsed();

    let n = contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);
    pdf.document_info(info_id)
        .producer(TextStr(concat!("moneytree-invoice ", env!("CARGO_PKG_VERSION"))));

    let font_pairs: Vec<(&str, Ref)> = fonts
        .values()
        .map(|entry| (entry.pdf_name.as_str(), entry.font_ref))
        .collect();

    let media_box = PdfRect::new(
        0.0,
        0.0,
        size.width * size.points_per_unit,
        size.height * size.points_per_unit,
    );
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(media_box)
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (name, font_ref) in &font_pairs {
            font_dict.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    let t_assembly = t0.elapsed();
    log::info!(
        "Render phases: pages={}, fonts={:.1}ms, draw={:.1}ms, assembly={:.1}ms",
        n,
        t_fonts.as_secs_f64() * 1000.0,
        (t_draw - t_fonts).as_secs_f64() * 1000.0,
        (t_assembly - t_draw).as_secs_f64() * 1000.0,
    );

    pdf.finish()
}
