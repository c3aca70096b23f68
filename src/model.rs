//! Page/draw-command model produced by the layout engine.
//!
//! Coordinates are page units with the origin at the top-left corner; y grows
//! downwards. Font sizes are in points regardless of the page unit.

pub type Color = [u8; 3];

pub const BLACK: Color = [0, 0, 0];
pub const WHITE: Color = [255, 255, 255];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_style: FontStyle,
    pub color: Color,
    pub align: Alignment,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_style: FontStyle::Normal,
            color: BLACK,
            align: Alignment::Left,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f32, font_style: FontStyle, color: Color) -> Self {
        Self {
            font_size,
            font_style,
            color,
            align: Alignment::Left,
        }
    }

    pub fn aligned(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, line_width: f32 },
    FillStroke {
        fill: Color,
        stroke: Color,
        line_width: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(m: f32) -> Self {
        Self {
            top: m,
            right: m,
            bottom: m,
            left: m,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub font_size: f32,
    pub font_style: FontStyle,
    pub text_color: Color,
    pub fill: Option<Color>,
    pub padding: f32,
    /// Overrides the column alignment when set.
    pub align: Option<Alignment>,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_style: FontStyle::Normal,
            text_color: BLACK,
            fill: None,
            padding: 2.0,
            align: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnStyle {
    pub width: f32,
    pub align: Alignment,
}

impl ColumnStyle {
    pub fn new(width: f32, align: Alignment) -> Self {
        Self { width, align }
    }
}

/// Input to [`Document::table`](crate::Document::table).
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    pub start_y: f32,
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
    pub columns: Vec<ColumnStyle>,
    pub head_style: CellStyle,
    pub body_style: CellStyle,
    /// Fill for every other body row, starting with the first.
    pub alternate_fill: Option<Color>,
    /// Page margins: left/right bound the table, bottom triggers a page
    /// break, top is where continuation pages resume.
    pub margin: Margins,
    pub min_row_height: f32,
    /// Gap added below the last row when reporting `final_y`.
    pub spacing_after: f32,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            start_y: 0.0,
            head: Vec::new(),
            body: Vec::new(),
            columns: Vec::new(),
            head_style: CellStyle::default(),
            body_style: CellStyle::default(),
            alternate_fill: None,
            margin: Margins::uniform(10.0),
            min_row_height: 0.0,
            spacing_after: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Head,
    /// Index into the table's body rows.
    Body(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRow {
    pub kind: RowKind,
    pub top: f32,
    pub height: f32,
    pub fill: Option<Color>,
    pub cells: Vec<String>,
}

/// The part of a table that landed on one page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTable {
    pub left: f32,
    pub columns: Vec<ColumnStyle>,
    pub head_style: CellStyle,
    pub body_style: CellStyle,
    pub rows: Vec<PlacedRow>,
    /// Cursor position below this segment, spacing included.
    pub final_y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
    /// `x` is the left, centre or right edge depending on `style.align`;
    /// `y` is the baseline.
    Text {
        content: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Path {
        points: Vec<Point>,
        paint: Paint,
    },
    Table(PlacedTable),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text run on the page in drawing order, table cells included.
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Text { content, .. } => out.push(content.as_str()),
                DrawCommand::Table(t) => {
                    for row in &t.rows {
                        out.extend(row.cells.iter().map(String::as_str));
                    }
                }
                _ => {}
            }
        }
        out
    }
}
