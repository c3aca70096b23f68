use crate::error::LayoutError;
use crate::model::{
    Alignment, CellStyle, DrawCommand, PlacedRow, PlacedTable, Rect, RowKind, TableSpec,
    TextStyle,
};

use super::Document;
use super::layout::LINE_HEIGHT_FACTOR;

/// Column widths may overshoot the usable width by this much (rounding).
const WIDTH_TOLERANCE: f32 = 0.01;
/// Helvetica cap height as a fraction of the font size.
const CAP_HEIGHT_RATIO: f32 = 0.718;

fn line_height(font_size: f32, scale: f32) -> f32 {
    font_size / scale * LINE_HEIGHT_FACTOR
}

fn row_height(cells: &[String], style: &CellStyle, min_row_height: f32, scale: f32) -> f32 {
    let lines = cells
        .iter()
        .map(|c| c.split('\n').count())
        .max()
        .unwrap_or(1)
        .max(1);
    let content = lines as f32 * line_height(style.font_size, scale) + 2.0 * style.padding;
    content.max(min_row_height)
}

fn check_geometry(spec: &TableSpec, page_width: f32) -> Result<(), LayoutError> {
    let usable = page_width - spec.margin.left - spec.margin.right;
    if usable < 0.0 {
        return Err(LayoutError::NegativeUsableWidth {
            page_width,
            left: spec.margin.left,
            right: spec.margin.right,
        });
    }
    let total: f32 = spec.columns.iter().map(|c| c.width).sum();
    if total > usable + WIDTH_TOLERANCE {
        return Err(LayoutError::ColumnsExceedWidth { total, usable });
    }
    let expected = spec.columns.len();
    if !spec.head.is_empty() && spec.head.len() != expected {
        return Err(LayoutError::HeadArity {
            expected,
            found: spec.head.len(),
        });
    }
    if let Some((row, cells)) = spec
        .body
        .iter()
        .enumerate()
        .find(|(_, cells)| cells.len() != expected)
    {
        return Err(LayoutError::RowArity {
            row,
            expected,
            found: cells.len(),
        });
    }
    Ok(())
}

/// Place `spec` on the document starting at `spec.start_y` on the current
/// page. Body rows that would cross the bottom margin continue on a new page
/// under a repeated header row. Returns the cursor below the last row plus
/// `spec.spacing_after`.
pub(super) fn layout_table(doc: &mut Document, spec: &TableSpec) -> Result<f32, LayoutError> {
    let size = doc.page_size();
    check_geometry(spec, size.width)?;

    let scale = size.points_per_unit;
    let head_h = if spec.head.is_empty() {
        0.0
    } else {
        row_height(&spec.head, &spec.head_style, spec.min_row_height, scale)
    };
    let body_heights: Vec<f32> = spec
        .body
        .iter()
        .map(|cells| row_height(cells, &spec.body_style, spec.min_row_height, scale))
        .collect();

    let bottom = size.height - spec.margin.bottom;
    let room = bottom - spec.margin.top;
    for (row, &h) in body_heights.iter().enumerate() {
        if head_h + h > room {
            return Err(LayoutError::RowTooTall {
                row,
                height: head_h + h,
                available: room,
            });
        }
    }

    let place_segment = |rows: Vec<PlacedRow>, final_y: f32| PlacedTable {
        left: spec.margin.left,
        columns: spec.columns.clone(),
        head_style: spec.head_style,
        body_style: spec.body_style,
        rows,
        final_y,
    };
    let head_row = |top: f32| PlacedRow {
        kind: RowKind::Head,
        top,
        height: head_h,
        fill: spec.head_style.fill,
        cells: spec.head.clone(),
    };

    let mut y = spec.start_y;
    let first_block = head_h + body_heights.first().copied().unwrap_or(0.0);
    if y + first_block > bottom && y > spec.margin.top {
        log::debug!("TABLE start_y={y:.2} leaves no room, starting on a new page");
        doc.new_page();
        y = spec.margin.top;
    }

    let mut segment: Vec<PlacedRow> = Vec::new();
    if !spec.head.is_empty() {
        segment.push(head_row(y));
        y += head_h;
    }

    for (i, (cells, &h)) in spec.body.iter().zip(body_heights.iter()).enumerate() {
        if y + h > bottom {
            log::debug!("TABLE row={i} breaks to a new page at y={y:.2}");
            doc.push(DrawCommand::Table(place_segment(std::mem::take(&mut segment), y)));
            doc.new_page();
            y = spec.margin.top;
            if !spec.head.is_empty() {
                segment.push(head_row(y));
                y += head_h;
            }
        }
        let fill = match spec.alternate_fill {
            Some(alt) if i % 2 == 0 => Some(alt),
            _ => spec.body_style.fill,
        };
        log::debug!("TABLE row={i} top={y:.2} h={h:.2}");
        segment.push(PlacedRow {
            kind: RowKind::Body(i),
            top: y,
            height: h,
            fill,
            cells: cells.clone(),
        });
        y += h;
    }

    let final_y = y + spec.spacing_after;
    doc.push(DrawCommand::Table(place_segment(segment, final_y)));
    doc.set_cursor_y(final_y);
    Ok(final_y)
}

/// Lower a placed table to fill rectangles and text runs.
pub(super) fn table_primitives(table: &PlacedTable, scale: f32) -> Vec<DrawCommand> {
    let total_width: f32 = table.columns.iter().map(|c| c.width).sum();
    let mut out = Vec::new();

    for row in &table.rows {
        if let Some(color) = row.fill {
            out.push(DrawCommand::FillRect {
                rect: Rect::new(table.left, row.top, total_width, row.height),
                color,
            });
        }

        let style = match row.kind {
            RowKind::Head => &table.head_style,
            RowKind::Body(_) => &table.body_style,
        };
        let font_h = style.font_size / scale;
        let baseline = row.top
            + style.padding
            + line_height(style.font_size, scale) / 2.0
            + font_h * CAP_HEIGHT_RATIO / 2.0;

        let mut cell_x = table.left;
        for (cell, column) in row.cells.iter().zip(table.columns.iter()) {
            let align = style.align.unwrap_or(column.align);
            let anchor = match align {
                Alignment::Left => cell_x + style.padding,
                Alignment::Center => cell_x + column.width / 2.0,
                Alignment::Right => cell_x + column.width - style.padding,
            };
            if !cell.is_empty() {
                out.push(DrawCommand::Text {
                    content: cell.clone(),
                    x: anchor,
                    y: baseline,
                    style: TextStyle {
                        font_size: style.font_size,
                        font_style: style.font_style,
                        color: style.text_color,
                        align,
                    },
                });
            }
            cell_x += column.width;
        }
    }
    out
}
