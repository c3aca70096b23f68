use thiserror::Error;

/// Geometry or configuration that the layout engine cannot place on a page.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid page size {width}x{height}")]
    InvalidPageSize { width: f32, height: f32 },

    #[error("margins {left}+{right} leave no usable width on a {page_width}-wide page")]
    NegativeUsableWidth { page_width: f32, left: f32, right: f32 },

    #[error("column widths sum to {total}, usable width is {usable}")]
    ColumnsExceedWidth { total: f32, usable: f32 },

    #[error("header has {found} cells, table has {expected} columns")]
    HeadArity { expected: usize, found: usize },

    #[error("row {row} has {found} cells, table has {expected} columns")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} is {height} tall, a page only has {available} between its margins")]
    RowTooTall { row: usize, height: f32, available: f32 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid ledger: {0}")]
    InvalidLedger(String),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("configuration error: {0}")]
    Config(String),
}
