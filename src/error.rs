use thiserror::Error;

/// Configuration errors surfaced to the user.
///
/// Bad amount cells are not errors; they are coerced to
/// [`Amount::Missing`](crate::data::model::Amount) during normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// A required column is absent from the header row.
    #[error("Sheet '{sheet}' has no '{column}' column in header row {header_row}")]
    MissingColumn {
        sheet: String,
        column: &'static str,
        header_row: usize,
    },

    /// The sheet ends before its header row.
    #[error("Sheet '{sheet}' has {rows} row(s); expected a header at row {header_row}")]
    SheetTooShort {
        sheet: String,
        rows: usize,
        header_row: usize,
    },

    /// The requested month is not a sheet of the workbook.
    #[error("Workbook has no sheet named '{0}'")]
    UnknownSheet(String),

    /// A chart style outside Bar/Line/Area/Scatter.
    #[error("Unknown chart style '{0}' (expected bar, line, area or scatter)")]
    UnknownChartStyle(String),

    /// The file extension is not a supported spreadsheet format.
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
